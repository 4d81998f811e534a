//! AVL rotations and the rebalancing procedures run while unwinding.
//!
//! Both procedures take ownership of a subtree root and return the root
//! that should replace it in the parent's link. A rotation only moves
//! boxes between links, so the in-order key sequence never changes.

use crate::tree::node::Node;

/// Which child an insertion descended into below a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Rotate `node` right, promoting its left child.
///
/// ```text
///       y            x
///      / \          / \
///     x   C  ==>   A   y
///    / \              / \
///   A   B            B   C
/// ```
///
/// A node without a left child is returned unchanged.
pub fn rotate_right<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    let Some(mut pivot) = node.left.take() else {
        return node;
    };
    node.left = pivot.right.take();
    // Child first: the pivot's height depends on the demoted node.
    node.update_height();
    pivot.right = Some(node);
    pivot.update_height();
    pivot
}

/// Rotate `node` left, promoting its right child. Mirror of [`rotate_right`].
pub fn rotate_left<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    let Some(mut pivot) = node.right.take() else {
        return node;
    };
    node.right = pivot.left.take();
    node.update_height();
    pivot.left = Some(node);
    pivot.update_height();
    pivot
}

/// Restore balance at `node` after an insertion below it.
///
/// `below` is the side the insertion took inside the child that was
/// descended into, i.e. whether the new key is smaller or larger than that
/// child's key. `None` means the child itself is the new leaf, which can
/// never unbalance its parent.
pub fn rebalance_after_insert<K, V>(
    mut node: Box<Node<K, V>>,
    below: Option<Side>,
) -> Box<Node<K, V>> {
    node.update_height();
    let balance = node.balance_factor();

    match below {
        // Left-left
        Some(Side::Left) if balance > 1 => {
            tracing::trace!("insert rebalance: right rotation");
            rotate_right(node)
        }
        // Right-right
        Some(Side::Right) if balance < -1 => {
            tracing::trace!("insert rebalance: left rotation");
            rotate_left(node)
        }
        // Left-right
        Some(Side::Right) if balance > 1 => {
            tracing::trace!("insert rebalance: left-right rotation");
            node.left = node.left.take().map(rotate_left);
            rotate_right(node)
        }
        // Right-left
        Some(Side::Left) if balance < -1 => {
            tracing::trace!("insert rebalance: right-left rotation");
            node.right = node.right.take().map(rotate_right);
            rotate_left(node)
        }
        _ => node,
    }
}

/// Restore balance at `node` after a removal below it.
///
/// A removal says nothing about where the remaining long path runs, so the
/// heavy child's own balance factor picks the single or double rotation.
pub fn rebalance_after_remove<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    node.update_height();
    let balance = node.balance_factor();

    if balance > 1 {
        let child_balance = node.left.as_deref().map_or(0, Node::balance_factor);
        if child_balance < 0 {
            tracing::trace!("remove rebalance: left-right rotation");
            node.left = node.left.take().map(rotate_left);
        } else {
            tracing::trace!("remove rebalance: right rotation");
        }
        return rotate_right(node);
    }

    if balance < -1 {
        let child_balance = node.right.as_deref().map_or(0, Node::balance_factor);
        if child_balance > 0 {
            tracing::trace!("remove rebalance: right-left rotation");
            node.right = node.right.take().map(rotate_right);
        } else {
            tracing::trace!("remove rebalance: left rotation");
        }
        return rotate_left(node);
    }

    node
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys_in_order(node: &Node<i32, ()>, out: &mut Vec<i32>) {
        if let Some(left) = node.left.as_deref() {
            keys_in_order(left, out);
        }
        out.push(node.key);
        if let Some(right) = node.right.as_deref() {
            keys_in_order(right, out);
        }
    }

    /// Build the chain 3 -> 2 -> 1 hanging off left links.
    fn left_chain() -> Box<Node<i32, ()>> {
        let mut two = Node::leaf(2, ());
        two.left = Some(Node::leaf(1, ()));
        two.update_height();
        let mut three = Node::leaf(3, ());
        three.left = Some(two);
        three.update_height();
        three
    }

    #[test]
    fn test_rotate_right_promotes_left_child() {
        let root = rotate_right(left_chain());

        assert_eq!(root.key, 2);
        assert_eq!(root.height, 2);
        assert_eq!(root.left.as_ref().map(|n| n.key), Some(1));
        assert_eq!(root.right.as_ref().map(|n| n.key), Some(3));
        assert_eq!(root.right.as_ref().map(|n| n.height), Some(1));

        let mut keys = Vec::new();
        keys_in_order(&root, &mut keys);
        assert_eq!(keys, vec![1, 2, 3]);
    }

    #[test]
    fn test_rotate_left_promotes_right_child() {
        let mut two = Node::leaf(2, ());
        two.right = Some(Node::leaf(3, ()));
        two.update_height();
        let mut one = Node::leaf(1, ());
        one.right = Some(two);
        one.update_height();

        let root = rotate_left(one);
        assert_eq!(root.key, 2);
        assert_eq!(root.balance_factor(), 0);
    }

    #[test]
    fn test_rotation_without_pivot_is_identity() {
        let leaf = rotate_right(Node::leaf(7, ()));
        assert_eq!(leaf.key, 7);
        let leaf = rotate_left(leaf);
        assert_eq!(leaf.key, 7);
    }

    #[test]
    fn test_insert_left_right_case_uses_double_rotation() {
        // 3 with left child 1, and 2 inserted to the right of 1.
        let mut one = Node::leaf(1, ());
        one.right = Some(Node::leaf(2, ()));
        one.update_height();
        let mut three = Node::leaf(3, ());
        three.left = Some(one);

        let root = rebalance_after_insert(three, Some(Side::Right));
        assert_eq!(root.key, 2);
        assert_eq!(root.height, 2);

        let mut keys = Vec::new();
        keys_in_order(&root, &mut keys);
        assert_eq!(keys, vec![1, 2, 3]);
    }

    #[test]
    fn test_insert_rebalance_leaves_balanced_node_alone() {
        let mut root = Node::leaf(2, ());
        root.left = Some(Node::leaf(1, ()));
        let root = rebalance_after_insert(root, None);
        assert_eq!(root.key, 2);
        assert_eq!(root.height, 2);
    }

    #[test]
    fn test_remove_rebalance_single_rotation_when_child_even() {
        // Left child with two children (balance 0) under a root whose
        // right side was just removed.
        let mut two = Node::leaf(2, ());
        two.left = Some(Node::leaf(1, ()));
        two.right = Some(Node::leaf(3, ()));
        two.update_height();
        let mut four = Node::leaf(4, ());
        four.left = Some(two);

        let root = rebalance_after_remove(four);
        assert_eq!(root.key, 2);
        assert_eq!(root.balance_factor(), -1);
        assert_eq!(root.height, 3);
    }

    #[test]
    fn test_remove_rebalance_double_rotation_when_child_leans_inward() {
        let mut one = Node::leaf(1, ());
        one.right = Some(Node::leaf(2, ()));
        one.update_height();
        let mut three = Node::leaf(3, ());
        three.left = Some(one);

        let root = rebalance_after_remove(three);
        assert_eq!(root.key, 2);
        assert_eq!(root.balance_factor(), 0);
    }
}
