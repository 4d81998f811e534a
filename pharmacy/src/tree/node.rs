//! Tree nodes and the height bookkeeping used by the balancing layer.

/// An owned, optional child subtree.
///
/// Every node is reachable through exactly one `Link`, so moving a `Box`
/// between links is how subtrees change hands during rotations.
pub type Link<K, V> = Option<Box<Node<K, V>>>;

/// A single key-value entry in the tree.
///
/// `height` is 1 for a leaf and `1 + max(height(left), height(right))`
/// otherwise. It is only kept current in balanced mode; unbalanced trees
/// never read it.
#[derive(Debug)]
pub struct Node<K, V> {
    pub key: K,
    pub value: V,
    pub left: Link<K, V>,
    pub right: Link<K, V>,
    pub height: i32,
}

impl<K, V> Node<K, V> {
    /// Create a detached leaf.
    pub fn leaf(key: K, value: V) -> Box<Self> {
        Box::new(Self {
            key,
            value,
            left: None,
            right: None,
            height: 1,
        })
    }

    /// Recompute this node's height from its children.
    ///
    /// Pre-condition: both children already carry correct heights.
    pub fn update_height(&mut self) {
        let left = height(self.left.as_deref());
        let right = height(self.right.as_deref());
        self.height = 1 + left.max(right);
    }

    /// Left subtree height minus right subtree height.
    #[must_use]
    pub fn balance_factor(&self) -> i32 {
        height(self.left.as_deref()) - height(self.right.as_deref())
    }
}

/// Height of an optional subtree; an absent child has height 0.
#[must_use]
pub const fn height<K, V>(node: Option<&Node<K, V>>) -> i32 {
    match node {
        Some(node) => node.height,
        None => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_has_height_one() {
        let leaf = Node::leaf("B1", ());
        assert_eq!(leaf.height, 1);
        assert_eq!(leaf.balance_factor(), 0);
        assert_eq!(height(Some(&*leaf)), 1);
        assert_eq!(height::<&str, ()>(None), 0);
    }

    #[test]
    fn test_update_height_uses_taller_child() {
        let mut root = Node::leaf("B5", ());
        let mut left = Node::leaf("B3", ());
        left.left = Some(Node::leaf("B1", ()));
        left.update_height();
        root.left = Some(left);
        root.right = Some(Node::leaf("B8", ()));
        root.update_height();

        assert_eq!(root.height, 3);
        assert_eq!(root.balance_factor(), 1);
    }
}
