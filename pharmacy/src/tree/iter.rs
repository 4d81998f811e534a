//! Lazy in-order traversal.

use std::iter::FusedIterator;

use crate::tree::node::Node;

/// Iterator over map entries in ascending key order.
///
/// Created by [`OrderedMap::iter`](super::OrderedMap::iter). The iterator
/// keeps an explicit stack of the left spine still to be visited, so it
/// never recurses and yields each entry in amortized O(1). A clone
/// continues from the same position; call `iter()` again for a fresh pass.
pub struct Iter<'a, K, V> {
    stack: Vec<&'a Node<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(root: Option<&'a Node<K, V>>, len: usize) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            remaining: len,
        };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut link: Option<&'a Node<K, V>>) {
        while let Some(node) = link {
            self.stack.push(node);
            link = node.left.as_deref();
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        self.remaining = self.remaining.saturating_sub(1);
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_iterator() {
        let mut iter = Iter::<i32, ()>::new(None, 0);
        assert_eq!(iter.len(), 0);
        assert!(iter.next().is_none());
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_visits_left_self_right() {
        let mut root = Node::leaf(2, 'b');
        root.left = Some(Node::leaf(1, 'a'));
        let mut right = Node::leaf(4, 'd');
        right.left = Some(Node::leaf(3, 'c'));
        root.right = Some(right);

        let iter = Iter::new(Some(&*root), 4);
        assert_eq!(iter.len(), 4);

        let collected: Vec<_> = iter.map(|(k, v)| (*k, *v)).collect();
        assert_eq!(collected, vec![(1, 'a'), (2, 'b'), (3, 'c'), (4, 'd')]);
    }

    #[test]
    fn test_clone_continues_from_same_position() {
        let mut root = Node::leaf(2, ());
        root.left = Some(Node::leaf(1, ()));
        root.right = Some(Node::leaf(3, ()));

        let mut iter = Iter::new(Some(&*root), 3);
        assert_eq!(iter.next().map(|(k, _)| *k), Some(1));

        let rest: Vec<i32> = iter.clone().map(|(k, _)| *k).collect();
        assert_eq!(rest, vec![2, 3]);
        assert_eq!(iter.len(), 2);
    }
}
