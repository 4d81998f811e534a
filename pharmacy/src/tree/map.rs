//! The ordered map shared by both tree modes.
//!
//! Navigation (search, insert, delete) is the same code in both modes.
//! Balanced mode additionally recomputes heights and rotates on the way
//! back up from every structural change.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::mem;

use crate::tree::balance::{self, Side};
use crate::tree::iter::Iter;
use crate::tree::node::{Link, Node};

/// How the tree keeps its shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Plain binary search tree. Height follows insertion order and
    /// degrades to a chain for sorted input.
    Bst,
    /// Height-balanced tree. Every node's balance factor stays in `[-1, 1]`.
    #[default]
    Avl,
}

impl Mode {
    /// Short uppercase name used in reports and prompts.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bst => "BST",
            Self::Avl => "AVL",
        }
    }

    fn rebalance_after_insert<K, V>(self, link: &mut Link<K, V>, below: Option<Side>) {
        if self == Self::Bst {
            return;
        }
        if let Some(node) = link.take() {
            *link = Some(balance::rebalance_after_insert(node, below));
        }
    }

    fn rebalance_after_remove<K, V>(self, link: &mut Link<K, V>) {
        if self == Self::Bst {
            return;
        }
        if let Some(node) = link.take() {
            *link = Some(balance::rebalance_after_remove(node));
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An ordered map backed by a binary search tree.
///
/// Keys are unique. Inserting an existing key is rejected with
/// [`DuplicateKey`] and leaves the map untouched; it never overwrites.
///
/// # Example
///
/// ```
/// use pharmacy::tree::OrderedMap;
///
/// let mut map = OrderedMap::avl();
/// map.insert("B303", 100)?;
/// map.insert("B101", 20)?;
/// map.insert("B505", 500)?;
///
/// assert_eq!(map.find("B101"), Some(&20));
/// assert!(map.insert("B101", 0).is_err());
///
/// let keys: Vec<_> = map.iter().map(|(k, _)| *k).collect();
/// assert_eq!(keys, ["B101", "B303", "B505"]);
/// # Ok::<(), pharmacy::tree::DuplicateKey<&str, i32>>(())
/// ```
pub struct OrderedMap<K, V> {
    root: Link<K, V>,
    len: usize,
    mode: Mode,
}

impl<K, V> OrderedMap<K, V> {
    /// Create an empty map that keeps its shape according to `mode`.
    #[must_use]
    pub const fn new(mode: Mode) -> Self {
        Self {
            root: None,
            len: 0,
            mode,
        }
    }

    /// Create an empty unbalanced map.
    #[must_use]
    pub const fn bst() -> Self {
        Self::new(Mode::Bst)
    }

    /// Create an empty height-balanced map.
    #[must_use]
    pub const fn avl() -> Self {
        Self::new(Mode::Avl)
    }

    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Number of entries in the map.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of nodes on the longest root-to-leaf path; 0 when empty.
    ///
    /// Measured from the structure, so it is exact in both modes.
    #[must_use]
    pub fn height(&self) -> usize {
        let mut deepest = 0;
        let mut stack: Vec<(&Node<K, V>, usize)> = Vec::new();
        stack.extend(self.root.as_deref().map(|root| (root, 1)));

        while let Some((node, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            stack.extend(node.left.as_deref().map(|child| (child, depth + 1)));
            stack.extend(node.right.as_deref().map(|child| (child, depth + 1)));
        }

        deepest
    }

    /// Iterate over all entries in ascending key order.
    ///
    /// Each call starts a new traversal from the smallest key.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self.root.as_deref(), self.len)
    }

    /// Iterate over keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(key, _)| key)
    }

    /// Remove every entry, leaving an empty map in the same mode.
    pub fn clear(&mut self) {
        let released = self.release_all();
        tracing::debug!(released, mode = %self.mode, "cleared ordered map");
    }

    pub(crate) fn root(&self) -> Option<&Node<K, V>> {
        self.root.as_deref()
    }

    /// Free every node children-first without recursing, so that a
    /// degenerate chain cannot exhaust the stack.
    fn release_all(&mut self) -> usize {
        let mut released = 0;
        let mut stack: Vec<Box<Node<K, V>>> = self.root.take().into_iter().collect();

        while let Some(mut node) = stack.pop() {
            let left = node.left.take();
            let right = node.right.take();
            if left.is_none() && right.is_none() {
                drop(node);
                released += 1;
            } else {
                // Revisit the parent after both children are gone.
                stack.push(node);
                stack.extend(right);
                stack.extend(left);
            }
        }

        self.len = 0;
        released
    }
}

impl<K: Ord, V> OrderedMap<K, V> {
    /// Insert a new entry.
    ///
    /// # Errors
    ///
    /// Returns [`DuplicateKey`], carrying back the rejected key and value,
    /// if `key` is already present. The map is not modified in that case.
    pub fn insert(&mut self, key: K, value: V) -> Result<(), DuplicateKey<K, V>> {
        match insert_node(&mut self.root, key, value, self.mode) {
            Ok(_) => {
                self.len += 1;
                Ok(())
            }
            Err((key, value)) => Err(DuplicateKey { key, value }),
        }
    }

    /// Look up the value stored under `key`.
    pub fn find<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match key.cmp(node.key.borrow()) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return Some(&node.value),
            };
        }
        None
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).is_some()
    }

    /// Remove `key`, returning whether it was present.
    ///
    /// Removing an absent key is a no-op.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.remove_entry(key).is_some()
    }

    /// Remove `key` and hand back the entry that was stored under it.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let removed = remove_node(&mut self.root, key, self.mode)?;
        self.len -= 1;
        Some(removed)
    }
}

/// Insert below `link`, returning the side taken at the node that `link`
/// held, or `None` if `link` was empty and now holds the new leaf.
///
/// On a duplicate the key and value are handed back before anything on
/// the path has been touched.
fn insert_node<K: Ord, V>(
    link: &mut Link<K, V>,
    key: K,
    value: V,
    mode: Mode,
) -> Result<Option<Side>, (K, V)> {
    let node = match link {
        Some(node) => node,
        None => {
            *link = Some(Node::leaf(key, value));
            return Ok(None);
        }
    };

    let side = match key.cmp(&node.key) {
        Ordering::Less => Side::Left,
        Ordering::Greater => Side::Right,
        Ordering::Equal => return Err((key, value)),
    };
    let child = match side {
        Side::Left => &mut node.left,
        Side::Right => &mut node.right,
    };

    let below = insert_node(child, key, value, mode)?;
    mode.rebalance_after_insert(link, below);
    Ok(Some(side))
}

/// Remove `key` from the subtree under `link`.
fn remove_node<K, V, Q>(link: &mut Link<K, V>, key: &Q, mode: Mode) -> Option<(K, V)>
where
    K: Borrow<Q> + Ord,
    Q: Ord + ?Sized,
{
    let ordering = key.cmp(link.as_ref()?.key.borrow());

    let removed = match ordering {
        Ordering::Less => remove_node(&mut link.as_mut()?.left, key, mode)?,
        Ordering::Greater => remove_node(&mut link.as_mut()?.right, key, mode)?,
        Ordering::Equal => {
            let mut node = link.take()?;
            match (node.left.take(), node.right.take()) {
                (Some(left), Some(right)) => {
                    // Keep this node in place and move the in-order
                    // successor's entry into it.
                    let (rest, successor) = take_min(right, mode);
                    let Node {
                        key: next_key,
                        value: next_value,
                        ..
                    } = *successor;
                    node.left = Some(left);
                    node.right = rest;
                    let removed_key = mem::replace(&mut node.key, next_key);
                    let removed_value = mem::replace(&mut node.value, next_value);
                    *link = Some(node);
                    (removed_key, removed_value)
                }
                (child, None) | (None, child) => {
                    *link = child;
                    let Node {
                        key: removed_key,
                        value: removed_value,
                        ..
                    } = *node;
                    (removed_key, removed_value)
                }
            }
        }
    };

    mode.rebalance_after_remove(link);
    Some(removed)
}

/// Detach the leftmost node of `node`'s subtree.
///
/// Returns the remaining subtree and the detached node.
fn take_min<K, V>(mut node: Box<Node<K, V>>, mode: Mode) -> (Link<K, V>, Box<Node<K, V>>) {
    let Some(left) = node.left.take() else {
        let rest = node.right.take();
        return (rest, node);
    };

    let (rest, min) = take_min(left, mode);
    node.left = rest;
    let mut link = Some(node);
    mode.rebalance_after_remove(&mut link);
    (link, min)
}

impl<K, V> Drop for OrderedMap<K, V> {
    fn drop(&mut self) {
        self.release_all();
    }
}

impl<K, V> Default for OrderedMap<K, V> {
    fn default() -> Self {
        Self::new(Mode::default())
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for OrderedMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, K, V> IntoIterator for &'a OrderedMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Error returned when inserting a key that is already present.
///
/// The rejected key and value are handed back to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateKey<K, V> {
    pub key: K,
    pub value: V,
}

impl<K: fmt::Debug, V> fmt::Display for DuplicateKey<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "key {:?} already exists", self.key)
    }
}

impl<K: fmt::Debug, V: fmt::Debug> std::error::Error for DuplicateKey<K, V> {}
