//! In-memory ordered map with an unbalanced and a height-balanced mode.
//!
//! # Structure
//!
//! Every node exclusively owns its two optional children, and the map owns
//! the root. There are no parent pointers: insert and remove recurse down
//! one path and hand the (possibly new) subtree root back up, which is
//! where balanced mode recomputes heights and rotates.
//!
//! - [`Mode::Bst`]: plain binary search tree, O(n) worst case.
//! - [`Mode::Avl`]: AVL tree, height at most ~1.44·log₂(n + 2).
//!
//! # Usage
//!
//! ```
//! use pharmacy::tree::{Mode, OrderedMap};
//!
//! let mut map = OrderedMap::new(Mode::Avl);
//! for key in ["B5", "B3", "B8", "B1", "B4", "B7", "B9"] {
//!     map.insert(key.to_string(), ()).expect("unique keys");
//! }
//!
//! assert!(map.check_invariants().is_empty());
//! assert_eq!(map.height(), 3);
//! assert!(map.remove("B5"));
//! assert!(!map.remove("B5"));
//! ```

mod balance;
mod invariants;
mod iter;
mod map;
mod node;

pub use invariants::InvariantViolation;
pub use iter::Iter;
pub use map::{DuplicateKey, Mode, OrderedMap};
