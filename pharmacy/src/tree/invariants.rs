//! Structural invariant checking.
//!
//! Walks the whole tree and reports every place where it breaks one of:
//! - keys strictly ascend in order
//! - the stored entry count matches the number of nodes
//! - (balanced mode) each node's recorded height matches its subtree
//! - (balanced mode) each node's balance factor lies in `[-1, 1]`

use std::fmt;

use crate::tree::map::{Mode, OrderedMap};
use crate::tree::node::Node;

/// A detected invariant violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violation.
    pub description: String,
    /// In-order position of the offending node, or the node count for
    /// whole-tree checks.
    pub position: usize,
    /// Additional context.
    pub context: String,
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at position {}", self.description, self.position)?;
        if !self.context.is_empty() {
            write!(f, " ({})", self.context)?;
        }
        Ok(())
    }
}

impl<K: Ord, V> OrderedMap<K, V> {
    /// Check every structural invariant, returning all violations found.
    ///
    /// Recurses once per level, so cost is O(n) time and O(height) stack.
    #[must_use]
    pub fn check_invariants(&self) -> Vec<InvariantViolation> {
        let mut checker = InvariantChecker::new(self.mode());
        checker.visit(self.root());

        if checker.position != self.len() {
            checker.violations.push(InvariantViolation {
                description: "Entry count does not match node count".to_string(),
                position: checker.position,
                context: format!("len: {}, nodes: {}", self.len(), checker.position),
            });
        }

        checker.violations
    }
}

struct InvariantChecker<'a, K> {
    mode: Mode,
    position: usize,
    previous: Option<&'a K>,
    violations: Vec<InvariantViolation>,
}

impl<'a, K: Ord> InvariantChecker<'a, K> {
    const fn new(mode: Mode) -> Self {
        Self {
            mode,
            position: 0,
            previous: None,
            violations: Vec::new(),
        }
    }

    /// Visit a subtree in order and return its measured height.
    fn visit<V>(&mut self, node: Option<&'a Node<K, V>>) -> i32 {
        let Some(node) = node else {
            return 0;
        };

        let left = self.visit(node.left.as_deref());

        let position = self.position;
        if self.previous.is_some_and(|previous| *previous >= node.key) {
            self.violations.push(InvariantViolation {
                description: "Key not greater than its in-order predecessor".to_string(),
                position,
                context: String::new(),
            });
        }
        self.previous = Some(&node.key);
        self.position += 1;

        let right = self.visit(node.right.as_deref());
        let measured = 1 + left.max(right);

        if self.mode == Mode::Avl {
            if node.height != measured {
                self.violations.push(InvariantViolation {
                    description: "Stale height".to_string(),
                    position,
                    context: format!("recorded: {}, measured: {measured}", node.height),
                });
            }
            let balance = left - right;
            if !(-1..=1).contains(&balance) {
                self.violations.push(InvariantViolation {
                    description: "Balance factor out of range".to_string(),
                    position,
                    context: format!("balance: {balance}"),
                });
            }
        }

        measured
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_tree_is_consistent() {
        assert!(OrderedMap::<u8, ()>::avl().check_invariants().is_empty());
        assert!(OrderedMap::<u8, ()>::bst().check_invariants().is_empty());
    }

    #[test]
    fn test_bst_chain_passes_without_balance_checks() {
        let mut map = OrderedMap::bst();
        for i in 0..50 {
            map.insert(i, ()).expect("insert");
        }
        assert_eq!(map.height(), 50);
        assert!(map.check_invariants().is_empty());
    }

    #[test]
    fn test_violation_display() {
        let violation = InvariantViolation {
            description: "Stale height".to_string(),
            position: 3,
            context: "recorded: 1, measured: 2".to_string(),
        };
        assert_eq!(
            violation.to_string(),
            "Stale height at position 3 (recorded: 1, measured: 2)"
        );

        let bare = InvariantViolation {
            description: "Key not greater than its in-order predecessor".to_string(),
            position: 0,
            context: String::new(),
        };
        assert_eq!(
            bare.to_string(),
            "Key not greater than its in-order predecessor at position 0"
        );
    }

    #[test]
    fn test_detects_out_of_order_and_imbalance() {
        // Hand-built: 1 -> left 2 (wrong side) -> left 3, heights left at 1.
        let mut middle = Node::leaf(2, ());
        middle.left = Some(Node::leaf(3, ()));
        let mut root = Node::leaf(1, ());
        root.left = Some(middle);

        let mut checker = InvariantChecker::new(Mode::Avl);
        let measured = checker.visit(Some(&*root));
        assert_eq!(measured, 3);

        let descriptions: Vec<&str> = checker
            .violations
            .iter()
            .map(|v| v.description.as_str())
            .collect();
        assert!(descriptions.contains(&"Key not greater than its in-order predecessor"));
        assert!(descriptions.contains(&"Stale height"));
        assert!(descriptions.contains(&"Balance factor out of range"));
    }
}
