// Life of a menu action:
// 1. A line comes in on stdin
// 2. The menu validates it into a batch ID, quantity or expiry date
// 3. The inventory calls into the ordered map:
//     - Insert rejects duplicates without touching the tree
//     - Find walks one root-to-leaf path
//     - Remove swaps in the in-order successor for two-child nodes
//    In AVL mode, insert and remove rebalance on the way back up
// 4. The result and the elapsed time are printed
//
// System components:
//  - Ordered map (BST or AVL)
//  - Medicine inventory on top of it
//  - Experiment harness and menu driver

pub mod config;
pub mod display;
pub mod experiment;
pub mod inventory;
pub mod menu;
pub mod tree;
pub mod types;

pub use inventory::{Inventory, Reporting};
pub use tree::{DuplicateKey, Mode, OrderedMap};
