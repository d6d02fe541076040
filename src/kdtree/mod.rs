//! An implementation of an immutable, generic K-D Tree.

#![warn(missing_docs)]

mod best_set;
mod builder;
mod index;
mod r#trait;
mod traversal;

pub use builder::KDTreeBuilder;
pub use index::{KDTree, KDTreeRef};
pub use r#trait::KDTreeIndex;
pub use traversal::{Node, NodeData};
