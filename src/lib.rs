#![doc = include_str!("../README.md")]

mod distance;
mod error;
pub mod kdtree;
mod point;
mod r#type;

pub use distance::DistanceComparator;
pub use error::{KdIndexError, Result};
pub use point::{KdPoint, SimplePoint};
pub use r#type::IndexableNum;

#[cfg(test)]
pub(crate) mod test;
