use std::fmt::Debug;

use num_traits::float::TotalOrder;
use num_traits::Float;

/// A trait for types that can be used for indexed coordinates.
///
/// Every query in this crate measures Euclidean distance, so only floating point coordinates are
/// supported. [`TotalOrder`] gives the builder a deterministic ordering even for values that
/// don't compare under `PartialOrd`, which keeps the shape of a tree reproducible.
///
/// This trait is sealed and cannot be implemented for external types.
pub trait IndexableNum:
    private::Sealed + Float + TotalOrder + Default + Debug + Send + Sync + 'static
{
}

impl IndexableNum for f32 {}

impl IndexableNum for f64 {}

// https://rust-lang.github.io/api-guidelines/future-proofing.html#sealed-traits-protect-against-downstream-implementations-c-sealed
mod private {
    pub trait Sealed {}

    impl Sealed for f32 {}
    impl Sealed for f64 {}
}
