//! Ordering of points by their distance to a fixed reference point.

use std::cmp::Ordering;

use crate::point::KdPoint;

/// Compares which of two points is closer to a reference point.
///
/// This is a total preorder: points at equal distance compare as [`Ordering::Equal`], so it
/// should be used with a stable sort such as [`slice::sort_by`]. Distances that don't compare
/// (NaN) are also treated as equal.
///
/// ```
/// use kd_index::{DistanceComparator, SimplePoint};
///
/// let reference = SimplePoint::new(vec![0., 0.]);
/// let mut points = vec![
///     SimplePoint::new(vec![3., 0.]),
///     SimplePoint::new(vec![1., 1.]),
///     SimplePoint::new(vec![0., 2.]),
/// ];
/// let comparator = DistanceComparator::new(&reference);
/// points.sort_by(|a, b| comparator.compare(a, b));
/// assert_eq!(points[0].coords(), &[1., 1.]);
/// assert_eq!(points[2].coords(), &[3., 0.]);
/// ```
#[derive(Debug)]
pub struct DistanceComparator<'a, P: KdPoint> {
    reference: &'a P,
}

impl<'a, P: KdPoint> DistanceComparator<'a, P> {
    pub fn new(reference: &'a P) -> Self {
        Self { reference }
    }

    /// The point that distances are measured from.
    pub fn reference(&self) -> &'a P {
        self.reference
    }

    /// Order `a` and `b` by ascending distance to the reference point.
    ///
    /// # Panics
    ///
    /// With the default [`KdPoint::distance_to`], panics if `a` or `b` has fewer dimensions than
    /// the reference point.
    pub fn compare(&self, a: &P, b: &P) -> Ordering {
        let dist_a = self.reference.distance_to(a);
        let dist_b = self.reference.distance_to(b);
        dist_a.partial_cmp(&dist_b).unwrap_or(Ordering::Equal)
    }
}

impl<P: KdPoint> Clone for DistanceComparator<'_, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: KdPoint> Copy for DistanceComparator<'_, P> {}
