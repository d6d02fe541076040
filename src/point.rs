//! The point entities that can be stored in a [`KDTree`][crate::kdtree::KDTree].

use std::fmt::{self, Debug, Display};

use geo_traits::{CoordTrait, Dimensions};
use num_traits::{Float, Zero};

use crate::r#type::IndexableNum;

/// A point-like entity of fixed dimensionality.
///
/// Every point stored in one tree must report the same [`dimension`][KdPoint::dimension]. The
/// [`Debug`] bound is used when describing points in errors and logs.
pub trait KdPoint: Debug {
    /// The scalar type of each coordinate.
    type Num: IndexableNum;

    /// The number of coordinates of this point.
    fn dimension(&self) -> usize;

    /// The coordinate along `axis`, where `axis < self.dimension()`.
    fn coordinate(&self, axis: usize) -> Self::Num;

    /// Euclidean distance to `other`.
    ///
    /// Implementations must be non-negative and symmetric, and return zero for coincident points.
    fn distance_to(&self, other: &Self) -> Self::Num {
        let mut sum = Self::Num::zero();
        for axis in 0..self.dimension() {
            let d = self.coordinate(axis) - other.coordinate(axis);
            sum = sum + d * d;
        }
        sum.sqrt()
    }
}

/// A point with an owned, runtime-sized list of coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct SimplePoint<N: IndexableNum> {
    coords: Vec<N>,
}

impl<N: IndexableNum> SimplePoint<N> {
    pub fn new(coords: Vec<N>) -> Self {
        Self { coords }
    }

    pub fn from_slice(coords: &[N]) -> Self {
        Self::new(coords.to_vec())
    }

    /// Copy every dimension of a coordinate from any [`CoordTrait`] implementation.
    pub fn from_coord(coord: &impl CoordTrait<T = N>) -> Self {
        let coords = (0..coord.dim().size())
            .map(|n| coord.nth_or_panic(n))
            .collect();
        Self { coords }
    }

    pub fn coords(&self) -> &[N] {
        &self.coords
    }

    pub fn into_inner(self) -> Vec<N> {
        self.coords
    }
}

impl<N: IndexableNum> From<Vec<N>> for SimplePoint<N> {
    fn from(coords: Vec<N>) -> Self {
        Self::new(coords)
    }
}

impl<N: IndexableNum, const D: usize> From<[N; D]> for SimplePoint<N> {
    fn from(coords: [N; D]) -> Self {
        Self::new(coords.to_vec())
    }
}

impl<N: IndexableNum> KdPoint for SimplePoint<N> {
    type Num = N;

    #[inline]
    fn dimension(&self) -> usize {
        self.coords.len()
    }

    #[inline]
    fn coordinate(&self, axis: usize) -> N {
        self.coords[axis]
    }
}

impl<N: IndexableNum> Display for SimplePoint<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_coords(f, self)
    }
}

impl<N: IndexableNum> CoordTrait for SimplePoint<N> {
    type T = N;

    fn dim(&self) -> Dimensions {
        match self.coords.len() {
            2 => Dimensions::Xy,
            3 => Dimensions::Xyz,
            n => Dimensions::Unknown(n),
        }
    }

    fn x(&self) -> Self::T {
        self.coords[0]
    }

    fn y(&self) -> Self::T {
        self.coords[1]
    }

    fn nth_or_panic(&self, n: usize) -> Self::T {
        self.coords[n]
    }
}

impl<N: IndexableNum, const D: usize> KdPoint for [N; D] {
    type Num = N;

    #[inline]
    fn dimension(&self) -> usize {
        D
    }

    #[inline]
    fn coordinate(&self, axis: usize) -> N {
        self[axis]
    }
}

#[cfg(feature = "use-geo_0_31")]
impl<N: IndexableNum> KdPoint for geo_0_31::Coord<N> {
    type Num = N;

    fn dimension(&self) -> usize {
        2
    }

    fn coordinate(&self, axis: usize) -> N {
        match axis {
            0 => self.x,
            1 => self.y,
            _ => panic!("axis {axis} out of range for a 2D coordinate"),
        }
    }
}

#[cfg(feature = "use-geo_0_31")]
impl<N: IndexableNum> KdPoint for geo_0_31::Point<N> {
    type Num = N;

    fn dimension(&self) -> usize {
        2
    }

    fn coordinate(&self, axis: usize) -> N {
        self.0.coordinate(axis)
    }
}

/// Write the coordinates of a point as `(x, y, ...)`.
pub(crate) fn write_coords<P: KdPoint>(f: &mut fmt::Formatter<'_>, point: &P) -> fmt::Result {
    write!(f, "(")?;
    for axis in 0..point.dimension() {
        if axis > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{:?}", point.coordinate(axis))?;
    }
    write!(f, ")")
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn euclidean_distance() {
        let a = SimplePoint::new(vec![1.0_f64, 1.0, 0.0]);
        let b = SimplePoint::new(vec![2.0, 0.0, 0.0]);
        assert_eq!(a.distance_to(&b), 2.0_f64.sqrt());
        assert_eq!(b.distance_to(&a), a.distance_to(&b));
        assert_eq!(a.distance_to(&a), 0.0);
    }

    #[test]
    fn converts_to_and_from_coordinates() {
        let p = SimplePoint::from([3.0_f64, 4.0, 5.0]);
        assert_eq!(p, SimplePoint::from_slice(&[3.0, 4.0, 5.0]));
        assert_eq!(p.into_inner(), vec![3.0, 4.0, 5.0]);
    }

    #[test]
    fn arrays_are_points() {
        let a = [0.0_f32, 3.0];
        let b = [4.0_f32, 0.0];
        assert_eq!(a.dimension(), 2);
        assert_eq!(a.distance_to(&b), 5.0);
    }

    #[test]
    fn displays_coordinates() {
        let p = SimplePoint::new(vec![1.0_f64, 0.5, -2.0]);
        assert_eq!(p.to_string(), "(1.0, 0.5, -2.0)");
    }

    #[test]
    fn copies_from_coord_trait() {
        let p = SimplePoint::from([3.0_f64, 4.0, 5.0]);
        assert_eq!(p.dim().size(), 3);
        let copy = SimplePoint::from_coord(&p);
        assert_eq!(copy, p);
    }
}
