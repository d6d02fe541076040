//! Helpers shared by the test suites: random point sets and brute-force oracles.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::point::{KdPoint, SimplePoint};


pub(crate) const SEED: u64 = 435435435;

pub(crate) fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub(crate) fn rng() -> StdRng {
    StdRng::seed_from_u64(SEED)
}

/// `num_points` points with every coordinate drawn uniformly from `[min, max)`.
pub(crate) fn random_points(
    rng: &mut StdRng,
    num_points: usize,
    dimension: usize,
    min: f64,
    max: f64,
) -> Vec<SimplePoint<f64>> {
    (0..num_points)
        .map(|_| {
            let coords = (0..dimension).map(|_| rng.gen_range(min..max)).collect();
            SimplePoint::new(coords)
        })
        .collect()
}

/// The minimal distance from `query` to any of `points`, by linear scan.
pub(crate) fn brute_force_nearest<P: KdPoint>(points: &[P], query: &P) -> P::Num {
    points
        .iter()
        .map(|p| query.distance_to(p))
        .fold(None, |best: Option<P::Num>, d| match best {
            Some(b) if b <= d => Some(b),
            _ => Some(d),
        })
        .expect("at least one point")
}

/// Distances from `query` to all of `points`, ascending.
pub(crate) fn brute_force_sorted_distances<P: KdPoint>(points: &[P], query: &P) -> Vec<P::Num> {
    let mut distances: Vec<P::Num> = points.iter().map(|p| query.distance_to(p)).collect();
    distances.sort_by(|a, b| a.partial_cmp(b).unwrap());
    distances
}

/// Insertion indices of all points within `radius` of `query`.
pub(crate) fn brute_force_within<P: KdPoint>(
    points: &[P],
    query: &P,
    radius: P::Num,
) -> Vec<usize> {
    points
        .iter()
        .enumerate()
        .filter(|(_, p)| p.distance_to(query) <= radius)
        .map(|(i, _)| i)
        .collect()
}

/// Map references returned by a query back to insertion indices, sorted.
pub(crate) fn positions<P>(items: &[P], found: &[&P]) -> Vec<usize> {
    let mut result: Vec<usize> = found
        .iter()
        .map(|p| {
            items
                .iter()
                .position(|item| std::ptr::eq(item, *p))
                .expect("result points into the tree")
        })
        .collect();
    result.sort();
    result
}
