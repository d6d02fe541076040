use geo_traits::CoordTrait;
use num_traits::{Float, Zero};
#[cfg(feature = "rayon")]
use rayon::prelude::*;
use tinyvec::TinyVec;

use crate::distance::DistanceComparator;
use crate::error::{KdIndexError, Result};
use crate::kdtree::best_set::BestSet;
use crate::kdtree::{KDTree, KDTreeRef, Node, NodeData};
use crate::point::{KdPoint, SimplePoint};
use crate::r#type::IndexableNum;

/// A trait for searching and accessing data out of a KDTree.
///
/// ```
/// use kd_index::kdtree::{KDTree, KDTreeIndex};
/// use kd_index::SimplePoint;
///
/// let tree = KDTree::try_new(vec![
///     SimplePoint::new(vec![1., 1., 0.]),
///     SimplePoint::new(vec![0., 1., 1.]),
///     SimplePoint::new(vec![5., 5., 5.]),
/// ])
/// .unwrap();
///
/// let query = SimplePoint::new(vec![0., 2., 1.]);
/// assert_eq!(tree.nearest(&query).unwrap().coords(), &[0., 1., 1.]);
///
/// let two = tree.k_nearest(&query, 2).unwrap();
/// assert_eq!(two[1].coords(), &[1., 1., 0.]);
///
/// let close = tree.within(&query, 2., true).unwrap();
/// assert_eq!(close.len(), 2);
/// ```
pub trait KDTreeIndex<P: KdPoint>: Sized {
    /// The points of this tree in insertion order.
    fn items(&self) -> &[P];

    /// The node arena of this tree.
    fn nodes(&self) -> &[NodeData<P::Num>];

    /// Position of the root in [`nodes`][KDTreeIndex::nodes], `None` for a tree without nodes.
    fn root_id(&self) -> Option<usize>;

    /// The dimension shared by every point of this tree.
    fn dimension(&self) -> usize;

    /// The number of items in this KDTree
    fn num_items(&self) -> usize {
        self.items().len()
    }

    /// Find the point closest to `query`.
    ///
    /// If several points are at the minimal distance, the first one found wins; which one that
    /// is depends only on the tree, so repeated queries return the same point.
    fn nearest(&self, query: &P) -> Result<&P> {
        self.nearest_with_distance(query).map(|(point, _)| point)
    }

    /// Find the point closest to `query`, along with its distance.
    fn nearest_with_distance(&self, query: &P) -> Result<(&P, P::Num)> {
        let root = query_root(self, query)?;
        let items = self.items();
        let nodes = self.nodes();

        // Use TinyVec to avoid heap allocations
        let mut stack: TinyVec<[Step<P::Num>; 33]> = TinyVec::new();
        stack.push(Step::Visit(root));

        let mut best: Option<(usize, P::Num)> = None;
        let mut pruned = 0usize;

        while let Some(step) = stack.pop() {
            let node_id = match step {
                Step::Visit(node_id) => node_id,
                Step::Far { node_id, plane } => {
                    // the far side can only hold a closer point if the best distance found on
                    // the near side reaches across the splitting plane
                    if matches!(best, Some((_, distance)) if distance <= plane) {
                        pruned += 1;
                        continue;
                    }
                    node_id
                }
                Step::Empty => continue,
            };

            match nodes[node_id] {
                NodeData::Leaf { item } => {
                    let distance = query.distance_to(&items[item]);
                    if best.map_or(true, |(_, best_distance)| distance < best_distance) {
                        best = Some((item, distance));
                    }
                }
                NodeData::Internal {
                    split,
                    axis,
                    left,
                    right,
                } => descend(&mut stack, query.coordinate(axis), split, left, right),
            }
        }

        log::trace!("nearest: pruned {} subtrees", pruned);

        best.map(|(item, distance)| (&items[item], distance))
            .ok_or(KdIndexError::EmptyTree)
    }

    /// Find the `k` points closest to `query`, nearest first.
    ///
    /// If the tree holds fewer than `k` points, all of them are returned. Fails with
    /// [`KdIndexError::InvalidArgument`] if `k` is zero.
    fn k_nearest(&self, query: &P, k: usize) -> Result<Vec<&P>> {
        Ok(self
            .k_nearest_with_distances(query, k)?
            .into_iter()
            .map(|(point, _)| point)
            .collect())
    }

    /// Find the `k` points closest to `query` along with their distances, nearest first.
    fn k_nearest_with_distances(&self, query: &P, k: usize) -> Result<Vec<(&P, P::Num)>> {
        if k == 0 {
            return Err(KdIndexError::InvalidArgument(
                "k must be at least 1.".to_string(),
            ));
        }
        let root = query_root(self, query)?;
        let items = self.items();
        let nodes = self.nodes();

        let mut stack: TinyVec<[Step<P::Num>; 33]> = TinyVec::new();
        stack.push(Step::Visit(root));

        let mut best = BestSet::new(k, items.len());
        let mut pruned = 0usize;

        while let Some(step) = stack.pop() {
            let node_id = match step {
                Step::Visit(node_id) => node_id,
                Step::Far { node_id, plane } => {
                    // no pruning is possible until k candidates are kept
                    if best.bound().is_some_and(|worst| worst <= plane) {
                        pruned += 1;
                        continue;
                    }
                    node_id
                }
                Step::Empty => continue,
            };

            match nodes[node_id] {
                NodeData::Leaf { item } => {
                    best.insert(query.distance_to(&items[item]), item);
                }
                NodeData::Internal {
                    split,
                    axis,
                    left,
                    right,
                } => descend(&mut stack, query.coordinate(axis), split, left, right),
            }
        }

        log::trace!("k_nearest: k = {}, pruned {} subtrees", k, pruned);

        Ok(best
            .into_sorted()
            .into_iter()
            .map(|(distance, item)| (&items[item], distance))
            .collect())
    }

    /// Search the index for points within a given radius of `query`.
    ///
    /// A point is included if its distance to `query` is at most `radius`, so a radius of zero
    /// returns only points coincident with `query`. If `sorted` is set, results are ordered by
    /// ascending distance with ties in traversal order; otherwise they are in traversal order.
    ///
    /// Fails with [`KdIndexError::InvalidArgument`] if `radius` is negative or NaN.
    fn within(&self, query: &P, radius: P::Num, sorted: bool) -> Result<Vec<&P>> {
        if radius.is_nan() || radius < P::Num::zero() {
            return Err(KdIndexError::InvalidArgument(format!(
                "radius must be non-negative, got {:?}.",
                radius
            )));
        }
        let root = query_root(self, query)?;
        let items = self.items();
        let nodes = self.nodes();

        let mut stack: TinyVec<[Step<P::Num>; 33]> = TinyVec::new();
        stack.push(Step::Visit(root));

        let mut result: Vec<&P> = vec![];

        // recursively search for items within radius
        while let Some(step) = stack.pop() {
            let node_id = match step {
                Step::Visit(node_id) => node_id,
                // the other side of the splitting plane may hold more points within the radius
                Step::Far { node_id, plane } if plane <= radius => node_id,
                Step::Far { .. } | Step::Empty => continue,
            };

            match nodes[node_id] {
                NodeData::Leaf { item } => {
                    if items[item].distance_to(query) <= radius {
                        result.push(&items[item]);
                    }
                }
                NodeData::Internal {
                    split,
                    axis,
                    left,
                    right,
                } => descend(&mut stack, query.coordinate(axis), split, left, right),
            }
        }

        if sorted {
            let comparator = DistanceComparator::new(query);
            result.sort_by(|a, b| comparator.compare(a, b));
        }

        Ok(result)
    }

    /// Search the index for points within a given radius, in traversal order.
    fn within_unsorted(&self, query: &P, radius: P::Num) -> Result<Vec<&P>> {
        self.within(query, radius, false)
    }

    /// Search the index for points within a given radius, nearest first.
    fn within_sorted(&self, query: &P, radius: P::Num) -> Result<Vec<&P>> {
        self.within(query, radius, true)
    }

    /// Find the nearest point for each of `queries`.
    ///
    /// With the `rayon` feature the queries run in parallel.
    fn nearest_many(&self, queries: &[P]) -> Result<Vec<&P>>
    where
        Self: Sync,
        P: Sync,
    {
        #[cfg(feature = "rayon")]
        {
            queries.par_iter().map(|query| self.nearest(query)).collect()
        }

        #[cfg(not(feature = "rayon"))]
        {
            queries.iter().map(|query| self.nearest(query)).collect()
        }
    }

    /// Find the `k` nearest points for each of `queries`.
    ///
    /// With the `rayon` feature the queries run in parallel.
    fn k_nearest_many(&self, queries: &[P], k: usize) -> Result<Vec<Vec<&P>>>
    where
        Self: Sync,
        P: Sync,
    {
        #[cfg(feature = "rayon")]
        {
            queries
                .par_iter()
                .map(|query| self.k_nearest(query, k))
                .collect()
        }

        #[cfg(not(feature = "rayon"))]
        {
            queries.iter().map(|query| self.k_nearest(query, k)).collect()
        }
    }

    /// Find the point closest to a coordinate.
    fn nearest_coord(&self, coord: &impl CoordTrait<T = P::Num>) -> Result<&P>
    where
        P: From<SimplePoint<P::Num>>,
    {
        self.nearest(&P::from(SimplePoint::from_coord(coord)))
    }

    /// Find the `k` points closest to a coordinate, nearest first.
    fn k_nearest_coord(&self, coord: &impl CoordTrait<T = P::Num>, k: usize) -> Result<Vec<&P>>
    where
        P: From<SimplePoint<P::Num>>,
    {
        self.k_nearest(&P::from(SimplePoint::from_coord(coord)), k)
    }

    /// Search the index for points within a given radius of a coordinate.
    fn within_coord(
        &self,
        coord: &impl CoordTrait<T = P::Num>,
        radius: P::Num,
        sorted: bool,
    ) -> Result<Vec<&P>>
    where
        P: From<SimplePoint<P::Num>>,
    {
        self.within(&P::from(SimplePoint::from_coord(coord)), radius, sorted)
    }

    /// Access the root node of the KDTree for manual traversal.
    fn root(&self) -> Option<Node<'_, P, Self>> {
        Node::from_root(self)
    }
}

impl<P: KdPoint> KDTreeIndex<P> for KDTree<P> {
    fn items(&self) -> &[P] {
        &self.items
    }

    fn nodes(&self) -> &[NodeData<P::Num>] {
        &self.nodes
    }

    fn root_id(&self) -> Option<usize> {
        self.root
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

impl<P: KdPoint> KDTreeIndex<P> for KDTreeRef<'_, P> {
    fn items(&self) -> &[P] {
        self.items
    }

    fn nodes(&self) -> &[NodeData<P::Num>] {
        self.nodes
    }

    fn root_id(&self) -> Option<usize> {
        self.root
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

/// A pending unit of work in a depth-first search.
#[derive(Debug, Clone, Copy, Default)]
enum Step<N> {
    /// Visit this node unconditionally.
    Visit(usize),
    /// The far side of a split, visited only if it can still hold a result. `plane` is the
    /// distance from the query to the splitting plane.
    Far { node_id: usize, plane: N },
    // Placeholder required by TinyVec's inline storage; never pushed.
    #[default]
    Empty,
}

/// Queue the children of an intermediate node.
///
/// With both children present, the side of the splitting plane containing the query is
/// searched first and the other side is queued as a [`Step::Far`] behind it. A lone child is
/// searched unconditionally.
#[inline]
fn descend<N: IndexableNum>(
    stack: &mut TinyVec<[Step<N>; 33]>,
    query_coord: N,
    split: N,
    left: Option<usize>,
    right: Option<usize>,
) {
    match (left, right) {
        (Some(left), Some(right)) => {
            let projected = split - query_coord;
            let (near, far) = if projected < N::zero() {
                (right, left)
            } else {
                (left, right)
            };
            // Note: these are pushed in backwards order to what gets popped
            stack.push(Step::Far {
                node_id: far,
                plane: projected.abs(),
            });
            stack.push(Step::Visit(near));
        }
        (Some(child), None) | (None, Some(child)) => stack.push(Step::Visit(child)),
        (None, None) => {}
    }
}

/// Validate a query against the tree, returning the root to start the search from.
fn query_root<P: KdPoint, T: KDTreeIndex<P>>(tree: &T, query: &P) -> Result<usize> {
    let root = tree.root_id().ok_or(KdIndexError::EmptyTree)?;
    if query.dimension() != tree.dimension() {
        return Err(KdIndexError::InvalidArgument(format!(
            "query has {} dimensions, tree has {}.",
            query.dimension(),
            tree.dimension()
        )));
    }
    Ok(root)
}
