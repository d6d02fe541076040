use std::cmp::Ordering;

use num_traits::float::TotalOrder;
use tinyvec::TinyVec;

use crate::error::{KdIndexError, Result};
use crate::kdtree::{KDTree, NodeData};
use crate::point::KdPoint;

/// A builder to create a [`KDTree`].
///
/// ```
/// use kd_index::kdtree::{KDTreeBuilder, KDTreeIndex};
/// use kd_index::SimplePoint;
///
/// let mut builder = KDTreeBuilder::with_capacity(3);
/// builder.add(SimplePoint::new(vec![1., 1., 0.]));
/// builder.add(SimplePoint::new(vec![0., 1., 1.]));
/// builder.add(SimplePoint::new(vec![1., 0., 1.]));
/// let tree = builder.finish().unwrap();
///
/// assert_eq!(tree.num_items(), 3);
/// assert_eq!(tree.dimension(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct KDTreeBuilder<P: KdPoint> {
    items: Vec<P>,
}

/// Where a freshly created node gets linked into the arena.
#[derive(Debug, Clone, Copy, Default)]
enum Parent {
    #[default]
    Root,
    Left(usize),
    Right(usize),
}

/// A pending subtree: the points in `order[start..end]` at the given depth.
#[derive(Debug, Clone, Copy, Default)]
struct Task {
    start: usize,
    end: usize,
    depth: usize,
    parent: Parent,
}

impl<P: KdPoint> KDTreeBuilder<P> {
    /// Create a new, empty builder.
    pub fn new() -> Self {
        Self { items: vec![] }
    }

    /// Create a new builder with room for `num_items` points.
    pub fn with_capacity(num_items: usize) -> Self {
        Self {
            items: Vec::with_capacity(num_items),
        }
    }

    /// Add a point to the index, returning its insertion index.
    pub fn add(&mut self, point: P) -> usize {
        let index = self.items.len();
        self.items.push(point);
        index
    }

    /// Add every point of an iterator to the index.
    pub fn add_all(&mut self, points: impl IntoIterator<Item = P>) {
        self.items.extend(points);
    }

    /// The number of points added so far.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if no point has been added yet.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Consume this builder, performing the median split and generating a KDTree ready for
    /// queries.
    ///
    /// Fails with [`KdIndexError::EmptyInput`] if no point was added and with
    /// [`KdIndexError::DimensionMismatch`] if the points don't share one dimension.
    pub fn finish(self) -> Result<KDTree<P>> {
        let items = self.items;
        let dimension = check_dimensions(&items)?;

        // the tree gets built on a permutation of the insertion indices
        let mut order: Vec<usize> = (0..items.len()).collect();
        let mut nodes: Vec<NodeData<P::Num>> = Vec::with_capacity(2 * items.len() - 1);

        // Use TinyVec to avoid heap allocations
        let mut stack: TinyVec<[Task; 33]> = TinyVec::new();
        stack.push(Task {
            start: 0,
            end: items.len(),
            depth: 0,
            parent: Parent::Root,
        });

        while let Some(task) = stack.pop() {
            let id = nodes.len();
            link(&mut nodes, task.parent, id);

            let subset = &mut order[task.start..task.end];
            if subset.len() == 1 {
                nodes.push(NodeData::Leaf { item: subset[0] });
                continue;
            }

            // select the median along the split axis so that [..m] lies at or below it and
            // [m..] at or above it
            let axis = task.depth % dimension;
            let m = subset.len() / 2;
            subset.select_nth_unstable_by(m, |&a, &b| cmp_on_axis(&items, axis, a, b));
            let split = items[subset[m]].coordinate(axis);

            nodes.push(NodeData::Internal {
                split,
                axis,
                left: None,
                right: None,
            });

            // Note: these are pushed in backwards order to what gets popped, so that the left
            // subtree directly follows its parent in the arena
            let m = task.start + m;
            stack.push(Task {
                start: m,
                end: task.end,
                depth: task.depth + 1,
                parent: Parent::Right(id),
            });
            stack.push(Task {
                start: task.start,
                end: m,
                depth: task.depth + 1,
                parent: Parent::Left(id),
            });
        }

        log::debug!(
            "built KDTree with {} items of dimension {} ({} nodes)",
            items.len(),
            dimension,
            nodes.len()
        );

        Ok(KDTree {
            items,
            nodes,
            root: Some(0),
            dimension,
        })
    }
}

impl<P: KdPoint> Default for KDTreeBuilder<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: KdPoint> From<Vec<P>> for KDTreeBuilder<P> {
    fn from(items: Vec<P>) -> Self {
        Self { items }
    }
}

impl<P: KdPoint> Extend<P> for KDTreeBuilder<P> {
    fn extend<I: IntoIterator<Item = P>>(&mut self, iter: I) {
        self.add_all(iter)
    }
}

/// Validate that there is at least one point and that all points share one dimension, which is
/// returned.
fn check_dimensions<P: KdPoint>(items: &[P]) -> Result<usize> {
    let first = items.first().ok_or(KdIndexError::EmptyInput)?;
    let expected = first.dimension();
    if expected == 0 {
        return Err(KdIndexError::InvalidArgument(
            "Points must have at least one dimension.".to_string(),
        ));
    }

    for (index, item) in items.iter().enumerate().skip(1) {
        let found = item.dimension();
        if found != expected {
            return Err(KdIndexError::DimensionMismatch {
                expected,
                found,
                index,
            });
        }
    }
    Ok(expected)
}

/// Order two points by their coordinate on `axis`, falling back to insertion order so that
/// duplicates land deterministically on one side of the median.
#[inline]
fn cmp_on_axis<P: KdPoint>(items: &[P], axis: usize, a: usize, b: usize) -> Ordering {
    let ca = items[a].coordinate(axis);
    let cb = items[b].coordinate(axis);
    ca.total_cmp(&cb).then(a.cmp(&b))
}

#[inline]
fn link<N>(nodes: &mut [NodeData<N>], parent: Parent, id: usize) {
    match parent {
        Parent::Root => {}
        Parent::Left(p) => {
            if let NodeData::Internal { left, .. } = &mut nodes[p] {
                *left = Some(id);
            }
        }
        Parent::Right(p) => {
            if let NodeData::Internal { right, .. } = &mut nodes[p] {
                *right = Some(id);
            }
        }
    }
}
