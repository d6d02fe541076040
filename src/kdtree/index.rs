use std::fmt::{self, Display};

use crate::error::Result;
use crate::kdtree::{KDTreeBuilder, KDTreeIndex, NodeData};
use crate::point::KdPoint;

/// An owned KDTree.
///
/// Usually this will be created from scratch via [`KDTreeBuilder`] or [`KDTree::try_new`]. The
/// tree is immutable: queries take `&self`, so a finished tree can be shared between threads
/// and queried concurrently without locking.
#[derive(Debug, Clone, PartialEq)]
pub struct KDTree<P: KdPoint> {
    /// Points in insertion order.
    pub(crate) items: Vec<P>,
    /// Node arena, laid out depth-first with the root at position 0.
    pub(crate) nodes: Vec<NodeData<P::Num>>,
    pub(crate) root: Option<usize>,
    pub(crate) dimension: usize,
}

impl<P: KdPoint> KDTree<P> {
    /// Build a tree from a collection of points of uniform dimension.
    pub fn try_new(points: Vec<P>) -> Result<Self> {
        KDTreeBuilder::from(points).finish()
    }

    /// Consume the tree, returning the points in insertion order.
    pub fn into_inner(self) -> Vec<P> {
        self.items
    }

    /// A cheap, copyable view onto this tree.
    pub fn as_ref(&self) -> KDTreeRef<'_, P> {
        KDTreeRef {
            items: &self.items,
            nodes: &self.nodes,
            root: self.root,
            dimension: self.dimension,
        }
    }

    /// The number of points in this tree.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the tree holds no points.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<P: KdPoint> Display for KDTree<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.root() {
            Some(root) => Display::fmt(&root, f),
            None => write!(f, "null"),
        }
    }
}

/// A reference onto the contents of a [`KDTree`].
///
/// Usually this will be created from a [`KDTree`] via its [`as_ref`][KDTree::as_ref] method.
#[derive(Debug)]
pub struct KDTreeRef<'a, P: KdPoint> {
    pub(crate) items: &'a [P],
    pub(crate) nodes: &'a [NodeData<P::Num>],
    pub(crate) root: Option<usize>,
    pub(crate) dimension: usize,
}

impl<P: KdPoint> Clone for KDTreeRef<'_, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: KdPoint> Copy for KDTreeRef<'_, P> {}

impl<P: KdPoint> Display for KDTreeRef<'_, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.root() {
            Some(root) => Display::fmt(&root, f),
            None => write!(f, "null"),
        }
    }
}
