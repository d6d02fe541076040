//! Utilities to traverse the KDTree structure.

use std::fmt::{self, Display};
use std::marker::PhantomData;

use tinyvec::TinyVec;

use crate::kdtree::KDTreeIndex;
use crate::point::{write_coords, KdPoint};

/// The data stored for one node of the tree arena.
///
/// Children are referenced by their position in [`KDTreeIndex::nodes`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeData<N> {
    /// A terminal node wrapping exactly one point.
    Leaf {
        /// Insertion index of the point in [`KDTreeIndex::items`].
        item: usize,
    },
    /// A splitting hyperplane.
    Internal {
        /// Coordinate of the hyperplane along `axis`.
        split: N,
        /// The split axis, `depth % dimension`.
        axis: usize,
        /// Subtree whose points have `coordinate(axis) <= split`.
        left: Option<usize>,
        /// Subtree whose points have `coordinate(axis) >= split`.
        right: Option<usize>,
    },
}

/// A node of a KDTree, borrowed from the tree for manual traversal.
#[derive(Debug)]
pub struct Node<'a, P: KdPoint, T: KDTreeIndex<P>> {
    /// The tree that this node is a reference onto
    tree: &'a T,
    id: usize,
    phantom: PhantomData<P>,
}

impl<'a, P: KdPoint, T: KDTreeIndex<P>> Node<'a, P, T> {
    pub(crate) fn from_root(tree: &'a T) -> Option<Self> {
        tree.root_id().map(|id| Self::new(tree, id))
    }

    fn new(tree: &'a T, id: usize) -> Self {
        Self {
            tree,
            id,
            phantom: PhantomData,
        }
    }

    /// The position of this node in [`KDTreeIndex::nodes`].
    pub fn id(&self) -> usize {
        self.id
    }

    /// The raw node data.
    #[inline]
    pub fn data(&self) -> NodeData<P::Num> {
        self.tree.nodes()[self.id]
    }

    /// Returns `true` if this is a leaf node without children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self.data(), NodeData::Leaf { .. })
    }

    /// Returns `true` if this is an intermediate node with children.
    #[inline]
    pub fn is_parent(&self) -> bool {
        !self.is_leaf()
    }

    /// The point wrapped by a leaf node.
    pub fn point(&self) -> Option<&'a P> {
        match self.data() {
            NodeData::Leaf { item } => Some(&self.tree_items()[item]),
            NodeData::Internal { .. } => None,
        }
    }

    /// The split coordinate of an intermediate node.
    pub fn split(&self) -> Option<P::Num> {
        match self.data() {
            NodeData::Internal { split, .. } => Some(split),
            NodeData::Leaf { .. } => None,
        }
    }

    /// The split axis of an intermediate node.
    pub fn axis(&self) -> Option<usize> {
        match self.data() {
            NodeData::Internal { axis, .. } => Some(axis),
            NodeData::Leaf { .. } => None,
        }
    }

    /// The child holding points on the low side of the split, if any.
    pub fn left_child(&self) -> Option<Node<'a, P, T>> {
        match self.data() {
            NodeData::Internal { left, .. } => left.map(|id| Self::new(self.tree, id)),
            NodeData::Leaf { .. } => None,
        }
    }

    /// The child holding points on the high side of the split, if any.
    pub fn right_child(&self) -> Option<Node<'a, P, T>> {
        match self.data() {
            NodeData::Internal { right, .. } => right.map(|id| Self::new(self.tree, id)),
            NodeData::Leaf { .. } => None,
        }
    }

    /// All points stored in the leaves below this node, left to right.
    pub fn leaves(&self) -> Vec<&'a P> {
        let items = self.tree_items();
        let nodes = self.tree.nodes();

        let mut stack: TinyVec<[usize; 33]> = TinyVec::new();
        stack.push(self.id);

        let mut result = vec![];
        while let Some(id) = stack.pop() {
            match nodes[id] {
                NodeData::Leaf { item } => result.push(&items[item]),
                NodeData::Internal { left, right, .. } => {
                    // pushed in backwards order to what gets popped
                    if let Some(right) = right {
                        stack.push(right);
                    }
                    if let Some(left) = left {
                        stack.push(left);
                    }
                }
            }
        }
        result
    }

    #[inline]
    fn tree_items(&self) -> &'a [P] {
        self.tree.items()
    }
}

impl<P: KdPoint, T: KDTreeIndex<P>> Clone for Node<'_, P, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: KdPoint, T: KDTreeIndex<P>> Copy for Node<'_, P, T> {}

/// Renders leaves as `(x, y, z)` and intermediate nodes as `[left |{split} right]`, with
/// `null` standing in for a missing child.
impl<P: KdPoint, T: KDTreeIndex<P>> Display for Node<'_, P, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.data() {
            NodeData::Leaf { item } => write_coords(f, &self.tree_items()[item]),
            NodeData::Internal { split, .. } => {
                write!(f, "[")?;
                fmt_child(f, self.left_child())?;
                write!(f, " |{{{:?}}} ", split)?;
                fmt_child(f, self.right_child())?;
                write!(f, "]")
            }
        }
    }
}

fn fmt_child<P: KdPoint, T: KDTreeIndex<P>>(
    f: &mut fmt::Formatter<'_>,
    child: Option<Node<'_, P, T>>,
) -> fmt::Result {
    match child {
        Some(node) => Display::fmt(&node, f),
        None => write!(f, "null"),
    }
}
