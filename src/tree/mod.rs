//! A generic tree-observation protocol and its adapter over the shape
//! hierarchy.
//!
//! Tree views (outliners, inspectors) speak [`TreeModel`] and
//! [`TreeModelListener`]. [`ShapeTreeAdapter`] listens to a
//! [`ShapeModel`](crate::ShapeModel) and republishes its structural changes
//! in that vocabulary, so views never depend on the shape types directly.

mod adapter;

pub use adapter::{ShapeTree, ShapeTreeAdapter};

/// Read access to a hierarchy of nodes
pub trait TreeModel<N> {
    fn root(&self) -> N;

    /// The child of `parent` at `index`, if there is one
    fn child(&self, parent: N, index: usize) -> Option<N>;

    fn child_count(&self, parent: N) -> usize;

    /// Position of `child` under `parent`, if it is a direct child
    fn index_of_child(&self, parent: N, child: N) -> Option<usize>;

    /// Whether `node` can never have children
    fn is_leaf(&self, node: N) -> bool;
}

/// Describes nodes inserted under, or removed from, the last node of `path`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeModelEvent<N> {
    /// Nodes from the root down to the parent whose children changed
    pub path: Vec<N>,
    /// Indices the affected children had under the parent, ascending
    pub child_indices: Vec<usize>,
    /// The affected children, matching `child_indices`
    pub children: Vec<N>,
}

impl<N> TreeModelEvent<N> {
    /// Event for a single child at `index`
    pub fn single(path: Vec<N>, index: usize, child: N) -> Self {
        Self {
            path,
            child_indices: vec![index],
            children: vec![child],
        }
    }
}

/// Observer of structural changes published through the tree protocol.
///
/// `tree` reflects the state after the change.
pub trait TreeModelListener<N> {
    fn tree_nodes_inserted(&self, tree: &dyn TreeModel<N>, event: &TreeModelEvent<N>);

    fn tree_nodes_removed(&self, tree: &dyn TreeModel<N>, event: &TreeModelEvent<N>);
}
