use std::cell::RefCell;
use std::rc::{Rc, Weak};

use log::debug;

use super::{TreeModel, TreeModelEvent, TreeModelListener};
use crate::event::{ShapeEventKind, ShapeModelEvent, ShapeModelListener};
use crate::model::{ShapeId, ShapeModel};

/// The shape hierarchy seen through [`TreeModel`].
///
/// Carriers are branches, every other shape is a leaf.
#[derive(Debug, Clone, Copy)]
pub struct ShapeTree<'a> {
    model: &'a ShapeModel,
}

impl<'a> ShapeTree<'a> {
    pub fn new(model: &'a ShapeModel) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &'a ShapeModel {
        self.model
    }
}

impl TreeModel<ShapeId> for ShapeTree<'_> {
    fn root(&self) -> ShapeId {
        self.model.root()
    }

    fn child(&self, parent: ShapeId, index: usize) -> Option<ShapeId> {
        self.model.child_at(parent, index).ok()
    }

    fn child_count(&self, parent: ShapeId) -> usize {
        self.model.child_count(parent)
    }

    fn index_of_child(&self, parent: ShapeId, child: ShapeId) -> Option<usize> {
        self.model.index_of(parent, child)
    }

    fn is_leaf(&self, node: ShapeId) -> bool {
        self.model.shape(node).is_some_and(|shape| !shape.is_carrier())
    }
}

/// Republishes [`ShapeModelEvent`]s as tree insertions and removals.
///
/// Subscribe it to a model with
/// [`ShapeModel::add_listener`](crate::ShapeModel::add_listener). Tree
/// listeners are held weakly and notified in registration order. Changes
/// inside subtrees that are not attached to the model's root are not
/// republished, since their paths cannot be resolved from the tree root.
#[derive(Default)]
pub struct ShapeTreeAdapter {
    listeners: RefCell<Vec<Weak<dyn TreeModelListener<ShapeId>>>>,
}

impl std::fmt::Debug for ShapeTreeAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShapeTreeAdapter")
            .field("listeners", &format!("<{} listeners>", self.listeners.borrow().len()))
            .finish()
    }
}

impl ShapeTreeAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an adapter already listening to `model`
    pub fn observe(model: &ShapeModel) -> Rc<Self> {
        let adapter = Rc::new(Self::new());
        model.add_listener(&adapter);
        adapter
    }

    pub fn add_tree_model_listener<L: TreeModelListener<ShapeId> + 'static>(&self, listener: &Rc<L>) {
        let weak = Rc::downgrade(listener);
        let weak: Weak<dyn TreeModelListener<ShapeId>> = weak;
        self.listeners.borrow_mut().push(weak);
    }

    /// Removes a listener, matched by identity. Returns whether it was
    /// registered.
    pub fn remove_tree_model_listener<L: TreeModelListener<ShapeId> + 'static>(
        &self,
        listener: &Rc<L>,
    ) -> bool {
        let target = Rc::as_ptr(listener);
        let mut listeners = self.listeners.borrow_mut();
        match listeners.iter().position(|weak| std::ptr::addr_eq(weak.as_ptr(), target)) {
            Some(index) => {
                listeners.remove(index);
                true
            }
            None => false,
        }
    }

    /// Number of registered listeners that are still alive
    pub fn listener_count(&self) -> usize {
        self.listeners
            .borrow()
            .iter()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }
}

impl ShapeModelListener for ShapeTreeAdapter {
    fn update(&self, model: &ShapeModel, event: &ShapeModelEvent) {
        let path = model.path(event.parent());
        if path.first() != Some(&model.root()) {
            debug!("Ignoring change under {}, which is not attached to the root", event.parent());
            return;
        }
        let tree = ShapeTree::new(model);
        let tree_event = TreeModelEvent::single(path, event.index(), event.child());
        debug!(
            "Republishing {:?} of {} under {} as a tree event",
            event.kind(),
            event.child(),
            event.parent()
        );

        let live: Vec<_> = {
            let mut listeners = self.listeners.borrow_mut();
            listeners.retain(|weak| weak.strong_count() > 0);
            listeners.iter().filter_map(Weak::upgrade).collect()
        };
        for listener in live {
            match event.kind() {
                ShapeEventKind::Added => listener.tree_nodes_inserted(&tree, &tree_event),
                ShapeEventKind::Removed => listener.tree_nodes_removed(&tree, &tree_event),
            }
        }
    }
}
