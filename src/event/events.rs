use crate::model::ShapeId;

/// What happened to the hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeEventKind {
    Added,
    Removed,
}

/// A single structural change: `child` was added to or removed from
/// `parent` at `index`.
///
/// For removals the index is the position the child held just before it
/// was taken out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeModelEvent {
    kind: ShapeEventKind,
    parent: ShapeId,
    child: ShapeId,
    index: usize,
}

impl ShapeModelEvent {
    pub fn added(parent: ShapeId, child: ShapeId, index: usize) -> Self {
        Self {
            kind: ShapeEventKind::Added,
            parent,
            child,
            index,
        }
    }

    pub fn removed(parent: ShapeId, child: ShapeId, index: usize) -> Self {
        Self {
            kind: ShapeEventKind::Removed,
            parent,
            child,
            index,
        }
    }

    pub fn kind(&self) -> ShapeEventKind {
        self.kind
    }

    /// The carrier whose children changed
    pub fn parent(&self) -> ShapeId {
        self.parent
    }

    /// The shape that was added or removed
    pub fn child(&self) -> ShapeId {
        self.child
    }

    pub fn index(&self) -> usize {
        self.index
    }
}
