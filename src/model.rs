//! The shape hierarchy.
//!
//! A [`ShapeModel`] owns every shape in an arena and hands out [`ShapeId`]s.
//! Carriers refer to their children by id and children refer back to their
//! carrier by id, so the containment graph holds no ownership cycles. All
//! structural edits go through [`ShapeModel::add`] and
//! [`ShapeModel::remove`], which keep both directions of every link in step
//! and report each change on the model's [`EventBus`].
//!
//! # Example
//!
//! ```rust
//! use spaceshapes::{RecordingPainter, Shape, ShapeModel};
//!
//! let mut model = ShapeModel::with_world(500, 500);
//! let carrier = model.insert(Shape::carrier().at(10, 10).with_size(100, 100));
//! let oval = model.insert(Shape::oval());
//! model.add(model.root(), carrier).unwrap();
//! model.add(carrier, oval).unwrap();
//!
//! assert_eq!(model.path(oval), vec![model.root(), carrier, oval]);
//!
//! model.step(500, 500);
//! let mut painter = RecordingPainter::new();
//! model.paint_all(&mut painter);
//! ```

use std::rc::Rc;

use log::{debug, warn};

use crate::error::{Rejection, ShapeError, ShapeResult};
use crate::event::{EventBus, ShapeModelEvent, ShapeModelListener};
use crate::painter::{Painter, Translated};
use crate::shape::Shape;

/// Handle to a shape stored in a [`ShapeModel`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShapeId(usize);

impl ShapeId {
    pub(crate) const fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for ShapeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Arena of shapes plus the containment hierarchy rooted at one of them
#[derive(Debug)]
pub struct ShapeModel {
    shapes: Vec<Shape>,
    root: ShapeId,
    listeners: EventBus,
}

impl ShapeModel {
    /// Creates a model whose hierarchy is rooted at `root`
    pub fn new(root: Shape) -> Self {
        Self {
            shapes: vec![root],
            root: ShapeId(0),
            listeners: EventBus::new(),
        }
    }

    /// Creates a model rooted at a stationary carrier covering a
    /// `width` x `height` world.
    pub fn with_world(width: i32, height: i32) -> Self {
        Self::new(Shape::carrier().with_velocity(0, 0).with_size(width, height))
    }

    pub fn root(&self) -> ShapeId {
        self.root
    }

    /// Number of shapes stored, attached or not
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Takes ownership of a detached shape. The shape has no owner until a
    /// carrier adopts it with [`ShapeModel::add`].
    pub fn insert(&mut self, shape: Shape) -> ShapeId {
        let id = ShapeId(self.shapes.len());
        self.shapes.push(shape);
        id
    }

    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(id.index())
    }

    fn get(&self, id: ShapeId) -> ShapeResult<&Shape> {
        self.shape(id).ok_or(ShapeError::UnknownShape(id))
    }

    /// Iterates over every stored shape
    pub fn iter(&self) -> impl Iterator<Item = (ShapeId, &Shape)> + '_ {
        self.shapes
            .iter()
            .enumerate()
            .map(|(index, shape)| (ShapeId(index), shape))
    }

    /// Registers a listener for structural changes. Only a weak reference is
    /// kept.
    pub fn add_listener<L: ShapeModelListener + 'static>(&self, listener: &Rc<L>) {
        self.listeners.subscribe(listener);
    }

    pub fn remove_listener<L: ShapeModelListener + 'static>(&self, listener: &Rc<L>) -> bool {
        self.listeners.unsubscribe(listener)
    }

    /// Makes `child` the last child of `carrier`.
    ///
    /// Fails with [`ShapeError::InvalidOperation`] when `child` already has an
    /// owner, does not fit inside `carrier`, or would end up containing
    /// itself. On failure nothing changes.
    pub fn add(&mut self, carrier: ShapeId, child: ShapeId) -> ShapeResult<()> {
        if let Err(err) = self.check_add(carrier, child) {
            warn!("Rejected adding {} to {}: {}", child, carrier, err);
            return Err(err);
        }
        self.attach(carrier, child);
        Ok(())
    }

    /// Inserts `shape` and makes it the last child of `carrier` in one step.
    ///
    /// The shape only enters the arena when `carrier` accepts it; on
    /// rejection it is handed back together with the reason.
    pub fn adopt(&mut self, carrier: ShapeId, shape: Shape) -> Result<ShapeId, (ShapeError, Shape)> {
        let checked = self
            .get(carrier)
            .and_then(|target| check_fit(target, &shape));
        if let Err(err) = checked {
            warn!("Rejected adopting {} into {}: {}", shape, carrier, err);
            return Err((err, shape));
        }

        let child = self.insert(shape);
        self.attach(carrier, child);
        Ok(child)
    }

    fn check_add(&self, carrier: ShapeId, child: ShapeId) -> ShapeResult<()> {
        let target = self.get(carrier)?;
        let candidate = self.get(child)?;

        check_fit(target, candidate)?;
        if child == carrier || self.ancestors(carrier).any(|ancestor| ancestor == child) {
            return Err(Rejection::WouldCycle.into());
        }
        Ok(())
    }

    // Links an already validated child into its carrier.
    fn attach(&mut self, carrier: ShapeId, child: ShapeId) {
        let Some(children) = self.shapes[carrier.index()].children_mut() else {
            return;
        };
        children.push(child);
        let index = children.len() - 1;
        self.shapes[child.index()].set_owner(Some(carrier));

        debug!("Added {} to {} at index {}", child, carrier, index);
        self.listeners
            .emit(self, &ShapeModelEvent::added(carrier, child, index));
    }

    /// Detaches `child` from `carrier`. Does nothing when `child` is not a
    /// direct child of `carrier`.
    pub fn remove(&mut self, carrier: ShapeId, child: ShapeId) {
        let Some(index) = self.index_of(carrier, child) else {
            return;
        };
        if let Some(children) = self.shapes[carrier.index()].children_mut() {
            children.remove(index);
        }
        self.shapes[child.index()].set_owner(None);

        debug!("Removed {} from {} at index {}", child, carrier, index);
        self.listeners
            .emit(self, &ShapeModelEvent::removed(carrier, child, index));
    }

    /// The direct child of `carrier` at `index`
    pub fn child_at(&self, carrier: ShapeId, index: usize) -> ShapeResult<ShapeId> {
        let children = self.get(carrier)?.children();
        children.get(index).copied().ok_or(ShapeError::IndexOutOfRange {
            index,
            count: children.len(),
        })
    }

    /// Number of direct children; zero for shapes that are not carriers
    pub fn child_count(&self, carrier: ShapeId) -> usize {
        self.shape(carrier).map_or(0, |shape| shape.children().len())
    }

    /// Position of `child` among the direct children of `carrier`
    pub fn index_of(&self, carrier: ShapeId, child: ShapeId) -> Option<usize> {
        self.shape(carrier)?
            .children()
            .iter()
            .position(|&id| id == child)
    }

    /// Whether `child` is a direct child of `carrier`
    pub fn contains(&self, carrier: ShapeId, child: ShapeId) -> bool {
        self.index_of(carrier, child).is_some()
    }

    /// The carrier currently holding `id`
    pub fn owner(&self, id: ShapeId) -> Option<ShapeId> {
        self.shape(id)?.owner()
    }

    /// Walks owner links upwards, starting with the owner of `id`.
    fn ancestors(&self, id: ShapeId) -> impl Iterator<Item = ShapeId> + '_ {
        std::iter::successors(self.owner(id), move |&current| self.owner(current))
    }

    /// The chain of shapes from the top of `id`'s hierarchy down to `id`
    /// itself. An unowned shape yields just itself.
    pub fn path(&self, id: ShapeId) -> Vec<ShapeId> {
        let mut path: Vec<ShapeId> = self.ancestors(id).collect();
        path.reverse();
        path.push(id);
        path
    }

    /// Moves `id` inside a `width` x `height` box, then moves each of its
    /// children inside `id`'s own box, recursively.
    pub fn move_shape(&mut self, id: ShapeId, width: i32, height: i32) -> ShapeResult<()> {
        self.get(id)?;
        self.move_subtree(id, width, height);
        Ok(())
    }

    fn move_subtree(&mut self, id: ShapeId, width: i32, height: i32) {
        let shape = &mut self.shapes[id.index()];
        shape.move_within(width, height);
        let (inner_width, inner_height) = (shape.width(), shape.height());

        for index in 0..self.shapes[id.index()].children().len() {
            let child = self.shapes[id.index()].children()[index];
            self.move_subtree(child, inner_width, inner_height);
        }
    }

    /// Moves the whole hierarchy inside a `width` x `height` world
    pub fn step(&mut self, width: i32, height: i32) {
        self.move_subtree(self.root, width, height);
    }

    /// Paints `id`: its label first, if it has one, then its geometry, then,
    /// for a carrier, each child in its carrier's coordinate space.
    pub fn paint(&self, id: ShapeId, painter: &mut dyn Painter) -> ShapeResult<()> {
        self.paint_shape(self.get(id)?, painter);
        Ok(())
    }

    /// Paints the whole hierarchy
    pub fn paint_all(&self, painter: &mut dyn Painter) {
        self.paint_shape(&self.shapes[self.root.index()], painter);
    }

    fn paint_shape(&self, shape: &Shape, painter: &mut dyn Painter) {
        if let Some(text) = shape.text() {
            painter.draw_centred_text(shape.x(), shape.y(), shape.width(), shape.height(), text);
        }
        shape.render(painter);

        for &child in shape.children() {
            let mut painter = Translated::new(&mut *painter, shape.x(), shape.y());
            self.paint_shape(&self.shapes[child.index()], &mut *painter);
        }
    }
}

/// Checks that `target` can take `candidate` as a new child, ignoring
/// ancestry.
fn check_fit(target: &Shape, candidate: &Shape) -> ShapeResult<()> {
    if !target.is_carrier() {
        return Err(Rejection::NotACarrier.into());
    }
    if candidate.owner().is_some() {
        return Err(Rejection::AlreadyOwned.into());
    }
    if candidate.width() > target.width() {
        return Err(Rejection::TooWide {
            width: candidate.width(),
            limit: target.width(),
        }
        .into());
    }
    if candidate.height() > target.height() {
        return Err(Rejection::TooTall {
            height: candidate.height(),
            limit: target.height(),
        }
        .into());
    }
    Ok(())
}
