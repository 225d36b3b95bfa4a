//! Shapes: positioned, moving, paintable boxes.
//!
//! A [`Shape`] carries its geometry, velocity and optional label; its
//! [`ShapeKind`] decides how the box is drawn. Shapes are built detached and
//! handed to a [`ShapeModel`](crate::ShapeModel), which owns them from then on
//! and links them into carriers.

mod dynamic;

use std::fmt;

use egui::{Color32, TextureId};

use crate::model::ShapeId;
use crate::painter::Painter;

pub use dynamic::DynamicStyle;

// Defaults for shapes built without explicit geometry
pub const DEFAULT_X: i32 = 0;
pub const DEFAULT_Y: i32 = 0;
pub const DEFAULT_DELTA_X: i32 = 5;
pub const DEFAULT_DELTA_Y: i32 = 5;
pub const DEFAULT_WIDTH: i32 = 25;
pub const DEFAULT_HEIGHT: i32 = 35;

/// The ordered children of a carrier.
///
/// Only the owning [`ShapeModel`](crate::ShapeModel) can add or remove
/// entries, which keeps every child's owner link in step with this list.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Children(Vec<ShapeId>);

impl Children {
    pub fn as_slice(&self) -> &[ShapeId] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = ShapeId> + '_ {
        self.0.iter().copied()
    }

    pub(crate) fn push(&mut self, id: ShapeId) {
        self.0.push(id);
    }

    pub(crate) fn remove(&mut self, index: usize) -> ShapeId {
        self.0.remove(index)
    }
}

/// How a shape renders its bounding box
#[derive(Debug, PartialEq, Eq)]
pub enum ShapeKind {
    /// Rectangle outline
    Rectangle,
    /// Oval inscribed in the box
    Oval,
    /// Hexagon inscribed in the box, four-sided when narrow
    Hexagon,
    /// Rectangle that switches between outline and fill as it bounces
    Dynamic(DynamicStyle),
    /// Externally loaded raster stretched over the box
    Image(TextureId),
    /// Rectangle outline holding child shapes in its own coordinate space
    Carrier(Children),
}

impl ShapeKind {
    /// Get the kind as a string
    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Oval => "oval",
            ShapeKind::Hexagon => "hexagon",
            ShapeKind::Dynamic(_) => "dynamic",
            ShapeKind::Image(_) => "image",
            ShapeKind::Carrier(_) => "carrier",
        }
    }
}

/// A box that moves with a constant speed and bounces off the walls of
/// whatever contains it.
#[derive(Debug, PartialEq, Eq)]
pub struct Shape {
    x: i32,
    y: i32,
    delta_x: i32,
    delta_y: i32,
    width: i32,
    height: i32,
    text: Option<String>,
    owner: Option<ShapeId>,
    kind: ShapeKind,
}

impl Shape {
    /// Creates a shape of the given kind with default geometry
    pub fn new(kind: ShapeKind) -> Self {
        Self {
            x: DEFAULT_X,
            y: DEFAULT_Y,
            delta_x: DEFAULT_DELTA_X,
            delta_y: DEFAULT_DELTA_Y,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            text: None,
            owner: None,
            kind,
        }
    }

    pub fn rectangle() -> Self {
        Self::new(ShapeKind::Rectangle)
    }

    pub fn oval() -> Self {
        Self::new(ShapeKind::Oval)
    }

    pub fn hexagon() -> Self {
        Self::new(ShapeKind::Hexagon)
    }

    pub fn dynamic(color: Color32) -> Self {
        Self::new(ShapeKind::Dynamic(DynamicStyle::new(color)))
    }

    pub fn carrier() -> Self {
        Self::new(ShapeKind::Carrier(Children::default()))
    }

    /// Creates an image shape sized to the raster it shows
    pub fn image(texture: TextureId, width: i32, height: i32) -> Self {
        Self::new(ShapeKind::Image(texture)).with_size(width, height)
    }

    pub fn at(mut self, x: i32, y: i32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn with_velocity(mut self, delta_x: i32, delta_y: i32) -> Self {
        self.delta_x = delta_x;
        self.delta_y = delta_y;
        self
    }

    /// Sets the size; dimensions below 1 are raised to 1.
    pub fn with_size(mut self, width: i32, height: i32) -> Self {
        self.width = width.max(1);
        self.height = height.max(1);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    /// Horizontal speed per move; the sign gives the direction
    pub fn delta_x(&self) -> i32 {
        self.delta_x
    }

    /// Vertical speed per move; the sign gives the direction
    pub fn delta_y(&self) -> i32 {
        self.delta_y
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// The carrier currently holding this shape, if any
    pub fn owner(&self) -> Option<ShapeId> {
        self.owner
    }

    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    pub fn is_carrier(&self) -> bool {
        matches!(self.kind, ShapeKind::Carrier(_))
    }

    /// Direct children, empty for anything but a carrier
    pub fn children(&self) -> &[ShapeId] {
        match &self.kind {
            ShapeKind::Carrier(children) => children.as_slice(),
            _ => &[],
        }
    }

    pub(crate) fn children_mut(&mut self) -> Option<&mut Children> {
        match &mut self.kind {
            ShapeKind::Carrier(children) => Some(children),
            _ => None,
        }
    }

    pub(crate) fn set_owner(&mut self, owner: Option<ShapeId>) {
        self.owner = owner;
    }

    /// Advances the shape by its velocity inside a `width` x `height` box,
    /// reflecting off any wall it reaches. Each axis is handled on its own, so
    /// a corner hit reverses both directions at once.
    pub(crate) fn move_within(&mut self, width: i32, height: i32) {
        let before = (self.delta_x, self.delta_y);

        (self.x, self.delta_x) = reflect(self.x.wrapping_add(self.delta_x), self.delta_x, self.width, width);
        (self.y, self.delta_y) = reflect(self.y.wrapping_add(self.delta_y), self.delta_y, self.height, height);

        if let ShapeKind::Dynamic(style) = &mut self.kind {
            style.observe_move(before, (self.delta_x, self.delta_y));
        }
    }

    /// Draws the shape's own geometry. Labels and children are the caller's
    /// business.
    pub(crate) fn render(&self, painter: &mut dyn Painter) {
        let (x, y, width, height) = (self.x, self.y, self.width, self.height);
        match &self.kind {
            ShapeKind::Rectangle | ShapeKind::Carrier(_) => painter.draw_rect(x, y, width, height),
            ShapeKind::Oval => painter.draw_oval(x, y, width, height),
            ShapeKind::Hexagon => painter.draw_hexagon(x, y, width, height),
            ShapeKind::Dynamic(style) => style.render(painter, x, y, width, height),
            ShapeKind::Image(texture) => painter.draw_image(*texture, x, y, width, height),
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.text {
            Some(text) => write!(f, "{} \"{}\"", self.kind.name(), text),
            None => f.write_str(self.kind.name()),
        }
    }
}

/// Resolves one axis of a move: returns the new coordinate and velocity.
///
/// Coordinates wrap on overflow instead of panicking.
fn reflect(next: i32, delta: i32, extent: i32, bound: i32) -> (i32, i32) {
    if next <= 0 {
        (0, delta.wrapping_neg())
    } else if next.wrapping_add(extent) >= bound {
        (bound.wrapping_sub(extent), delta.wrapping_neg())
    } else {
        (next, delta)
    }
}
