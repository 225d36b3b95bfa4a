#![warn(clippy::all, rust_2018_idioms)]

//! Bouncing shapes nested inside carrier shapes.
//!
//! [`ShapeModel`] owns the hierarchy and drives movement and painting,
//! [`Painter`] abstracts the drawing backend, and [`tree`] republishes
//! structural changes to tree views.

pub mod app;
pub mod error;
pub mod event;
pub mod geometry;
pub mod model;
pub mod painter;
pub mod raster;
pub mod shape;
pub mod tree;

pub use app::{SpaceShapesApp, ViewerSettings};
pub use error::{Rejection, ShapeError, ShapeResult};
pub use event::{EventBus, ShapeEventKind, ShapeModelEvent, ShapeModelListener};
pub use geometry::HexagonOutline;
pub use model::{ShapeId, ShapeModel};
pub use painter::{EguiPainter, Painter, RecordingPainter, Translated};
pub use shape::{DynamicStyle, Shape, ShapeKind};
pub use tree::{ShapeTree, ShapeTreeAdapter, TreeModel, TreeModelEvent, TreeModelListener};
