//! Structural change notifications emitted by a [`ShapeModel`].

mod bus;
mod events;

pub use bus::EventBus;
pub use events::{ShapeEventKind, ShapeModelEvent};

use crate::model::ShapeModel;

/// Receives every successful `add` and `remove` on a [`ShapeModel`].
///
/// The model is handed over in its post-change state and may be queried
/// freely, but not modified, during the callback.
pub trait ShapeModelListener {
    fn update(&self, model: &ShapeModel, event: &ShapeModelEvent);
}
