use thiserror::Error;

use crate::model::ShapeId;

/// Reasons a carrier refuses to adopt a shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    /// The shape is already a child of some carrier
    #[error("shape already has an owner")]
    AlreadyOwned,
    /// The shape is wider than the carrier
    #[error("shape width {width} exceeds carrier width {limit}")]
    TooWide { width: i32, limit: i32 },
    /// The shape is taller than the carrier
    #[error("shape height {height} exceeds carrier height {limit}")]
    TooTall { height: i32, limit: i32 },
    /// The target shape cannot hold children
    #[error("target shape is not a carrier")]
    NotACarrier,
    /// The shape is the carrier itself or one of its ancestors
    #[error("adding the shape would make the hierarchy cyclic")]
    WouldCycle,
}

/// Errors raised by structural edits and queries on a [`ShapeModel`](crate::ShapeModel)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("invalid operation: {0}")]
    InvalidOperation(#[from] Rejection),

    #[error("child index {index} out of range for a carrier with {count} children")]
    IndexOutOfRange { index: usize, count: usize },

    #[error("unknown shape {0:?}")]
    UnknownShape(ShapeId),
}

/// Result type for shape hierarchy operations
pub type ShapeResult<T> = Result<T, ShapeError>;
