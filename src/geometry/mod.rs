//! Integer geometry shared by shapes and painter backends.

mod hexagon;

pub use hexagon::{HEXAGON_INSET, HexagonOutline};

/// A point in integer device coordinates
pub type Point = (i32, i32);
