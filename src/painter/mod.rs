//! Drawing primitives consumed by shapes.
//!
//! Shapes never talk to a rendering library directly. They issue integer
//! drawing calls against a [`Painter`], which either renders them
//! ([`EguiPainter`]) or records them ([`RecordingPainter`]).

mod egui_painter;
mod recording;

use std::ops::{Deref, DerefMut};

use egui::{Color32, TextureId};

use crate::geometry::HexagonOutline;

pub use egui_painter::EguiPainter;
pub use recording::RecordingPainter;

/// Color a painter starts out with before any shape changes it
pub const DEFAULT_COLOR: Color32 = Color32::from_rgb(212, 212, 212);

/// A drawing surface with a current color and a movable coordinate origin.
///
/// The color and origin are shared state: whoever changes them during a
/// paint traversal restores them before handing the painter back.
pub trait Painter {
    /// Draws the outline of a rectangle whose top left corner is at `(x, y)`.
    fn draw_rect(&mut self, x: i32, y: i32, width: i32, height: i32);

    /// Fills a rectangle with the current color.
    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32);

    /// Draws an oval inscribed in the given bounding box.
    fn draw_oval(&mut self, x: i32, y: i32, width: i32, height: i32);

    fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32);

    /// Draws a hexagon inscribed in the given bounding box.
    ///
    /// The default implementation walks the [`HexagonOutline`] edge by edge
    /// through [`Painter::draw_line`].
    fn draw_hexagon(&mut self, x: i32, y: i32, width: i32, height: i32) {
        for ((x1, y1), (x2, y2)) in HexagonOutline::new(x, y, width, height).edges() {
            self.draw_line(x1, y1, x2, y2);
        }
    }

    /// Draws an externally loaded raster scaled into the given box.
    fn draw_image(&mut self, texture: TextureId, x: i32, y: i32, width: i32, height: i32);

    fn color(&self) -> Color32;

    fn set_color(&mut self, color: Color32);

    /// Moves the coordinate origin by `(dx, dy)`. Calls accumulate; an equal
    /// and opposite call undoes one.
    fn translate(&mut self, dx: i32, dy: i32);

    /// Draws `text` centred horizontally and vertically within the box.
    fn draw_centred_text(&mut self, x: i32, y: i32, width: i32, height: i32, text: &str);
}

/// A painter whose origin is shifted for as long as the guard lives.
///
/// Dropping the guard issues the inverse translation, so the origin is
/// restored on every exit path.
pub struct Translated<'a> {
    painter: &'a mut dyn Painter,
    dx: i32,
    dy: i32,
}

impl<'a> Translated<'a> {
    pub fn new(painter: &'a mut dyn Painter, dx: i32, dy: i32) -> Self {
        painter.translate(dx, dy);
        Self { painter, dx, dy }
    }
}

impl<'a> Deref for Translated<'a> {
    type Target = dyn Painter + 'a;

    fn deref(&self) -> &Self::Target {
        &*self.painter
    }
}

impl DerefMut for Translated<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.painter
    }
}

impl Drop for Translated<'_> {
    fn drop(&mut self) {
        self.painter.translate(-self.dx, -self.dy);
    }
}

impl std::fmt::Debug for Translated<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Translated")
            .field("dx", &self.dx)
            .field("dy", &self.dy)
            .finish()
    }
}

/// Formats a color the way painter logs and debug output spell it.
pub fn describe_color(color: Color32) -> String {
    format!("rgb({},{},{})", color.r(), color.g(), color.b())
}
