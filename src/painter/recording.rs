use std::fmt::{self, Write as _};

use egui::{Color32, TextureId};

use super::{DEFAULT_COLOR, Painter, describe_color};
use crate::geometry::HexagonOutline;

/// A painter that renders nothing and logs every call as a textual token.
///
/// The log is deterministic, so tests can compare a whole paint traversal
/// against an expected string.
#[derive(Debug, Clone)]
pub struct RecordingPainter {
    log: String,
    color: Color32,
    origin: (i32, i32),
}

impl Default for RecordingPainter {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingPainter {
    pub fn new() -> Self {
        Self {
            log: String::new(),
            color: DEFAULT_COLOR,
            origin: (0, 0),
        }
    }

    /// Everything recorded so far
    pub fn log(&self) -> &str {
        &self.log
    }

    /// Net translation applied to the origin so far
    pub fn origin(&self) -> (i32, i32) {
        self.origin
    }

    /// Discards the recorded log, keeping color and origin
    pub fn clear(&mut self) {
        self.log.clear();
    }

    fn record(&mut self, args: fmt::Arguments<'_>) {
        // Writing into a String cannot fail.
        let _ = self.log.write_fmt(args);
    }
}

impl fmt::Display for RecordingPainter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.log)
    }
}

impl Painter for RecordingPainter {
    fn draw_rect(&mut self, x: i32, y: i32, width: i32, height: i32) {
        self.record(format_args!("(rectangle {x},{y},{width},{height})"));
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32) {
        self.draw_rect(x, y, width, height);
        let color = describe_color(self.color);
        self.record(format_args!(" => filled with: {color} "));
    }

    fn draw_oval(&mut self, x: i32, y: i32, width: i32, height: i32) {
        self.record(format_args!("(oval {x},{y},{width},{height})"));
    }

    fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) {
        self.record(format_args!("(line {x1},{y1},{x2},{y2})"));
    }

    fn draw_hexagon(&mut self, x: i32, y: i32, width: i32, height: i32) {
        self.record(format_args!("(hexagon {x},{y},{width},{height})"));

        let outline = HexagonOutline::new(x, y, width, height);
        let kind = if outline.is_regular() { "regular" } else { "small" };
        let sequence = outline
            .vertices()
            .iter()
            .chain(outline.vertices().first())
            .map(|(vx, vy)| format!("({vx},{vy})"))
            .collect::<Vec<_>>()
            .join(" to ");
        self.record(format_args!("({kind} hexagon. line sequence: {sequence})"));
    }

    fn draw_image(&mut self, _texture: TextureId, x: i32, y: i32, width: i32, height: i32) {
        self.record(format_args!("(image {x},{y},{width},{height})"));
    }

    fn color(&self) -> Color32 {
        self.color
    }

    fn set_color(&mut self, color: Color32) {
        self.color = color;
        let color = describe_color(color);
        self.record(format_args!("(color set to: {color})"));
    }

    fn translate(&mut self, dx: i32, dy: i32) {
        self.origin.0 += dx;
        self.origin.1 += dy;
        self.record(format_args!("(translate {dx},{dy})"));
    }

    fn draw_centred_text(&mut self, _x: i32, _y: i32, _width: i32, _height: i32, text: &str) {
        self.record(format_args!("(text: {text}, has been painted)"));
    }
}
