use egui::{Align2, Color32, FontId, Pos2, Rect, Stroke, TextureId, pos2, vec2};

use super::{DEFAULT_COLOR, Painter};

const OVAL_SEGMENTS: usize = 48;
const LINE_WIDTH: f32 = 1.0;

/// Painter backed by an [`egui::Painter`].
///
/// Shape coordinates are integer offsets from the top left corner of the
/// canvas rectangle handed in at construction, plus whatever translation is
/// currently in effect.
pub struct EguiPainter<'a> {
    painter: &'a egui::Painter,
    canvas: Rect,
    color: Color32,
    offset: (i32, i32),
    font: FontId,
}

// Custom Debug implementation since egui::Painter carries the whole context
impl std::fmt::Debug for EguiPainter<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EguiPainter")
            .field("canvas", &self.canvas)
            .field("color", &self.color)
            .field("offset", &self.offset)
            .finish()
    }
}

impl<'a> EguiPainter<'a> {
    /// Creates a painter drawing into `canvas`
    ///
    /// Args:
    ///     painter (egui::Painter): The egui painter to draw with
    ///     canvas (egui::Rect): Screen area whose top left corner is the shape origin
    pub fn new(painter: &'a egui::Painter, canvas: Rect) -> Self {
        Self {
            painter,
            canvas,
            color: DEFAULT_COLOR,
            offset: (0, 0),
            font: FontId::proportional(12.0),
        }
    }

    /// Uses a different font for centred labels
    pub fn with_font(mut self, font: FontId) -> Self {
        self.font = font;
        self
    }

    fn to_screen(&self, x: i32, y: i32) -> Pos2 {
        self.canvas.min + vec2((x + self.offset.0) as f32, (y + self.offset.1) as f32)
    }

    fn to_screen_rect(&self, x: i32, y: i32, width: i32, height: i32) -> Rect {
        Rect::from_min_size(self.to_screen(x, y), vec2(width as f32, height as f32))
    }

    fn stroke(&self) -> Stroke {
        Stroke::new(LINE_WIDTH, self.color)
    }
}

impl Painter for EguiPainter<'_> {
    fn draw_rect(&mut self, x: i32, y: i32, width: i32, height: i32) {
        let rect = self.to_screen_rect(x, y, width, height);
        self.painter.rect_stroke(rect, 0.0, self.stroke());
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32) {
        let rect = self.to_screen_rect(x, y, width, height);
        self.painter.rect_filled(rect, 0.0, self.color);
    }

    fn draw_oval(&mut self, x: i32, y: i32, width: i32, height: i32) {
        let rect = self.to_screen_rect(x, y, width, height);
        let center = rect.center();
        let radius = rect.size() / 2.0;
        let points = (0..OVAL_SEGMENTS)
            .map(|i| {
                let angle = std::f32::consts::TAU * i as f32 / OVAL_SEGMENTS as f32;
                pos2(
                    center.x + radius.x * angle.cos(),
                    center.y + radius.y * angle.sin(),
                )
            })
            .collect();
        self.painter.add(egui::Shape::closed_line(points, self.stroke()));
    }

    fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) {
        let from = self.to_screen(x1, y1);
        let to = self.to_screen(x2, y2);
        self.painter.line_segment([from, to], self.stroke());
    }

    fn draw_image(&mut self, texture: TextureId, x: i32, y: i32, width: i32, height: i32) {
        let rect = self.to_screen_rect(x, y, width, height);
        let uv = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
        self.painter.image(texture, rect, uv, Color32::WHITE);
    }

    fn color(&self) -> Color32 {
        self.color
    }

    fn set_color(&mut self, color: Color32) {
        self.color = color;
    }

    fn translate(&mut self, dx: i32, dy: i32) {
        self.offset.0 += dx;
        self.offset.1 += dy;
    }

    fn draw_centred_text(&mut self, x: i32, y: i32, width: i32, height: i32, text: &str) {
        let center = self.to_screen_rect(x, y, width, height).center();
        self.painter
            .text(center, Align2::CENTER_CENTER, text, self.font.clone(), self.color);
    }
}
