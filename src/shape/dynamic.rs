use egui::Color32;

use crate::painter::Painter;

/// Rendering state of a dynamic rectangle.
///
/// The rectangle starts out as an outline. A bounce off the left or right
/// wall switches it to a solid fill in its color; a bounce off the top or
/// bottom wall switches it back to an outline. When both happen in the same
/// move the outline wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DynamicStyle {
    color: Color32,
    filled: bool,
}

impl Default for DynamicStyle {
    fn default() -> Self {
        Self::new(Color32::WHITE)
    }
}

impl DynamicStyle {
    pub fn new(color: Color32) -> Self {
        Self {
            color,
            filled: false,
        }
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn is_filled(&self) -> bool {
        self.filled
    }

    /// Updates the fill mode from the velocity before and after a move.
    pub(crate) fn observe_move(&mut self, before: (i32, i32), after: (i32, i32)) {
        if flipped(before.1, after.1) {
            self.filled = false;
        } else if flipped(before.0, after.0) {
            self.filled = true;
        }
    }

    /// Draws the bounding box, filled or outlined, leaving the painter's
    /// color as it was found.
    pub(crate) fn render(&self, painter: &mut dyn Painter, x: i32, y: i32, width: i32, height: i32) {
        if self.filled {
            let previous = painter.color();
            painter.set_color(self.color);
            painter.fill_rect(x, y, width, height);
            painter.set_color(previous);
        } else {
            painter.draw_rect(x, y, width, height);
        }
    }
}

// A zero velocity negates to itself, which is not a bounce.
fn flipped(before: i32, after: i32) -> bool {
    before != 0 && after == before.wrapping_neg()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_flip_fills() {
        let mut style = DynamicStyle::new(Color32::BLUE);
        style.observe_move((12, 15), (-12, 15));
        assert!(style.is_filled());
    }

    #[test]
    fn test_vertical_flip_wins_over_horizontal() {
        let mut style = DynamicStyle::new(Color32::BLUE);
        style.observe_move((12, 0), (-12, 0));
        assert!(style.is_filled());
        style.observe_move((-12, 15), (12, -15));
        assert!(!style.is_filled());
    }

    #[test]
    fn test_extreme_velocity_flip() {
        let mut style = DynamicStyle::new(Color32::BLUE);
        style.observe_move((i32::MIN, 0), (i32::MIN, 0));
        assert!(style.is_filled());
    }

    #[test]
    fn test_zero_velocity_is_not_a_flip() {
        let mut style = DynamicStyle::new(Color32::BLUE);
        style.observe_move((0, 5), (0, 5));
        assert!(!style.is_filled());
    }
}
