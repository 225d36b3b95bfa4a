use super::Point;

/// Horizontal distance between the bounding box sides and the slanted
/// vertices of a regular hexagon.
pub const HEXAGON_INSET: i32 = 20;

/// Outline of a hexagon inscribed in a bounding box.
///
/// Boxes at least `2 * HEXAGON_INSET` wide get six vertices. Narrower boxes
/// collapse the top and bottom edges to the horizontal midpoint, which leaves
/// a four-sided figure. Vertices start at the middle of the left side and run
/// clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HexagonOutline {
    Regular([Point; 6]),
    Small([Point; 4]),
}

impl HexagonOutline {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        let mid_y = y + height / 2;
        if width >= 2 * HEXAGON_INSET {
            Self::Regular([
                (x, mid_y),
                (x + HEXAGON_INSET, y),
                (x + width - HEXAGON_INSET, y),
                (x + width, mid_y),
                (x + width - HEXAGON_INSET, y + height),
                (x + HEXAGON_INSET, y + height),
            ])
        } else {
            let mid_x = x + width / 2;
            Self::Small([(x, mid_y), (mid_x, y), (x + width, mid_y), (mid_x, y + height)])
        }
    }

    pub fn is_regular(&self) -> bool {
        matches!(self, Self::Regular(_))
    }

    pub fn vertices(&self) -> &[Point] {
        match self {
            Self::Regular(vertices) => vertices,
            Self::Small(vertices) => vertices,
        }
    }

    /// Edges of the closed polyline, the last one returning to the first vertex.
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let vertices = self.vertices();
        vertices
            .iter()
            .zip(vertices.iter().cycle().skip(1))
            .map(|(&from, &to)| (from, to))
    }
}
