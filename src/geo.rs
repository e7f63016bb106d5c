use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned box anchored at its top-left corner. Y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Rect {
    pub top_left: Point,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(top_left: Point, width: f32, height: f32) -> Self {
        Self {
            top_left,
            width,
            height,
        }
    }

    pub const fn sized(width: f32, height: f32) -> Self {
        Self::new(Point::new(0.0, 0.0), width, height)
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.top_left.x + self.width / 2.0,
            self.top_left.y + self.height / 2.0,
        )
    }

    pub fn right(&self) -> f32 {
        self.top_left.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top_left.y + self.height
    }

    /// True when both dimensions are finite and strictly positive.
    pub fn has_usable_size(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    pub fn union(&self, other: &Rect) -> Rect {
        let min_x = self.top_left.x.min(other.top_left.x);
        let min_y = self.top_left.y.min(other.top_left.y);
        let max_x = self.right().max(other.right());
        let max_y = self.bottom().max(other.bottom());
        Rect::new(Point::new(min_x, min_y), max_x - min_x, max_y - min_y)
    }

    pub fn include_point(&self, point: Point) -> Rect {
        self.union(&Rect::new(point, 0.0, 0.0))
    }
}
