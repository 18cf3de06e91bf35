use crate::foundation::core::ViewTransform;

/// How the four numbers of a glyph record are interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeCode {
    /// `(x, y, _, _)`: a single cell.
    Point,
    /// `(x1, y1, x2, y2)`: a segment between two endpoints.
    Line,
    /// `(x, y, w, h)`: an axis-aligned rectangle.
    Rect,
}

/// A glyph in integer pixel space.
///
/// Points and rects are stored as the half-open box `[x1, x2) × [y1, y2)`. Lines keep
/// their endpoints in the order given; their footprint lives in the half-open bounding
/// box of those endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct Glyph {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

/// Half-open pixel box `[x0, x1) × [y0, y1)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PixelBox {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl PixelBox {
    pub fn width(&self) -> i64 {
        i64::from(self.x1) - i64::from(self.x0)
    }

    pub fn height(&self) -> i64 {
        i64::from(self.y1) - i64::from(self.y0)
    }

    pub fn contains(&self, x: i64, y: i64) -> bool {
        (i64::from(self.x0)..i64::from(self.x1)).contains(&x)
            && (i64::from(self.y0)..i64::from(self.y1)).contains(&y)
    }

    /// Intersection with the `width × height` canvas, `None` when nothing remains.
    pub fn clip(&self, width: usize, height: usize) -> Option<PixelBox> {
        let w = i32::try_from(width).unwrap_or(i32::MAX);
        let h = i32::try_from(height).unwrap_or(i32::MAX);
        let clipped = PixelBox {
            x0: self.x0.max(0),
            y0: self.y0.max(0),
            x1: self.x1.min(w),
            y1: self.y1.min(h),
        };
        (clipped.x0 < clipped.x1 && clipped.y0 < clipped.y1).then_some(clipped)
    }
}

impl Glyph {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Bounding box of the glyph's footprint.
    pub fn bbox(&self) -> PixelBox {
        PixelBox {
            x0: self.x1.min(self.x2),
            y0: self.y1.min(self.y2),
            x1: self.x1.max(self.x2),
            y1: self.y1.max(self.y2),
        }
    }

    /// Project one data-space record into pixel space.
    ///
    /// Zero-extent results are widened by one pixel on the max coordinate so every
    /// glyph covers at least one cell.
    pub fn project(record: [f64; 4], shape: ShapeCode, vt: &ViewTransform) -> Self {
        let px = |x: f64| vt.apply_x(x).floor() as i32;
        let py = |y: f64| vt.apply_y(y).floor() as i32;
        let [a, b, c, d] = record;
        match shape {
            ShapeCode::Point => {
                let (x, y) = (px(a), py(b));
                Self::new(x, y, x.saturating_add(1), y.saturating_add(1))
            }
            ShapeCode::Rect => {
                let (xa, xb) = (px(a), px(a + c));
                let (ya, yb) = (py(b), py(b + d));
                let (x1, mut x2) = (xa.min(xb), xa.max(xb));
                let (y1, mut y2) = (ya.min(yb), ya.max(yb));
                if x1 == x2 {
                    x2 = x2.saturating_add(1);
                }
                if y1 == y2 {
                    y2 = y2.saturating_add(1);
                }
                Self::new(x1, y1, x2, y2)
            }
            ShapeCode::Line => {
                let (x1, y1, mut x2, mut y2) = (px(a), py(b), px(c), py(d));
                if x1 == x2 {
                    x2 = x2.saturating_add(1);
                }
                if y1 == y2 {
                    y2 = y2.saturating_add(1);
                }
                Self::new(x1, y1, x2, y2)
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/glyph/shape.rs"]
mod tests;
