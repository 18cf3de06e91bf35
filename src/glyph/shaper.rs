use crate::glyph::shape::ShapeCode;

type Extract<R> = Box<dyn Fn(&R) -> f64 + Send + Sync>;

/// Builds data-space glyph records from arbitrary rows.
///
/// A shaper carries one extractor per record component and the shape code that says
/// how the four components are read.
pub struct Shaper<R> {
    shape: ShapeCode,
    fns: [Extract<R>; 4],
}

impl<R> Shaper<R> {
    /// Rectangles from `x, y, w, h` extractors.
    pub fn to_rect(
        x: impl Fn(&R) -> f64 + Send + Sync + 'static,
        y: impl Fn(&R) -> f64 + Send + Sync + 'static,
        w: impl Fn(&R) -> f64 + Send + Sync + 'static,
        h: impl Fn(&R) -> f64 + Send + Sync + 'static,
    ) -> Self {
        Self {
            shape: ShapeCode::Rect,
            fns: [Box::new(x), Box::new(y), Box::new(w), Box::new(h)],
        }
    }

    /// Line segments from `x1, y1, x2, y2` extractors.
    pub fn to_line(
        x1: impl Fn(&R) -> f64 + Send + Sync + 'static,
        y1: impl Fn(&R) -> f64 + Send + Sync + 'static,
        x2: impl Fn(&R) -> f64 + Send + Sync + 'static,
        y2: impl Fn(&R) -> f64 + Send + Sync + 'static,
    ) -> Self {
        Self {
            shape: ShapeCode::Line,
            fns: [Box::new(x1), Box::new(y1), Box::new(x2), Box::new(y2)],
        }
    }

    /// Points from `x, y` extractors; width and height are zero.
    pub fn to_point(
        x: impl Fn(&R) -> f64 + Send + Sync + 'static,
        y: impl Fn(&R) -> f64 + Send + Sync + 'static,
    ) -> Self {
        Self {
            shape: ShapeCode::Point,
            fns: [
                Box::new(x),
                Box::new(y),
                Box::new(|_: &R| 0.0),
                Box::new(|_: &R| 0.0),
            ],
        }
    }

    pub fn shape(&self) -> ShapeCode {
        self.shape
    }

    pub fn record(&self, row: &R) -> [f64; 4] {
        [
            (self.fns[0])(row),
            (self.fns[1])(row),
            (self.fns[2])(row),
            (self.fns[3])(row),
        ]
    }
}

impl<R> std::fmt::Debug for Shaper<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shaper").field("shape", &self.shape).finish()
    }
}

/// Extractor that always returns `v`.
pub fn constant<R: 'static>(v: f64) -> impl Fn(&R) -> f64 + Send + Sync + 'static {
    move |_| v
}

/// Extractor reading position `i` of a numeric row; missing positions read as NaN.
pub fn idx<R: AsRef<[f64]> + 'static>(i: usize) -> impl Fn(&R) -> f64 + Send + Sync + 'static {
    move |row: &R| row.as_ref().get(i).copied().unwrap_or(f64::NAN)
}
