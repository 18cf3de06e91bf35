use crate::foundation::error::{GlyphGridError, GlyphGridResult};

pub use kurbo::{Affine, Point, Rect};

/// Output canvas size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Screen {
    pub width: u32,
    pub height: u32,
}

impl Screen {
    pub fn new(width: u32, height: u32) -> GlyphGridResult<Self> {
        if width == 0 || height == 0 {
            return Err(GlyphGridError::validation(
                "screen width/height must be > 0",
            ));
        }
        Ok(Self { width, height })
    }

    pub fn width_px(self) -> usize {
        self.width as usize
    }

    pub fn height_px(self) -> usize {
        self.height as usize
    }
}

/// Axis-aligned view transform from data space into pixel space.
///
/// `x' = tx + x * sx`, `y' = ty + y * sy`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ViewTransform {
    pub tx: f64,
    pub ty: f64,
    pub sx: f64,
    pub sy: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ViewTransform {
    pub const IDENTITY: Self = Self {
        tx: 0.0,
        ty: 0.0,
        sx: 1.0,
        sy: 1.0,
    };

    pub fn new(tx: f64, ty: f64, sx: f64, sy: f64) -> GlyphGridResult<Self> {
        let vt = Self { tx, ty, sx, sy };
        vt.validate()?;
        Ok(vt)
    }

    pub fn validate(&self) -> GlyphGridResult<()> {
        for (name, v) in [
            ("tx", self.tx),
            ("ty", self.ty),
            ("sx", self.sx),
            ("sy", self.sy),
        ] {
            if !v.is_finite() {
                return Err(GlyphGridError::validation(format!(
                    "view transform {name} must be finite"
                )));
            }
        }
        Ok(())
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Chain `next` after `self`: translations add, scales multiply.
    ///
    /// This is the rule used by deferred projection, so projecting by `a` and then by
    /// `b` is the same as projecting once by `a.compose(b)`.
    pub fn compose(self, next: Self) -> Self {
        Self {
            tx: self.tx + next.tx,
            ty: self.ty + next.ty,
            sx: self.sx * next.sx,
            sy: self.sy * next.sy,
        }
    }

    #[inline]
    pub fn apply_x(&self, x: f64) -> f64 {
        self.tx + x * self.sx
    }

    #[inline]
    pub fn apply_y(&self, y: f64) -> f64 {
        self.ty + y * self.sy
    }

    pub fn apply(&self, p: Point) -> Point {
        Point::new(self.apply_x(p.x), self.apply_y(p.y))
    }

    pub fn to_affine(self) -> Affine {
        Affine::new([self.sx, 0.0, 0.0, self.sy, self.tx, self.ty])
    }

    /// View transform that fits `bounds` (data space) into `screen`.
    ///
    /// With `balanced`, both axes use the smaller of the two scales so the aspect
    /// ratio of the data is preserved.
    pub fn zoom_fit(screen: Screen, bounds: Rect, balanced: bool) -> GlyphGridResult<Self> {
        let (gw, gh) = (bounds.width(), bounds.height());
        if !(gw.is_finite() && gh.is_finite()) || gw <= 0.0 || gh <= 0.0 {
            return Err(GlyphGridError::validation(
                "zoom_fit bounds must have finite, positive width and height",
            ));
        }
        let mut sx = f64::from(screen.width) / gw;
        let mut sy = f64::from(screen.height) / gh;
        if balanced {
            sx = sx.min(sy);
            sy = sx;
        }
        Self::new(-bounds.x0 * sx, -bounds.y0 * sy, sx, sy)
    }
}

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(from = "[u8; 4]", into = "[u8; 4]")]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    pub const CLEAR_WHITE: Self = Self::new(255, 255, 255, 0);
    pub const BLACK: Self = Self::new(0, 0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<[u8; 4]> for Rgba8 {
    fn from(v: [u8; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

impl From<Rgba8> for [u8; 4] {
    fn from(c: Rgba8) -> Self {
        c.to_array()
    }
}
