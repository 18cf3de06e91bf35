//! Dense row-major grids.
//!
//! A [`Grid`] is either scalar (`height × width`) or category-stacked
//! (`height × width × depth`). Cell `(x, y)` owns `planes()` consecutive values.

use crate::foundation::core::{Rgba8, Screen};
use crate::foundation::error::{GlyphGridError, GlyphGridResult};
use crate::foundation::math::finite_min_max;

/// Grid dimensions. `depth == None` means a plain 2D grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct GridShape {
    pub height: usize,
    pub width: usize,
    pub depth: Option<usize>,
}

impl GridShape {
    pub fn scalar(width: usize, height: usize) -> Self {
        Self {
            height,
            width,
            depth: None,
        }
    }

    pub fn stacked(width: usize, height: usize, depth: usize) -> Self {
        Self {
            height,
            width,
            depth: Some(depth),
        }
    }

    /// Values stored per cell.
    pub fn planes(self) -> usize {
        self.depth.unwrap_or(1)
    }

    pub fn is_stacked(self) -> bool {
        self.depth.is_some()
    }

    pub fn cell_count(self) -> usize {
        self.height * self.width
    }

    pub fn len(self) -> usize {
        self.cell_count() * self.planes()
    }

    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    pub fn matches_screen(self, screen: Screen) -> bool {
        self.width == screen.width_px() && self.height == screen.height_px()
    }
}

impl std::fmt::Display for GridShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.depth {
            Some(d) => write!(f, "({}, {}, {})", self.height, self.width, d),
            None => write!(f, "({}, {})", self.height, self.width),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Owned row-major grid of `T`.
pub struct Grid<T> {
    shape: GridShape,
    data: Vec<T>,
}

/// Grid of shaded colors.
pub type ColorGrid = Grid<Rgba8>;

impl<T: Clone> Grid<T> {
    pub fn new(width: usize, height: usize, fill: T) -> Self {
        let shape = GridShape::scalar(width, height);
        Self {
            shape,
            data: vec![fill; shape.len()],
        }
    }

    pub fn stacked(width: usize, height: usize, depth: usize, fill: T) -> Self {
        let shape = GridShape::stacked(width, height, depth);
        Self {
            shape,
            data: vec![fill; shape.len()],
        }
    }

    pub fn for_screen(screen: Screen, fill: T) -> Self {
        Self::new(screen.width_px(), screen.height_px(), fill)
    }

    /// Copy of a single plane as a scalar grid.
    pub fn plane(&self, plane: usize) -> GlyphGridResult<Grid<T>> {
        let planes = self.planes();
        if plane >= planes {
            return Err(GlyphGridError::bounds(format!(
                "plane {plane} out of range for grid of shape {}",
                self.shape
            )));
        }
        Ok(Grid {
            shape: GridShape::scalar(self.shape.width, self.shape.height),
            data: self
                .data
                .chunks_exact(planes)
                .map(|cell| cell[plane].clone())
                .collect(),
        })
    }
}

impl<T> Grid<T> {
    pub fn from_vec(shape: GridShape, data: Vec<T>) -> GlyphGridResult<Self> {
        if data.len() != shape.len() {
            return Err(GlyphGridError::shape(format!(
                "grid of shape {shape} needs {} values, got {}",
                shape.len(),
                data.len()
            )));
        }
        Ok(Self { shape, data })
    }

    pub fn shape(&self) -> GridShape {
        self.shape
    }

    pub fn width(&self) -> usize {
        self.shape.width
    }

    pub fn height(&self) -> usize {
        self.shape.height
    }

    pub fn depth(&self) -> Option<usize> {
        self.shape.depth
    }

    pub fn planes(&self) -> usize {
        self.shape.planes()
    }

    pub fn is_stacked(&self) -> bool {
        self.shape.is_stacked()
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    #[inline]
    fn offset(&self, x: usize, y: usize) -> usize {
        (y * self.shape.width + x) * self.planes()
    }

    fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.shape.width && y < self.shape.height
    }

    /// All plane values of cell `(x, y)`.
    pub fn cell(&self, x: usize, y: usize) -> Option<&[T]> {
        if !self.in_bounds(x, y) {
            return None;
        }
        let start = self.offset(x, y);
        Some(&self.data[start..start + self.planes()])
    }

    pub fn cell_mut(&mut self, x: usize, y: usize) -> Option<&mut [T]> {
        if !self.in_bounds(x, y) {
            return None;
        }
        let start = self.offset(x, y);
        let planes = self.planes();
        Some(&mut self.data[start..start + planes])
    }

    pub fn get(&self, x: usize, y: usize, plane: usize) -> Option<&T> {
        self.cell(x, y).and_then(|c| c.get(plane))
    }

    pub fn set(&mut self, x: usize, y: usize, plane: usize, value: T) -> GlyphGridResult<()> {
        let shape = self.shape;
        let slot = self
            .cell_mut(x, y)
            .and_then(|c| c.get_mut(plane))
            .ok_or_else(|| {
                GlyphGridError::bounds(format!(
                    "cell ({x}, {y}, {plane}) outside grid of shape {shape}"
                ))
            })?;
        *slot = value;
        Ok(())
    }

    /// Iterate cells in row-major order; each item holds `planes()` values.
    pub fn cells(&self) -> std::slice::ChunksExact<'_, T> {
        self.data.chunks_exact(self.planes().max(1))
    }

    /// Iterate rows; each item holds `width * planes()` values.
    pub fn rows(&self) -> std::slice::ChunksExact<'_, T> {
        self.data.chunks_exact((self.shape.width * self.planes()).max(1))
    }

    /// Fails with a shape error naming `who` when the grid is category-stacked.
    pub fn require_scalar(&self, who: &str) -> GlyphGridResult<()> {
        if self.is_stacked() {
            return Err(GlyphGridError::shape(format!(
                "{who} needs a scalar grid, got shape {}",
                self.shape
            )));
        }
        Ok(())
    }

    /// Depth of a category-stacked grid, or a shape error naming `who`.
    pub fn require_stacked(&self, who: &str) -> GlyphGridResult<usize> {
        self.depth().ok_or_else(|| {
            GlyphGridError::shape(format!(
                "{who} needs a category-stacked grid, got shape {}",
                self.shape
            ))
        })
    }

    /// Elementwise map preserving the shape.
    pub fn map<U>(&self, f: impl Fn(&T) -> U) -> Grid<U> {
        Grid {
            shape: self.shape,
            data: self.data.iter().map(f).collect(),
        }
    }

    /// Collapse every cell into one value, producing a scalar grid.
    pub fn reduce_cells<U>(&self, f: impl Fn(&[T]) -> U) -> Grid<U> {
        let shape = GridShape::scalar(self.shape.width, self.shape.height);
        let data = if self.planes() == 0 {
            (0..shape.cell_count()).map(|_| f(&[])).collect()
        } else {
            self.cells().map(f).collect()
        };
        Grid { shape, data }
    }
}

impl Grid<f64> {
    pub fn zeros(width: usize, height: usize) -> Self {
        Self::new(width, height, 0.0)
    }

    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }

    pub fn finite_min_max(&self) -> Option<(f64, f64)> {
        finite_min_max(self.data.iter().copied())
    }

    /// Add `other` into `self` elementwise.
    pub fn add_assign(&mut self, other: &Grid<f64>) -> GlyphGridResult<()> {
        if self.shape != other.shape {
            return Err(GlyphGridError::shape(format!(
                "cannot add grid of shape {} into grid of shape {}",
                other.shape, self.shape
            )));
        }
        for (d, s) in self.data.iter_mut().zip(&other.data) {
            *d += *s;
        }
        Ok(())
    }
}

impl Grid<Rgba8> {
    /// Flat RGBA8 bytes, row-major, four bytes per cell.
    pub fn to_rgba8_bytes(&self) -> Vec<u8> {
        self.data.iter().flat_map(|c| c.to_array()).collect()
    }

    pub fn to_rgba_image(&self) -> GlyphGridResult<image::RgbaImage> {
        let w = u32::try_from(self.width())
            .map_err(|_| GlyphGridError::validation("grid width exceeds u32"))?;
        let h = u32::try_from(self.height())
            .map_err(|_| GlyphGridError::validation("grid height exceeds u32"))?;
        image::RgbaImage::from_raw(w, h, self.to_rgba8_bytes())
            .ok_or_else(|| GlyphGridError::shape("rgba buffer does not match grid dimensions"))
    }
}

#[cfg(test)]
#[path = "../tests/unit/grid.rs"]
mod tests;
