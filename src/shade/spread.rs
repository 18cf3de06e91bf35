use rayon::prelude::*;

use crate::{foundation::error::GlyphGridResult, grid::Grid};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SpreadShape {
    Rect,
    #[default]
    Circle,
}

/// Neighborhood spread: convolves every category plane with a footprint kernel.
///
/// Cells beyond the grid edge count as zero and the output has the input's shape, so
/// mass near the border is partially lost. Planes never mix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Spread {
    pub factor: usize,
    pub shape: SpreadShape,
    /// Soften the kernel edge with half weights.
    pub anti_alias: bool,
}

impl Default for Spread {
    fn default() -> Self {
        Self {
            factor: 1,
            shape: SpreadShape::Circle,
            anti_alias: false,
        }
    }
}

impl Spread {
    pub fn new(factor: usize, shape: SpreadShape) -> Self {
        Self {
            factor,
            shape,
            anti_alias: false,
        }
    }

    pub fn anti_aliased(mut self) -> Self {
        self.anti_alias = true;
        self
    }

    /// The convolution kernel as a `rows × cols` grid.
    ///
    /// Without anti-aliasing (or for odd factors) the kernel is `(factor+1)²`. An
    /// anti-aliased rect with an even factor is `factor²` with a half-weight border; an
    /// anti-aliased circle keeps the full size and gives its exact-radius cells half
    /// weight. A zero factor is the identity kernel.
    pub fn kernel(&self) -> Grid<f64> {
        let f = self.factor;
        if f == 0 {
            return Grid::new(1, 1, 1.0);
        }
        let soft = self.anti_alias && f % 2 == 0;
        match self.shape {
            SpreadShape::Rect if soft => {
                let mut k = Grid::new(f, f, 1.0);
                for y in 0..f {
                    for x in 0..f {
                        if x == 0 || y == 0 || x == f - 1 || y == f - 1 {
                            k.data_mut()[y * f + x] = 0.5;
                        }
                    }
                }
                k
            }
            SpreadShape::Rect => Grid::new(f + 1, f + 1, 1.0),
            SpreadShape::Circle => {
                let n = f + 1;
                let mut k = Grid::new(n, n, 1.0);
                let r = (f / 2) as i64;
                let rr = r * r;
                for row in 0..r {
                    for col in 0..r {
                        let d = (row - r).pow(2) + (col - r).pow(2);
                        let w = if soft && d == rr {
                            0.5
                        } else if d > rr {
                            0.0
                        } else {
                            continue;
                        };
                        let (row, col) = (row as usize, col as usize);
                        for (ry, cx) in [
                            (row, col),
                            (row, n - 1 - col),
                            (n - 1 - row, n - 1 - col),
                            (n - 1 - row, col),
                        ] {
                            k.data_mut()[ry * n + cx] = w;
                        }
                    }
                }
                k
            }
        }
    }

    #[tracing::instrument(skip(grid), fields(shape = %grid.shape()))]
    pub fn apply(&self, grid: &Grid<f64>) -> GlyphGridResult<Grid<f64>> {
        let kernel = self.kernel();
        let (kw, kh) = (kernel.width(), kernel.height());
        let (cx, cy) = ((kw / 2) as isize, (kh / 2) as isize);
        let (w, h, planes) = (grid.width(), grid.height(), grid.planes());
        if w == 0 || h == 0 || planes == 0 {
            return Ok(grid.clone());
        }

        let src = grid.data();
        let k = kernel.data();
        let mut out = vec![0.0f64; src.len()];
        out.par_chunks_mut(w * planes)
            .enumerate()
            .for_each(|(y, row)| {
                for x in 0..w {
                    let dst = &mut row[x * planes..(x + 1) * planes];
                    for ky in 0..kh {
                        let sy = y as isize + ky as isize - cy;
                        if sy < 0 || sy >= h as isize {
                            continue;
                        }
                        for kx in 0..kw {
                            let weight = k[ky * kw + kx];
                            if weight == 0.0 {
                                continue;
                            }
                            let sx = x as isize + kx as isize - cx;
                            if sx < 0 || sx >= w as isize {
                                continue;
                            }
                            let base = (sy as usize * w + sx as usize) * planes;
                            for (d, s) in dst.iter_mut().zip(&src[base..base + planes]) {
                                *d += weight * *s;
                            }
                        }
                    }
                }
            });

        tracing::debug!(kernel_w = kw, kernel_h = kh, "spread applied");
        Grid::from_vec(grid.shape(), out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shade/spread.rs"]
mod tests;
