use crate::{
    foundation::error::{GlyphGridError, GlyphGridResult},
    foundation::math::finite_min_max,
    grid::Grid,
    shade::categories,
};

/// Which cells an [`Interpolate`] or color interpolation treats as empty.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Empty {
    /// NaN cells are empty.
    #[default]
    Nan,
    /// Cells exactly equal to the sentinel are empty.
    Value(f64),
}

impl Empty {
    #[inline]
    pub fn matches(self, v: f64) -> bool {
        match self {
            Self::Nan => v.is_nan(),
            Self::Value(s) => v == s,
        }
    }
}

/// Linear rescale of the non-empty range onto `[low, high]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Interpolate {
    pub low: f64,
    pub high: f64,
    pub empty: Empty,
}

impl Default for Interpolate {
    fn default() -> Self {
        Self {
            low: 0.0,
            high: 1.0,
            empty: Empty::Nan,
        }
    }
}

impl Interpolate {
    pub fn new(low: f64, high: f64) -> Self {
        Self {
            low,
            high,
            ..Self::default()
        }
    }

    pub fn with_empty(mut self, empty: Empty) -> Self {
        self.empty = empty;
        self
    }

    /// Empty cells pass through unchanged and are excluded from the min/max. A grid with
    /// no non-empty cell is returned as is; a zero span maps every non-empty cell to
    /// `low`.
    pub fn apply(&self, grid: &Grid<f64>) -> Grid<f64> {
        let empty = self.empty;
        let Some((min, max)) =
            finite_min_max(grid.data().iter().copied().filter(|v| !empty.matches(*v)))
        else {
            return grid.clone();
        };
        let span = max - min;
        let (low, high) = (self.low, self.high);
        grid.map(|&v| {
            if empty.matches(v) {
                v
            } else if span == 0.0 {
                low
            } else {
                low + (v - min) / span * (high - low)
            }
        })
    }
}

/// Numeric-to-numeric stages.
///
/// The elementwise variants keep the input shape. The category variants (`ToCounts`,
/// `NonZeros`, `Ratio`, `Select`) collapse a stacked grid into a scalar one.
#[derive(Clone, Debug, PartialEq)]
pub enum CellShader {
    Id,
    Floor,
    Power(f64),
    Sqrt,
    Cuberoot,
    /// Base-10 logarithm; zero cells stay zero.
    Log10,
    Interpolate(Interpolate),
    /// Sum over categories.
    ToCounts,
    /// Number of non-zero categories.
    NonZeros,
    /// Share of the total held by one plane; `None` picks the per-cell largest plane.
    Ratio { focus: Option<usize> },
    /// One category plane.
    Select(usize),
}

impl CellShader {
    pub fn validate(&self) -> GlyphGridResult<()> {
        match self {
            Self::Power(p) if !p.is_finite() => {
                Err(GlyphGridError::validation("power exponent must be finite"))
            }
            Self::Interpolate(i) if !i.low.is_finite() || !i.high.is_finite() => Err(
                GlyphGridError::validation("interpolate low/high must be finite"),
            ),
            _ => Ok(()),
        }
    }

    /// Whether the stage only accepts category-stacked input.
    pub fn needs_stacked(&self) -> bool {
        matches!(
            self,
            Self::ToCounts | Self::NonZeros | Self::Ratio { .. } | Self::Select(_)
        )
    }

    pub fn apply(&self, grid: &Grid<f64>) -> GlyphGridResult<Grid<f64>> {
        Ok(match self {
            Self::Id => grid.clone(),
            Self::Floor => grid.map(|v| v.floor()),
            Self::Power(p) => {
                let p = *p;
                grid.map(|v| v.powf(p))
            }
            Self::Sqrt => grid.map(|v| v.sqrt()),
            Self::Cuberoot => grid.map(|v| v.cbrt()),
            Self::Log10 => grid.map(|&v| if v == 0.0 { 0.0 } else { v.log10() }),
            Self::Interpolate(interp) => interp.apply(grid),
            Self::ToCounts => categories::to_counts(grid)?,
            Self::NonZeros => categories::non_zeros(grid)?,
            Self::Ratio { focus } => categories::ratio(grid, *focus)?,
            Self::Select(plane) => categories::select(grid, *plane)?,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shade/numeric.rs"]
mod tests;
