use crate::{
    foundation::core::Rgba8,
    foundation::error::{GlyphGridError, GlyphGridResult},
    foundation::math::{channel_u8, finite_min_max},
    grid::{ColorGrid, Grid},
    shade::numeric::Empty,
    shade::require_plane,
};

/// Two-color threshold: cells `>= divider` get `high`, everything else `low`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BinarySegment {
    pub low: Rgba8,
    pub high: Rgba8,
    pub divider: f64,
}

impl BinarySegment {
    pub fn apply(&self, grid: &Grid<f64>) -> GlyphGridResult<ColorGrid> {
        grid.require_scalar("binary_segment")?;
        Ok(grid.map(|&v| if v >= self.divider { self.high } else { self.low }))
    }
}

/// Per-channel interpolation between two colors over the grid's value range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InterpolateColors {
    pub low: Rgba8,
    pub high: Rgba8,
    /// Interpolate on `log_base(v)` instead of `v`.
    pub log: Option<f64>,
    /// Color of empty cells.
    pub reserve: Rgba8,
    pub empty: Empty,
}

impl InterpolateColors {
    pub fn new(low: Rgba8, high: Rgba8) -> Self {
        Self {
            low,
            high,
            log: None,
            reserve: Rgba8::WHITE,
            empty: Empty::Nan,
        }
    }

    pub fn with_log(mut self, base: f64) -> Self {
        self.log = Some(base);
        self
    }

    pub fn with_reserve(mut self, reserve: Rgba8) -> Self {
        self.reserve = reserve;
        self
    }

    pub fn with_empty(mut self, empty: Empty) -> Self {
        self.empty = empty;
        self
    }

    pub fn validate(&self) -> GlyphGridResult<()> {
        if let Some(base) = self.log {
            validate_log_base(base)?;
        }
        Ok(())
    }

    /// Empty cells get `reserve`. In log mode non-positive cells have no logarithm and
    /// are treated as empty too. A grid with nothing left to scale is all `reserve`.
    pub fn apply(&self, grid: &Grid<f64>) -> GlyphGridResult<ColorGrid> {
        grid.require_scalar("interpolate_colors")?;
        self.validate()?;

        let empty = self.empty;
        let scale = |v: f64| -> Option<f64> {
            if empty.matches(v) {
                return None;
            }
            match self.log {
                None => Some(v),
                Some(_) if v <= 0.0 => None,
                Some(base) => Some(log_base(v, base)),
            }
        };

        let Some((min, max)) = finite_min_max(grid.data().iter().filter_map(|v| scale(*v)))
        else {
            return Ok(grid.map(|_| self.reserve));
        };
        let span = max - min;

        Ok(grid.map(|&v| match scale(v) {
            None => self.reserve,
            Some(s) => {
                let t = if span == 0.0 { 0.0 } else { (s - min) / span };
                lerp_color(self.low, self.high, t)
            }
        }))
    }
}

fn lerp_color(low: Rgba8, high: Rgba8, t: f64) -> Rgba8 {
    let ch = |a: u8, b: u8| channel_u8(f64::from(a) + t * (f64::from(b) - f64::from(a)));
    Rgba8::new(
        ch(low.r, high.r),
        ch(low.g, high.g),
        ch(low.b, high.b),
        ch(low.a, high.a),
    )
}

/// Two-color split on the share of one category.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MinPercent {
    /// Share in `[0, 1]` at or above which a cell is painted `above`.
    pub cutoff: f64,
    pub category: usize,
    pub above: Rgba8,
    pub below: Rgba8,
    /// Color of cells with no glyphs at all.
    pub background: Rgba8,
}

impl MinPercent {
    pub fn new(cutoff: f64, category: usize) -> Self {
        Self {
            cutoff,
            category,
            above: Rgba8::new(228, 26, 28, 255),
            below: Rgba8::new(55, 126, 184, 255),
            background: Rgba8::CLEAR_WHITE,
        }
    }

    pub fn validate(&self) -> GlyphGridResult<()> {
        if !self.cutoff.is_finite() {
            return Err(GlyphGridError::validation("min_percent cutoff must be finite"));
        }
        Ok(())
    }

    pub fn apply(&self, grid: &Grid<f64>) -> GlyphGridResult<ColorGrid> {
        let depth = grid.require_stacked("min_percent")?;
        require_plane(depth, self.category, "min_percent")?;
        Ok(grid.reduce_cells(|cell| {
            let total: f64 = cell.iter().sum();
            if total == 0.0 {
                self.background
            } else if cell[self.category] / total >= self.cutoff {
                self.above
            } else {
                self.below
            }
        }))
    }
}

/// High-definition alpha composition of category counts.
///
/// Each non-empty cell's RGB is the blend of the category colors weighted by their
/// share of the cell total. Alpha encodes the cell total relative to the grid maximum
/// (optionally on a log scale), floored at `alpha_min`. Cells whose total is zero get
/// `background` unchanged.
#[derive(Clone, Debug, PartialEq)]
pub struct HdAlpha {
    /// Category colors in plane order; truncated or padded with the last color to
    /// match the grid depth.
    pub colors: Vec<Rgba8>,
    pub background: Rgba8,
    /// Alpha fraction of the sparsest non-empty cell, in `[0, 1]`.
    pub alpha_min: f64,
    /// Scale totals by `log_base` before computing alpha.
    pub log: Option<f64>,
}

impl HdAlpha {
    pub fn new(colors: Vec<Rgba8>) -> Self {
        Self {
            colors,
            background: Rgba8::WHITE,
            alpha_min: 0.0,
            log: None,
        }
    }

    pub fn validate(&self) -> GlyphGridResult<()> {
        if self.colors.is_empty() {
            return Err(GlyphGridError::validation(
                "hd_alpha needs at least one category color",
            ));
        }
        if !(0.0..=1.0).contains(&self.alpha_min) {
            return Err(GlyphGridError::validation(
                "hd_alpha alpha_min must be within [0, 1]",
            ));
        }
        if let Some(base) = self.log {
            validate_log_base(base)?;
        }
        Ok(())
    }

    fn colors_for(&self, depth: usize) -> Vec<Rgba8> {
        let last = self.colors.last().copied().unwrap_or(Rgba8::BLACK);
        (0..depth)
            .map(|k| self.colors.get(k).copied().unwrap_or(last))
            .collect()
    }

    pub fn apply(&self, grid: &Grid<f64>) -> GlyphGridResult<ColorGrid> {
        let depth = grid.require_stacked("hd_alpha")?;
        self.validate()?;
        let colors = self.colors_for(depth);

        let totals = grid.reduce_cells(|cell| cell.iter().sum::<f64>());
        let scale = |total: f64| match self.log {
            Some(base) => log_base(total, base),
            None => total,
        };
        let max = totals.data().iter().copied().fold(0.0f64, f64::max);
        let scaled_max = scale(max);

        let blended = grid.reduce_cells(|cell| {
            let total: f64 = cell.iter().sum();
            if total == 0.0 {
                return self.background;
            }
            let mut rgb = [0.0f64; 3];
            for (count, color) in cell.iter().zip(&colors) {
                let w = count / total;
                rgb[0] += f64::from(color.r) * w;
                rgb[1] += f64::from(color.g) * w;
                rgb[2] += f64::from(color.b) * w;
            }
            let ratio = if scaled_max == 0.0 {
                1.0
            } else {
                scale(total) / scaled_max
            };
            let alpha = (self.alpha_min + (1.0 - self.alpha_min) * ratio) * 255.0;
            Rgba8::new(
                channel_u8(rgb[0]),
                channel_u8(rgb[1]),
                channel_u8(rgb[2]),
                channel_u8(alpha),
            )
        });
        Ok(blended)
    }
}

fn log_base(v: f64, base: f64) -> f64 {
    if base == 10.0 {
        v.log10()
    } else if base == 2.0 {
        v.log2()
    } else {
        v.ln() / base.ln()
    }
}

fn validate_log_base(base: f64) -> GlyphGridResult<()> {
    if !base.is_finite() || base <= 0.0 || base == 1.0 {
        return Err(GlyphGridError::validation(format!(
            "log base must be finite, positive and not 1, got {base}"
        )));
    }
    Ok(())
}

/// Numeric-to-color stages. Always terminal.
#[derive(Clone, Debug, PartialEq)]
pub enum ColorShader {
    BinarySegment(BinarySegment),
    InterpolateColors(InterpolateColors),
    MinPercent(MinPercent),
    HdAlpha(HdAlpha),
}

impl ColorShader {
    pub fn validate(&self) -> GlyphGridResult<()> {
        match self {
            Self::BinarySegment(_) => Ok(()),
            Self::InterpolateColors(s) => s.validate(),
            Self::MinPercent(s) => s.validate(),
            Self::HdAlpha(s) => s.validate(),
        }
    }

    pub fn needs_stacked(&self) -> bool {
        matches!(self, Self::MinPercent(_) | Self::HdAlpha(_))
    }

    pub fn apply(&self, grid: &Grid<f64>) -> GlyphGridResult<ColorGrid> {
        match self {
            Self::BinarySegment(s) => s.apply(grid),
            Self::InterpolateColors(s) => s.apply(grid),
            Self::MinPercent(s) => s.apply(grid),
            Self::HdAlpha(s) => s.apply(grid),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shade/color.rs"]
mod tests;
