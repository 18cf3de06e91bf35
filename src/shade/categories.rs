//! Shaders that collapse a category-stacked grid into a scalar grid.

use crate::{foundation::error::GlyphGridResult, grid::Grid, shade::require_plane};

pub(crate) fn to_counts(grid: &Grid<f64>) -> GlyphGridResult<Grid<f64>> {
    grid.require_stacked("to_counts")?;
    Ok(grid.reduce_cells(|cell| cell.iter().sum()))
}

pub(crate) fn non_zeros(grid: &Grid<f64>) -> GlyphGridResult<Grid<f64>> {
    grid.require_stacked("non_zeros")?;
    Ok(grid.reduce_cells(|cell| cell.iter().filter(|v| **v != 0.0).count() as f64))
}

/// `focus / total` per cell, zero where the total is zero.
pub(crate) fn ratio(grid: &Grid<f64>, focus: Option<usize>) -> GlyphGridResult<Grid<f64>> {
    let depth = grid.require_stacked("ratio")?;
    if let Some(k) = focus {
        require_plane(depth, k, "ratio")?;
    }
    Ok(grid.reduce_cells(|cell| {
        let total: f64 = cell.iter().sum();
        if total == 0.0 {
            return 0.0;
        }
        let part = match focus {
            Some(k) => cell[k],
            None => cell.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        };
        part / total
    }))
}

pub(crate) fn select(grid: &Grid<f64>, plane: usize) -> GlyphGridResult<Grid<f64>> {
    let depth = grid.require_stacked("select")?;
    require_plane(depth, plane, "select")?;
    grid.plane(plane)
}

#[cfg(test)]
#[path = "../../tests/unit/shade/categories.rs"]
mod tests;
