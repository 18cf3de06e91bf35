use std::hash::Hash;

use crate::{
    aggregate::engine::{for_each_covered_cell, Aggregator, AggregatorKind},
    category::universe::CategoryUniverse,
    foundation::core::Screen,
    foundation::error::{GlyphGridError, GlyphGridResult},
    glyph::shape::{Glyph, ShapeCode},
    grid::Grid,
};

/// Per-category glyph counts, one plane per label of a fixed universe.
///
/// The universe is fixed before aggregation starts, so every partial grid has the
/// same depth and rollup stays a plain elementwise sum. A glyph whose label is not in
/// the universe is an error rather than a silently dropped count.
#[derive(Clone, Debug)]
pub struct CountCategories<L: Eq + Hash> {
    universe: CategoryUniverse<L>,
}

impl<L: Eq + Hash> CountCategories<L> {
    pub fn new(universe: CategoryUniverse<L>) -> GlyphGridResult<Self> {
        if universe.is_empty() {
            return Err(GlyphGridError::category(
                "category universe must contain at least one label",
            ));
        }
        Ok(Self { universe })
    }

    pub fn universe(&self) -> &CategoryUniverse<L> {
        &self.universe
    }
}

impl<L: Eq + Hash + Sync + std::fmt::Debug> Aggregator for CountCategories<L> {
    type Info = L;

    fn kind(&self) -> AggregatorKind {
        AggregatorKind::CountCategories
    }

    fn allocate(&self, screen: Screen) -> Grid<f64> {
        Grid::stacked(
            screen.width_px(),
            screen.height_px(),
            self.universe.len(),
            0.0,
        )
    }

    fn combine(
        &self,
        grid: &mut Grid<f64>,
        glyph: &Glyph,
        shape: ShapeCode,
        info: &L,
    ) -> GlyphGridResult<()> {
        if grid.depth() != Some(self.universe.len()) {
            return Err(GlyphGridError::category(format!(
                "grid of shape {} does not match a universe of {} categories",
                grid.shape(),
                self.universe.len()
            )));
        }
        let k = self.universe.index_of(info).ok_or_else(|| {
            GlyphGridError::category(format!("label {info:?} is not in the category universe"))
        })?;
        for_each_covered_cell(grid, glyph, shape, |cell| cell[k] += 1.0)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/aggregate/categories.rs"]
mod tests;
