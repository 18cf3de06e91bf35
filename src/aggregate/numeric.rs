use crate::{
    aggregate::engine::{for_each_covered_cell, Aggregator, AggregatorKind},
    foundation::core::Screen,
    foundation::error::GlyphGridResult,
    glyph::shape::{Glyph, ShapeCode},
    grid::Grid,
};

/// Number of glyphs covering each cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Count;

impl Aggregator for Count {
    type Info = ();

    fn kind(&self) -> AggregatorKind {
        AggregatorKind::Count
    }

    fn allocate(&self, screen: Screen) -> Grid<f64> {
        Grid::for_screen(screen, 0.0)
    }

    fn combine(
        &self,
        grid: &mut Grid<f64>,
        glyph: &Glyph,
        shape: ShapeCode,
        _info: &(),
    ) -> GlyphGridResult<()> {
        grid.require_scalar("count")?;
        for_each_covered_cell(grid, glyph, shape, |cell| cell[0] += 1.0)?;
        Ok(())
    }
}

/// Sum of info values of the glyphs covering each cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Sum;

impl Aggregator for Sum {
    type Info = f64;

    fn kind(&self) -> AggregatorKind {
        AggregatorKind::Sum
    }

    fn allocate(&self, screen: Screen) -> Grid<f64> {
        Grid::for_screen(screen, 0.0)
    }

    fn combine(
        &self,
        grid: &mut Grid<f64>,
        glyph: &Glyph,
        shape: ShapeCode,
        info: &f64,
    ) -> GlyphGridResult<()> {
        grid.require_scalar("sum")?;
        let v = *info;
        for_each_covered_cell(grid, glyph, shape, |cell| cell[0] += v)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/aggregate/numeric.rs"]
mod tests;
