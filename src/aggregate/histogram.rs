use crate::{
    aggregate::engine::{Aggregator, AggregatorKind},
    foundation::core::Screen,
    foundation::error::{GlyphGridError, GlyphGridResult},
    glyph::glyphset::GlyphSet,
    glyph::shape::{Glyph, ShapeCode},
    grid::Grid,
};

/// Count aggregation specialized to point glyphs.
///
/// Bins each point's cell directly without building a footprint; points whose cell is
/// outside the canvas are dropped. Produces the same grid as [`Count`] on point sets.
///
/// [`Count`]: crate::Count
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PointHistogram;

impl Aggregator for PointHistogram {
    type Info = ();

    fn kind(&self) -> AggregatorKind {
        AggregatorKind::PointHistogram
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
        if shape != ShapeCode::Point {
            return Err(GlyphGridError::validation(format!(
                "point histogram requires point glyphs, got {shape:?}"
            )));
        }
        grid.require_scalar("point histogram")?;
        bin(grid, glyph);
        Ok(())
    }

    fn aggregate<D, F>(
        &self,
        glyphs: &GlyphSet<D>,
        _info: F,
        screen: Screen,
    ) -> GlyphGridResult<Grid<f64>>
    where
        F: Fn(&D),
    {
        if glyphs.shape() != ShapeCode::Point {
            return Err(GlyphGridError::validation(format!(
                "point histogram requires point glyphs, got {:?}",
                glyphs.shape()
            )));
        }
        let mut grid = self.allocate(screen);
        let mut dropped = 0usize;
        for glyph in glyphs.glyphs() {
            if !bin(&mut grid, glyph) {
                dropped += 1;
            }
        }
        if dropped > 0 {
            tracing::debug!(dropped, "points outside canvas dropped from histogram");
        }
        Ok(grid)
    }
}

fn bin(grid: &mut Grid<f64>, glyph: &Glyph) -> bool {
    let (Ok(x), Ok(y)) = (usize::try_from(glyph.x1), usize::try_from(glyph.y1)) else {
        return false;
    };
    match grid.cell_mut(x, y) {
        Some(cell) => {
            cell[0] += 1.0;
            true
        }
        None => false,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/aggregate/histogram.rs"]
mod tests;
