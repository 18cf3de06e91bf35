use rayon::prelude::*;

use crate::{
    foundation::core::Screen,
    foundation::error::{GlyphGridError, GlyphGridResult},
    geometry::for_each_line_cell_in,
    glyph::glyphset::GlyphSet,
    glyph::shape::{Glyph, ShapeCode},
    grid::Grid,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
/// The closed set of aggregator variants.
pub enum AggregatorKind {
    Count,
    Sum,
    CountCategories,
    PointHistogram,
}

/// Reduces glyphs into an aggregate grid.
///
/// The lifecycle is `allocate` once, then `combine` exactly once per glyph in arrival
/// order. `combine` only ever adds into the grid it is given, so disjoint glyph
/// subsets can be aggregated into separate grids and merged by `rollup` in any order.
pub trait Aggregator: Sync {
    /// Per-glyph value produced by the info function.
    type Info;

    fn kind(&self) -> AggregatorKind;

    /// Empty grid sized to `screen`.
    fn allocate(&self, screen: Screen) -> Grid<f64>;

    /// Add one glyph's footprint into `grid`.
    fn combine(
        &self,
        grid: &mut Grid<f64>,
        glyph: &Glyph,
        shape: ShapeCode,
        info: &Self::Info,
    ) -> GlyphGridResult<()>;

    /// Merge partial grids computed over disjoint glyph subsets.
    fn rollup(&self, grids: Vec<Grid<f64>>) -> GlyphGridResult<Grid<f64>> {
        rollup(grids)
    }

    /// Sequential aggregation of a whole (already projected) glyph set.
    fn aggregate<D, F>(
        &self,
        glyphs: &GlyphSet<D>,
        info: F,
        screen: Screen,
    ) -> GlyphGridResult<Grid<f64>>
    where
        Self: Sized,
        F: Fn(&D) -> Self::Info,
    {
        let infos: Vec<Self::Info> = glyphs.data().iter().map(&info).collect();
        let mut grid = self.allocate(screen);
        for (glyph, value) in glyphs.glyphs().iter().zip(&infos) {
            self.combine(&mut grid, glyph, glyphs.shape(), value)?;
        }
        tracing::debug!(kind = ?self.kind(), glyphs = glyphs.len(), "aggregated glyph set");
        Ok(grid)
    }
}

/// Elementwise sum of grids of identical shape.
pub fn rollup(grids: impl IntoIterator<Item = Grid<f64>>) -> GlyphGridResult<Grid<f64>> {
    let mut iter = grids.into_iter();
    let mut acc = iter
        .next()
        .ok_or_else(|| GlyphGridError::validation("rollup needs at least one grid"))?;
    for grid in iter {
        acc.add_assign(&grid)?;
    }
    Ok(acc)
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// How aggregation is split across worker threads.
pub struct AggregateThreading {
    /// Aggregate partitions on a dedicated rayon pool instead of sequentially.
    pub parallel: bool,
    /// Glyphs per partition.
    pub chunk_size: usize,
    /// Worker thread count. `None` uses rayon defaults.
    pub threads: Option<usize>,
}

impl Default for AggregateThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 65_536,
            threads: None,
        }
    }
}

impl AggregateThreading {
    pub fn validate(&self) -> GlyphGridResult<()> {
        if self.threads == Some(0) {
            return Err(GlyphGridError::validation(
                "aggregate threading 'threads' must be >= 1 when set",
            ));
        }
        Ok(())
    }
}

/// Aggregate `glyphs`, partitioned across a worker pool when `threading.parallel` is set.
///
/// Each partition is a contiguous run of glyphs aggregated into its own grid; partial
/// grids are merged with [`Aggregator::rollup`]. The result is identical to sequential
/// aggregation.
#[tracing::instrument(skip(aggregator, glyphs, info), fields(glyphs = glyphs.len()))]
pub fn aggregate_with<A, D, F>(
    aggregator: &A,
    glyphs: &GlyphSet<D>,
    info: F,
    screen: Screen,
    threading: &AggregateThreading,
) -> GlyphGridResult<Grid<f64>>
where
    A: Aggregator,
    D: Send + Sync,
    F: Fn(&D) -> A::Info + Sync,
{
    threading.validate()?;
    if !threading.parallel {
        return aggregator.aggregate(glyphs, info, screen);
    }

    let chunk = threading.chunk_size.max(1);
    let pool = build_thread_pool(threading.threads)?;
    let shape = glyphs.shape();

    let merged = pool.install(|| {
        glyphs
            .glyphs()
            .par_chunks(chunk)
            .zip(glyphs.data().par_chunks(chunk))
            .map(|(part, data)| -> GlyphGridResult<Grid<f64>> {
                let mut grid = aggregator.allocate(screen);
                for (glyph, d) in part.iter().zip(data) {
                    aggregator.combine(&mut grid, glyph, shape, &info(d))?;
                }
                Ok(grid)
            })
            .try_reduce_with(|a, b| aggregator.rollup(vec![a, b]))
    });

    tracing::debug!(
        kind = ?aggregator.kind(),
        partitions = glyphs.len().div_ceil(chunk),
        "parallel aggregation finished"
    );
    match merged {
        Some(grid) => grid,
        None => Ok(aggregator.allocate(screen)),
    }
}

fn build_thread_pool(threads: Option<usize>) -> GlyphGridResult<rayon::ThreadPool> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder.build().map_err(|e| {
        GlyphGridError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}"))
    })
}

/// Call `f` on every in-canvas cell covered by `glyph`; returns the number of cells.
///
/// Points cover one cell, rects their whole box, lines the Bresenham cells between
/// their endpoints inside their bounding box (the max endpoint pulled in by one to
/// stay inside the half-open box). The footprint is clipped to the grid first and
/// only the clipped part is walked; a glyph entirely off-canvas touches nothing.
pub(crate) fn for_each_covered_cell(
    grid: &mut Grid<f64>,
    glyph: &Glyph,
    shape: ShapeCode,
    mut f: impl FnMut(&mut [f64]),
) -> GlyphGridResult<usize> {
    let bbox = glyph.bbox();
    let Some(clip) = bbox.clip(grid.width(), grid.height()) else {
        tracing::trace!(?glyph, "glyph outside canvas, skipped");
        return Ok(0);
    };

    let mut written = 0;
    let mut visit = |x: i64, y: i64| -> GlyphGridResult<()> {
        let cell = usize::try_from(x)
            .ok()
            .zip(usize::try_from(y).ok())
            .and_then(|(x, y)| grid.cell_mut(x, y))
            .ok_or_else(|| {
                GlyphGridError::bounds(format!("cell ({x}, {y}) outside clipped canvas"))
            })?;
        f(cell);
        written += 1;
        Ok(())
    };

    match shape {
        ShapeCode::Point | ShapeCode::Rect => {
            for y in clip.y0..clip.y1 {
                for x in clip.x0..clip.x1 {
                    visit(i64::from(x), i64::from(y))?;
                }
            }
        }
        ShapeCode::Line => {
            let end = |v: i32, max: i32| i64::from(v).min(i64::from(max) - 1);
            let mut result = Ok(());
            for_each_line_cell_in(
                (end(glyph.x1, bbox.x1), end(glyph.y1, bbox.y1)),
                (end(glyph.x2, bbox.x1), end(glyph.y2, bbox.y1)),
                &clip,
                |x, y| {
                    if result.is_ok() {
                        result = visit(x, y);
                    }
                },
            );
            result?;
        }
    }
    Ok(written)
}

#[cfg(test)]
#[path = "../../tests/unit/aggregate/engine.rs"]
mod tests;
