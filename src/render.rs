//! One-call driver: project a glyph set, aggregate it, shade the aggregate.

use crate::{
    aggregate::engine::{AggregateThreading, Aggregator, aggregate_with},
    foundation::core::{Screen, ViewTransform},
    foundation::error::GlyphGridResult,
    glyph::glyphset::GlyphSet,
    shade::chain::{ShaderChain, Shaded},
};

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub threading: AggregateThreading,
}

/// Render `glyphs` viewed through `vt` onto `screen`.
///
/// Pipeline:
/// 1. [`GlyphSet::project`] with `vt` composed after the set's current view
/// 2. aggregation with `aggregator`, partitioned when `settings.threading.parallel`
/// 3. [`ShaderChain::shade`]
///
/// The chain was checked when it was built, so a render never starts aggregating for a
/// chain that cannot run.
#[tracing::instrument(
    skip(glyphs, info, aggregator, chain, settings),
    fields(glyphs = glyphs.len(), kind = ?aggregator.kind(), stages = chain.len())
)]
pub fn render<A, D, F>(
    glyphs: &GlyphSet<D>,
    info: F,
    aggregator: &A,
    chain: &ShaderChain,
    screen: Screen,
    vt: ViewTransform,
    settings: &RenderSettings,
) -> GlyphGridResult<Shaded>
where
    A: Aggregator,
    D: Send + Sync,
    F: Fn(&D) -> A::Info + Sync,
{
    let projected = glyphs.project(vt)?;
    let grid = aggregate_with(aggregator, &projected, info, screen, &settings.threading)?;
    tracing::debug!(shape = %grid.shape(), "aggregate ready");
    chain.shade(grid)
}

#[cfg(test)]
#[path = "../tests/unit/render.rs"]
mod tests;
