//! glyphgrid rasterizes very large glyph sets by aggregating before it draws.
//!
//! A render runs in three steps:
//!
//! - Project a [`GlyphSet`] from data space into pixel space with a [`ViewTransform`]
//! - Aggregate the glyphs into a [`Grid`] with an [`Aggregator`] ([`Count`], [`Sum`],
//!   [`CountCategories`], [`PointHistogram`]), optionally across a worker pool
//! - Shade the aggregate through a [`ShaderChain`] into numbers, colors or contours
//!
//! [`render`] runs all three; [`RenderJob`] wraps them behind a JSON job description.
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod aggregate;
pub(crate) mod category;
pub(crate) mod contour;
pub(crate) mod geometry;
/// Glyph records, glyph sets and row shapers.
pub mod glyph;
pub(crate) mod grid;
pub mod info;
pub(crate) mod job;
pub(crate) mod render;
pub(crate) mod shade;

pub use crate::foundation::core::{Affine, Point, Rect, Rgba8, Screen, ViewTransform};
pub use crate::foundation::error::{GlyphGridError, GlyphGridResult};

pub use crate::aggregate::categories::CountCategories;
pub use crate::aggregate::engine::{
    AggregateThreading, Aggregator, AggregatorKind, aggregate_with, rollup,
};
pub use crate::aggregate::histogram::PointHistogram;
pub use crate::aggregate::numeric::{Count, Sum};
pub use crate::category::codec::{AutoEncoder, StaticCodec};
pub use crate::category::universe::CategoryUniverse;
pub use crate::contour::{Contour, ContourSet, IsoContour, Levels, Trace, TraceFormat};
pub use crate::geometry::draw_line;
pub use crate::glyph::glyphset::GlyphSet;
pub use crate::glyph::shape::{Glyph, PixelBox, ShapeCode};
pub use crate::glyph::shaper::Shaper;
pub use crate::grid::{ColorGrid, Grid, GridShape};
pub use crate::job::build::parse_shader;
pub use crate::job::model::{AggregatorSpec, FitSpec, JobValue, RenderJob, ShaderSpec};
pub use crate::render::{RenderSettings, render};
pub use crate::shade::chain::{GridForm, Shaded, Shader, ShaderChain, ShaderKind};
pub use crate::shade::color::{BinarySegment, ColorShader, HdAlpha, InterpolateColors, MinPercent};
pub use crate::shade::numeric::{CellShader, Empty, Interpolate};
pub use crate::shade::spread::{Spread, SpreadShape};
