//! Glyphs, glyph sets and their projection from data space into pixel space.

pub(crate) mod glyphset;
pub(crate) mod shape;
pub mod shaper;
