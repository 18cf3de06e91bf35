//! Reduction of projected glyphs into aggregate grids.

pub(crate) mod categories;
pub(crate) mod engine;
pub(crate) mod histogram;
pub(crate) mod numeric;
