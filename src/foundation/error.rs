/// Convenience result type used across glyphgrid.
pub type GlyphGridResult<T> = Result<T, GlyphGridError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum GlyphGridError {
    /// Invalid user-provided parameters or data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A coordinate or index fell outside the grid it addresses.
    #[error("bounds error: {0}")]
    Bounds(String),

    /// Grids with incompatible shapes were combined.
    #[error("shape error: {0}")]
    Shape(String),

    /// A label or grid depth disagrees with the category universe in use.
    #[error("category error: {0}")]
    Category(String),

    /// A shader chain was composed from incompatible stages.
    #[error("composition error: {0}")]
    Composition(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GlyphGridError {
    /// Build a [`GlyphGridError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`GlyphGridError::Bounds`] value.
    pub fn bounds(msg: impl Into<String>) -> Self {
        Self::Bounds(msg.into())
    }

    /// Build a [`GlyphGridError::Shape`] value.
    pub fn shape(msg: impl Into<String>) -> Self {
        Self::Shape(msg.into())
    }

    /// Build a [`GlyphGridError::Category`] value.
    pub fn category(msg: impl Into<String>) -> Self {
        Self::Category(msg.into())
    }

    /// Build a [`GlyphGridError::Composition`] value.
    pub fn composition(msg: impl Into<String>) -> Self {
        Self::Composition(msg.into())
    }

    /// Build a [`GlyphGridError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
