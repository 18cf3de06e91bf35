//! Grid-to-grid and grid-to-image transforms, and the chain that sequences them.
//!
//! Stages fall into three kinds: per-cell transforms ([`CellShader`], [`ColorShader`]),
//! neighborhood transforms ([`Spread`]) and shape transforms ([`Contour`]). Color and
//! shape stages are terminal; nothing can follow them in a [`ShaderChain`].
//!
//! [`CellShader`]: crate::CellShader
//! [`ColorShader`]: crate::ColorShader
//! [`Spread`]: crate::Spread
//! [`Contour`]: crate::Contour
//! [`ShaderChain`]: crate::ShaderChain

pub(crate) mod categories;
pub(crate) mod chain;
pub(crate) mod color;
pub(crate) mod numeric;
pub(crate) mod spread;

use crate::foundation::error::{GlyphGridError, GlyphGridResult};

pub(crate) fn require_plane(depth: usize, plane: usize, who: &str) -> GlyphGridResult<()> {
    if plane >= depth {
        return Err(GlyphGridError::bounds(format!(
            "{who} plane {plane} out of range for {depth} categories"
        )));
    }
    Ok(())
}
