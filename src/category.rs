//! Category labels as dense integer codes.

pub(crate) mod codec;
pub(crate) mod universe;
