//! JSON render jobs: a serde model of a whole render, checked and built into the
//! library types before anything runs.

pub(crate) mod build;
pub(crate) mod model;
