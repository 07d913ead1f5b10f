//! Document authoring tool built on the folio markup pipeline: rendering
//! backends, a render cache, and document structure utilities.

pub mod cache;
pub mod outline;
pub mod render;
