//! Chart assembly, rendering and run output.

pub mod builder;
pub mod summary;
pub mod svg;
pub mod viewer;

pub use builder::*;
pub use summary::*;
pub use svg::SvgRenderer;
