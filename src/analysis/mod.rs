//! Analysis modules.
//!
//! Parsing and averaging of result files, and the per-run collection loop.

pub mod aggregator;
pub mod pipeline;

pub use aggregator::*;
pub use pipeline::*;
