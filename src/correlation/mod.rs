//! IOC correlation
//!
//! The graph builder and the run pipeline around it.

pub mod builder;
pub mod pipeline;

pub use builder::{BuildStats, CorrelationBuilder, CorrelationOutput};
pub use pipeline::{analyze, run, Analysis, AnalysisReport};
