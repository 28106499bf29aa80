pub mod pipeline;
pub mod report;

pub use pipeline::{Pipeline, PipelineSettings};
pub use report::Report;
