//! CLI library components for the span timeline tool.

pub mod logging;
pub mod pipeline;
