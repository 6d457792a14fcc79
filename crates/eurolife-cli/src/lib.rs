//! Library side of the eurolife CLI: logging setup and the pipeline stages.

pub mod logging;
pub mod pipeline;
pub mod types;
