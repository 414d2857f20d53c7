//! Library side of the `hotel-report` binary: logging setup and the
//! render pipeline with its dataset cache.

pub mod logging;
pub mod pipeline;
pub mod types;
