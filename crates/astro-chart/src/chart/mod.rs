pub mod assembler;
pub mod result;

pub use assembler::{assemble, ChartRequest, FailurePolicy};
pub use result::{AngleEntry, BodyEntry, ChartAngles, ChartResult, Cusp, SkippedBody};
