pub mod aggregate;
pub mod batch;
pub mod kernel;

pub use aggregate::{Aggregation, ContingencyTable, HIT_THRESHOLD, aggregate};
pub use batch::{PvaluePair, evaluate, evaluate_sequential};
pub use kernel::{FastFisher, PValueKernel};
