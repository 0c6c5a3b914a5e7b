//! Output Generation
//!
//! World snapshots for renderers and end-of-run summaries.

pub mod snapshot;
pub mod stats;

pub use snapshot::build_snapshot;
pub use stats::RunSummary;
