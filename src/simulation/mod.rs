//! Batch orchestration over independent encounters

pub mod batch;

pub use batch::{run_batch, run_single, write_csv, BatchReport, BatchStats};
