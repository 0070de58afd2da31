// Simulation harness: post-draft evaluation, the batch benchmark runner,
// and report formatting.

pub mod evaluate;
pub mod report;
pub mod runner;

pub use evaluate::{evaluate_draft, Evaluation};
pub use runner::{run_batch, summarize, BatchOptions, BatchSummary};
