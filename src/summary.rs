//! End-of-run summary.

use crate::model::RunCounts;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// At least one record reached the sinks.
    Processed,
    /// Records were read but every one was filtered or skipped.
    NothingProcessed,
    /// The input had no records at all.
    EmptyInput,
}

pub fn outcome(counts: &RunCounts) -> Outcome {
    match (counts.read, counts.processed) {
        (0, _) => Outcome::EmptyInput,
        (_, 0) => Outcome::NothingProcessed,
        _ => Outcome::Processed,
    }
}

pub fn log_summary(counts: &RunCounts) {
    log::info!(
        "Finished processing. Total VCF records read: {}, Records processed/written: {}",
        counts.read,
        counts.processed
    );
    match outcome(counts) {
        Outcome::Processed => {}
        Outcome::NothingProcessed => log::warn!(
            "No records were successfully processed and written. Check filters or formatting logic."
        ),
        Outcome::EmptyInput => log::warn!("Input VCF contained no processable records."),
    }
}
