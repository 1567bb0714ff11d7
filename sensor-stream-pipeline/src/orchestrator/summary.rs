//! Run summary.

use crate::worker::WorkerReport;

/// Outcome of a whole run: one report per configured source, in
/// configuration order.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub reports: Vec<WorkerReport>,
}

impl RunSummary {
    pub fn new(reports: Vec<WorkerReport>) -> Self {
        Self { reports }
    }

    /// Documents accepted by the sink across all workers.
    pub fn emitted(&self) -> usize {
        self.reports.iter().map(|r| r.emitted).sum()
    }

    /// Rows skipped across all workers.
    pub fn skipped(&self) -> usize {
        self.reports.iter().map(|r| r.skipped).sum()
    }

    /// Documents rejected by the sink across all workers.
    pub fn failed(&self) -> usize {
        self.reports.iter().map(|r| r.failed).sum()
    }

    /// Workers that stopped before streaming their source.
    pub fn terminated(&self) -> usize {
        self.reports
            .iter()
            .filter(|r| r.terminal_error.is_some())
            .count()
    }
}
