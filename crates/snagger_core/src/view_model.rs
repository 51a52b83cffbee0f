use crate::{Phase, TransferOutcome};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PipelineViewModel {
    pub phase: Phase,
    pub input: String,
    pub scan_step: u8,
    pub scan_total: u8,
    pub title: Option<String>,
    pub preview_image: Option<String>,
    pub variants: Vec<VariantRowView>,
    pub progress_percent: Option<u8>,
    pub failure_message: Option<String>,
    pub last_outcome: Option<TransferOutcome>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantRowView {
    pub index: usize,
    pub label: String,
    pub size_hint: String,
    pub usable: bool,
}

impl PipelineViewModel {
    /// True when the most recent transfer should read as success to the
    /// user. The degraded fallback path counts: a file may have opened in
    /// a new context instead of saving directly, which is indistinguishable
    /// from the user's point of view.
    pub fn outcome_reads_as_success(&self) -> Option<bool> {
        self.last_outcome.map(|outcome| {
            matches!(
                outcome,
                TransferOutcome::Completed | TransferOutcome::FailedButRecovered
            )
        })
    }
}
