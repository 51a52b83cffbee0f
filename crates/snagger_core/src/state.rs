use crate::view_model::{PipelineViewModel, VariantRowView};

/// Number of staged scan notifications emitted before extraction begins.
pub const SCAN_TOTAL_STEPS: u8 = 4;

/// Lifecycle phase of the acquisition pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Scanning,
    Extracting,
    Ready,
    Transferring,
    Failed,
}

/// One selectable deliverable output for the current target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    pub label: String,
    /// Empty string means "not usable"; choosing it is a hard failure.
    pub source_url: String,
    pub size_hint: String,
}

/// Normalized extraction result: what the provider resolved for the target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deliverable {
    pub title: String,
    pub preview_image: String,
    pub variants: Vec<Variant>,
}

/// The single in-flight transfer. Ephemeral: discarded on completion or restart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferJob {
    pub variant_index: usize,
    pub label: String,
    pub progress_percent: u8,
    pub terminal: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractFault {
    NoUsableLink,
    NetworkOrProviderFault,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferFault {
    EmptyLink,
    Cancelled,
}

/// Terminal report for one transfer. `FailedButRecovered` is the degraded
/// cross-origin fallback and reads as success to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferOutcome {
    Completed,
    FailedButRecovered,
    HardFailed(TransferFault),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    phase: Phase,
    input: String,
    active_target: Option<String>,
    scan_step: u8,
    descriptor: Option<Deliverable>,
    job: Option<TransferJob>,
    failure_message: Option<String>,
    last_outcome: Option<TransferOutcome>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> PipelineViewModel {
        let variants = self
            .descriptor
            .as_ref()
            .map(|descriptor| {
                descriptor
                    .variants
                    .iter()
                    .enumerate()
                    .map(|(index, variant)| VariantRowView {
                        index,
                        label: variant.label.clone(),
                        size_hint: variant.size_hint.clone(),
                        usable: !variant.source_url.is_empty(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        PipelineViewModel {
            phase: self.phase,
            input: self.input.clone(),
            scan_step: self.scan_step,
            scan_total: SCAN_TOTAL_STEPS,
            title: self.descriptor.as_ref().map(|d| d.title.clone()),
            preview_image: self.descriptor.as_ref().map(|d| d.preview_image.clone()),
            variants,
            progress_percent: self.job.as_ref().map(|job| job.progress_percent),
            failure_message: self.failure_message.clone(),
            last_outcome: self.last_outcome,
            dirty: self.dirty,
        }
    }

    /// Returns the dirty flag and clears it; used by shells to coalesce renders.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn descriptor(&self) -> Option<&Deliverable> {
        self.descriptor.as_ref()
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_input(&mut self, text: String) {
        self.input = text;
        self.mark_dirty();
    }

    pub(crate) fn input_trimmed(&self) -> &str {
        self.input.trim()
    }

    pub(crate) fn active_target(&self) -> Option<&str> {
        self.active_target.as_deref()
    }

    pub(crate) fn begin_scan(&mut self, target: String) {
        self.phase = Phase::Scanning;
        self.active_target = Some(target);
        self.scan_step = 0;
        self.descriptor = None;
        self.job = None;
        self.failure_message = None;
        self.last_outcome = None;
        self.mark_dirty();
    }

    pub(crate) fn apply_scan_step(&mut self, step: u8) {
        self.scan_step = step.min(SCAN_TOTAL_STEPS);
        self.mark_dirty();
    }

    pub(crate) fn begin_extract(&mut self) {
        self.phase = Phase::Extracting;
        self.mark_dirty();
    }

    pub(crate) fn apply_descriptor(&mut self, descriptor: Deliverable) {
        self.phase = Phase::Ready;
        self.descriptor = Some(descriptor);
        self.mark_dirty();
    }

    pub(crate) fn apply_failure(&mut self, message: String) {
        self.phase = Phase::Failed;
        self.descriptor = None;
        self.job = None;
        self.failure_message = Some(message);
        self.mark_dirty();
    }

    pub(crate) fn begin_transfer(&mut self, variant_index: usize, label: String) {
        self.phase = Phase::Transferring;
        self.job = Some(TransferJob {
            variant_index,
            label,
            progress_percent: 0,
            terminal: false,
        });
        self.mark_dirty();
    }

    pub(crate) fn apply_transfer_progress(&mut self, percent: u8) {
        if let Some(job) = self.job.as_mut() {
            // Progress is monotonic; stale notifications never walk it back.
            let clamped = percent.min(100);
            if clamped > job.progress_percent {
                job.progress_percent = clamped;
                self.dirty = true;
            }
        }
    }

    pub(crate) fn finish_transfer(&mut self, outcome: TransferOutcome) {
        self.phase = Phase::Ready;
        self.job = None;
        self.last_outcome = Some(outcome);
        self.mark_dirty();
    }

    pub(crate) fn record_outcome(&mut self, outcome: TransferOutcome) {
        self.last_outcome = Some(outcome);
        self.mark_dirty();
    }

    pub(crate) fn restart(&mut self) {
        let input = std::mem::take(&mut self.input);
        *self = Self {
            input,
            dirty: true,
            ..Self::default()
        };
    }

    pub(crate) fn teardown(&mut self) {
        *self = Self {
            dirty: true,
            ..Self::default()
        };
    }

    pub(crate) fn has_active_work(&self) -> bool {
        matches!(
            self.phase,
            Phase::Scanning | Phase::Extracting | Phase::Transferring
        )
    }
}
