#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the target input box.
    InputChanged(String),
    /// User submitted the current target for acquisition.
    Submitted,
    /// One staged scan notification from the engine.
    ScanStep { step: u8, total: u8 },
    /// The staged scan finished; extraction may begin.
    ScanComplete,
    /// Extraction resolved the target into a deliverable.
    ExtractSucceeded(crate::Deliverable),
    /// Extraction failed; the user must resubmit manually.
    ExtractFailed {
        fault: crate::ExtractFault,
        message: String,
    },
    /// User committed to a variant by index into the current deliverable.
    VariantChosen(usize),
    /// Synthetic transfer progress, 0..=100.
    TransferProgress(u8),
    /// Terminal transfer report from the engine.
    TransferFinished(crate::TransferOutcome),
    /// User clicked Restart: back to Idle, descriptor discarded.
    RestartClicked,
    /// User closed the shell; tear down and abort in-flight work.
    CloseRequested,
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
