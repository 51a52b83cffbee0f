#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Run the staged pre-extraction scan.
    StartScan,
    /// Resolve the target against its extraction provider.
    StartExtraction { target: String },
    /// Deliver the chosen variant.
    StartTransfer {
        title: String,
        variant_index: usize,
        label: String,
        source_url: String,
    },
    /// Cancel whatever the engine is currently doing.
    AbortInFlight,
}
