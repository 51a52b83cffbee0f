//! Snagger engine: provider IO, staged scan, transfer delivery.
mod engine;
mod extract;
mod filename;
mod normalize;
mod persist;
mod scan;
mod select;
mod sink;
mod transfer;
mod types;

pub use engine::EngineHandle;
pub use extract::{ExtractClient, ExtractSettings, HttpExtractClient};
pub use filename::transfer_filename;
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use scan::{ScanSettings, ScanSimulator, Sleeper, TokioSleeper};
pub use select::select_provider;
pub use sink::{ChannelProgressSink, ProgressSink};
pub use transfer::{HttpTransferEngine, TransferEngine, TransferSettings};
pub use types::{
    Deliverable, DeliveryAction, EngineConfig, EngineEvent, ExtractError, ExtractFault,
    ProviderKind, TransferFault, TransferOutcome, Variant, FALLBACK_PREVIEW, FALLBACK_SIZE,
    FALLBACK_TITLE,
};
