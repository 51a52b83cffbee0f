//! Snagger core: pure acquisition state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use state::{
    AppState, Deliverable, ExtractFault, Phase, TransferFault, TransferJob, TransferOutcome,
    Variant, SCAN_TOTAL_STEPS,
};
pub use update::update;
pub use view_model::{PipelineViewModel, VariantRowView};
