use std::sync::Once;

use snagger_core::{
    update, AppState, Deliverable, Effect, Msg, Phase, TransferFault, TransferOutcome, Variant,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(pipeline_logging::initialize_for_tests);
}

fn ready_state() -> AppState {
    let state = AppState::new();
    let (state, _) = update(
        state,
        Msg::InputChanged("https://video-host.example/watch?v=abc".to_string()),
    );
    let (state, _) = update(state, Msg::Submitted);
    let (state, _) = update(state, Msg::ScanComplete);
    let deliverable = Deliverable {
        title: "Demo".to_string(),
        preview_image: "https://cdn.example/thumb.jpg".to_string(),
        variants: vec![
            Variant {
                label: "MP4 Video (HD)".to_string(),
                source_url: "https://cdn.example/file.mp4".to_string(),
                size_hint: "12 MB".to_string(),
            },
            Variant {
                label: "MP3 Audio".to_string(),
                source_url: String::new(),
                size_hint: "N/A".to_string(),
            },
        ],
    };
    let (state, _) = update(state, Msg::ExtractSucceeded(deliverable));
    state
}

#[test]
fn choosing_usable_variant_starts_transfer() {
    init_logging();
    let state = ready_state();

    let (next, effects) = update(state, Msg::VariantChosen(0));

    assert_eq!(next.phase(), Phase::Transferring);
    assert_eq!(
        effects,
        vec![Effect::StartTransfer {
            title: "Demo".to_string(),
            variant_index: 0,
            label: "MP4 Video (HD)".to_string(),
            source_url: "https://cdn.example/file.mp4".to_string(),
        }]
    );
    assert_eq!(next.view().progress_percent, Some(0));
}

#[test]
fn choosing_unusable_variant_fails_hard_without_engine_call() {
    init_logging();
    let state = ready_state();

    let (next, effects) = update(state, Msg::VariantChosen(1));

    assert_eq!(next.phase(), Phase::Ready);
    assert!(effects.is_empty());
    assert_eq!(
        next.view().last_outcome,
        Some(TransferOutcome::HardFailed(TransferFault::EmptyLink))
    );
}

#[test]
fn choosing_out_of_range_variant_fails_hard() {
    init_logging();
    let state = ready_state();

    let (next, effects) = update(state, Msg::VariantChosen(9));

    assert!(effects.is_empty());
    assert_eq!(
        next.view().last_outcome,
        Some(TransferOutcome::HardFailed(TransferFault::EmptyLink))
    );
}

#[test]
fn transfer_progress_is_monotonic() {
    init_logging();
    let state = ready_state();
    let (state, _) = update(state, Msg::VariantChosen(0));

    let (state, _) = update(state, Msg::TransferProgress(35));
    assert_eq!(state.view().progress_percent, Some(35));

    // A stale notification must never walk progress backwards.
    let (state, _) = update(state, Msg::TransferProgress(20));
    assert_eq!(state.view().progress_percent, Some(35));

    let (state, _) = update(state, Msg::TransferProgress(100));
    assert_eq!(state.view().progress_percent, Some(100));
}

#[test]
fn completed_transfer_returns_to_ready_keeping_descriptor() {
    init_logging();
    let state = ready_state();
    let (state, _) = update(state, Msg::VariantChosen(0));
    let (state, _) = update(state, Msg::TransferProgress(100));

    let (next, effects) = update(state, Msg::TransferFinished(TransferOutcome::Completed));

    assert_eq!(next.phase(), Phase::Ready);
    assert!(effects.is_empty());
    assert!(next.descriptor().is_some());
    let view = next.view();
    assert_eq!(view.last_outcome, Some(TransferOutcome::Completed));
    assert_eq!(view.outcome_reads_as_success(), Some(true));
    // The job is discarded with the terminal report.
    assert_eq!(view.progress_percent, None);
}

#[test]
fn degraded_transfer_reads_as_success() {
    init_logging();
    let state = ready_state();
    let (state, _) = update(state, Msg::VariantChosen(0));

    let (next, _) = update(
        state,
        Msg::TransferFinished(TransferOutcome::FailedButRecovered),
    );

    assert_eq!(next.phase(), Phase::Ready);
    assert_eq!(next.view().outcome_reads_as_success(), Some(true));
}

#[test]
fn second_variant_can_be_chosen_after_completion() {
    init_logging();
    let state = ready_state();
    let (state, _) = update(state, Msg::VariantChosen(0));
    let (state, _) = update(state, Msg::TransferFinished(TransferOutcome::Completed));

    let (next, effects) = update(state, Msg::VariantChosen(0));

    assert_eq!(next.phase(), Phase::Transferring);
    assert_eq!(effects.len(), 1);
}

#[test]
fn submit_while_transferring_is_ignored() {
    init_logging();
    let state = ready_state();
    let (state, _) = update(state, Msg::VariantChosen(0));

    let (next, effects) = update(state, Msg::Submitted);

    assert_eq!(next.phase(), Phase::Transferring);
    assert!(effects.is_empty());
}
