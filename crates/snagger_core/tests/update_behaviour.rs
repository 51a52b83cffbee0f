use std::sync::Once;

use snagger_core::{
    update, AppState, Deliverable, Effect, ExtractFault, Msg, Phase, Variant, SCAN_TOTAL_STEPS,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(pipeline_logging::initialize_for_tests);
}

fn submit_target(state: AppState, input: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::InputChanged(input.to_string()));
    update(state, Msg::Submitted)
}

fn demo_deliverable() -> Deliverable {
    Deliverable {
        title: "Demo".to_string(),
        preview_image: "https://cdn.example/thumb.jpg".to_string(),
        variants: vec![
            Variant {
                label: "MP4 Video (HD)".to_string(),
                source_url: "https://cdn.example/file.mp4".to_string(),
                size_hint: "N/A".to_string(),
            },
            Variant {
                label: "MP3 Audio".to_string(),
                source_url: "https://cdn.example/file.mp4".to_string(),
                size_hint: "N/A".to_string(),
            },
        ],
    }
}

#[test]
fn submit_moves_idle_to_scanning_and_starts_scan() {
    init_logging();
    let state = AppState::new();

    let (mut next, effects) = submit_target(state, "  https://video-host.example/watch?v=abc  ");

    assert_eq!(next.phase(), Phase::Scanning);
    assert_eq!(effects, vec![Effect::StartScan]);
    assert!(next.consume_dirty());
}

#[test]
fn empty_submit_is_a_noop() {
    init_logging();
    let state = AppState::new();

    let (state, _) = update(state, Msg::InputChanged("   \n".to_string()));
    let (next, effects) = update(state.clone(), Msg::Submitted);

    assert_eq!(next, state);
    assert!(effects.is_empty());
}

#[test]
fn scan_complete_starts_extraction_with_submitted_target() {
    init_logging();
    let state = AppState::new();
    let (state, _) = submit_target(state, "https://video-host.example/watch?v=abc");

    for step in 1..=SCAN_TOTAL_STEPS {
        let (next, effects) = update(
            state.clone(),
            Msg::ScanStep {
                step,
                total: SCAN_TOTAL_STEPS,
            },
        );
        assert_eq!(next.view().scan_step, step);
        assert!(effects.is_empty());
    }

    let (next, effects) = update(state, Msg::ScanComplete);
    assert_eq!(next.phase(), Phase::Extracting);
    assert_eq!(
        effects,
        vec![Effect::StartExtraction {
            target: "https://video-host.example/watch?v=abc".to_string(),
        }]
    );
}

#[test]
fn submit_while_extracting_is_ignored() {
    init_logging();
    let state = AppState::new();
    let (state, _) = submit_target(state, "https://video-host.example/watch?v=abc");
    let (state, _) = update(state, Msg::ScanComplete);
    assert_eq!(state.phase(), Phase::Extracting);

    // A second submit must not restart the pipeline or emit a second
    // extraction effect.
    let (state, effects) = update(state, Msg::InputChanged("https://other.example".to_string()));
    assert!(effects.is_empty());
    let (next, effects) = update(state, Msg::Submitted);

    assert_eq!(next.phase(), Phase::Extracting);
    assert!(effects.is_empty());
}

#[test]
fn extraction_success_reaches_ready_with_variants() {
    init_logging();
    let state = AppState::new();
    let (state, _) = submit_target(state, "https://video-host.example/watch?v=abc");
    let (state, _) = update(state, Msg::ScanComplete);

    let (next, effects) = update(state, Msg::ExtractSucceeded(demo_deliverable()));

    assert_eq!(next.phase(), Phase::Ready);
    assert!(effects.is_empty());
    let view = next.view();
    assert_eq!(view.title.as_deref(), Some("Demo"));
    assert_eq!(view.variants.len(), 2);
    assert!(view.variants.iter().all(|row| row.usable));
}

#[test]
fn empty_extraction_result_is_a_failure_not_ready() {
    init_logging();
    let state = AppState::new();
    let (state, _) = submit_target(state, "https://social.example/post/1");
    let (state, _) = update(state, Msg::ScanComplete);

    let empty = Deliverable {
        title: "Untitled media".to_string(),
        preview_image: String::new(),
        variants: Vec::new(),
    };
    let (next, _) = update(state, Msg::ExtractSucceeded(empty));

    assert_eq!(next.phase(), Phase::Failed);
    assert!(next.view().failure_message.is_some());
}

#[test]
fn extraction_failure_reaches_failed_and_allows_resubmit() {
    init_logging();
    let state = AppState::new();
    let (state, _) = submit_target(state, "https://social.example/post/1");
    let (state, _) = update(state, Msg::ScanComplete);

    let (state, _) = update(
        state,
        Msg::ExtractFailed {
            fault: ExtractFault::NoUsableLink,
            message: "no usable link for target".to_string(),
        },
    );
    assert_eq!(state.phase(), Phase::Failed);
    assert_eq!(
        state.view().failure_message.as_deref(),
        Some("no usable link for target")
    );

    // The user may re-submit straight from Failed.
    let (next, effects) = update(state, Msg::Submitted);
    assert_eq!(next.phase(), Phase::Scanning);
    assert_eq!(effects, vec![Effect::StartScan]);
}

#[test]
fn restart_from_ready_returns_to_idle_and_releases_descriptor() {
    init_logging();
    let state = AppState::new();
    let (state, _) = submit_target(state, "https://video-host.example/watch?v=abc");
    let (state, _) = update(state, Msg::ScanComplete);
    let (state, _) = update(state, Msg::ExtractSucceeded(demo_deliverable()));
    assert!(state.descriptor().is_some());

    let (next, effects) = update(state, Msg::RestartClicked);

    assert_eq!(next.phase(), Phase::Idle);
    assert!(next.descriptor().is_none());
    assert!(effects.is_empty());
    assert!(next.view().variants.is_empty());
}

#[test]
fn close_while_busy_aborts_in_flight_work() {
    init_logging();
    let state = AppState::new();
    let (state, _) = submit_target(state, "https://video-host.example/watch?v=abc");
    let (state, _) = update(state, Msg::ScanComplete);

    let (next, effects) = update(state, Msg::CloseRequested);

    assert_eq!(next.phase(), Phase::Idle);
    assert!(next.descriptor().is_none());
    assert_eq!(effects, vec![Effect::AbortInFlight]);
}

#[test]
fn close_while_idle_has_no_side_effects() {
    init_logging();
    let state = AppState::new();
    let (next, effects) = update(state, Msg::CloseRequested);

    assert_eq!(next.phase(), Phase::Idle);
    assert!(effects.is_empty());
}
