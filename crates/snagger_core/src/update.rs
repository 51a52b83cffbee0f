use crate::{AppState, Effect, Msg, Phase, TransferFault, TransferOutcome};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            state.set_input(text);
            Vec::new()
        }
        Msg::Submitted => {
            // Only one of scanning/extracting/transferring may be active;
            // a submit while busy is rejected outright, never queued.
            if state.has_active_work() {
                return (state, Vec::new());
            }
            let target = state.input_trimmed().to_owned();
            if target.is_empty() {
                return (state, Vec::new());
            }
            state.begin_scan(target);
            vec![Effect::StartScan]
        }
        Msg::ScanStep { step, .. } => {
            if state.phase() == Phase::Scanning {
                state.apply_scan_step(step);
            }
            Vec::new()
        }
        Msg::ScanComplete => {
            if state.phase() != Phase::Scanning {
                return (state, Vec::new());
            }
            let Some(target) = state.active_target().map(ToOwned::to_owned) else {
                return (state, Vec::new());
            };
            state.begin_extract();
            vec![Effect::StartExtraction { target }]
        }
        Msg::ExtractSucceeded(descriptor) => {
            if state.phase() != Phase::Extracting {
                return (state, Vec::new());
            }
            // A descriptor with nothing selectable is a failure, not an
            // empty-but-ready catalog.
            if descriptor.variants.is_empty() {
                state.apply_failure("extraction produced no usable link".to_string());
            } else {
                state.apply_descriptor(descriptor);
            }
            Vec::new()
        }
        Msg::ExtractFailed { message, .. } => {
            if state.phase() == Phase::Extracting {
                state.apply_failure(message);
            }
            Vec::new()
        }
        Msg::VariantChosen(index) => {
            if state.phase() != Phase::Ready {
                return (state, Vec::new());
            }
            let choice = state
                .descriptor()
                .map(|descriptor| (descriptor.title.clone(), descriptor.variants.get(index).cloned()));
            match choice {
                Some((title, Some(variant))) if !variant.source_url.is_empty() => {
                    state.begin_transfer(index, variant.label.clone());
                    vec![Effect::StartTransfer {
                        title,
                        variant_index: index,
                        label: variant.label,
                        source_url: variant.source_url,
                    }]
                }
                // Unusable or out-of-range choice: hard failure without any
                // engine call; there is nothing to fall back to.
                Some(_) => {
                    state.record_outcome(TransferOutcome::HardFailed(TransferFault::EmptyLink));
                    Vec::new()
                }
                None => Vec::new(),
            }
        }
        Msg::TransferProgress(percent) => {
            if state.phase() == Phase::Transferring {
                state.apply_transfer_progress(percent);
            }
            Vec::new()
        }
        Msg::TransferFinished(outcome) => {
            if state.phase() == Phase::Transferring {
                state.finish_transfer(outcome);
            }
            Vec::new()
        }
        Msg::RestartClicked => {
            if matches!(state.phase(), Phase::Ready | Phase::Failed) {
                state.restart();
            }
            Vec::new()
        }
        Msg::CloseRequested => {
            let abort = state.has_active_work();
            state.teardown();
            if abort {
                vec![Effect::AbortInFlight]
            } else {
                Vec::new()
            }
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
