use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use pipeline_logging::{pipeline_error, pipeline_info, pipeline_warn};
use snagger_core::{Effect, Msg};
use snagger_engine::{
    AtomicFileWriter, DeliveryAction, EngineConfig, EngineEvent, EngineHandle,
};

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(msg_tx: mpsc::Sender<Msg>) -> Self {
        let engine = EngineHandle::new(engine_config_from_env());
        let runner = Self { engine };
        runner.spawn_event_loop(msg_tx);
        runner
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::StartScan => {
                    self.engine.run_scan();
                }
                Effect::StartExtraction { target } => {
                    pipeline_info!("StartExtraction target_len={} target={}", target.len(), target);
                    self.engine.extract(target);
                }
                Effect::StartTransfer {
                    title,
                    label,
                    source_url,
                    ..
                } => {
                    pipeline_info!("StartTransfer label={} url_len={}", label, source_url.len());
                    self.engine.transfer(title, label, source_url);
                }
                Effect::AbortInFlight => {
                    self.engine.abort();
                }
            }
        }
    }

    fn spawn_event_loop(&self, msg_tx: mpsc::Sender<Msg>) {
        let engine = self.engine.clone();
        let downloads = downloads_dir();
        thread::spawn(move || loop {
            if let Some(event) = engine.try_recv() {
                match event {
                    EngineEvent::ScanStep { step, total } => {
                        let _ = msg_tx.send(Msg::ScanStep { step, total });
                    }
                    EngineEvent::ScanComplete => {
                        let _ = msg_tx.send(Msg::ScanComplete);
                    }
                    EngineEvent::Extracted { result } => {
                        let msg = match result {
                            Ok(deliverable) => Msg::ExtractSucceeded(map_deliverable(deliverable)),
                            Err(err) => {
                                pipeline_warn!("extraction failed: {}", err);
                                Msg::ExtractFailed {
                                    fault: map_extract_fault(err.fault),
                                    message: err.message,
                                }
                            }
                        };
                        let _ = msg_tx.send(msg);
                    }
                    EngineEvent::TransferProgress { percent } => {
                        let _ = msg_tx.send(Msg::TransferProgress(percent));
                    }
                    EngineEvent::Deliver(action) => {
                        deliver(&downloads, action);
                    }
                    EngineEvent::TransferFinished { outcome } => {
                        let _ = msg_tx.send(Msg::TransferFinished(map_outcome(outcome)));
                    }
                }
            } else {
                thread::sleep(Duration::from_millis(20));
            }
        });
    }
}

/// The only externally observable transfer effects: a save-file event with
/// an in-memory buffer, or a hand-off of the raw URL to the OS.
fn deliver(downloads: &Path, action: DeliveryAction) {
    match action {
        DeliveryAction::SaveFile { filename, bytes } => {
            let writer = AtomicFileWriter::new(downloads.to_path_buf());
            match writer.write_bytes(&filename, &bytes) {
                Ok(path) => pipeline_info!("saved {} bytes to {:?}", bytes.len(), path),
                Err(err) => pipeline_error!("failed to save {}: {}", filename, err),
            }
        }
        DeliveryAction::OpenExternal { url } => {
            // Degraded path: the resource may open in a browser tab instead
            // of saving directly.
            if let Err(err) = open::that_detached(&url) {
                pipeline_error!("failed to open {} externally: {}", url, err);
            }
        }
    }
}

fn engine_config_from_env() -> EngineConfig {
    let mut config = EngineConfig::default();
    if let Ok(endpoint) = std::env::var("SNAGGER_VIDEO_API") {
        config.extract.video_endpoint = endpoint;
    }
    if let Ok(endpoint) = std::env::var("SNAGGER_SOCIAL_API") {
        config.extract.social_endpoint = endpoint;
    }
    if let Ok(key) = std::env::var("SNAGGER_API_KEY") {
        config.extract.api_key = key;
    }
    config
}

fn downloads_dir() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("downloads")
}

fn map_deliverable(deliverable: snagger_engine::Deliverable) -> snagger_core::Deliverable {
    snagger_core::Deliverable {
        title: deliverable.title,
        preview_image: deliverable.preview_image,
        variants: deliverable
            .variants
            .into_iter()
            .map(|variant| snagger_core::Variant {
                label: variant.label,
                source_url: variant.source_url,
                size_hint: variant.size_hint,
            })
            .collect(),
    }
}

fn map_extract_fault(fault: snagger_engine::ExtractFault) -> snagger_core::ExtractFault {
    match fault {
        snagger_engine::ExtractFault::NoUsableLink => snagger_core::ExtractFault::NoUsableLink,
        snagger_engine::ExtractFault::NetworkOrProviderFault => {
            snagger_core::ExtractFault::NetworkOrProviderFault
        }
        snagger_engine::ExtractFault::Cancelled => snagger_core::ExtractFault::Cancelled,
    }
}

fn map_outcome(outcome: snagger_engine::TransferOutcome) -> snagger_core::TransferOutcome {
    match outcome {
        snagger_engine::TransferOutcome::Completed => snagger_core::TransferOutcome::Completed,
        snagger_engine::TransferOutcome::FailedButRecovered => {
            snagger_core::TransferOutcome::FailedButRecovered
        }
        snagger_engine::TransferOutcome::HardFailed(fault) => {
            snagger_core::TransferOutcome::HardFailed(match fault {
                snagger_engine::TransferFault::EmptyLink => snagger_core::TransferFault::EmptyLink,
                snagger_engine::TransferFault::Cancelled => snagger_core::TransferFault::Cancelled,
            })
        }
    }
}
