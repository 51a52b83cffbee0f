use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use pipeline_logging::pipeline_info;
use tokio_util::sync::CancellationToken;

use crate::extract::{ExtractClient, HttpExtractClient};
use crate::scan::ScanSimulator;
use crate::select::select_provider;
use crate::sink::ChannelProgressSink;
use crate::transfer::{HttpTransferEngine, TransferEngine};
use crate::{EngineConfig, EngineEvent, Variant, FALLBACK_SIZE};

enum EngineCommand {
    RunScan,
    Extract {
        target: String,
    },
    Transfer {
        title: String,
        label: String,
        source_url: String,
    },
    Abort,
}

/// Handle onto the engine thread: commands in, events out. Clonable so a
/// shell can enqueue from one thread and pump events from another.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineHandle {
    pub fn new(config: EngineConfig) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel::<EngineCommand>();
        let (event_tx, event_rx) = mpsc::channel::<EngineEvent>();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            let scan = Arc::new(ScanSimulator::new(config.scan));
            let extract_client = Arc::new(HttpExtractClient::new(config.extract));
            let transfer_engine = Arc::new(HttpTransferEngine::new(config.transfer));

            // One token per command generation; Abort cancels the current
            // generation and the next command starts a fresh one.
            let mut token = CancellationToken::new();
            while let Ok(command) = cmd_rx.recv() {
                if matches!(command, EngineCommand::Abort) {
                    token.cancel();
                    continue;
                }
                if token.is_cancelled() {
                    token = CancellationToken::new();
                }

                let scan = scan.clone();
                let extract_client = extract_client.clone();
                let transfer_engine = transfer_engine.clone();
                let event_tx = event_tx.clone();
                let token = token.clone();
                runtime.spawn(async move {
                    handle_command(
                        command,
                        scan.as_ref(),
                        extract_client.as_ref(),
                        transfer_engine.as_ref(),
                        &token,
                        event_tx,
                    )
                    .await;
                });
            }
        });

        Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        }
    }

    pub fn run_scan(&self) {
        let _ = self.cmd_tx.send(EngineCommand::RunScan);
    }

    pub fn extract(&self, target: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Extract {
            target: target.into(),
        });
    }

    pub fn transfer(
        &self,
        title: impl Into<String>,
        label: impl Into<String>,
        source_url: impl Into<String>,
    ) {
        let _ = self.cmd_tx.send(EngineCommand::Transfer {
            title: title.into(),
            label: label.into(),
            source_url: source_url.into(),
        });
    }

    /// Cancels in-flight work. Pending requests observe the token at their
    /// next suspension point instead of leaking to completion.
    pub fn abort(&self) {
        let _ = self.cmd_tx.send(EngineCommand::Abort);
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx
            .lock()
            .ok()
            .and_then(|rx| rx.try_recv().ok())
    }
}

async fn handle_command(
    command: EngineCommand,
    scan: &ScanSimulator,
    extract_client: &dyn ExtractClient,
    transfer_engine: &dyn TransferEngine,
    token: &CancellationToken,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let sink = ChannelProgressSink::new(event_tx.clone());
    match command {
        EngineCommand::RunScan => {
            scan.run(token, &sink).await;
        }
        EngineCommand::Extract { target } => {
            let provider = select_provider(&target);
            pipeline_info!("extracting via {} provider, target={}", provider, target);
            let result = extract_client.extract(&target, provider, token).await;
            let _ = event_tx.send(EngineEvent::Extracted { result });
        }
        EngineCommand::Transfer {
            title,
            label,
            source_url,
        } => {
            let variant = Variant {
                label,
                source_url,
                size_hint: FALLBACK_SIZE.to_string(),
            };
            let outcome = transfer_engine
                .transfer(&title, &variant, token, &sink)
                .await;
            let _ = event_tx.send(EngineEvent::TransferFinished { outcome });
        }
        EngineCommand::Abort => {
            // Handled on the command loop before spawning.
        }
    }
}
