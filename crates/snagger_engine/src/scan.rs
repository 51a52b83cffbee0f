use std::sync::Arc;
use std::time::Duration;

use pipeline_logging::pipeline_debug;
use tokio_util::sync::CancellationToken;

use crate::sink::ProgressSink;
use crate::EngineEvent;

/// Clock seam for the staged timers, so tests run without wall-clock
/// waiting.
#[async_trait::async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TokioSleeper;

#[async_trait::async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

#[derive(Debug, Clone)]
pub struct ScanSettings {
    pub total_steps: u8,
    pub step_interval: Duration,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            total_steps: 4,
            step_interval: Duration::from_millis(700),
        }
    }
}

/// Staged pre-extraction gate. Emits exactly `total_steps` step
/// notifications on a fixed cadence, then completion. No real work is
/// done here; the sequence exists to pace the flow, and it exercises the
/// same suspend/resume contract as the real async stages.
pub struct ScanSimulator {
    settings: ScanSettings,
    sleeper: Arc<dyn Sleeper>,
}

impl ScanSimulator {
    pub fn new(settings: ScanSettings) -> Self {
        Self::with_sleeper(settings, Arc::new(TokioSleeper))
    }

    pub fn with_sleeper(settings: ScanSettings, sleeper: Arc<dyn Sleeper>) -> Self {
        Self { settings, sleeper }
    }

    pub async fn run(&self, cancel: &CancellationToken, sink: &dyn ProgressSink) {
        let total = self.settings.total_steps;
        for step in 1..=total {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    pipeline_debug!("scan aborted at step {}/{}", step, total);
                    return;
                }
                _ = self.sleeper.sleep(self.settings.step_interval) => {}
            }
            sink.emit(EngineEvent::ScanStep { step, total });
        }
        sink.emit(EngineEvent::ScanComplete);
    }
}
