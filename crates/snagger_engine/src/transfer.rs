use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use futures_util::StreamExt;
use pipeline_logging::{pipeline_debug, pipeline_info, pipeline_warn};
use tokio_util::sync::CancellationToken;

use crate::filename::transfer_filename;
use crate::scan::{Sleeper, TokioSleeper};
use crate::sink::ProgressSink;
use crate::{DeliveryAction, EngineEvent, TransferFault, TransferOutcome, Variant};

#[derive(Debug, Clone)]
pub struct TransferSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    /// Synthetic progress never passes this before the save is queued.
    pub progress_cap: u8,
    pub progress_step: u8,
    pub tick_interval: Duration,
}

impl Default for TransferSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(120),
            progress_cap: 90,
            progress_step: 7,
            tick_interval: Duration::from_millis(250),
        }
    }
}

/// Two-tier delivery. The primary path fetches the bytes and queues a
/// save; any primary failure falls back to handing the raw URL to the
/// consuming environment, reported as a degraded success rather than an
/// error. Only an empty source URL fails hard: there is nothing to fall
/// back to.
#[async_trait::async_trait]
pub trait TransferEngine: Send + Sync {
    async fn transfer(
        &self,
        title: &str,
        variant: &Variant,
        cancel: &CancellationToken,
        sink: &dyn ProgressSink,
    ) -> TransferOutcome;
}

pub struct HttpTransferEngine {
    settings: TransferSettings,
    sleeper: Arc<dyn Sleeper>,
}

impl HttpTransferEngine {
    pub fn new(settings: TransferSettings) -> Self {
        Self::with_sleeper(settings, Arc::new(TokioSleeper))
    }

    pub fn with_sleeper(settings: TransferSettings, sleeper: Arc<dyn Sleeper>) -> Self {
        Self { settings, sleeper }
    }

    fn build_client(&self) -> Result<reqwest::Client, String> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| err.to_string())
    }
}

#[async_trait::async_trait]
impl TransferEngine for HttpTransferEngine {
    async fn transfer(
        &self,
        title: &str,
        variant: &Variant,
        cancel: &CancellationToken,
        sink: &dyn ProgressSink,
    ) -> TransferOutcome {
        if variant.source_url.is_empty() {
            return TransferOutcome::HardFailed(TransferFault::EmptyLink);
        }

        let fetched = match self.build_client() {
            Ok(client) => {
                self.fetch_with_synthetic_progress(client, &variant.source_url, cancel, sink)
                    .await
            }
            Err(message) => Err(message),
        };

        match fetched {
            Ok(Some(bytes)) => {
                let filename = transfer_filename(title, &variant.label, &variant.source_url);
                pipeline_info!(
                    "transfer complete, {} bytes queued as {}",
                    bytes.len(),
                    filename
                );
                sink.emit(EngineEvent::Deliver(DeliveryAction::SaveFile {
                    filename,
                    bytes,
                }));
                sink.emit(EngineEvent::TransferProgress { percent: 100 });
                TransferOutcome::Completed
            }
            Ok(None) => {
                pipeline_debug!("transfer aborted for {}", variant.source_url);
                TransferOutcome::HardFailed(TransferFault::Cancelled)
            }
            Err(message) => {
                // Degraded path. The environment may ignore a forced save on
                // a cross-origin resource; the content still reaches the user
                // through the external open, so this reads as success.
                pipeline_warn!(
                    "primary transfer path failed ({}), opening {} externally",
                    message,
                    variant.source_url
                );
                sink.emit(EngineEvent::Deliver(DeliveryAction::OpenExternal {
                    url: variant.source_url.clone(),
                }));
                sink.emit(EngineEvent::TransferProgress { percent: 100 });
                TransferOutcome::FailedButRecovered
            }
        }
    }
}

impl HttpTransferEngine {
    /// Runs the primary fetch while advancing synthetic progress on a fixed
    /// cadence. Progress is not derived from real transfer bytes and stays
    /// below the cap until the outcome is known. Returns `Ok(None)` when
    /// cancelled.
    async fn fetch_with_synthetic_progress(
        &self,
        client: reqwest::Client,
        url: &str,
        cancel: &CancellationToken,
        sink: &dyn ProgressSink,
    ) -> Result<Option<Bytes>, String> {
        let fetch = fetch_bytes(client, url);
        tokio::pin!(fetch);

        let mut percent: u8 = 0;
        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Ok(None),
                result = &mut fetch => return result.map(Some),
                _ = self.sleeper.sleep(self.settings.tick_interval) => {
                    if percent < self.settings.progress_cap {
                        percent = percent
                            .saturating_add(self.settings.progress_step)
                            .min(self.settings.progress_cap);
                        sink.emit(EngineEvent::TransferProgress { percent });
                    }
                }
            }
        }
    }
}

async fn fetch_bytes(client: reqwest::Client, url: &str) -> Result<Bytes, String> {
    let response = client.get(url).send().await.map_err(|err| err.to_string())?;
    let status = response.status();
    if !status.is_success() {
        return Err(format!("http status {status}"));
    }

    let mut buffer = Vec::new();
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|err| err.to_string())?;
        buffer.extend_from_slice(&chunk);
    }
    Ok(Bytes::from(buffer))
}
