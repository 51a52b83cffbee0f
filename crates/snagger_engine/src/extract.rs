use std::time::Duration;

use pipeline_logging::pipeline_debug;
use tokio_util::sync::CancellationToken;

use crate::normalize::{normalize_social, normalize_video, SocialRaw, VideoHostRaw};
use crate::{Deliverable, ExtractError, ExtractFault, ProviderKind};

/// Header carrying the static provider credential. No per-user credential
/// is applied at this layer.
const API_KEY_HEADER: &str = "x-api-key";

#[derive(Debug, Clone)]
pub struct ExtractSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub video_endpoint: String,
    pub social_endpoint: String,
    pub api_key: String,
}

impl Default for ExtractSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            video_endpoint: "https://api.vidgrab.example/resolve".to_string(),
            social_endpoint: "https://api.socialgrab.example/v1/extract".to_string(),
            api_key: "snagger-static-key".to_string(),
        }
    }
}

/// One network request per call; normalization per provider; no retries.
/// Retry policy belongs to the caller (the user resubmits manually).
#[async_trait::async_trait]
pub trait ExtractClient: Send + Sync {
    async fn extract(
        &self,
        target: &str,
        provider: ProviderKind,
        cancel: &CancellationToken,
    ) -> Result<Deliverable, ExtractError>;
}

#[derive(Debug, Clone)]
pub struct HttpExtractClient {
    settings: ExtractSettings,
}

impl HttpExtractClient {
    pub fn new(settings: ExtractSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, ExtractError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| {
                ExtractError::new(ExtractFault::NetworkOrProviderFault, err.to_string())
            })
    }

    fn build_request(
        &self,
        client: &reqwest::Client,
        target: &str,
        provider: ProviderKind,
    ) -> reqwest::RequestBuilder {
        let request = match provider {
            ProviderKind::VideoHost => client.get(&self.settings.video_endpoint).query(&[
                ("url", target),
                ("format", "mp4"),
                ("quality", "hd"),
            ]),
            ProviderKind::SocialGeneric => client
                .post(&self.settings.social_endpoint)
                .json(&serde_json::json!({ "url": target })),
        };
        request.header(API_KEY_HEADER, &self.settings.api_key)
    }
}

#[async_trait::async_trait]
impl ExtractClient for HttpExtractClient {
    async fn extract(
        &self,
        target: &str,
        provider: ProviderKind,
        cancel: &CancellationToken,
    ) -> Result<Deliverable, ExtractError> {
        let client = self.build_client()?;
        let request = self.build_request(&client, target, provider);

        let response = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                pipeline_debug!("extraction aborted before response, provider={}", provider);
                return Err(ExtractError::new(ExtractFault::Cancelled, "extraction aborted"));
            }
            result = request.send() => result.map_err(map_reqwest_error)?,
        };

        let status = response.status();
        if !status.is_success() {
            return Err(ExtractError::new(
                ExtractFault::NetworkOrProviderFault,
                format!("provider returned {status}"),
            ));
        }

        let body = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                pipeline_debug!("extraction aborted mid-body, provider={}", provider);
                return Err(ExtractError::new(ExtractFault::Cancelled, "extraction aborted"));
            }
            result = response.text() => result.map_err(map_reqwest_error)?,
        };

        match provider {
            ProviderKind::VideoHost => {
                let raw: VideoHostRaw = parse_payload(&body)?;
                normalize_video(raw)
            }
            ProviderKind::SocialGeneric => {
                let raw: SocialRaw = parse_payload(&body)?;
                normalize_social(raw)
            }
        }
    }
}

fn parse_payload<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, ExtractError> {
    serde_json::from_str(body).map_err(|err| {
        ExtractError::new(
            ExtractFault::NetworkOrProviderFault,
            format!("malformed provider payload: {err}"),
        )
    })
}

fn map_reqwest_error(err: reqwest::Error) -> ExtractError {
    ExtractError::new(ExtractFault::NetworkOrProviderFault, err.to_string())
}
