use std::fmt;

use bytes::Bytes;

use crate::{ExtractSettings, ScanSettings, TransferSettings};

/// Substituted when a provider response carries no display name.
pub const FALLBACK_TITLE: &str = "Untitled media";
/// Substituted when a provider response carries no preview image.
pub const FALLBACK_PREVIEW: &str = "https://placehold.co/480x270?text=media";
/// Substituted when a provider response carries no size information.
pub const FALLBACK_SIZE: &str = "N/A";

/// Closed set of extraction backends. Selection is total: every target
/// maps to exactly one provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    /// Dedicated high-priority provider for recognized video hosts.
    VideoHost,
    /// Generic social-extraction provider for everything else.
    SocialGeneric,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::VideoHost => write!(f, "video-host"),
            ProviderKind::SocialGeneric => write!(f, "social-generic"),
        }
    }
}

/// One selectable deliverable output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    pub label: String,
    /// Empty string means "not usable".
    pub source_url: String,
    pub size_hint: String,
}

/// Normalized extraction result, identical in shape for every provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deliverable {
    pub title: String,
    pub preview_image: String,
    /// Insertion order is the provider-returned order.
    pub variants: Vec<Variant>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractError {
    pub fault: ExtractFault,
    pub message: String,
}

impl ExtractError {
    pub(crate) fn new(fault: ExtractFault, message: impl Into<String>) -> Self {
        Self {
            fault,
            message: message.into(),
        }
    }
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.fault, self.message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractFault {
    /// Well-formed provider response with nothing usable in it.
    NoUsableLink,
    /// Transport failure, non-success status, or malformed payload.
    NetworkOrProviderFault,
    Cancelled,
}

impl fmt::Display for ExtractFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractFault::NoUsableLink => write!(f, "no usable link"),
            ExtractFault::NetworkOrProviderFault => write!(f, "network or provider fault"),
            ExtractFault::Cancelled => write!(f, "cancelled"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferFault {
    EmptyLink,
    Cancelled,
}

impl fmt::Display for TransferFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferFault::EmptyLink => write!(f, "empty link"),
            TransferFault::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Terminal transfer report. `FailedButRecovered` means the primary
/// fetch-and-save path failed and the external-open fallback was used;
/// the user sees it as success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferOutcome {
    Completed,
    FailedButRecovered,
    HardFailed(TransferFault),
}

/// Externally observable delivery output of a transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryAction {
    /// Materialized bytes ready to be saved under a synthesized name.
    SaveFile { filename: String, bytes: Bytes },
    /// Hand the raw source URL to the consuming environment.
    OpenExternal { url: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    ScanStep { step: u8, total: u8 },
    ScanComplete,
    Extracted {
        result: Result<Deliverable, ExtractError>,
    },
    TransferProgress { percent: u8 },
    Deliver(DeliveryAction),
    TransferFinished { outcome: TransferOutcome },
}

/// Aggregated engine configuration.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    pub extract: ExtractSettings,
    pub transfer: TransferSettings,
    pub scan: ScanSettings,
}
