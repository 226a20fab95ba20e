use std::time::Duration;

use thiserror::Error;

/// Failure to obtain a candidate dog from the remote image API.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("dog api request failed: {0}")]
    Request(String),
    #[error("dog api request timed out")]
    Timeout,
    #[error("dog api returned http status {status}")]
    Status { status: u16 },
    #[error("malformed dog api payload: {0}")]
    MalformedPayload(String),
    #[error("dog api reported status '{status}'")]
    Rejected { status: String },
    #[error("no breed segment in image url '{image_url}'")]
    MissingBreed { image_url: String },
}

/// Failure of one `discover` invocation.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error("every candidate was banned after {attempts} attempts")]
    Exhausted { attempts: u32 },
    #[error("discovery gave up after {elapsed:?}")]
    Timeout { elapsed: Duration },
    #[error("discovery cancelled")]
    Cancelled,
    #[error("a discovery is already in progress")]
    AlreadyInProgress,
}

impl DiscoveryError {
    /// Errors caused by ban filtering rather than by the provider.
    pub fn is_exhausted(&self) -> bool {
        matches!(self, DiscoveryError::Exhausted { .. })
    }
}
