use thiserror::Error;

/// Failure modes a request can end in. Each maps to one HTTP status in
/// `server::rejection`.
#[derive(Debug, Error)]
pub enum UhiError {
    /// Missing, non-numeric or out-of-range request parameters.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// The imagery query window held no cloud-free observation.
    #[error("no cloud-free satellite observation in the query window")]
    NoDataAvailable,
    /// The remote platform could not be reached or refused the request.
    #[error("upstream imagery service unavailable: {0}")]
    UpstreamUnavailable(anyhow::Error),
}

impl From<anyhow::Error> for UhiError {
    fn from(err: anyhow::Error) -> Self {
        UhiError::UpstreamUnavailable(err)
    }
}
