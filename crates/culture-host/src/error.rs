use culture_types::CultureError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HostError {
    #[error(transparent)]
    Culture(#[from] CultureError),
    #[error("invalid training config: {0}")]
    Json(#[from] serde_json::Error),
}
