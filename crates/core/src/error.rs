use crate::types::Credits;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Insufficient credits: {required} required, {available} available")]
    InsufficientCredits { required: Credits, available: Credits },
}

/// Failure reported by a [`GenerationGateway`](crate::gateway::GenerationGateway).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    /// The gateway answered but refused or failed the generation.
    #[error("{0}")]
    Rejected(String),

    /// The gateway could not be reached.
    #[error("Gateway unreachable: {0}")]
    Transport(String),

    /// The gateway answered with a payload we could not interpret.
    #[error("Malformed gateway response: {0}")]
    MalformedResponse(String),
}

/// Failure reported by an [`UploadStore`](crate::upload::UploadStore).
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    /// The upload itself is unacceptable (type, size, content).
    #[error("{0}")]
    Rejected(String),

    /// The backing store failed to persist the bytes.
    #[error("Upload storage failed: {0}")]
    Storage(String),
}
