//! Error types for the AI generation boundary.

/// Errors raised while validating or applying a generation response.
#[derive(Debug, thiserror::Error)]
pub enum AiError {
    /// The response does not match the expected contract. The whole batch
    /// is rejected; nothing is applied to the project.
    #[error("malformed generation response: {reason}")]
    MalformedResponse {
        /// What failed to validate.
        reason: String,
    },
}
