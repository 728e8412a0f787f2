use thiserror::Error;

/// Errors raised by adaptor implementations at the transport boundary.
#[derive(Debug, Error)]
pub enum AdaptorError {
    /// An inbound request could not be parsed into messages.
    #[error("Receive failed: {0}")]
    Receive(String),

    /// A message could not be delivered to the remote platform.
    #[error("Send failed: {0}")]
    Send(String),

    /// The platform rejected the webhook callback URL.
    #[error("Webhook registration failed: {0}")]
    Webhook(String),

    /// A send call exceeded the configured per-step timeout.
    #[error("Send timed out after {ms}ms")]
    Timeout { ms: u64 },
}

/// Registration failures. Fatal to the registration call only — nothing
/// already registered is affected.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Invalid adaptor id '{id}': ids must be alphanumeric with dashes or underscores")]
    InvalidId { id: String },

    #[error("An adaptor with id '{id}' is already registered as a {role}")]
    Duplicate { id: String, role: &'static str },
}

/// A processor action's failure. Caught by the pipeline, logged with the
/// processor's name, and recorded — the rest of the sequence still runs.
#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error("{0}")]
    Action(String),

    #[error("Processor timed out after {ms}ms")]
    Timeout { ms: u64 },
}
