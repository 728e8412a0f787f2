use thiserror::Error;

/// Errors that can occur while deriving an alternate representation.
#[derive(Debug, Error)]
pub enum ContentError {
    /// The converter could not produce usable text for this input.
    #[error("Conversion failed: {0}")]
    Conversion(String),
}
