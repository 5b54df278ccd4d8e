//! Error types for the onboarding service.

/// Message shown when the backend rejects a submission without saying why.
pub const SUBMISSION_FALLBACK_MESSAGE: &str = "Failed to complete onboarding. Please try again.";

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Field error: {0}")]
    Field(#[from] FieldError),

    #[error("Submission error: {0}")]
    Submission(#[from] SubmissionError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Reasons a profile photo is refused before it reaches the draft.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PhotoError {
    #[error("Invalid image format")]
    NotAnImage,

    #[error("Only JPG, PNG, and WebP images are allowed")]
    UnsupportedFormat,

    #[error("Image size must be less than 2MB")]
    TooLarge { estimated_bytes: usize },
}

/// Errors produced by the field updater.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("{0}")]
    InvalidPhoto(#[from] PhotoError),
}

/// Errors from completing onboarding.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("Onboarding can only be completed from the final step")]
    NotAtFinalStep,

    #[error("A submission is already in progress")]
    AlreadySubmitting,

    #[error("Backend rejected onboarding (HTTP {status}): {}", .message.as_deref().unwrap_or("no message"))]
    Rejected { status: u16, message: Option<String> },

    #[error("Request to backend failed: {0}")]
    Transport(String),

    #[error("Invalid response from backend: {0}")]
    InvalidResponse(String),
}

impl SubmissionError {
    /// The text shown to the user for this failure.
    ///
    /// A message supplied by the backend is passed through verbatim.
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            Self::NotAtFinalStep | Self::AlreadySubmitting => self.to_string(),
            _ => SUBMISSION_FALLBACK_MESSAGE.to_string(),
        }
    }
}

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;
