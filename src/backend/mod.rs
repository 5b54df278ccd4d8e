//! Wellness backend integration.
//!
//! The wizard's only outbound call is "complete onboarding", which hands the
//! finished draft to the backend. [`ProfileService`] is the seam; the HTTP
//! implementation lives in [`http`].

pub mod http;

pub use http::HttpProfileService;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::SubmissionError;
use crate::onboarding::ProfileDraft;

/// Body of a successful `/auth/onboarding` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnboardingResponse {
    #[serde(default)]
    pub message: Option<String>,
    /// The updated user record, passed through as the backend sent it.
    pub user: serde_json::Value,
}

/// Error body the backend sends with non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: Option<String>,
}

/// Creates the user's profile from a completed draft.
#[async_trait]
pub trait ProfileService: Send + Sync {
    /// Submit the whole draft. One call per completion attempt.
    async fn complete_onboarding(
        &self,
        draft: &ProfileDraft,
    ) -> Result<OnboardingResponse, SubmissionError>;
}
