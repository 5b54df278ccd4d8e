//! reqwest-backed [`ProfileService`] talking to the backend's JSON API.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use super::{ErrorBody, OnboardingResponse, ProfileService};
use crate::config::Config;
use crate::error::SubmissionError;
use crate::onboarding::ProfileDraft;

/// Path of the onboarding endpoint, relative to the API base URL.
const ONBOARDING_PATH: &str = "/auth/onboarding";

/// HTTP client for the onboarding endpoint.
pub struct HttpProfileService {
    base_url: String,
    token: Option<SecretString>,
    client: reqwest::Client,
}

impl HttpProfileService {
    pub fn new(config: &Config) -> Result<Self, SubmissionError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| SubmissionError::Transport(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            token: config.api_token.clone(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

#[async_trait]
impl ProfileService for HttpProfileService {
    async fn complete_onboarding(
        &self,
        draft: &ProfileDraft,
    ) -> Result<OnboardingResponse, SubmissionError> {
        let mut request = self.client.post(self.url(ONBOARDING_PATH)).json(draft);
        if let Some(ref token) = self.token {
            request = request.bearer_auth(token.expose_secret());
        }

        let resp = request
            .send()
            .await
            .map_err(|e| SubmissionError::Transport(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| SubmissionError::Transport(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.error);
            tracing::warn!(status = %status, "Backend rejected onboarding submission");
            return Err(SubmissionError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: OnboardingResponse = serde_json::from_str(&body)
            .map_err(|e| SubmissionError::InvalidResponse(e.to_string()))?;
        if parsed.user.is_null() {
            return Err(SubmissionError::InvalidResponse(
                "response has no user object".to_string(),
            ));
        }
        Ok(parsed)
    }
}
