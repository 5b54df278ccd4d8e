//! OnboardingManager — owns the wizard session, turns navigation results into
//! notices, and runs the final submission.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::{broadcast, RwLock};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::backend::{OnboardingResponse, ProfileService};
use crate::error::{FieldError, SubmissionError};

use super::model::ProfileDraft;
use super::notice::{Notice, NoticeBus};
use super::state::{Transition, Wizard, WizardStep, TOTAL_STEPS};
use super::update::{Choice, FieldUpdate, ListField};

/// Shown after the backend accepts the profile.
pub const WELCOME_MESSAGE: &str = "Welcome! Your profile has been created successfully.";

/// Where the host goes once onboarding is done.
pub const HOME_ROUTE: &str = "/";

struct Session {
    id: Uuid,
    wizard: Wizard,
}

impl Session {
    fn start(seed_name: Option<&str>) -> Self {
        let draft = seed_name.map(ProfileDraft::seeded).unwrap_or_default();
        Self {
            id: Uuid::new_v4(),
            wizard: Wizard::with_draft(draft),
        }
    }
}

/// Clears the in-flight flag when the submission ends, however it ends.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Coordinates one onboarding wizard: draft updates, guarded navigation,
/// notices, and submission to the backend.
pub struct OnboardingManager {
    service: Arc<dyn ProfileService>,
    notices: NoticeBus,
    session: RwLock<Session>,
    submitting: AtomicBool,
    seed_name: Option<String>,
    completed_at: RwLock<Option<DateTime<Utc>>>,
}

impl OnboardingManager {
    pub fn new(service: Arc<dyn ProfileService>, seed_name: Option<String>) -> Self {
        let session = Session::start(seed_name.as_deref());
        info!(session_id = %session.id, "Onboarding session started");
        Self {
            service,
            notices: NoticeBus::new(),
            session: RwLock::new(session),
            submitting: AtomicBool::new(false),
            seed_name,
            completed_at: RwLock::new(None),
        }
    }

    /// Subscribe to user-visible notices.
    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.notices.subscribe()
    }

    pub async fn current_step(&self) -> WizardStep {
        self.session.read().await.wizard.step()
    }

    pub async fn draft(&self) -> ProfileDraft {
        self.session.read().await.wizard.draft().clone()
    }

    /// Apply a field update to the draft.
    ///
    /// A refused update (bad photo) leaves the draft as it was and raises an
    /// error notice.
    pub async fn update(&self, update: FieldUpdate) -> Result<ProfileDraft, FieldError> {
        let path = update.path();
        let mut session = self.session.write().await;
        match session.wizard.draft().with_update(update) {
            Ok(next) => {
                debug!(session_id = %session.id, field = path, "Draft field updated");
                session.wizard.replace_draft(next.clone());
                Ok(next)
            }
            Err(e) => {
                warn!(session_id = %session.id, field = path, error = %e, "Draft update refused");
                self.notices.publish(Notice::error(e.to_string()));
                Err(e)
            }
        }
    }

    /// Add or remove a value in a set-valued field.
    pub async fn toggle(&self, field: ListField, value: &str) -> ProfileDraft {
        let mut session = self.session.write().await;
        let next = session.wizard.draft().with_toggled(field, value);
        debug!(session_id = %session.id, field = ?field, value, "Draft list toggled");
        session.wizard.replace_draft(next.clone());
        next
    }

    /// Select a single choice, or clear it if it was already selected.
    pub async fn choose(&self, choice: Choice) -> ProfileDraft {
        let mut session = self.session.write().await;
        let next = session.wizard.draft().with_choice(choice);
        debug!(session_id = %session.id, choice = ?choice, "Draft choice toggled");
        session.wizard.replace_draft(next.clone());
        next
    }

    /// Try to move to the next step. Every validation error becomes an error notice.
    pub async fn next(&self) -> Transition {
        let mut session = self.session.write().await;
        let transition = session.wizard.next();
        match &transition {
            Transition::Advanced { step } => {
                info!(session_id = %session.id, step = %step, "Onboarding step advanced");
            }
            Transition::Blocked { step, errors } => {
                info!(
                    session_id = %session.id,
                    step = %step,
                    errors = errors.len(),
                    "Onboarding step blocked by validation"
                );
                for error in errors {
                    self.notices.publish(Notice::error(error.clone()));
                }
            }
            Transition::AtFinalStep => {
                debug!(session_id = %session.id, "Next requested on final step");
            }
        }
        transition
    }

    /// Go back one step. No validation.
    pub async fn previous(&self) -> Option<WizardStep> {
        let mut session = self.session.write().await;
        let step = session.wizard.previous();
        if let Some(step) = step {
            debug!(session_id = %session.id, step = %step, "Onboarding step went back");
        }
        step
    }

    /// Throw the draft away and start over on step one.
    pub async fn reset(&self) -> Uuid {
        let mut session = self.session.write().await;
        let old = session.id;
        *session = Session::start(self.seed_name.as_deref());
        info!(old_session = %old, session_id = %session.id, "Onboarding session reset");
        session.id
    }

    /// Submit the draft from the final step.
    ///
    /// Only one submission runs at a time. On success the draft is discarded,
    /// a fresh session begins, and the host is told to navigate home. On
    /// failure the draft and step are kept so the user can retry. A result
    /// that arrives after the session was reset is not applied.
    pub async fn complete(&self) -> Result<OnboardingResponse, SubmissionError> {
        let _in_flight = InFlight::acquire(&self.submitting).ok_or_else(|| {
            debug!("Completion requested while a submission is in flight");
            SubmissionError::AlreadySubmitting
        })?;

        let (session_id, draft) = {
            let session = self.session.read().await;
            if !session.wizard.step().is_final() {
                return Err(SubmissionError::NotAtFinalStep);
            }
            (session.id, session.wizard.draft().clone())
        };

        info!(session_id = %session_id, "Submitting onboarding profile");
        let result = self.service.complete_onboarding(&draft).await;

        let mut session = self.session.write().await;
        if session.id != session_id {
            warn!(
                session_id = %session_id,
                current = %session.id,
                "Ignoring submission result for a discarded session"
            );
            return result;
        }

        match result {
            Ok(response) => {
                *session = Session::start(self.seed_name.as_deref());
                *self.completed_at.write().await = Some(Utc::now());
                info!(session_id = %session_id, "Onboarding completed");
                self.notices.publish(Notice::success(WELCOME_MESSAGE));
                self.notices.publish(Notice::navigate(HOME_ROUTE));
                Ok(response)
            }
            Err(e) => {
                warn!(session_id = %session_id, error = %e, "Onboarding submission failed");
                self.notices.publish(Notice::error(e.user_message()));
                Err(e)
            }
        }
    }

    /// Snapshot for the host UI.
    pub async fn get_status(&self) -> OnboardingStatus {
        let session = self.session.read().await;
        let completed_at = *self.completed_at.read().await;
        let step = session.wizard.step();
        OnboardingStatus {
            session_id: session.id,
            step,
            step_number: step.number(),
            total_steps: TOTAL_STEPS,
            title: step.title(),
            progress: step.progress(),
            submitting: self.submitting.load(Ordering::Acquire),
            onboarding_completed: completed_at.is_some(),
            completed_at,
            draft: session.wizard.draft().clone(),
        }
    }
}

/// Onboarding status returned by the REST endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingStatus {
    pub session_id: Uuid,
    pub step: WizardStep,
    pub step_number: u8,
    pub total_steps: u8,
    pub title: &'static str,
    pub progress: f32,
    pub submitting: bool,
    pub onboarding_completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    pub draft: ProfileDraft,
}
