//! Onboarding wizard — six-step profile setup.
//!
//! The user fills in a `ProfileDraft` step by step. Each step may have a
//! validator that must pass before moving forward; going back is always
//! allowed. From the last step the draft is submitted to the backend, which
//! creates the user's profile.

pub mod manager;
pub mod model;
pub mod notice;
pub mod routes;
pub mod state;
pub mod update;
pub mod validate;

pub use manager::{OnboardingManager, OnboardingStatus};
pub use model::{
    ChoiceOption, CommunicationStyle, ContentLength, MotivationalStyle, NotificationPreferences,
    Occupation, ProfileDraft, SleepSchedule, TherapyExperience,
};
pub use notice::{Notice, NoticeBus};
pub use routes::{OnboardingRouteState, onboarding_routes};
pub use state::{Transition, Wizard, WizardStep};
pub use update::{Choice, FieldUpdate, ListField};
pub use validate::validate_step;
