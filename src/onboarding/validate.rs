//! Per-step validators. Each returns every problem it finds; an empty list
//! means the step may be left.

use super::model::ProfileDraft;
use super::state::WizardStep;

/// Validate the draft for the given step.
///
/// Basic info and notifications have nothing required.
pub fn validate_step(step: WizardStep, draft: &ProfileDraft) -> Vec<String> {
    match step {
        WizardStep::BasicInfo | WizardStep::Notifications => Vec::new(),
        WizardStep::MentalHealth => validate_mental_health(draft),
        WizardStep::Lifestyle => validate_lifestyle(draft),
        WizardStep::Preferences => validate_preferences(draft),
        WizardStep::Goals => validate_goals(draft),
    }
}

pub fn validate_mental_health(draft: &ProfileDraft) -> Vec<String> {
    let mut errors = Vec::new();
    if draft.primary_concerns.is_empty() {
        errors.push("Please select at least one primary concern".to_string());
    }
    if draft.therapy_experience.is_none() {
        errors.push("Please select your previous therapy experience".to_string());
    }
    if draft.preferred_communication_style.is_none() {
        errors.push("Please select your preferred communication style".to_string());
    }
    errors
}

pub fn validate_lifestyle(draft: &ProfileDraft) -> Vec<String> {
    let mut errors = Vec::new();
    if draft.occupation.is_none() {
        errors.push("Please select your occupation".to_string());
    }
    if is_blank(&draft.sleep_schedule.bedtime) {
        errors.push("Please set your usual bedtime".to_string());
    }
    if is_blank(&draft.sleep_schedule.wake_time) {
        errors.push("Please set your usual wake time".to_string());
    }
    errors
}

pub fn validate_preferences(draft: &ProfileDraft) -> Vec<String> {
    let mut errors = Vec::new();
    if draft.music_genres.is_empty() {
        errors.push("Please select at least one music genre you enjoy".to_string());
    }
    if draft.activity_preferences.is_empty() {
        errors.push("Please select at least one preferred activity for mental wellness".to_string());
    }
    if draft.content_length.is_none() {
        errors.push("Please select your preferred content length".to_string());
    }
    errors
}

pub fn validate_goals(draft: &ProfileDraft) -> Vec<String> {
    if draft.goals.is_empty() {
        vec!["Please select at least one mental health goal you hope to achieve".to_string()]
    } else {
        Vec::new()
    }
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}
