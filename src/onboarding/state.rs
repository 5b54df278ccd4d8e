//! Wizard state machine — which step the user is on and the guarded moves
//! between steps.

use serde::{Deserialize, Serialize};

use super::model::ProfileDraft;
use super::validate::validate_step;

/// Number of wizard steps.
pub const TOTAL_STEPS: u8 = 6;

/// The steps of the onboarding wizard.
///
/// Progresses linearly: BasicInfo → MentalHealth → Lifestyle → Preferences →
/// Goals → Notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    BasicInfo,
    MentalHealth,
    Lifestyle,
    Preferences,
    Goals,
    Notifications,
}

impl WizardStep {
    pub const ALL: [WizardStep; TOTAL_STEPS as usize] = [
        Self::BasicInfo,
        Self::MentalHealth,
        Self::Lifestyle,
        Self::Preferences,
        Self::Goals,
        Self::Notifications,
    ];

    /// 1-based position in the wizard.
    pub fn number(&self) -> u8 {
        match self {
            Self::BasicInfo => 1,
            Self::MentalHealth => 2,
            Self::Lifestyle => 3,
            Self::Preferences => 4,
            Self::Goals => 5,
            Self::Notifications => 6,
        }
    }

    pub fn from_number(n: u8) -> Option<WizardStep> {
        Self::ALL.get(usize::from(n).checked_sub(1)?).copied()
    }

    /// Check if a move from `self` to `target` is allowed.
    ///
    /// Only neighbouring steps are reachable; there is no skipping ahead.
    pub fn can_transition_to(&self, target: WizardStep) -> bool {
        let (from, to) = (self.number(), target.number());
        to == from + 1 || from == to + 1
    }

    /// Whether this is the last step, where the wizard completes instead of advancing.
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Notifications)
    }

    pub fn next(&self) -> Option<WizardStep> {
        Self::from_number(self.number() + 1)
    }

    pub fn previous(&self) -> Option<WizardStep> {
        Self::from_number(self.number() - 1)
    }

    /// Heading shown above the step.
    pub fn title(&self) -> &'static str {
        match self {
            Self::BasicInfo => "Tell us about yourself",
            Self::MentalHealth => "Mental Health Profile",
            Self::Lifestyle => "Your Lifestyle",
            Self::Preferences => "Your Preferences",
            Self::Goals => "Your Goals",
            Self::Notifications => "Stay Connected",
        }
    }

    /// Fraction of the wizard reached, for the progress bar.
    pub fn progress(&self) -> f32 {
        f32::from(self.number()) / f32::from(TOTAL_STEPS)
    }
}

impl Default for WizardStep {
    fn default() -> Self {
        Self::BasicInfo
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::BasicInfo => "basic_info",
            Self::MentalHealth => "mental_health",
            Self::Lifestyle => "lifestyle",
            Self::Preferences => "preferences",
            Self::Goals => "goals",
            Self::Notifications => "notifications",
        };
        write!(f, "{s}")
    }
}

/// Outcome of asking the wizard to move forward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Transition {
    /// Validation passed; the wizard is now on `step`.
    Advanced { step: WizardStep },
    /// Validation failed; the wizard stays put.
    Blocked { step: WizardStep, errors: Vec<String> },
    /// Already on the last step; completion is a separate action.
    AtFinalStep,
}

/// A wizard session: the current step and the draft being built.
///
/// Pure state; notifications and submission live in the manager.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Wizard {
    step: WizardStep,
    draft: ProfileDraft,
}

impl Wizard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start at step one with an existing draft, e.g. one seeded with the
    /// registered name.
    pub fn with_draft(draft: ProfileDraft) -> Self {
        Self {
            step: WizardStep::BasicInfo,
            draft,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &ProfileDraft {
        &self.draft
    }

    /// Swap in a new draft produced by one of the updaters.
    pub fn replace_draft(&mut self, draft: ProfileDraft) {
        self.draft = draft;
    }

    /// Validate the current step and advance if it passes.
    pub fn next(&mut self) -> Transition {
        let Some(target) = self.step.next() else {
            return Transition::AtFinalStep;
        };

        let errors = validate_step(self.step, &self.draft);
        if !errors.is_empty() {
            return Transition::Blocked {
                step: self.step,
                errors,
            };
        }

        debug_assert!(self.step.can_transition_to(target));
        self.step = target;
        Transition::Advanced { step: target }
    }

    /// Step back one step without validating. Returns `None` on the first step.
    pub fn previous(&mut self) -> Option<WizardStep> {
        let target = self.step.previous()?;
        self.step = target;
        Some(target)
    }
}
