//! Draft updaters: field updates, set toggles, and single-select toggles.
//!
//! Every updater takes `&ProfileDraft` and returns a new draft, leaving the
//! original untouched so callers can compare before and after.
//!
//! Field addressing is typed. On the wire a [`FieldUpdate`] is
//! `{"field": "<path>", "value": ...}`, where nested leaves use a one-level
//! dot path such as `"sleepSchedule.bedtime"`.

use serde::{Deserialize, Serialize};

use crate::error::FieldError;

use super::model::{
    blank_choice, clamp_level, truncate_bio, validate_profile_photo, CommunicationStyle,
    ContentLength, MotivationalStyle, Occupation, ProfileDraft, TherapyExperience,
};

/// A single field assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value")]
pub enum FieldUpdate {
    #[serde(rename = "name")]
    Name(String),
    #[serde(rename = "nickname")]
    Nickname(String),
    #[serde(rename = "age")]
    Age(String),
    /// `None` removes the photo.
    #[serde(rename = "profilePhoto")]
    ProfilePhoto(Option<String>),
    /// Truncated to 200 characters.
    #[serde(rename = "bio")]
    Bio(String),
    #[serde(rename = "therapyExperience")]
    TherapyExperience(#[serde(with = "blank_choice")] Option<TherapyExperience>),
    #[serde(rename = "preferredCommunicationStyle")]
    PreferredCommunicationStyle(#[serde(with = "blank_choice")] Option<CommunicationStyle>),
    #[serde(rename = "supportSystem")]
    SupportSystem(String),
    #[serde(rename = "occupation")]
    Occupation(#[serde(with = "blank_choice")] Option<Occupation>),
    #[serde(rename = "stressLevel")]
    StressLevel(u8),
    #[serde(rename = "contentLength")]
    ContentLength(#[serde(with = "blank_choice")] Option<ContentLength>),
    #[serde(rename = "motivationalStyle")]
    MotivationalStyle(#[serde(with = "blank_choice")] Option<MotivationalStyle>),
    #[serde(rename = "sleepSchedule.bedtime")]
    Bedtime(String),
    #[serde(rename = "sleepSchedule.wakeTime")]
    WakeTime(String),
    #[serde(rename = "sleepSchedule.sleepQuality")]
    SleepQuality(u8),
    #[serde(rename = "notificationPreferences.dailyCheckIn")]
    DailyCheckIn(bool),
    #[serde(rename = "notificationPreferences.moodReminders")]
    MoodReminders(bool),
    #[serde(rename = "notificationPreferences.activitySuggestions")]
    ActivitySuggestions(bool),
}

impl FieldUpdate {
    /// Dot path of the addressed field.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Name(_) => "name",
            Self::Nickname(_) => "nickname",
            Self::Age(_) => "age",
            Self::ProfilePhoto(_) => "profilePhoto",
            Self::Bio(_) => "bio",
            Self::TherapyExperience(_) => "therapyExperience",
            Self::PreferredCommunicationStyle(_) => "preferredCommunicationStyle",
            Self::SupportSystem(_) => "supportSystem",
            Self::Occupation(_) => "occupation",
            Self::StressLevel(_) => "stressLevel",
            Self::ContentLength(_) => "contentLength",
            Self::MotivationalStyle(_) => "motivationalStyle",
            Self::Bedtime(_) => "sleepSchedule.bedtime",
            Self::WakeTime(_) => "sleepSchedule.wakeTime",
            Self::SleepQuality(_) => "sleepSchedule.sleepQuality",
            Self::DailyCheckIn(_) => "notificationPreferences.dailyCheckIn",
            Self::MoodReminders(_) => "notificationPreferences.moodReminders",
            Self::ActivitySuggestions(_) => "notificationPreferences.activitySuggestions",
        }
    }
}

/// Set-valued fields, edited with [`ProfileDraft::with_toggled`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ListField {
    PrimaryConcerns,
    CopingStrategies,
    MusicGenres,
    ActivityPreferences,
    Goals,
    PreferredNotificationTimes,
}

/// A single-choice selection, applied with [`ProfileDraft::with_choice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum Choice {
    TherapyExperience(TherapyExperience),
    PreferredCommunicationStyle(CommunicationStyle),
    Occupation(Occupation),
    ContentLength(ContentLength),
    MotivationalStyle(MotivationalStyle),
}

impl ProfileDraft {
    /// Return a copy of the draft with one field replaced.
    ///
    /// Nested updates touch only their leaf. Bio input is cut at 200
    /// characters and slider values are pinned to 1..=10. A photo that fails
    /// [`validate_profile_photo`] is refused.
    pub fn with_update(&self, update: FieldUpdate) -> Result<ProfileDraft, FieldError> {
        let mut next = self.clone();
        match update {
            FieldUpdate::Name(v) => next.name = v,
            FieldUpdate::Nickname(v) => next.nickname = v,
            FieldUpdate::Age(v) => next.age = v,
            FieldUpdate::ProfilePhoto(photo) => {
                if let Some(ref data_url) = photo {
                    validate_profile_photo(data_url)?;
                }
                next.profile_photo = photo;
            }
            FieldUpdate::Bio(v) => next.bio = truncate_bio(&v),
            FieldUpdate::TherapyExperience(v) => next.therapy_experience = v,
            FieldUpdate::PreferredCommunicationStyle(v) => next.preferred_communication_style = v,
            FieldUpdate::SupportSystem(v) => next.support_system = v,
            FieldUpdate::Occupation(v) => next.occupation = v,
            FieldUpdate::StressLevel(v) => next.stress_level = clamp_level(v),
            FieldUpdate::ContentLength(v) => next.content_length = v,
            FieldUpdate::MotivationalStyle(v) => next.motivational_style = v,
            FieldUpdate::Bedtime(v) => next.sleep_schedule.bedtime = v,
            FieldUpdate::WakeTime(v) => next.sleep_schedule.wake_time = v,
            FieldUpdate::SleepQuality(v) => next.sleep_schedule.sleep_quality = clamp_level(v),
            FieldUpdate::DailyCheckIn(v) => next.notification_preferences.daily_check_in = v,
            FieldUpdate::MoodReminders(v) => next.notification_preferences.mood_reminders = v,
            FieldUpdate::ActivitySuggestions(v) => {
                next.notification_preferences.activity_suggestions = v
            }
        }
        Ok(next)
    }

    /// Return a copy with `value` removed from `field` if present, appended otherwise.
    pub fn with_toggled(&self, field: ListField, value: &str) -> ProfileDraft {
        let mut next = self.clone();
        let list = next.list_mut(field);
        match list.iter().position(|item| item == value) {
            Some(idx) => {
                list.remove(idx);
            }
            None => list.push(value.to_string()),
        }
        next
    }

    /// Return a copy with the choice selected, or cleared if it was already selected.
    pub fn with_choice(&self, choice: Choice) -> ProfileDraft {
        let mut next = self.clone();
        match choice {
            Choice::TherapyExperience(v) => toggle_slot(&mut next.therapy_experience, v),
            Choice::PreferredCommunicationStyle(v) => {
                toggle_slot(&mut next.preferred_communication_style, v)
            }
            Choice::Occupation(v) => toggle_slot(&mut next.occupation, v),
            Choice::ContentLength(v) => toggle_slot(&mut next.content_length, v),
            Choice::MotivationalStyle(v) => toggle_slot(&mut next.motivational_style, v),
        }
        next
    }

    /// Current contents of a set-valued field.
    pub fn list(&self, field: ListField) -> &[String] {
        match field {
            ListField::PrimaryConcerns => &self.primary_concerns,
            ListField::CopingStrategies => &self.coping_strategies,
            ListField::MusicGenres => &self.music_genres,
            ListField::ActivityPreferences => &self.activity_preferences,
            ListField::Goals => &self.goals,
            ListField::PreferredNotificationTimes => &self.preferred_notification_times,
        }
    }

    fn list_mut(&mut self, field: ListField) -> &mut Vec<String> {
        match field {
            ListField::PrimaryConcerns => &mut self.primary_concerns,
            ListField::CopingStrategies => &mut self.coping_strategies,
            ListField::MusicGenres => &mut self.music_genres,
            ListField::ActivityPreferences => &mut self.activity_preferences,
            ListField::Goals => &mut self.goals,
            ListField::PreferredNotificationTimes => &mut self.preferred_notification_times,
        }
    }
}

fn toggle_slot<T: PartialEq>(slot: &mut Option<T>, value: T) {
    if slot.as_ref() == Some(&value) {
        *slot = None;
    } else {
        *slot = Some(value);
    }
}
