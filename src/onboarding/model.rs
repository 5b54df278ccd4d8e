//! Profile draft and choice catalogues.
//!
//! The draft serializes with the camelCase keys the backend's
//! `/auth/onboarding` endpoint reads. Unset single choices go over the wire
//! as `""`.

use serde::{Deserialize, Serialize};

use crate::error::PhotoError;

/// Maximum bio length, in characters.
pub const BIO_MAX_CHARS: usize = 200;

/// Lowest value of the stress and sleep-quality sliders.
pub const LEVEL_MIN: u8 = 1;
/// Highest value of the stress and sleep-quality sliders.
pub const LEVEL_MAX: u8 = 10;
/// Slider value before the user touches it.
pub const LEVEL_DEFAULT: u8 = 5;

/// Largest accepted profile photo, decoded.
pub const MAX_PHOTO_BYTES: usize = 2 * 1024 * 1024;

const PHOTO_PREFIXES: [&str; 4] = [
    "data:image/jpeg",
    "data:image/jpg",
    "data:image/png",
    "data:image/webp",
];

/// Suggested primary concerns.
pub const PRIMARY_CONCERNS: &[&str] = &[
    "Anxiety",
    "Depression",
    "Stress",
    "Sleep Issues",
    "Relationships",
    "Work/School",
    "Self-Esteem",
    "Trauma",
];

/// Suggested music genres.
pub const MUSIC_GENRES: &[&str] = &[
    "Pop",
    "Rock",
    "Classical",
    "Jazz",
    "Electronic",
    "Hip-Hop",
    "Folk",
    "Ambient",
    "R&B",
    "Country",
    "World",
    "Instrumental",
];

/// Suggested wellness activities.
pub const ACTIVITY_PREFERENCES: &[&str] = &[
    "Meditation",
    "Exercise",
    "Journaling",
    "Music Listening",
    "Reading",
    "Nature Walks",
    "Breathing Exercises",
    "Art/Creativity",
    "Talking to Friends",
    "Yoga",
    "Dancing",
    "Cooking",
];

/// Suggested mental health goals.
pub const GOALS: &[&str] = &[
    "Reduce anxiety and stress",
    "Improve mood and emotional well-being",
    "Develop better coping strategies",
    "Build healthier daily habits",
    "Improve sleep quality",
    "Increase self-awareness",
    "Better manage emotions",
    "Build resilience",
    "Improve relationships",
    "Increase motivation and energy",
];

/// Notification time windows.
pub const NOTIFICATION_TIMES: &[&str] = &[
    "Morning (8-10 AM)",
    "Midday (12-2 PM)",
    "Afternoon (3-5 PM)",
    "Evening (6-8 PM)",
];

/// A closed set of options for a single-choice field.
pub trait ChoiceOption: Copy + Sized + 'static {
    /// Every option, in display order.
    const ALL: &'static [Self];

    /// Wire and display label.
    fn label(&self) -> &'static str;

    /// Look an option up by its exact label.
    fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|o| o.label() == label)
    }
}

macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($variant:ident => $label:tt,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl ChoiceOption for $name {
            const ALL: &'static [Self] = &[$(Self::$variant,)+];

            fn label(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

choice_enum! {
    /// Prior therapy experience.
    pub enum TherapyExperience {
        NoExperience => "None",
        Brief => "Some (less than 6 months)",
        Moderate => "Moderate (6 months - 2 years)",
        Extensive => "Extensive (2+ years)",
    }
}

choice_enum! {
    /// How the user wants to be spoken to.
    pub enum CommunicationStyle {
        GentleSupportive => "Gentle and supportive",
        DirectStraightforward => "Direct and straightforward",
        MotivationalEncouraging => "Motivational and encouraging",
        ClinicalInformative => "Clinical and informative",
    }
}

choice_enum! {
    /// Occupation or role.
    pub enum Occupation {
        Student => "student",
        WorkingProfessional => "working-professional",
        Freelancer => "freelancer",
        Homemaker => "homemaker",
        Retired => "retired",
        BetweenJobs => "unemployed",
        Other => "other",
    }
}

choice_enum! {
    /// Preferred length of suggested content.
    pub enum ContentLength {
        Short => "Short (1-5 minutes)",
        Medium => "Medium (5-15 minutes)",
        Long => "Long (15+ minutes)",
        Flexible => "Flexible",
    }
}

choice_enum! {
    /// What keeps the user going.
    pub enum MotivationalStyle {
        PositiveReinforcement => "Encouraging and positive reinforcement",
        GentleReminders => "Gentle reminders and support",
        ChallengeBased => "Challenge-based motivation",
        ProgressTracking => "Progress tracking and achievement",
        CommunitySupport => "Community support and sharing",
        PersonalReflection => "Personal reflection and insights",
    }
}

/// Serde adapter: `None` <-> `""` for single-choice fields.
pub(crate) mod blank_choice {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::ChoiceOption;

    pub fn serialize<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: ChoiceOption,
        S: Serializer,
    {
        serializer.serialize_str(value.map(|v| v.label()).unwrap_or(""))
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        T: ChoiceOption,
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref() {
            None | Some("") => Ok(None),
            Some(label) => T::from_label(label)
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("unknown option: {label}"))),
        }
    }
}

/// Usual sleep times and how well the user sleeps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SleepSchedule {
    /// 24-hour "HH:MM", empty until chosen.
    pub bedtime: String,
    /// 24-hour "HH:MM", empty until chosen.
    pub wake_time: String,
    pub sleep_quality: u8,
}

impl Default for SleepSchedule {
    fn default() -> Self {
        Self {
            bedtime: String::new(),
            wake_time: String::new(),
            sleep_quality: LEVEL_DEFAULT,
        }
    }
}

/// Notification opt-ins. Everything is on until the user says otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationPreferences {
    pub daily_check_in: bool,
    pub mood_reminders: bool,
    pub activity_suggestions: bool,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            daily_check_in: true,
            mood_reminders: true,
            activity_suggestions: true,
        }
    }
}

/// The in-progress profile built across the wizard steps.
///
/// Only lives for the wizard session; it is sent whole to the backend on
/// completion and never stored locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileDraft {
    // Basic info
    pub name: String,
    pub nickname: String,
    pub age: String,
    /// Base64 image data URL.
    pub profile_photo: Option<String>,
    pub bio: String,

    // Mental health profile
    pub primary_concerns: Vec<String>,
    #[serde(with = "blank_choice")]
    pub therapy_experience: Option<TherapyExperience>,
    #[serde(with = "blank_choice")]
    pub preferred_communication_style: Option<CommunicationStyle>,
    pub coping_strategies: Vec<String>,
    pub support_system: String,

    // Lifestyle
    #[serde(with = "blank_choice")]
    pub occupation: Option<Occupation>,
    pub stress_level: u8,
    pub sleep_schedule: SleepSchedule,

    // Preferences
    pub music_genres: Vec<String>,
    pub activity_preferences: Vec<String>,
    #[serde(with = "blank_choice")]
    pub content_length: Option<ContentLength>,

    // Goals
    pub goals: Vec<String>,
    #[serde(with = "blank_choice")]
    pub motivational_style: Option<MotivationalStyle>,

    // Notifications
    pub notification_preferences: NotificationPreferences,
    pub preferred_notification_times: Vec<String>,
}

impl Default for ProfileDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            nickname: String::new(),
            age: String::new(),
            profile_photo: None,
            bio: String::new(),
            primary_concerns: Vec::new(),
            therapy_experience: None,
            preferred_communication_style: None,
            coping_strategies: Vec::new(),
            support_system: String::new(),
            occupation: None,
            stress_level: LEVEL_DEFAULT,
            sleep_schedule: SleepSchedule::default(),
            music_genres: Vec::new(),
            activity_preferences: Vec::new(),
            content_length: None,
            goals: Vec::new(),
            motivational_style: None,
            notification_preferences: NotificationPreferences::default(),
            preferred_notification_times: Vec::new(),
        }
    }
}

impl ProfileDraft {
    /// Empty draft with the registered name filled in.
    pub fn seeded(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Cut `bio` to at most [`BIO_MAX_CHARS`] characters.
pub fn truncate_bio(bio: &str) -> String {
    match bio.char_indices().nth(BIO_MAX_CHARS) {
        Some((cut, _)) => bio[..cut].to_string(),
        None => bio.to_string(),
    }
}

/// Pin a slider value into `LEVEL_MIN..=LEVEL_MAX`.
pub fn clamp_level(level: u8) -> u8 {
    level.clamp(LEVEL_MIN, LEVEL_MAX)
}

/// Check a profile photo data URL the same way the backend does.
pub fn validate_profile_photo(data_url: &str) -> Result<(), PhotoError> {
    if !data_url.starts_with("data:image/") {
        return Err(PhotoError::NotAnImage);
    }
    if !PHOTO_PREFIXES.iter().any(|p| data_url.starts_with(p)) {
        return Err(PhotoError::UnsupportedFormat);
    }

    let payload = data_url
        .split_once(',')
        .map(|(_, data)| data)
        .unwrap_or(data_url);
    // base64 carries 3 bytes per 4 characters
    let estimated_bytes = payload.len() * 3 / 4;
    if estimated_bytes > MAX_PHOTO_BYTES {
        return Err(PhotoError::TooLarge { estimated_bytes });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_draft_has_expected_values() {
        let d = ProfileDraft::default();
        assert!(d.name.is_empty());
        assert!(d.profile_photo.is_none());
        assert!(d.primary_concerns.is_empty());
        assert!(d.therapy_experience.is_none());
        assert_eq!(d.stress_level, 5);
        assert_eq!(d.sleep_schedule.sleep_quality, 5);
        assert!(d.notification_preferences.daily_check_in);
        assert!(d.notification_preferences.mood_reminders);
        assert!(d.notification_preferences.activity_suggestions);
    }

    #[test]
    fn seeded_draft_only_sets_name() {
        let d = ProfileDraft::seeded("Riley");
        assert_eq!(d.name, "Riley");
        assert_eq!(
            ProfileDraft {
                name: String::new(),
                ..d
            },
            ProfileDraft::default()
        );
    }

    #[test]
    fn draft_serializes_with_backend_keys() {
        let d = ProfileDraft {
            therapy_experience: Some(TherapyExperience::NoExperience),
            occupation: Some(Occupation::WorkingProfessional),
            ..ProfileDraft::seeded("Sam")
        };
        let json = serde_json::to_value(&d).unwrap();

        assert_eq!(json["name"], "Sam");
        assert_eq!(json["therapyExperience"], "None");
        assert_eq!(json["preferredCommunicationStyle"], "");
        assert_eq!(json["occupation"], "working-professional");
        assert_eq!(json["profilePhoto"], serde_json::Value::Null);
        assert_eq!(json["sleepSchedule"]["wakeTime"], "");
        assert_eq!(json["sleepSchedule"]["sleepQuality"], 5);
        assert_eq!(json["notificationPreferences"]["dailyCheckIn"], true);
        assert!(json["preferredNotificationTimes"].as_array().unwrap().is_empty());
    }

    #[test]
    fn draft_deserializes_blank_and_missing_choices() {
        let d: ProfileDraft = serde_json::from_str(
            r#"{"name":"Ana","therapyExperience":"","contentLength":"Flexible"}"#,
        )
        .unwrap();
        assert_eq!(d.name, "Ana");
        assert!(d.therapy_experience.is_none());
        assert!(d.motivational_style.is_none());
        assert_eq!(d.content_length, Some(ContentLength::Flexible));
        assert_eq!(d.stress_level, 5);
    }

    #[test]
    fn unknown_choice_label_is_rejected() {
        let res: Result<ProfileDraft, _> =
            serde_json::from_str(r#"{"occupation":"astronaut"}"#);
        assert!(res.is_err());
    }

    #[test]
    fn choice_labels_match_serde() {
        for style in CommunicationStyle::ALL {
            let json = serde_json::to_string(style).unwrap();
            assert_eq!(json, format!("\"{}\"", style.label()));
            assert_eq!(CommunicationStyle::from_label(style.label()), Some(*style));
        }
        assert_eq!(Occupation::BetweenJobs.to_string(), "unemployed");
        assert!(ContentLength::from_label("Medium").is_none());
    }

    #[test]
    fn bio_truncates_at_200_chars() {
        let long = "a".repeat(201);
        assert_eq!(truncate_bio(&long).chars().count(), 200);

        let exact = "b".repeat(200);
        assert_eq!(truncate_bio(&exact), exact);

        // multi-byte characters count once
        let hearts = "\u{2764}".repeat(250);
        let cut = truncate_bio(&hearts);
        assert_eq!(cut.chars().count(), 200);
        assert_eq!(cut.len(), 200 * '\u{2764}'.len_utf8());
    }

    #[test]
    fn levels_clamp_into_range() {
        assert_eq!(clamp_level(0), 1);
        assert_eq!(clamp_level(7), 7);
        assert_eq!(clamp_level(42), 10);
    }

    #[test]
    fn photo_validation() {
        assert_eq!(validate_profile_photo("data:image/png;base64,iVBORw0KGgo="), Ok(()));
        assert_eq!(validate_profile_photo("data:image/webp;base64,UklGRg=="), Ok(()));
        assert_eq!(
            validate_profile_photo("https://example.com/me.png"),
            Err(PhotoError::NotAnImage)
        );
        assert_eq!(
            validate_profile_photo("data:image/gif;base64,R0lGOD=="),
            Err(PhotoError::UnsupportedFormat)
        );

        let big = format!("data:image/jpeg;base64,{}", "A".repeat(MAX_PHOTO_BYTES / 3 * 4 + 8));
        assert!(matches!(
            validate_profile_photo(&big),
            Err(PhotoError::TooLarge { .. })
        ));
    }

    #[test]
    fn catalogues_have_no_duplicates() {
        for list in [PRIMARY_CONCERNS, MUSIC_GENRES, ACTIVITY_PREFERENCES, GOALS, NOTIFICATION_TIMES] {
            let mut seen = std::collections::HashSet::new();
            assert!(list.iter().all(|v| seen.insert(*v)));
        }
    }
}
