use serde::{Deserialize, Serialize};
use validator::Validate;

/// Severity of a safety classification, totally ordered by urgency.
///
/// `Emergency > Urgent > Concern > Normal`. When several signals apply,
/// the highest severity wins and lower-severity matches are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SafetyLevel {
    Normal,
    Concern,
    Urgent,
    Emergency,
}

impl SafetyLevel {
    /// Returns the wire label for the level.
    pub fn label(&self) -> &'static str {
        match self {
            SafetyLevel::Normal => "normal",
            SafetyLevel::Concern => "concern",
            SafetyLevel::Urgent => "urgent",
            SafetyLevel::Emergency => "emergency",
        }
    }

    /// Whether this level should wake the care circle.
    pub fn is_high_severity(&self) -> bool {
        matches!(self, SafetyLevel::Urgent | SafetyLevel::Emergency)
    }
}

/// Result of a safety classification over text or vitals.
///
/// Produced fresh per classification call and never mutated afterwards.
/// Persistence, if any, is the orchestrator's job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafetyAlert {
    /// Severity of the alert.
    pub level: SafetyLevel,
    /// Matched phrase or signal identifiers, in evaluation order.
    pub detected: Vec<String>,
    /// Human-readable reassurance text. Empty for `Normal`.
    pub message: String,
    /// Ordered action identifiers for the orchestration layer.
    pub actions: Vec<String>,
    /// Whether the care circle should be alerted.
    pub caregiver_alert: bool,
}

impl SafetyAlert {
    /// An all-clear alert with empty fields.
    pub fn normal() -> Self {
        Self {
            level: SafetyLevel::Normal,
            detected: vec![],
            message: String::new(),
            actions: vec![],
            caregiver_alert: false,
        }
    }
}

/// A latitude/longitude pair attached to a vitals reading.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// A point-in-time vitals reading supplied by the caller.
///
/// Every signal is optional; absence means "no concern from that signal",
/// never an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VitalsSnapshot {
    /// Heart rate in beats per minute, if the device reported one.
    #[serde(default)]
    pub heart_rate: Option<f64>,
    /// Whether the wearable flagged a fall.
    #[serde(default)]
    pub fall_detected: Option<bool>,
    /// Last known location, if shared.
    #[serde(default)]
    pub location: Option<GeoPoint>,
    /// Device-supplied timestamp of the reading.
    pub timestamp: String,
}

/// Emotion derived from free-form text. Derived per call, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmotionLabel {
    Stressed,
    Confused,
    Lonely,
    Calm,
}

impl EmotionLabel {
    /// Returns the wire label for the emotion.
    pub fn label(&self) -> &'static str {
        match self {
            EmotionLabel::Stressed => "stressed",
            EmotionLabel::Confused => "confused",
            EmotionLabel::Lonely => "lonely",
            EmotionLabel::Calm => "calm",
        }
    }
}

/// Category of a wellness nudge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NudgeKind {
    Medication,
    Hydration,
    Activity,
    Rest,
    Weather,
}

/// Priority of a wellness nudge, ordered `High < Medium < Low` by rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NudgePriority {
    High,
    Medium,
    Low,
}

impl NudgePriority {
    /// Sort rank: lower sorts first.
    pub fn rank(&self) -> u8 {
        match self {
            NudgePriority::High => 0,
            NudgePriority::Medium => 1,
            NudgePriority::Low => 2,
        }
    }
}

/// A single advisory message surfaced to the user once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WellnessNudge {
    /// What kind of advisory this is.
    pub kind: NudgeKind,
    /// How urgently it should be surfaced.
    pub priority: NudgePriority,
    /// Display text.
    pub message: String,
    /// Speech-friendly rendition of the message.
    pub speech_message: String,
    /// Optional action identifier for the client (e.g. `log_water`).
    #[serde(default)]
    pub action: Option<String>,
}

/// A medication and the hour buckets (`"HH:00"`) it is due at.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedicationSchedule {
    /// Display name of the medication.
    pub name: String,
    /// Scheduled hour buckets, formatted `HH:00`.
    pub times: Vec<String>,
}

/// Daily water-intake goal and progress, in glasses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HydrationGoal {
    pub daily_glasses: u32,
    pub current_glasses: u32,
}

/// Current weather snapshot from the external data layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherData {
    /// Ambient temperature in degrees Celsius.
    pub temperature_c: f64,
    /// Free-form condition keyword, e.g. `sunny`, `rainy`, `cloudy`.
    pub condition: String,
}

/// Coarse mood level supplied by the external data layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Low,
    Okay,
    Bright,
}

/// Time-of-day bucket used by the activity nudge lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
}

impl TimeOfDay {
    /// Buckets an hour (0-23): before 12 is morning, before 18 afternoon,
    /// the rest evening.
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            0..=11 => TimeOfDay::Morning,
            12..=17 => TimeOfDay::Afternoon,
            _ => TimeOfDay::Evening,
        }
    }
}

/// A synthesized audio payload handed back to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioRef {
    /// MIME type of the audio data, e.g. `audio/mpeg`.
    pub mime: String,
    /// Base64-encoded audio bytes.
    pub data: String,
}

/// A check-in or chat request from the orchestration layer.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CompanionRequest {
    /// Identifier of the user this request belongs to.
    #[validate(length(min = 1))]
    pub user_id: String,
    /// The user's message content.
    #[validate(length(min = 1))]
    pub message: String,
}

/// A vitals report from a wearable or the orchestration layer.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VitalsRequest {
    /// Identifier of the user the reading belongs to.
    #[validate(length(min = 1))]
    pub user_id: String,
    /// The vitals reading itself.
    pub vitals: VitalsSnapshot,
}

/// Inputs for computing a user's wellness nudges.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NudgeRequest {
    /// Identifier of the user.
    #[validate(length(min = 1))]
    pub user_id: String,
    /// Current hour of day, 0-23.
    #[validate(range(max = 23))]
    pub hour: u32,
    /// The user's medication schedules.
    #[serde(default)]
    pub medications: Vec<MedicationSchedule>,
    /// Hydration goal and progress, if tracked.
    #[serde(default)]
    pub hydration: Option<HydrationGoal>,
    /// Current weather, if available.
    #[serde(default)]
    pub weather: Option<WeatherData>,
    /// The user's current mood level.
    pub mood: Mood,
}

/// A request for a social "buddy" message.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BuddyRequest {
    /// Identifier of the user.
    #[validate(length(min = 1))]
    pub user_id: String,
    /// Display name of the buddy the message should come from.
    #[validate(length(min = 1))]
    pub buddy_name: String,
}

/// Uniform envelope returned by every orchestrator operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    /// Whether the operation produced a usable response.
    pub success: bool,
    /// Warm, user-facing text. Never contains internal error detail.
    pub message: String,
    /// Synthesized speech for `message`, when synthesis succeeded.
    #[serde(default)]
    pub speech: Option<AudioRef>,
    /// Safety classification, when the operation performed one.
    #[serde(default)]
    pub alert: Option<SafetyAlert>,
    /// Ordered wellness nudges, when the operation computed them.
    #[serde(default)]
    pub nudges: Vec<WellnessNudge>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering_is_total() {
        assert!(SafetyLevel::Emergency > SafetyLevel::Urgent);
        assert!(SafetyLevel::Urgent > SafetyLevel::Concern);
        assert!(SafetyLevel::Concern > SafetyLevel::Normal);
    }

    #[test]
    fn test_priority_ranks() {
        assert!(NudgePriority::High.rank() < NudgePriority::Medium.rank());
        assert!(NudgePriority::Medium.rank() < NudgePriority::Low.rank());
    }

    #[test]
    fn test_time_of_day_buckets() {
        assert_eq!(TimeOfDay::from_hour(0), TimeOfDay::Morning);
        assert_eq!(TimeOfDay::from_hour(11), TimeOfDay::Morning);
        assert_eq!(TimeOfDay::from_hour(12), TimeOfDay::Afternoon);
        assert_eq!(TimeOfDay::from_hour(17), TimeOfDay::Afternoon);
        assert_eq!(TimeOfDay::from_hour(18), TimeOfDay::Evening);
        assert_eq!(TimeOfDay::from_hour(23), TimeOfDay::Evening);
    }

    #[test]
    fn test_request_validation() {
        use validator::Validate;

        let bad = CompanionRequest {
            user_id: String::new(),
            message: "hello".to_string(),
        };
        assert!(bad.validate().is_err());

        let good = CompanionRequest {
            user_id: "user-1".to_string(),
            message: "hello".to_string(),
        };
        assert!(good.validate().is_ok());
    }
}
