//! Wellness nudge generation and priority ordering.
//!
//! Four independent steps run in a fixed generation order (medication,
//! hydration, weather, activity); the result is then stable-sorted by
//! priority rank so ties keep that generation order.

use crate::models::{
    HydrationGoal, MedicationSchedule, Mood, NudgeKind, NudgePriority, TimeOfDay, WeatherData,
    WellnessNudge,
};

/// Temperature above which a heat advisory fires.
pub const HEAT_ADVISORY_C: f64 = 30.0;
/// Temperature below which a cold advisory fires.
pub const COLD_ADVISORY_C: f64 = 5.0;
/// Pleasant band (inclusive) that, with sun, suggests a walk.
pub const WALK_BAND_C: (f64, f64) = (18.0, 25.0);
/// Above this, hydration messages gain an urgency clause.
pub const WARM_HYDRATION_C: f64 = 25.0;

/// Hydration remainder at or above which the nudge is high priority.
const HYDRATION_HIGH_REMAINING: u32 = 6;
/// Hydration remainder at or above which the nudge is medium priority.
const HYDRATION_MEDIUM_REMAINING: u32 = 3;

/// Fixed activity suggestions keyed on `(time of day, mood)`:
/// `(display text, speech text, action id)`.
const ACTIVITY_TABLE: &[((TimeOfDay, Mood), (&str, &str, &str))] = &[
    (
        (TimeOfDay::Morning, Mood::Low),
        (
            "A few gentle stretches by the window could be a lovely start.",
            "How about a few gentle stretches by the window? It can be a lovely start to the day.",
            "gentle_stretches",
        ),
    ),
    (
        (TimeOfDay::Morning, Mood::Okay),
        (
            "A short walk in the morning air does wonders.",
            "A short walk in the morning air does wonders. Shall we plan one?",
            "morning_walk",
        ),
    ),
    (
        (TimeOfDay::Morning, Mood::Bright),
        (
            "You sound chipper! A stroll to the shops or the garden would suit today.",
            "You sound chipper today! A stroll to the shops or some time in the garden would suit.",
            "morning_stroll",
        ),
    ),
    (
        (TimeOfDay::Afternoon, Mood::Low),
        (
            "A cup of tea and your favourite music might lift the afternoon.",
            "How about a cup of tea and your favourite music? It might lift the afternoon.",
            "tea_and_music",
        ),
    ),
    (
        (TimeOfDay::Afternoon, Mood::Okay),
        (
            "An afternoon puzzle or a chapter of your book keeps the mind sharp.",
            "An afternoon puzzle, or a chapter of your book, keeps the mind nice and sharp.",
            "afternoon_puzzle",
        ),
    ),
    (
        (TimeOfDay::Afternoon, Mood::Bright),
        (
            "Maybe ring a friend while the day is bright?",
            "Maybe ring a friend while the day is bright? I bet they'd love to hear from you.",
            "call_friend",
        ),
    ),
    (
        (TimeOfDay::Evening, Mood::Low),
        (
            "A warm bath and an early night can reset everything.",
            "A warm bath and an early night can reset everything. Be kind to yourself this evening.",
            "early_rest",
        ),
    ),
    (
        (TimeOfDay::Evening, Mood::Okay),
        (
            "Some light telly or the radio makes for a cosy evening.",
            "Some light telly or the radio makes for a cosy evening, doesn't it?",
            "cosy_evening",
        ),
    ),
    (
        (TimeOfDay::Evening, Mood::Bright),
        (
            "A lovely evening for a chat with family before bed.",
            "What a lovely evening for a chat with family before bed.",
            "evening_chat",
        ),
    ),
];

fn medication_nudges(hour: u32, medications: &[MedicationSchedule]) -> Vec<WellnessNudge> {
    let bucket = format!("{:02}:00", hour);
    medications
        .iter()
        .filter(|med| med.times.iter().any(|t| t == &bucket))
        .map(|med| WellnessNudge {
            kind: NudgeKind::Medication,
            priority: NudgePriority::High,
            message: format!("It's time for your {}.", med.name),
            speech_message: format!(
                "Just a gentle reminder, it's time for your {}.",
                med.name
            ),
            action: Some("confirm_medication".to_string()),
        })
        .collect()
}

fn hydration_nudge(
    hydration: Option<&HydrationGoal>,
    weather: Option<&WeatherData>,
) -> Option<WellnessNudge> {
    let goal = hydration?;
    let remaining = goal.daily_glasses.saturating_sub(goal.current_glasses);
    if remaining == 0 {
        return None;
    }

    let (priority, mut message) = if remaining >= HYDRATION_HIGH_REMAINING {
        (
            NudgePriority::High,
            format!(
                "Let's keep up with your water today - {} glasses to go. A full glass now would be great.",
                remaining
            ),
        )
    } else if remaining >= HYDRATION_MEDIUM_REMAINING {
        (
            NudgePriority::Medium,
            format!("You're doing well with your water - {} glasses to go.", remaining),
        )
    } else {
        (
            NudgePriority::Low,
            format!("Nearly there! Just {} more to reach your water goal.", remaining),
        )
    };

    if weather.map(|w| w.temperature_c > WARM_HYDRATION_C) == Some(true) {
        message.push_str(" It's warm out, so drinking a little extra matters today.");
    }

    let speech_message = format!("{} Shall I note down a glass for you?", message);
    Some(WellnessNudge {
        kind: NudgeKind::Hydration,
        priority,
        message,
        speech_message,
        action: Some("log_water".to_string()),
    })
}

fn weather_nudge(weather: Option<&WeatherData>) -> Option<WellnessNudge> {
    let weather = weather?;
    let condition = weather.condition.to_lowercase();

    // Bands are checked in precedence order; only the first match fires.
    if weather.temperature_c > HEAT_ADVISORY_C {
        return Some(WellnessNudge {
            kind: NudgeKind::Weather,
            priority: NudgePriority::High,
            message: "It's very hot today. Please stay indoors during the midday heat and keep water close by.".to_string(),
            speech_message: "It's very hot out there today. Best to stay indoors during the midday heat, and keep a glass of water close by.".to_string(),
            action: Some("heat_advisory".to_string()),
        });
    }
    if weather.temperature_c < COLD_ADVISORY_C {
        return Some(WellnessNudge {
            kind: NudgeKind::Weather,
            priority: NudgePriority::Medium,
            message: "It's quite cold outside. Wrap up warm if you head out, and keep the heating on.".to_string(),
            speech_message: "It's quite cold outside today. Do wrap up warm if you head out, and keep the heating on.".to_string(),
            action: Some("cold_advisory".to_string()),
        });
    }
    if condition == "rainy" {
        return Some(WellnessNudge {
            kind: NudgeKind::Weather,
            priority: NudgePriority::Low,
            message: "A rainy one today - a perfect day to stay cosy inside.".to_string(),
            speech_message: "It's a rainy one today. A perfect day to stay cosy inside with something warm.".to_string(),
            action: None,
        });
    }
    if condition == "sunny"
        && weather.temperature_c >= WALK_BAND_C.0
        && weather.temperature_c <= WALK_BAND_C.1
    {
        return Some(WellnessNudge {
            kind: NudgeKind::Weather,
            priority: NudgePriority::Low,
            message: "It's sunny and mild - a lovely time for a short walk outside.".to_string(),
            speech_message: "It's sunny and mild out there. A lovely time for a short walk, if you fancy it.".to_string(),
            action: Some("suggest_walk".to_string()),
        });
    }
    None
}

fn activity_nudge(time_of_day: TimeOfDay, mood: Mood) -> WellnessNudge {
    // The 3x3 table covers every (time, mood) pair; the fallback entry is
    // unreachable but keeps the lookup total without panicking.
    let (message, speech_message, action) = ACTIVITY_TABLE
        .iter()
        .find(|((t, m), _)| *t == time_of_day && *m == mood)
        .map(|(_, entry)| *entry)
        .unwrap_or(ACTIVITY_TABLE[0].1);

    WellnessNudge {
        kind: NudgeKind::Activity,
        priority: NudgePriority::Medium,
        message: message.to_string(),
        speech_message: speech_message.to_string(),
        action: Some(action.to_string()),
    }
}

/// Computes the ordered nudge list for the current hour and user state.
///
/// Evaluation of the four steps is order-insensitive; the output is
/// stable-sorted ascending by priority rank, so equal priorities keep the
/// generation order medication, hydration, weather, activity.
pub fn select_nudges(
    hour: u32,
    medications: &[MedicationSchedule],
    hydration: Option<&HydrationGoal>,
    weather: Option<&WeatherData>,
    mood: Mood,
) -> Vec<WellnessNudge> {
    let time_of_day = TimeOfDay::from_hour(hour);

    let mut nudges = medication_nudges(hour, medications);
    if let Some(n) = hydration_nudge(hydration, weather) {
        nudges.push(n);
    }
    if let Some(n) = weather_nudge(weather) {
        nudges.push(n);
    }
    nudges.push(activity_nudge(time_of_day, mood));

    nudges.sort_by_key(|n| n.priority.rank());
    nudges
}
