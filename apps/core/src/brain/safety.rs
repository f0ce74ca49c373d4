//! Safety classification of free-form text.
//!
//! Matches the lower-cased input against two fixed, ordered phrase tables.
//! The emergency table is scanned first and returns early; a text matching
//! both tables yields `Emergency` with only emergency matches in `detected`.
//! Lists are data, not control flow, so tests can enumerate entries directly.

use crate::models::{SafetyAlert, SafetyLevel};

/// Phrases that indicate an emergency: direct help requests, falls,
/// medical distress. Matched as substrings, in this order.
pub const EMERGENCY_PHRASES: &[&str] = &[
    "help me",
    "i need help",
    "i've fallen",
    "i have fallen",
    "i fell",
    "fell down",
    "can't get up",
    "cannot get up",
    "chest pain",
    "can't breathe",
    "cannot breathe",
    "heart attack",
    "stroke",
    "emergency",
    "911",
    "ambulance",
];

/// Phrases that indicate a non-emergency wellness concern.
pub const CONCERN_PHRASES: &[&str] = &[
    "feeling tired",
    "so tired",
    "not feeling well",
    "don't feel well",
    "feel sick",
    "feeling sick",
    "feeling dizzy",
    "missed my medication",
    "forgot my medication",
    "forgot my pills",
    "feeling lonely",
    "lonely",
    "feeling sad",
    "feel sad",
    "can't sleep",
    "nobody visits",
];

const EMERGENCY_MESSAGE: &str =
    "I'm getting help for you right away. Stay calm, you are not alone.";
const CONCERN_MESSAGE: &str =
    "I hear you, and I'm glad you told me. Let's see what we can do together.";

const EMERGENCY_ACTIONS: &[&str] = &["alert_caregiver", "emergency_protocol", "location_share"];
const CONCERN_ACTIONS: &[&str] = &["offer_support", "suggest_contact"];

/// Classifies free text into a [`SafetyAlert`].
///
/// Never panics and never errors: empty or whitespace-only input is `Normal`.
/// `detected` holds every matched phrase in table order, not match position.
pub fn classify_safety(text: &str) -> SafetyAlert {
    let lowered = text.trim().to_lowercase();
    if lowered.is_empty() {
        return SafetyAlert::normal();
    }

    let emergency_hits: Vec<String> = EMERGENCY_PHRASES
        .iter()
        .filter(|phrase| lowered.contains(*phrase))
        .map(|phrase| phrase.to_string())
        .collect();

    if !emergency_hits.is_empty() {
        return SafetyAlert {
            level: SafetyLevel::Emergency,
            detected: emergency_hits,
            message: EMERGENCY_MESSAGE.to_string(),
            actions: EMERGENCY_ACTIONS.iter().map(|a| a.to_string()).collect(),
            caregiver_alert: true,
        };
    }

    let concern_hits: Vec<String> = CONCERN_PHRASES
        .iter()
        .filter(|phrase| lowered.contains(*phrase))
        .map(|phrase| phrase.to_string())
        .collect();

    if !concern_hits.is_empty() {
        return SafetyAlert {
            level: SafetyLevel::Concern,
            detected: concern_hits,
            message: CONCERN_MESSAGE.to_string(),
            actions: CONCERN_ACTIONS.iter().map(|a| a.to_string()).collect(),
            caregiver_alert: false,
        };
    }

    SafetyAlert::normal()
}
