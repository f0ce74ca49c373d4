//! Threshold checks over a vitals snapshot.
//!
//! Fall detection takes absolute priority over every other signal. Heart
//! rate outside `[50, 120]` bpm raises an urgent alert. Absent fields are
//! never errors; absence means no concern from that signal.

use crate::models::{SafetyAlert, SafetyLevel, VitalsSnapshot};

/// Heart rate above this is flagged as `elevated_heart_rate`.
pub const HEART_RATE_HIGH: f64 = 120.0;
/// Heart rate below this is flagged as `low_heart_rate`.
pub const HEART_RATE_LOW: f64 = 50.0;

const FALL_MESSAGE: &str =
    "A fall was detected. Help is on the way. Please stay where you are if you can.";
const HEART_RATE_MESSAGE: &str =
    "Your heart rate looks unusual. Please sit down and rest for a moment.";

/// Classifies a vitals reading into a [`SafetyAlert`].
pub fn classify_vitals(vitals: &VitalsSnapshot) -> SafetyAlert {
    // Fall detection short-circuits everything else.
    if vitals.fall_detected == Some(true) {
        return SafetyAlert {
            level: SafetyLevel::Emergency,
            detected: vec!["fall_detected".to_string()],
            message: FALL_MESSAGE.to_string(),
            actions: vec![
                "emergency_protocol".to_string(),
                "alert_caregiver".to_string(),
                "location_share".to_string(),
                "check_responsive".to_string(),
            ],
            caregiver_alert: true,
        };
    }

    let mut detected = Vec::new();
    if let Some(bpm) = vitals.heart_rate {
        if bpm > HEART_RATE_HIGH {
            detected.push("elevated_heart_rate".to_string());
        }
        if bpm < HEART_RATE_LOW {
            detected.push("low_heart_rate".to_string());
        }
    }

    if !detected.is_empty() {
        return SafetyAlert {
            level: SafetyLevel::Urgent,
            detected,
            message: HEART_RATE_MESSAGE.to_string(),
            actions: vec![
                "alert_caregiver".to_string(),
                "suggest_rest".to_string(),
                "monitor_vitals".to_string(),
            ],
            caregiver_alert: true,
        };
    }

    SafetyAlert::normal()
}
