//! Cross-component brain tests: classification feeding composition.

use crate::brain::composer::{
    normalize_for_speech, simplify_vocabulary, ComposeOptions, Composer, FixedPicker, ToneLabel,
};
use crate::brain::{classify_emotion, classify_safety, classify_vitals, select_nudges};
use crate::models::{
    EmotionLabel, HydrationGoal, MedicationSchedule, Mood, NudgeKind, NudgePriority, SafetyLevel,
    VitalsSnapshot, WeatherData,
};

#[test]
fn realistic_utterances_classify_as_expected() {
    let cases = [
        ("I just watered the plants", SafetyLevel::Normal),
        ("I'm so tired after lunch", SafetyLevel::Concern),
        ("I can't sleep at night anymore", SafetyLevel::Concern),
        ("I fell in the bathroom", SafetyLevel::Emergency),
        ("My chest hurts, I think it's chest pain", SafetyLevel::Emergency),
        ("Please call an ambulance", SafetyLevel::Emergency),
    ];
    for (utterance, expected) in cases {
        let alert = classify_safety(utterance);
        assert_eq!(alert.level, expected, "utterance: {}", utterance);
    }
}

#[test]
fn emergency_wins_over_concern_in_mixed_utterance() {
    // Both tables match; only the emergency result survives.
    let alert = classify_safety("I'm feeling tired and I have chest pain");
    assert_eq!(alert.level, SafetyLevel::Emergency);
    assert_eq!(alert.detected, vec!["chest pain".to_string()]);
    assert!(alert.caregiver_alert);
}

#[test]
fn every_tone_label_composes_clean_text() {
    let composer = Composer::with_picker(Box::new(FixedPicker(0)));
    let labels = [
        ToneLabel::Emotion(EmotionLabel::Stressed),
        ToneLabel::Emotion(EmotionLabel::Confused),
        ToneLabel::Emotion(EmotionLabel::Lonely),
        ToneLabel::Emotion(EmotionLabel::Calm),
        ToneLabel::Safety(SafetyLevel::Concern),
        ToneLabel::Safety(SafetyLevel::Urgent),
        ToneLabel::Safety(SafetyLevel::Emergency),
        ToneLabel::Safety(SafetyLevel::Normal),
    ];
    for label in labels {
        for prefix in [false, true] {
            let text = composer.compose(label, ComposeOptions { reassurance_prefix: prefix });
            assert!(!text.is_empty());
            // Composed output is already in normal form.
            assert_eq!(text, normalize_for_speech(&simplify_vocabulary(&text)));
        }
    }
}

#[test]
fn composition_pipeline_is_idempotent_on_rough_input() {
    let rough = "We can provide assistance....Contact your physician immediately.   Schedule an appointment.";
    let once = normalize_for_speech(&simplify_vocabulary(rough));
    let twice = normalize_for_speech(&simplify_vocabulary(&once));
    assert_eq!(once, twice);
    assert!(once.contains("help"));
    assert!(once.contains("doctor"));
    assert!(once.contains("right away"));
}

#[test]
fn classifier_outputs_compose_without_panicking() {
    // Feed real classifier results straight into the composer, the way the
    // supervisor does.
    let composer = Composer::new();
    for utterance in ["I feel so alone today", "where am I", "what a nice day"] {
        let emotion = classify_emotion(utterance);
        let text = composer.compose(
            ToneLabel::Emotion(emotion),
            ComposeOptions { reassurance_prefix: true },
        );
        assert!(!text.is_empty());
    }

    let snapshot = VitalsSnapshot {
        heart_rate: Some(130.0),
        fall_detected: Some(false),
        location: None,
        timestamp: "2026-08-28T09:00:00Z".to_string(),
    };
    let alert = classify_vitals(&snapshot);
    assert_eq!(alert.level, SafetyLevel::Urgent);
    let text = composer.compose(
        ToneLabel::Safety(alert.level),
        ComposeOptions { reassurance_prefix: false },
    );
    assert!(!text.is_empty());
}

#[test]
fn full_morning_scenario_orders_nudges_by_priority() {
    let medications = vec![
        MedicationSchedule {
            name: "heart tablets".to_string(),
            times: vec!["08:00".to_string(), "20:00".to_string()],
        },
        MedicationSchedule {
            name: "vitamins".to_string(),
            times: vec!["12:00".to_string()],
        },
    ];
    let hydration = HydrationGoal {
        daily_glasses: 8,
        current_glasses: 6,
    };
    let weather = WeatherData {
        temperature_c: 21.0,
        condition: "Sunny".to_string(),
    };

    let nudges = select_nudges(8, &medications, Some(&hydration), Some(&weather), Mood::Bright);

    // heart tablets (high), then the medium activity nudge, then the two
    // low nudges in generation order: hydration before weather.
    let kinds: Vec<NudgeKind> = nudges.iter().map(|n| n.kind).collect();
    assert_eq!(
        kinds,
        vec![
            NudgeKind::Medication,
            NudgeKind::Activity,
            NudgeKind::Hydration,
            NudgeKind::Weather,
        ]
    );
    assert_eq!(nudges[0].priority, NudgePriority::High);
    assert!(nudges[0].message.contains("heart tablets"));
    assert_eq!(nudges[2].priority, NudgePriority::Low);
    assert!(nudges[3].message.contains("short walk"));
}
