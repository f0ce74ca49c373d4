//! Emotion labelling from keyword tables.
//!
//! Same mechanics as the safety classifier: lower-case the text and scan
//! fixed substring tables in precedence order. First table with a match
//! wins; no match means the user sounds calm.

use crate::models::EmotionLabel;

/// `(label, keywords)` in precedence order. The first table with any
/// substring hit decides the label.
pub const EMOTION_TABLE: &[(EmotionLabel, &[&str])] = &[
    (
        EmotionLabel::Stressed,
        &[
            "worried",
            "anxious",
            "stressed",
            "nervous",
            "scared",
            "afraid",
            "overwhelmed",
            "upset",
        ],
    ),
    (
        EmotionLabel::Confused,
        &[
            "confused",
            "don't understand",
            "do not understand",
            "can't remember",
            "cannot remember",
            "mixed up",
            "what day is it",
        ],
    ),
    (
        EmotionLabel::Lonely,
        &[
            "lonely",
            "alone",
            "by myself",
            "nobody",
            "no one",
            "miss my",
            "miss her",
            "miss him",
        ],
    ),
];

/// Derives an [`EmotionLabel`] from free text. Empty input is `Calm`.
pub fn classify_emotion(text: &str) -> EmotionLabel {
    let lowered = text.trim().to_lowercase();
    if lowered.is_empty() {
        return EmotionLabel::Calm;
    }

    for (label, keywords) in EMOTION_TABLE {
        if keywords.iter().any(|kw| lowered.contains(kw)) {
            return *label;
        }
    }

    EmotionLabel::Calm
}
