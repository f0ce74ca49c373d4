//! Response composition: warm message selection and speech normalization.
//!
//! A pure formatting pipeline. Message candidates live in fixed tables keyed
//! by label; which candidate is used goes through an injectable [`Picker`] so
//! deterministic tests can pin exact output. The simplification and
//! normalization steps are idempotent: applying either twice yields the same
//! string as applying it once.

use crate::models::{EmotionLabel, SafetyLevel};
use rand::Rng;
use regex::Regex;
use std::sync::LazyLock;

/// Label a response is composed for: an emotion from chat, or a safety level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToneLabel {
    Emotion(EmotionLabel),
    Safety(SafetyLevel),
}

/// Options for a single compose call.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComposeOptions {
    /// Prepend a randomly chosen reassurance phrase.
    pub reassurance_prefix: bool,
}

/// Chooses an index into a candidate list.
///
/// The production picker is uniform random; tests inject [`FixedPicker`].
pub trait Picker: Send + Sync {
    fn pick(&self, len: usize) -> usize;
}

/// Uniform random selection via the thread-local RNG.
#[derive(Debug, Default)]
pub struct RandomPicker;

impl Picker for RandomPicker {
    fn pick(&self, len: usize) -> usize {
        if len <= 1 {
            0
        } else {
            rand::thread_rng().gen_range(0..len)
        }
    }
}

/// Always picks the same index (modulo candidate count). Test use only,
/// but lives here so downstream crates can pin output too.
#[derive(Debug, Clone, Copy)]
pub struct FixedPicker(pub usize);

impl Picker for FixedPicker {
    fn pick(&self, len: usize) -> usize {
        if len == 0 {
            0
        } else {
            self.0 % len
        }
    }
}

// --- Message tables ---

const STRESSED_MESSAGES: &[&str] = &[
    "Take a slow, deep breath with me. Whatever it is, we will sort it out together.",
    "It sounds like a lot is on your mind. One thing at a time, and I am right here.",
    "That sounds worrying. Let's take it gently, there is no rush at all.",
];

const CONFUSED_MESSAGES: &[&str] = &[
    "That's alright, these things happen to all of us. Let's go through it slowly together.",
    "No need to worry, we can figure this out step by step.",
    "Take your time. I'm happy to explain it as many times as you like.",
];

const LONELY_MESSAGES: &[&str] = &[
    "I'm so glad you're talking with me. You matter to a lot of people, you know.",
    "I'm always here to keep you company. Would you like to hear from one of your friends today?",
    "Thank you for sharing that with me. Shall we think of someone lovely to call?",
];

const CALM_MESSAGES: &[&str] = &[
    "It's lovely to hear from you. How has your day been treating you?",
    "That sounds nice. Tell me more, I enjoy our chats.",
    "Wonderful. It always brightens my day to talk with you.",
];

const CONCERN_MESSAGES: &[&str] = &[
    "I hear you, and I'm glad you told me. Let's see what might help.",
    "Thank you for letting me know. Would a little rest or a glass of water help?",
];

const URGENT_MESSAGES: &[&str] = &[
    "Let's take this seriously but calmly. I've let your care circle know, please sit and rest.",
    "Please sit down and rest for a moment. Someone who cares about you has been told.",
];

const EMERGENCY_MESSAGES: &[&str] = &[
    "Help is on the way. Stay as still as you can, you are not alone.",
    "I've called for help right away. Stay with me, someone is coming.",
];

const REASSURANCE_PHRASES: &[&str] = &[
    "I'm here with you.",
    "You're not alone.",
    "Everything is going to be alright.",
];

fn candidates_for(label: ToneLabel) -> &'static [&'static str] {
    match label {
        ToneLabel::Emotion(EmotionLabel::Stressed) => STRESSED_MESSAGES,
        ToneLabel::Emotion(EmotionLabel::Confused) => CONFUSED_MESSAGES,
        ToneLabel::Emotion(EmotionLabel::Lonely) => LONELY_MESSAGES,
        ToneLabel::Emotion(EmotionLabel::Calm) => CALM_MESSAGES,
        ToneLabel::Safety(SafetyLevel::Normal) => CALM_MESSAGES,
        ToneLabel::Safety(SafetyLevel::Concern) => CONCERN_MESSAGES,
        ToneLabel::Safety(SafetyLevel::Urgent) => URGENT_MESSAGES,
        ToneLabel::Safety(SafetyLevel::Emergency) => EMERGENCY_MESSAGES,
    }
}

// --- Vocabulary simplification ---

/// `(complex, simple)` pairs, replaced whole-word and case-insensitively.
/// No replacement output appears as a key, which keeps the pass idempotent.
pub const VOCABULARY_TABLE: &[(&str, &str)] = &[
    ("assistance", "help"),
    ("medication", "medicine"),
    ("physician", "doctor"),
    ("appointment", "visit"),
    ("immediately", "right away"),
    ("notification", "message"),
    ("schedule", "plan"),
    ("purchase", "buy"),
    ("utilize", "use"),
    ("commence", "start"),
    ("hydration", "drinking water"),
];

// Compiled once at startup; an invalid pattern here is a programming error.
static VOCABULARY_PATTERNS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    VOCABULARY_TABLE
        .iter()
        .map(|(complex, simple)| {
            let pattern = format!(r"(?i)\b{}\b", regex::escape(complex));
            (
                Regex::new(&pattern).expect("Invalid regex: vocabulary pattern"),
                *simple,
            )
        })
        .collect()
});

static ELLIPSIS_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.{3,}").expect("Invalid regex: ellipsis run"));
static PUNCT_GAP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([.!?,])[ \t]{2,}").expect("Invalid regex: punct gap"));
static PUNCT_TIGHT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"([.!?,])([A-Za-z"'])"#).expect("Invalid regex: punct tight"));
static SPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]{2,}").expect("Invalid regex: space run"));

/// Replaces complex words with simple synonyms, whole-word and
/// case-insensitively. Never matches inside longer words.
pub fn simplify_vocabulary(text: &str) -> String {
    let mut out = text.to_string();
    for (pattern, simple) in VOCABULARY_PATTERNS.iter() {
        out = pattern.replace_all(&out, *simple).into_owned();
    }
    out
}

/// Normalizes text for speech synthesis.
///
/// Collapses dot runs to a single ellipsis character, guarantees exactly
/// one space after sentence punctuation and commas, and collapses space
/// runs. The single-char ellipsis is deliberately outside the punctuation
/// classes, which is what makes re-application a no-op.
pub fn normalize_for_speech(text: &str) -> String {
    let expanded = text.replace('…', "...");
    let collapsed = ELLIPSIS_RUN.replace_all(&expanded, "…");
    let gapped = PUNCT_GAP.replace_all(&collapsed, "$1 ");
    let spaced = PUNCT_TIGHT.replace_all(&gapped, "$1 $2");
    let tidy = SPACE_RUN.replace_all(&spaced, " ");
    tidy.trim().to_string()
}

/// Warm message composer with injectable candidate selection.
pub struct Composer {
    picker: Box<dyn Picker>,
}

impl Default for Composer {
    fn default() -> Self {
        Self::new()
    }
}

impl Composer {
    /// Production composer with uniform random selection.
    pub fn new() -> Self {
        Self::with_picker(Box::new(RandomPicker))
    }

    /// Composer with an explicit picker, for deterministic tests.
    pub fn with_picker(picker: Box<dyn Picker>) -> Self {
        Self { picker }
    }

    /// Selects a message for the label and runs the formatting pipeline:
    /// vocabulary simplification, speech normalization, then the optional
    /// reassurance prefix.
    pub fn compose(&self, label: ToneLabel, options: ComposeOptions) -> String {
        let candidates = candidates_for(label);
        let chosen = candidates[self.picker.pick(candidates.len())];

        let simplified = simplify_vocabulary(chosen);
        let normalized = normalize_for_speech(&simplified);

        if options.reassurance_prefix {
            let prefix = REASSURANCE_PHRASES[self.picker.pick(REASSURANCE_PHRASES.len())];
            format!("{} {}", prefix, normalized)
        } else {
            normalized
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_word_simplification() {
        assert_eq!(simplify_vocabulary("Take your medication now"), "Take your medicine now");
        // Must not partially match inside longer words.
        assert_eq!(simplify_vocabulary("premedication phase"), "premedication phase");
    }

    #[test]
    fn test_simplification_is_case_insensitive() {
        assert_eq!(simplify_vocabulary("MEDICATION time"), "medicine time");
        assert_eq!(simplify_vocabulary("Call your Physician"), "Call your doctor");
    }

    #[test]
    fn test_simplification_idempotent() {
        let samples = [
            "Your medication schedule needs assistance immediately.",
            "Please utilize the notification from your physician.",
            "nothing to replace here",
        ];
        for s in samples {
            let once = simplify_vocabulary(s);
            let twice = simplify_vocabulary(&once);
            assert_eq!(once, twice, "not idempotent for '{}'", s);
        }
    }

    #[test]
    fn test_table_outputs_are_not_keys() {
        for (_, simple) in VOCABULARY_TABLE {
            for (complex, _) in VOCABULARY_TABLE {
                assert_ne!(simple, complex, "'{}' is both output and key", simple);
            }
        }
    }

    #[test]
    fn test_ellipsis_collapse() {
        assert_eq!(normalize_for_speech("well....maybe"), "well…maybe");
        assert_eq!(normalize_for_speech("hmm… … yes"), "hmm… … yes");
    }

    #[test]
    fn test_space_after_punctuation() {
        assert_eq!(normalize_for_speech("Hello,dear.How are you?"), "Hello, dear. How are you?");
        assert_eq!(normalize_for_speech("One.  Two.   Three."), "One. Two. Three.");
    }

    #[test]
    fn test_normalization_idempotent() {
        let samples = [
            "Hello...how are you,dear?",
            "Wait… one moment.Please",
            "Already fine. Nothing, to change here…",
        ];
        for s in samples {
            let once = normalize_for_speech(s);
            let twice = normalize_for_speech(&once);
            assert_eq!(once, twice, "not idempotent for '{}'", s);
        }
    }

    #[test]
    fn test_fixed_picker_is_deterministic() {
        let composer = Composer::with_picker(Box::new(FixedPicker(0)));
        let a = composer.compose(ToneLabel::Emotion(EmotionLabel::Lonely), ComposeOptions::default());
        let b = composer.compose(ToneLabel::Emotion(EmotionLabel::Lonely), ComposeOptions::default());
        assert_eq!(a, b);
        assert_eq!(a, normalize_for_speech(&simplify_vocabulary(LONELY_MESSAGES[0])));
    }

    #[test]
    fn test_reassurance_prefix_prepended() {
        let composer = Composer::with_picker(Box::new(FixedPicker(0)));
        let with = composer.compose(
            ToneLabel::Safety(SafetyLevel::Concern),
            ComposeOptions { reassurance_prefix: true },
        );
        assert!(with.starts_with(REASSURANCE_PHRASES[0]));
    }

    #[test]
    fn test_random_composer_stays_in_candidate_set() {
        let composer = Composer::new();
        for _ in 0..20 {
            let msg = composer.compose(ToneLabel::Emotion(EmotionLabel::Calm), ComposeOptions::default());
            assert!(CALM_MESSAGES
                .iter()
                .any(|m| msg == normalize_for_speech(&simplify_vocabulary(m))));
        }
    }

    #[test]
    fn test_every_label_has_candidates() {
        let labels = [
            ToneLabel::Emotion(EmotionLabel::Stressed),
            ToneLabel::Emotion(EmotionLabel::Confused),
            ToneLabel::Emotion(EmotionLabel::Lonely),
            ToneLabel::Emotion(EmotionLabel::Calm),
            ToneLabel::Safety(SafetyLevel::Normal),
            ToneLabel::Safety(SafetyLevel::Concern),
            ToneLabel::Safety(SafetyLevel::Urgent),
            ToneLabel::Safety(SafetyLevel::Emergency),
        ];
        for label in labels {
            assert!(!candidates_for(label).is_empty());
        }
    }
}
