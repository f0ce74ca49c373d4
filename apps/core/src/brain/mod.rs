//! # Brain Module
//!
//! Fast, non-LLM analysis core for CarePal.
//! Classifies user input and assembles warm responses BEFORE any external
//! service is called. Every component here is a pure function over fixed
//! tables: no I/O, no shared state, safe to call from any number of
//! concurrent requests.
//!
//! ## Components
//! - `safety`: safety classification of free text against phrase tables
//! - `vitals`: threshold checks over a vitals snapshot
//! - `emotion`: emotion labelling from keyword tables
//! - `composer`: warm message selection and speech normalization
//! - `nudges`: wellness nudge generation and priority ordering

pub mod composer;
pub mod emotion;
pub mod nudges;
pub mod safety;
pub mod vitals;

// Re-export main entry points for convenience
pub use composer::{Composer, FixedPicker, Picker, RandomPicker};
pub use emotion::classify_emotion;
pub use nudges::select_nudges;
pub use safety::classify_safety;
pub use vitals::classify_vitals;
