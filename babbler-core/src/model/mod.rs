//! Word-level n-gram model and sentence generation.
//!
//! - Tokens and n-gram keys (`token`)
//! - Per-n-gram successor counts and weighted sampling (`state`)
//! - The learned transition table (`TransitionModel`)
//! - Generation options (`PredictionInput`)
//! - The trainable, babbling front end (`Babbler`)

/// Trainable model and random-walk sentence generator.
///
/// Owns the transition table and the random generator, ingests sentences,
/// answers queries and babbles.
pub mod babbler;

/// Generation options: starting seed strategy and duplicate-avoidance retries.
pub mod prediction_input;

/// Internal representation of a single n-gram state.
///
/// Tracks successor counts and supports weighted random sampling.
/// This module is not exposed publicly.
mod state;

/// Tokenizer, `EOL` sentinel and n-gram key helpers.
pub mod token;

/// Distinct n-grams, their successors, and sentence starters/stoppers.
pub mod transition_model;
