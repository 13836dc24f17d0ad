//! Markov babbler: a word-level n-gram text generator.
//!
//! This crate provides:
//! - Incremental training from sentences or corpus files
//! - Read-only queries over starters, stoppers, n-grams and successors
//! - Frequency-weighted random generation of new sentences
//!
//! Every model owns its random generator, so seeded models are
//! reproducible and independent of each other.

/// Error taxonomy shared by every operation.
pub mod error;

/// Core n-gram model and generation logic.
pub mod model;

/// Corpus file reading.
///
/// Not exposed
pub(crate) mod io;

pub use error::{BabblerError, Result};
pub use model::babbler::{Babbler, Ingestion, LoadReport, ModelStats};
pub use model::prediction_input::{PredictionInput, StartSeed};
pub use model::token::EOL;
