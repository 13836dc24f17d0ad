use std::collections::HashMap;

use rand::Rng;

use super::state::State;
use super::token::Successor;
use crate::error::{BabblerError, Result};

/// Represents the learned state of an n-gram word model.
///
/// The `TransitionModel` stores one state per distinct n-gram and the
/// starter/stopper bookkeeping of every training sentence.
///
/// # Responsibilities
/// - Record n-gram/successor occurrences
/// - Record sentence starters and stoppers
/// - Answer successor queries and draw weighted successors
///
/// # Invariants
/// - `n` is always >= 1
/// - Each state in `states` has a unique key, `index` maps keys to positions
/// - `states` keeps n-grams in first-observation order
/// - Nothing is ever removed: all structures only grow
#[derive(Clone, Debug)]
pub struct TransitionModel {
	/// The order of the model (number of words in an n-gram)
	n: usize,

	/// Distinct n-grams, in first-observation order
	states: Vec<State>,

	/// Mapping from an n-gram key to its position in `states`
	index: HashMap<String, usize>,

	/// Leading n-gram of every training sentence, duplicates kept
	starters: Vec<String>,

	/// Trailing n-gram window of every training sentence, duplicates kept
	stoppers: Vec<String>,
}

impl TransitionModel {
	/// Creates a new, empty model of order `n`.
	///
	/// # Errors
	/// Returns [`BabblerError::InvalidOrder`] if `n == 0`.
	pub fn new(n: usize) -> Result<Self> {
		if n == 0 {
			return Err(BabblerError::InvalidOrder(n));
		}
		Ok(Self {
			n,
			states: Vec::new(),
			index: HashMap::new(),
			starters: Vec::new(),
			stoppers: Vec::new(),
		})
	}

	pub fn order(&self) -> usize {
		self.n
	}

	/// Appends `successor` to the transitions of `ngram_key`.
	///
	/// The n-gram joins the distinct set the first time it is recorded.
	pub fn record_occurrence(&mut self, ngram_key: &str, successor: Successor) {
		let position = match self.index.get(ngram_key) {
			Some(&position) => position,
			None => {
				let position = self.states.len();
				self.states.push(State::new(ngram_key));
				self.index.insert(ngram_key.to_owned(), position);
				position
			}
		};
		self.states[position].add_transition(successor);
	}

	pub fn record_starter(&mut self, ngram_key: &str) {
		self.starters.push(ngram_key.to_owned());
	}

	pub fn record_stopper(&mut self, window_key: &str) {
		self.stoppers.push(window_key.to_owned());
	}

	fn state(&self, ngram_key: &str) -> Option<&State> {
		self.index.get(ngram_key).map(|&position| &self.states[position])
	}

	/// Returns the duplicate-preserving successors of `ngram_key`.
	///
	/// Unknown keys yield an empty sequence.
	pub fn successors_of(&self, ngram_key: &str) -> Vec<&str> {
		self.state(ngram_key).map(State::successors).unwrap_or_default()
	}

	pub fn has_successors(&self, ngram_key: &str) -> bool {
		self.state(ngram_key).is_some_and(|state| state.total() > 0)
	}

	/// Number of times `successor` was observed after `ngram_key`.
	pub fn count(&self, ngram_key: &str, successor: &Successor) -> usize {
		self.state(ngram_key).map_or(0, |state| state.count(successor))
	}

	/// Draws one successor of `ngram_key`, weighted by observed frequency.
	///
	/// # Errors
	/// Returns [`BabblerError::EmptyState`] if the n-gram has no recorded successors.
	pub fn sample_successor<R: Rng + ?Sized>(&self, ngram_key: &str, rng: &mut R) -> Result<&Successor> {
		self.state(ngram_key)
			.and_then(|state| state.predict(rng))
			.ok_or_else(|| BabblerError::EmptyState { ngram: ngram_key.to_owned() })
	}

	/// Every distinct n-gram key, in first-observation order.
	pub fn ngrams(&self) -> impl Iterator<Item = &str> {
		self.states.iter().map(State::key)
	}

	pub fn ngram_count(&self) -> usize {
		self.states.len()
	}

	pub fn starters(&self) -> &[String] {
		&self.starters
	}

	pub fn stoppers(&self) -> &[String] {
		&self.stoppers
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	fn word(w: &str) -> Successor {
		Successor::Word(w.to_owned())
	}

	#[test]
	fn test_zero_order_rejected() {
		assert!(matches!(TransitionModel::new(0), Err(BabblerError::InvalidOrder(0))));
		assert_eq!(TransitionModel::new(1).map(|m| m.order()).ok(), Some(1));
	}

	#[test]
	fn test_record_occurrence_deduplicates_ngrams() {
		let mut model = TransitionModel::new(2).unwrap();
		model.record_occurrence("a b", word("c"));
		model.record_occurrence("b c", Successor::End);
		model.record_occurrence("a b", word("d"));

		assert_eq!(model.ngrams().collect::<Vec<_>>(), vec!["a b", "b c"]);
		assert_eq!(model.ngram_count(), 2);
		assert_eq!(model.successors_of("a b"), vec!["c", "d"]);
		assert_eq!(model.successors_of("b c"), vec!["EOL"]);
		assert_eq!(model.count("a b", &word("c")), 1);
	}

	#[test]
	fn test_unknown_key_is_empty() {
		let model = TransitionModel::new(2).unwrap();
		assert!(model.successors_of("never seen").is_empty());
		assert!(!model.has_successors("never seen"));
		assert_eq!(model.count("never seen", &Successor::End), 0);
	}

	#[test]
	fn test_starters_and_stoppers_keep_duplicates() {
		let mut model = TransitionModel::new(1).unwrap();
		model.record_starter("the");
		model.record_starter("the");
		model.record_stopper("end");
		assert_eq!(model.starters(), ["the", "the"]);
		assert_eq!(model.stoppers(), ["end"]);
	}

	#[test]
	fn test_sample_unknown_key_fails() {
		let model = TransitionModel::new(2).unwrap();
		let mut rng = StdRng::seed_from_u64(3);
		match model.sample_successor("x y", &mut rng) {
			Err(BabblerError::EmptyState { ngram }) => assert_eq!(ngram, "x y"),
			other => panic!("expected EmptyState, got {other:?}"),
		}
	}
}
