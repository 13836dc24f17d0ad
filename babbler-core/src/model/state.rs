use std::collections::HashMap;

use rand::Rng;

use super::token::Successor;

/// Represents a state in the transition model.
///
/// A `State` corresponds to one n-gram (`key`) and stores every observed
/// successor of that n-gram together with how many times it was observed.
///
/// Conceptually, this is a node in a Markov chain where outgoing edges
/// are weighted by their number of observations.
///
/// ## Responsibilities:
/// - Accumulate successor occurrences during training
/// - Draw the next token using weighted random sampling
///
/// ## Invariants
/// - Each successor occurrence count is strictly positive
/// - `total` is the sum of all occurrence counts
/// - `transitions` keeps successors in first-observation order
#[derive(Clone, Debug)]
pub(crate) struct State {
	/// The n-gram key, tokens joined by a single space.
	key: String,
	/// Distinct successors with their occurrence counts.
	/// Example: [("with", 2), ("quickly", 1)]
	transitions: Vec<(Successor, usize)>,
	/// Position of each successor in `transitions`.
	positions: HashMap<Successor, usize>,
	total: usize,
}

impl State {
	/// Creates a new empty state for the given n-gram.
	pub fn new(key: &str) -> Self {
		Self {
			key: key.to_owned(),
			transitions: Vec::new(),
			positions: HashMap::new(),
			total: 0,
		}
	}

	pub fn key(&self) -> &str {
		&self.key
	}

	/// Records one occurrence of `successor` after this n-gram.
	///
	/// - If the successor was already seen, its count is increased.
	/// - Otherwise it is appended with an initial count of 1.
	pub fn add_transition(&mut self, successor: Successor) {
		match self.positions.get(&successor) {
			Some(&position) => self.transitions[position].1 += 1,
			None => {
				self.positions.insert(successor.clone(), self.transitions.len());
				self.transitions.push((successor, 1));
			}
		}
		self.total += 1;
	}

	/// Total number of recorded occurrences.
	pub fn total(&self) -> usize {
		self.total
	}

	/// Number of times `successor` was observed after this n-gram.
	pub fn count(&self, successor: &Successor) -> usize {
		self.positions
			.get(successor)
			.map_or(0, |&position| self.transitions[position].1)
	}

	/// Materializes the duplicate-preserving successor sequence.
	///
	/// Each distinct successor is repeated as many times as it was observed,
	/// in first-observation order.
	pub fn successors(&self) -> Vec<&str> {
		let mut successors = Vec::with_capacity(self.total);
		for (successor, occurrence) in &self.transitions {
			successors.extend(std::iter::repeat_n(successor.as_str(), *occurrence));
		}
		successors
	}

	/// Draws the next token using weighted random sampling.
	///
	/// The probability of selecting a successor is proportional to its
	/// occurrence count. A single uniform draw in `[0, total)` is walked
	/// through the cumulative counts in first-observation order.
	///
	/// Returns `None` if the state has no transitions.
	pub fn predict<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Successor> {
		if self.total == 0 {
			return None;
		}

		let mut r = rng.random_range(0..self.total);
		for (successor, occurrence) in &self.transitions {
			if r < *occurrence {
				return Some(successor);
			}
			r -= occurrence;
		}

		// Unreachable while `total` matches the recorded counts
		None
	}
}
