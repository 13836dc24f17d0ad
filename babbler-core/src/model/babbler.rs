use std::collections::{HashSet, VecDeque};
use std::path::Path;

use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use super::prediction_input::{PredictionInput, StartSeed};
use super::token::{Successor, ngram_key, normalize_key, tokenize};
use super::transition_model::TransitionModel;
use crate::error::{BabblerError, Result};
use crate::io::read_sentences;

/// Outcome of feeding one sentence to the model.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ingestion {
	/// The sentence was recorded with this many n-gram transitions.
	Recorded { transitions: usize },
	/// The sentence had fewer than `n` words and left the model untouched.
	Skipped { tokens: usize },
}

/// Summary of a corpus file load.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadReport {
	pub lines: usize,
	pub recorded: usize,
	pub skipped: usize,
}

impl LoadReport {
	/// Counts one more line and its outcome.
	pub fn push(&mut self, ingestion: Ingestion) {
		self.lines += 1;
		match ingestion {
			Ingestion::Recorded { .. } => self.recorded += 1,
			Ingestion::Skipped { .. } => self.skipped += 1,
		}
	}
}

/// Size counters of a trained model.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModelStats {
	pub order: usize,
	pub sentences: usize,
	pub skipped: usize,
	pub starters: usize,
	pub stoppers: usize,
	pub ngrams: usize,
}

/// A word-level Markov babbler.
///
/// Trained one sentence at a time, it generates new sentences by a random
/// walk over the observed n-grams, weighted by how often each successor
/// was seen, until the end-of-sentence marker is drawn.
///
/// The random generator is owned by the instance: two babblers built with
/// the same order and seed and trained on the same sentences produce the
/// same output.
#[derive(Debug)]
pub struct Babbler {
	model: TransitionModel,
	rng: StdRng,
	/// Normalized training sentences, used to avoid babbling them back verbatim.
	sentences: HashSet<String>,
	skipped: usize,
}

impl Babbler {
	/// Creates an untrained babbler of order `n`.
	///
	/// `seed` makes generation reproducible; `None` seeds from the OS.
	///
	/// # Errors
	/// Returns [`BabblerError::InvalidOrder`] if `n == 0`.
	pub fn new(n: usize, seed: Option<u64>) -> Result<Self> {
		let model = TransitionModel::new(n)?;
		let rng = seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
		Ok(Self { model, rng, sentences: HashSet::new(), skipped: 0 })
	}

	pub fn order(&self) -> usize {
		self.model.order()
	}

	/// Adds one sentence to the model.
	///
	/// The sentence is lowercased and split on whitespace. Every window of
	/// `n` words is recorded with the word that follows it, or `EOL` for
	/// the last window. The first and last windows are recorded as the
	/// sentence starter and stopper.
	///
	/// # Notes
	/// - Sentences with fewer than `n` words (blank lines included) are
	///   skipped entirely and reported as [`Ingestion::Skipped`].
	pub fn add_sentence(&mut self, sentence: &str) -> Ingestion {
		let n = self.model.order();
		let tokens = tokenize(sentence);
		let len = tokens.len();
		if len < n {
			self.skipped += 1;
			warn!("skipping sentence with {len} words, model order is {n}: {sentence:?}");
			return Ingestion::Skipped { tokens: len };
		}

		self.model.record_starter(&ngram_key(&tokens[..n]));

		for i in 0..=len - n {
			let key = ngram_key(&tokens[i..i + n]);
			let successor = match tokens.get(i + n) {
				Some(word) => Successor::Word(word.clone()),
				None => Successor::End,
			};
			self.model.record_occurrence(&key, successor);
		}

		self.model.record_stopper(&ngram_key(&tokens[len - n..]));
		self.sentences.insert(ngram_key(&tokens));

		let transitions = len - n + 1;
		debug!("recorded {transitions} transitions from a {len}-word sentence");
		Ingestion::Recorded { transitions }
	}

	/// Trains on a text file holding one sentence per line.
	///
	/// # Errors
	/// Returns [`BabblerError::Io`] if the file cannot be read.
	pub fn add_file<P: AsRef<Path>>(&mut self, path: P) -> Result<LoadReport> {
		let path = path.as_ref();
		let mut report = LoadReport::default();
		for line in read_sentences(path)? {
			report.push(self.add_sentence(&line));
		}
		info!(
			"loaded {}: {} lines, {} recorded, {} skipped",
			path.display(),
			report.lines,
			report.recorded,
			report.skipped
		);
		Ok(report)
	}

	/// Leading n-gram of every training sentence, duplicates included.
	pub fn get_starters(&self) -> &[String] {
		self.model.starters()
	}

	/// Trailing n-gram of every training sentence, duplicates included.
	pub fn get_stoppers(&self) -> &[String] {
		self.model.stoppers()
	}

	/// Every distinct n-gram seen, in first-observation order.
	pub fn get_all_ngrams(&self) -> Vec<&str> {
		self.model.ngrams().collect()
	}

	/// Words that followed `ngram`, one entry per occurrence (`EOL` for a sentence end).
	///
	/// The key is normalized like training text. Unknown n-grams yield an empty list.
	pub fn get_successors(&self, ngram: &str) -> Vec<&str> {
		self.model.successors_of(&normalize_key(ngram))
	}

	pub fn has_successor(&self, ngram: &str) -> bool {
		self.model.has_successors(&normalize_key(ngram))
	}

	/// Draws one word that may follow `ngram`, weighted by observed frequency.
	///
	/// # Errors
	/// Returns [`BabblerError::EmptyState`] if `ngram` has no recorded successors.
	pub fn get_random_successor(&mut self, ngram: &str) -> Result<String> {
		let key = normalize_key(ngram);
		let successor = self.model.sample_successor(&key, &mut self.rng)?;
		Ok(successor.as_str().to_owned())
	}

	pub fn stats(&self) -> ModelStats {
		ModelStats {
			order: self.model.order(),
			sentences: self.model.starters().len(),
			skipped: self.skipped,
			starters: self.model.starters().len(),
			stoppers: self.model.stoppers().len(),
			ngrams: self.model.ngram_count(),
		}
	}

	/// Generates one sentence, starting from a random training starter.
	///
	/// The starting n-gram is part of the returned sentence. The walk ends
	/// when `EOL` is drawn. Every training sentence ends on an n-gram with an
	/// `EOL` successor, so the walk terminates with probability 1, although
	/// rare transitions can make a single sentence arbitrarily long.
	///
	/// # Errors
	/// - [`BabblerError::UntrainedModel`] if no sentence was ever recorded.
	/// - [`BabblerError::EmptyState`] if the walk reaches an n-gram without successors.
	pub fn babble(&mut self) -> Result<String> {
		self.predict(&PredictionInput::default())
	}

	/// Generates one sentence, avoiding training sentences if possible.
	///
	/// # Behavior
	/// - Generates from `input.start_seed`.
	/// - While the result equals a training sentence, regenerates, at most
	///   `input.nb_try` extra times.
	/// - Returns the last attempt if every attempt reproduced training text.
	pub fn predict(&mut self, input: &PredictionInput) -> Result<String> {
		let mut sentence = self.generate(&input.start_seed)?;
		let mut nb_try = input.nb_try;

		while nb_try > 0 && self.sentences.contains(&sentence) {
			debug!("generated a training sentence, {nb_try} tries left");
			sentence = self.generate(&input.start_seed)?;
			nb_try -= 1;
		}

		Ok(sentence)
	}

	/// Runs one random walk from the chosen seed.
	fn generate(&mut self, start_seed: &StartSeed) -> Result<String> {
		if self.model.starters().is_empty() {
			return Err(BabblerError::UntrainedModel);
		}

		let seed: Vec<String> = match start_seed {
			StartSeed::Starter => self
				.model
				.starters()
				.choose(&mut self.rng)
				.ok_or(BabblerError::UntrainedModel)?
				.split(' ')
				.map(str::to_owned)
				.collect(),
			StartSeed::Custom(ngram) => StartSeed::custom_tokens(ngram, self.model.order())?,
		};

		let mut sentence = seed.clone();
		let mut window: VecDeque<String> = seed.into();

		loop {
			let key = ngram_key(&*window.make_contiguous());
			match self.model.sample_successor(&key, &mut self.rng)? {
				Successor::End => break,
				Successor::Word(word) => {
					sentence.push(word.clone());
					window.pop_front();
					window.push_back(word.clone());
				}
			}
		}

		debug!("babbled {} words", sentence.len());
		Ok(ngram_key(&sentence))
	}
}
