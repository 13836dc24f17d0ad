use super::token::{ngram_key, tokenize};
use crate::error::{BabblerError, Result};

/// Strategy used to select the starting n-gram when babbling.
///
/// # Variants
/// - `Starter`: pick one of the recorded sentence starters uniformly, which
///   weights each starting n-gram by how many sentences it opened.
/// - `Custom(String)`: start from the given n-gram. It is normalized like
///   training text and must contain exactly `n` words.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum StartSeed {
	#[default]
	Starter,
	Custom(String),
}

impl StartSeed {
	/// Parses the textual form used by the command line and the server.
	///
	/// Accepted forms: `starter` (or empty), `custom:<n-gram>`.
	pub fn parse(value: &str) -> Result<Self> {
		let trimmed = value.trim();
		if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("starter") {
			return Ok(StartSeed::Starter);
		}
		match trimmed.get(..7) {
			Some(prefix) if prefix.eq_ignore_ascii_case("custom:") => {
				let ngram = &trimmed[7..];
				if ngram.trim().is_empty() {
					Err(BabblerError::InvalidSeed("custom seed cannot be empty".to_owned()))
				} else {
					Ok(StartSeed::Custom(ngram.to_owned()))
				}
			}
			_ => Err(BabblerError::InvalidSeed(
				"seed must be 'starter' or start with 'custom:'".to_owned(),
			)),
		}
	}

	/// Resolves a custom seed into normalized tokens for a model of order `n`.
	pub(crate) fn custom_tokens(ngram: &str, n: usize) -> Result<Vec<String>> {
		let tokens = tokenize(ngram);
		if tokens.len() != n {
			return Err(BabblerError::InvalidSeed(format!(
				"'{}' has {} words, expected {}",
				ngram_key(&tokens),
				tokens.len(),
				n
			)));
		}
		Ok(tokens)
	}
}

/// Input parameters for a babbling request.
///
/// # Responsibilities
/// - Choose the starting n-gram (`start_seed`)
/// - Bound how many times a sentence that reproduces training text is regenerated (`nb_try`)
#[derive(Clone, Debug, Default)]
pub struct PredictionInput {
	/// Number of extra attempts when the output equals a training sentence.
	/// `0` returns the first sentence generated.
	pub nb_try: usize,

	/// Starting n-gram strategy.
	pub start_seed: StartSeed,
}

impl PredictionInput {
	pub fn new(start_seed: StartSeed, nb_try: usize) -> Self {
		Self { nb_try, start_seed }
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_seed() {
		assert_eq!(StartSeed::parse("").unwrap(), StartSeed::Starter);
		assert_eq!(StartSeed::parse("Starter").unwrap(), StartSeed::Starter);
		assert_eq!(
			StartSeed::parse("custom:the dog").unwrap(),
			StartSeed::Custom("the dog".to_owned())
		);
		assert_eq!(
			StartSeed::parse("CUSTOM:the dog").unwrap(),
			StartSeed::Custom("the dog".to_owned())
		);
	}

	#[test]
	fn test_parse_seed_rejects_garbage() {
		assert!(matches!(StartSeed::parse("custom:  "), Err(BabblerError::InvalidSeed(_))));
		assert!(matches!(StartSeed::parse("random:3"), Err(BabblerError::InvalidSeed(_))));
	}

	#[test]
	fn test_custom_tokens_checks_order() {
		assert_eq!(StartSeed::custom_tokens("The  Dog", 2).unwrap(), vec!["the", "dog"]);
		assert!(matches!(StartSeed::custom_tokens("the", 2), Err(BabblerError::InvalidSeed(_))));
	}

	#[test]
	fn test_default_input() {
		let input = PredictionInput::default();
		assert_eq!(input.nb_try, 0);
		assert_eq!(input.start_seed, StartSeed::Starter);
	}
}
