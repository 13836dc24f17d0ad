use std::path::PathBuf;

use babbler_core::{Babbler, PredictionInput, StartSeed};
use clap::Parser;
use log::LevelFilter;

/// Train a Markov babbler on a corpus and print generated sentences.
///
/// The corpus holds one pre-segmented sentence per line.
#[derive(Parser, Debug)]
#[command(name = "babbler")]
#[command(author, version, about, long_about = None)]
struct Cli {
	/// Number of words in an n-gram
	#[arg(default_value_t = 4)]
	n: usize,

	/// Corpus file, one sentence per line
	#[arg(default_value = "tests/test3.txt")]
	filename: PathBuf,

	/// Number of sentences to generate
	#[arg(default_value_t = 5)]
	num_sentences: usize,

	/// Seed for reproducible output
	#[arg(short, long)]
	seed: Option<u64>,

	/// Retries when a generated sentence already exists in the corpus
	#[arg(long, default_value_t = 0)]
	nb_try: usize,

	/// Start every sentence from this n-gram instead of a corpus starter
	#[arg(long)]
	start: Option<String>,

	/// Log debug output
	#[arg(short, long)]
	verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
	let cli = Cli::parse();

	let default_level = if cli.verbose { LevelFilter::Debug } else { LevelFilter::Warn };
	env_logger::Builder::new()
		.filter_level(default_level)
		.parse_default_env()
		.init();

	println!("{}", cli.filename.display());
	let mut babbler = Babbler::new(cli.n, cli.seed)?;
	babbler.add_file(&cli.filename)?;

	let stats = babbler.stats();
	println!("num starters {}", stats.starters);
	println!("num ngrams {}", stats.ngrams);
	println!("num stoppers {}", stats.stoppers);

	let start_seed = match cli.start {
		Some(ngram) => StartSeed::Custom(ngram),
		None => StartSeed::Starter,
	};
	let input = PredictionInput::new(start_seed, cli.nb_try);

	for _ in 0..cli.num_sentences {
		println!("{}", babbler.predict(&input)?);
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults() {
		let cli = Cli::try_parse_from(["babbler"]).unwrap();
		assert_eq!(cli.n, 4);
		assert_eq!(cli.filename, PathBuf::from("tests/test3.txt"));
		assert_eq!(cli.num_sentences, 5);
		assert_eq!(cli.seed, None);
		assert_eq!(cli.nb_try, 0);
		assert!(!cli.verbose);
	}

	#[test]
	fn test_positional_and_flags() {
		let cli = Cli::try_parse_from([
			"babbler", "2", "corpus.txt", "10", "--seed", "42", "--nb-try", "3", "--start", "the dog",
		])
		.unwrap();
		assert_eq!(cli.n, 2);
		assert_eq!(cli.filename, PathBuf::from("corpus.txt"));
		assert_eq!(cli.num_sentences, 10);
		assert_eq!(cli.seed, Some(42));
		assert_eq!(cli.nb_try, 3);
		assert_eq!(cli.start.as_deref(), Some("the dog"));
	}

	#[test]
	fn test_rejects_non_numeric_order() {
		assert!(Cli::try_parse_from(["babbler", "two"]).is_err());
	}
}
