use std::fmt;

/// Reserved end-of-sentence marker.
///
/// Training text is lowercased before it reaches the model, so this
/// uppercase sentinel can never collide with a real word.
pub const EOL: &str = "EOL";

/// A token that may follow an n-gram: a word, or the end of the sentence.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Successor {
	Word(String),
	End,
}

impl Successor {
	/// Returns the public string form (`EOL` for [`Successor::End`]).
	pub fn as_str(&self) -> &str {
		match self {
			Successor::Word(word) => word,
			Successor::End => EOL,
		}
	}

	pub fn is_end(&self) -> bool {
		matches!(self, Successor::End)
	}
}

impl fmt::Display for Successor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Splits a sentence on whitespace and lowercases every token.
pub fn tokenize(sentence: &str) -> Vec<String> {
	sentence.split_whitespace().map(str::to_lowercase).collect()
}

/// Builds the canonical lookup key of an n-gram: tokens joined by a single space.
pub fn ngram_key<S: AsRef<str>>(tokens: &[S]) -> String {
	let mut key = String::new();
	for (i, token) in tokens.iter().enumerate() {
		if i > 0 {
			key.push(' ');
		}
		key.push_str(token.as_ref());
	}
	key
}

/// Normalizes a user-supplied key so it matches stored keys.
pub fn normalize_key(key: &str) -> String {
	ngram_key(&tokenize(key))
}
