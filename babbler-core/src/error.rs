use thiserror::Error;

/// Errors reported by the babbler model.
///
/// Every variant is local and recoverable: the caller decides whether to
/// abort, skip, or retry. Sentences shorter than the model order are not
/// errors, see [`crate::model::babbler::Ingestion`].
#[derive(Error, Debug)]
pub enum BabblerError {
	#[error("n-gram order must be >= 1, got {0}")]
	InvalidOrder(usize),

	#[error("model is untrained: no starter n-grams recorded")]
	UntrainedModel,

	#[error("no successors recorded for n-gram '{ngram}'")]
	EmptyState { ngram: String },

	#[error("invalid start seed: {0}")]
	InvalidSeed(String),

	#[error("io error: {0}")]
	Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BabblerError>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_error_display() {
		let err = BabblerError::InvalidOrder(0);
		assert!(err.to_string().contains("order must be >= 1"));

		let err = BabblerError::UntrainedModel;
		assert!(err.to_string().contains("untrained"));

		let err = BabblerError::EmptyState { ngram: "the dog".to_owned() };
		assert!(err.to_string().contains("'the dog'"));

		let err = BabblerError::InvalidSeed("expected 2 tokens".to_owned());
		assert!(err.to_string().contains("invalid start seed"));
	}

	#[test]
	fn test_from_io_error() {
		let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
		let err: BabblerError = io_err.into();
		assert!(matches!(err, BabblerError::Io(_)));
	}
}
