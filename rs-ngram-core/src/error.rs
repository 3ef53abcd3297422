//! Error type shared by every stage of the n-gram pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by model construction, generation and corpus loading.
///
/// Per-attempt failures during generation (unknown context, step limit)
/// are not errors: they are absorbed by the attempt budget.
#[derive(Error, Debug)]
pub enum NgramError {
	/// A caller-supplied parameter is out of range.
	#[error("Invalid parameter '{parameter}' = '{value}': {reason}")]
	InvalidParameter {
		parameter: &'static str,
		value: String,
		reason: String,
	},

	/// No sentence of the corpus is long enough to seed generation.
	#[error("Insufficient data: no sentence has at least {n} tokens")]
	InsufficientData { n: usize },

	/// I/O error with file context
	#[error("I/O error for {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
}

/// Result type alias for n-gram operations.
pub type Result<T> = std::result::Result<T, NgramError>;

/// Builds an `InvalidParameter` error.
pub(crate) fn invalid_parameter(
	parameter: &'static str,
	value: &impl ToString,
	reason: &impl ToString,
) -> NgramError {
	NgramError::InvalidParameter {
		parameter,
		value: value.to_string(),
		reason: reason.to_string(),
	}
}
