use crate::error::{Result, invalid_parameter};

/// Attempts allowed per requested sentence.
pub const DEFAULT_ATTEMPTS_PER_SENTENCE: usize = 10;

/// Sampling steps allowed per attempt.
pub const DEFAULT_MAX_STEPS: usize = 50;

/// Longest sentence, in tokens (terminator included), ever emitted.
pub const DEFAULT_MAX_SENTENCE_TOKENS: usize = 50;

/// Limits controlling one generation run.
///
/// # Invariants
/// - Every field is >= 1; setters reject anything else
///
/// The attempt budget of a run is
/// `sentence_count * attempts_per_sentence`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GenerationConfig {
	/// Number of sentences wanted (`m`).
	sentence_count: usize,

	/// Attempts allowed per wanted sentence.
	attempts_per_sentence: usize,

	/// Sampling steps allowed before an attempt is abandoned.
	max_steps: usize,

	/// Attempts whose sentence would grow past this are abandoned.
	max_sentence_tokens: usize,
}

impl GenerationConfig {
	/// Creates a configuration asking for `sentence_count` sentences with
	/// default limits.
	///
	/// # Errors
	/// Returns `InvalidParameter` if `sentence_count < 1`.
	pub fn new(sentence_count: usize) -> Result<Self> {
		check_positive("m", sentence_count)?;
		Ok(Self {
			sentence_count,
			attempts_per_sentence: DEFAULT_ATTEMPTS_PER_SENTENCE,
			max_steps: DEFAULT_MAX_STEPS,
			max_sentence_tokens: DEFAULT_MAX_SENTENCE_TOKENS,
		})
	}

	pub fn sentence_count(&self) -> usize {
		self.sentence_count
	}

	pub fn attempts_per_sentence(&self) -> usize {
		self.attempts_per_sentence
	}

	pub fn max_steps(&self) -> usize {
		self.max_steps
	}

	pub fn max_sentence_tokens(&self) -> usize {
		self.max_sentence_tokens
	}

	/// Total attempts a run may spend.
	pub fn max_attempts(&self) -> usize {
		self.sentence_count.saturating_mul(self.attempts_per_sentence)
	}

	/// Sets the number of sentences wanted.
	///
	/// # Errors
	/// Returns `InvalidParameter` if `count < 1`.
	pub fn set_sentence_count(&mut self, count: usize) -> Result<()> {
		check_positive("m", count)?;
		self.sentence_count = count;
		Ok(())
	}

	/// Sets the attempts allowed per wanted sentence.
	///
	/// # Errors
	/// Returns `InvalidParameter` if `attempts < 1`.
	pub fn set_attempts_per_sentence(&mut self, attempts: usize) -> Result<()> {
		check_positive("attempts_per_sentence", attempts)?;
		self.attempts_per_sentence = attempts;
		Ok(())
	}

	/// Sets the sampling steps allowed per attempt.
	///
	/// # Errors
	/// Returns `InvalidParameter` if `steps < 1`.
	pub fn set_max_steps(&mut self, steps: usize) -> Result<()> {
		check_positive("max_steps", steps)?;
		self.max_steps = steps;
		Ok(())
	}

	/// Sets the longest sentence, in tokens, that may be emitted.
	///
	/// # Errors
	/// Returns `InvalidParameter` if `tokens < 1`.
	pub fn set_max_sentence_tokens(&mut self, tokens: usize) -> Result<()> {
		check_positive("max_sentence_tokens", tokens)?;
		self.max_sentence_tokens = tokens;
		Ok(())
	}
}

fn check_positive(parameter: &'static str, value: usize) -> Result<()> {
	if value < 1 {
		return Err(invalid_parameter(parameter, &value, &"must be >= 1"));
	}
	Ok(())
}
