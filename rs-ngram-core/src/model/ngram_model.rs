use rand::Rng;

use crate::error::{NgramError, Result, invalid_parameter};
use super::frequency_table::{self, Context, FrequencyTable};
use super::generation_config::GenerationConfig;
use super::generator::SentenceGenerator;
use super::tokenizer::{self, Sentence};

/// Word-level n-gram model of order `n`.
///
/// # Responsibilities
/// - Tokenize a corpus into sentences
/// - Count every (context, next token) window of width `n`
/// - Remember how sentences open, to seed generation
/// - Generate new sentences by weighted random walks
///
/// # Invariants
/// - `n` is always >= 2
/// - `start_contexts` is never empty once the model is built
#[derive(Clone, Debug)]
pub struct NGramModel {
	/// The order of the model (tokens per window)
	n: usize,

	/// Context → next-token counts
	table: FrequencyTable,

	/// First `n-1` tokens of each usable sentence, duplicates kept
	start_contexts: Vec<Context>,
}

impl NGramModel {
	/// Builds a model of order `n` from raw text.
	///
	/// # Errors
	/// - `InvalidParameter` if `n < 2`
	/// - `InsufficientData` if no sentence of `text` has at least `n` tokens
	pub fn from_text(text: &str, n: usize) -> Result<Self> {
		Self::validate_order(n)?;
		let sentences = tokenizer::sentences(text);
		log::debug!("Tokenized {} sentence(s) from {} byte(s) of text", sentences.len(), text.len());
		Self::from_sentences(&sentences, n)
	}

	/// Builds a model of order `n` from already tokenized sentences.
	///
	/// # Errors
	/// - `InvalidParameter` if `n < 2`
	/// - `InsufficientData` if no sentence has at least `n` tokens
	pub fn from_sentences(sentences: &[Sentence], n: usize) -> Result<Self> {
		let built = frequency_table::build(sentences, n)?;
		if built.start_contexts.is_empty() {
			return Err(NgramError::InsufficientData { n });
		}
		Ok(Self {
			n,
			table: built.table,
			start_contexts: built.start_contexts,
		})
	}

	/// Checks that `n` is a usable model order.
	///
	/// # Errors
	/// Returns `InvalidParameter` if `n < 2`.
	pub fn validate_order(n: usize) -> Result<()> {
		if n < 2 {
			return Err(invalid_parameter("n", &n, &"n-gram order must be >= 2"));
		}
		Ok(())
	}

	/// Order of the model.
	pub fn n(&self) -> usize {
		self.n
	}

	/// Tokens per context, `n - 1`.
	pub fn context_len(&self) -> usize {
		self.n - 1
	}

	pub fn table(&self) -> &FrequencyTable {
		&self.table
	}

	pub fn start_contexts(&self) -> &[Context] {
		&self.start_contexts
	}

	/// Number of sentences that were long enough to be learned from.
	pub fn sentence_count(&self) -> usize {
		self.start_contexts.len()
	}

	/// Generates up to `config.sentence_count()` sentences.
	///
	/// The same model, config and seeded `rng` always give the same output.
	pub fn generate<R: Rng + ?Sized>(&self, config: &GenerationConfig, rng: &mut R) -> Vec<String> {
		SentenceGenerator::from_checked(&self.table, &self.start_contexts, self.context_len()).generate(config, rng)
	}
}
