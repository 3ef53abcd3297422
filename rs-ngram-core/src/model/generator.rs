use rand::Rng;
use rand::seq::IndexedRandom;

use crate::error::{NgramError, Result, invalid_parameter};
use super::frequency_table::{Context, FrequencyTable};
use super::generation_config::GenerationConfig;
use super::tokenizer::{Token, is_terminator};

/// Random walk over a frequency table, producing whole sentences.
///
/// # Responsibilities
/// - Pick a start context, weighted by how often it opened a sentence
/// - Extend it token by token through weighted sampling
/// - Retry failed walks within a bounded attempt budget
///
/// A walk fails when its current context was never observed, when it runs
/// out of steps or when it grows past the sentence length limit. Failed
/// walks are dropped silently; only a finished sentence is ever emitted.
#[derive(Debug)]
pub struct SentenceGenerator<'a> {
	table: &'a FrequencyTable,
	start_contexts: &'a [Context],
	context_len: usize,
}

impl<'a> SentenceGenerator<'a> {
	/// Creates a generator over a built table.
	///
	/// # Errors
	/// - `InvalidParameter` if `context_len < 1`
	/// - `InsufficientData` if `start_contexts` is empty
	pub fn new(table: &'a FrequencyTable, start_contexts: &'a [Context], context_len: usize) -> Result<Self> {
		if context_len < 1 {
			return Err(invalid_parameter("context_len", &context_len, &"context length must be >= 1"));
		}
		if start_contexts.is_empty() {
			return Err(NgramError::InsufficientData { n: context_len + 1 });
		}
		Ok(Self { table, start_contexts, context_len })
	}

	/// Builds a generator from parts already validated by `NGramModel`.
	pub(crate) fn from_checked(table: &'a FrequencyTable, start_contexts: &'a [Context], context_len: usize) -> Self {
		Self { table, start_contexts, context_len }
	}

	/// Lazily yields sentences, one per successful attempt.
	///
	/// The iterator ends once `config.sentence_count()` sentences were
	/// produced or the attempt budget is spent.
	pub fn sentences<'g, 'r, R: Rng + ?Sized>(
		&'g self,
		config: &'g GenerationConfig,
		rng: &'r mut R,
	) -> Sentences<'g, 'a, 'r, R> {
		Sentences {
			generator: self,
			config,
			rng,
			produced: 0,
			attempts: 0,
		}
	}

	/// Generates up to `config.sentence_count()` formatted sentences.
	///
	/// Stops as soon as enough sentences are collected or the attempt budget
	/// is spent. Returning fewer sentences than asked is not an error.
	pub fn generate<R: Rng + ?Sized>(&self, config: &GenerationConfig, rng: &mut R) -> Vec<String> {
		let wanted = config.sentence_count();
		let mut iter = self.sentences(config, rng);
		// `wanted` has no upper bound, never pre-size from it
		let sentences: Vec<String> = iter.by_ref().collect();

		log::debug!(
			"Generated {}/{} sentence(s) in {}/{} attempt(s)",
			sentences.len(),
			wanted,
			iter.attempts(),
			config.max_attempts()
		);
		if sentences.len() < wanted {
			log::warn!(
				"Attempt budget exhausted: only {} of {} sentence(s) generated",
				sentences.len(),
				wanted
			);
		}

		sentences
	}

	/// Runs a single attempt. Returns the sentence tokens on success.
	fn walk<R: Rng + ?Sized>(&self, config: &GenerationConfig, rng: &mut R) -> Option<Vec<Token>> {
		let mut tokens = self.start_contexts.choose(rng)?.clone();

		for _ in 0..config.max_steps() {
			if tokens.len() >= config.max_sentence_tokens() {
				log::trace!("Attempt abandoned: reached {} tokens", tokens.len());
				return None;
			}

			let context = &tokens[tokens.len().saturating_sub(self.context_len)..];
			let Some(state) = self.table.get(context) else {
				log::trace!("Attempt abandoned: unknown context {context:?}");
				return None;
			};

			let next = state.predict(rng)?.to_owned();
			let finished = is_terminator(&next);
			tokens.push(next);
			if finished {
				return Some(tokens);
			}
		}

		log::trace!("Attempt abandoned: no terminator after {} step(s)", config.max_steps());
		None
	}
}

/// Iterator returned by [`SentenceGenerator::sentences`].
#[derive(Debug)]
pub struct Sentences<'g, 'a, 'r, R: ?Sized> {
	generator: &'g SentenceGenerator<'a>,
	config: &'g GenerationConfig,
	rng: &'r mut R,
	produced: usize,
	attempts: usize,
}

impl<R: ?Sized> Sentences<'_, '_, '_, R> {
	/// Attempts spent so far.
	pub fn attempts(&self) -> usize {
		self.attempts
	}
}

impl<R: Rng + ?Sized> Iterator for Sentences<'_, '_, '_, R> {
	type Item = String;

	fn next(&mut self) -> Option<String> {
		while self.produced < self.config.sentence_count() && self.attempts < self.config.max_attempts() {
			self.attempts += 1;
			if let Some(tokens) = self.generator.walk(self.config, &mut *self.rng) {
				self.produced += 1;
				return Some(format_sentence(&tokens));
			}
		}
		None
	}
}

/// Joins tokens into display text.
///
/// Words are separated by single spaces; each terminator is glued to the
/// token before it. A terminator with nothing before it stands alone.
pub fn format_sentence(tokens: &[Token]) -> String {
	let mut output: Vec<String> = Vec::with_capacity(tokens.len());
	for token in tokens {
		match output.last_mut() {
			Some(last) if is_terminator(token) => last.push_str(token),
			_ => output.push(token.clone()),
		}
	}
	output.join(" ")
}
