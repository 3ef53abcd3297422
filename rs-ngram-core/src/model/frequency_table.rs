use std::collections::HashMap;

use crate::error::{Result, invalid_parameter};
use super::state::State;
use super::tokenizer::{Sentence, Token};

/// The `n-1` tokens preceding a predicted token.
pub type Context = Vec<Token>;

/// Context → next-token counts, built from sliding windows of width `n`.
///
/// # Invariants
/// - Every key holds exactly `n-1` tokens
/// - Every stored count is >= 1
/// - Next tokens of each state keep first-seen order
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrequencyTable {
	states: HashMap<Context, State>,
}

impl FrequencyTable {
	/// Creates an empty table.
	pub fn new() -> Self {
		Self::default()
	}

	/// Records one observation of `next` following `context`.
	pub fn add_transition(&mut self, context: &[Token], next: &str) {
		if let Some(state) = self.states.get_mut(context) {
			state.add_transition(next);
			return;
		}
		let mut state = State::new(context);
		state.add_transition(next);
		self.states.insert(context.to_vec(), state);
	}

	/// Returns the state reached through `context`, if observed.
	pub fn get(&self, context: &[Token]) -> Option<&State> {
		self.states.get(context)
	}

	/// Number of distinct contexts.
	pub fn len(&self) -> usize {
		self.states.len()
	}

	/// Returns `true` if no window was ever recorded.
	pub fn is_empty(&self) -> bool {
		self.states.is_empty()
	}

	/// Iterates over the observed contexts, in no particular order.
	pub fn contexts(&self) -> impl Iterator<Item = &[Token]> {
		self.states.keys().map(Vec::as_slice)
	}

	/// Total number of windows recorded across all contexts.
	pub fn total_windows(&self) -> usize {
		self.states.values().map(State::total).sum()
	}
}

/// Output of [`build`]: the table plus one start context per usable sentence.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BuiltTable {
	pub table: FrequencyTable,
	/// Duplicates are kept so frequent openers are picked more often.
	pub start_contexts: Vec<Context>,
}

/// Builds the frequency table of order `n` from tokenized sentences.
///
/// Sentences shorter than `n` tokens are skipped entirely. Every other
/// sentence contributes its first `n-1` tokens as a start context and one
/// transition per window of width `n`.
///
/// # Errors
/// Returns `InvalidParameter` if `n < 2`.
pub fn build(sentences: &[Sentence], n: usize) -> Result<BuiltTable> {
	if n < 2 {
		return Err(invalid_parameter("n", &n, &"n-gram order must be >= 2"));
	}

	let mut built = BuiltTable::default();
	for sentence in sentences {
		if sentence.len() < n {
			continue;
		}

		built.start_contexts.push(sentence[..n - 1].to_vec());

		for window in sentence.windows(n) {
			let (context, next) = window.split_at(n - 1);
			built.table.add_transition(context, &next[0]);
		}
	}

	log::debug!(
		"Built {}-gram table: {} context(s), {} window(s), {} start context(s) from {} sentence(s)",
		n,
		built.table.len(),
		built.table.total_windows(),
		built.start_contexts.len(),
		sentences.len()
	);

	Ok(built)
}
