use rand::Rng;

use super::frequency_table::Context;
use super::sampler;
use super::tokenizer::Token;

/// Represents a state in an n-gram model.
///
/// A `State` corresponds to one context (the `n-1` preceding tokens) and
/// stores every observed next token with its occurrence count.
///
/// ## Invariants
/// - Each transition occurrence count is strictly positive
/// - Transitions keep the order in which their token was first observed;
///   sampling depends on it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct State {
	/// Context this state is reached through.
	key: Context,
	/// Outgoing transitions in first-seen order.
	/// Example: [("world", 42), (".", 3)]
	transitions: Vec<(Token, usize)>,
}

impl State {
	/// Creates a new empty state for the given context.
	pub fn new(key: &[Token]) -> Self {
		Self {
			key: key.to_vec(),
			transitions: Vec::new(),
		}
	}

	/// Records an occurrence of a transition toward `next`.
	///
	/// - If the transition already exists, its count is increased in place.
	/// - Otherwise, it is appended with an initial count of 1.
	pub fn add_transition(&mut self, next: &str) {
		match self.transitions.iter_mut().find(|(token, _)| token == next) {
			Some((_, count)) => *count += 1,
			None => self.transitions.push((next.to_owned(), 1)),
		}
	}

	/// Samples the next token, weighted by occurrence count.
	///
	/// Returns `None` if the state has no transitions.
	pub fn predict<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
		sampler::choose_next(&self.transitions, rng)
	}

	/// Context of this state.
	pub fn key(&self) -> &[Token] {
		&self.key
	}

	/// Observed transitions in first-seen order.
	pub fn transitions(&self) -> &[(Token, usize)] {
		&self.transitions
	}

	/// Count recorded for `next`, or 0 if never observed.
	pub fn count(&self, next: &str) -> usize {
		self.transitions
			.iter()
			.find(|(token, _)| token == next)
			.map_or(0, |(_, count)| *count)
	}

	/// Sum of all transition counts.
	pub fn total(&self) -> usize {
		self.transitions.iter().map(|(_, count)| count).sum()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn repeated_transitions_accumulate_in_first_seen_order() {
		let mut state = State::new(&["the".to_owned()]);
		state.add_transition("cat");
		state.add_transition("dog");
		state.add_transition("cat");

		assert_eq!(
			state.transitions(),
			&[("cat".to_owned(), 2), ("dog".to_owned(), 1)]
		);
		assert_eq!(state.count("cat"), 2);
		assert_eq!(state.count("bird"), 0);
		assert_eq!(state.total(), 3);
		assert_eq!(state.key(), &["the".to_owned()]);
	}
}
