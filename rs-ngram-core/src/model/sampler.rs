use rand::Rng;
use rand::seq::IndexedRandom;

use super::tokenizer::Token;

/// Picks one candidate with probability `count / total`.
///
/// Draws `r` uniformly in `[1, total]` and walks the candidates in order,
/// subtracting each count until `r` drops to zero or below. Candidate order
/// therefore decides which token owns which slice of `[1, total]`.
///
/// Returns `None` if `candidates` is empty.
pub fn choose_next<'a, R>(candidates: &'a [(Token, usize)], rng: &mut R) -> Option<&'a str>
where
	R: Rng + ?Sized,
{
	if candidates.is_empty() {
		return None;
	}

	let total: usize = candidates.iter().map(|(_, count)| count).sum();
	if total > 0 {
		let mut r = rng.random_range(1..=total);
		for (token, count) in candidates {
			if r <= *count {
				return Some(token.as_str());
			}
			r -= count;
		}
	}

	// Unreachable while every count is positive
	log::warn!(
		"Weighted walk exhausted {} candidate(s) (total {total}), falling back to uniform choice",
		candidates.len()
	);
	candidates.choose(rng).map(|(token, _)| token.as_str())
}
