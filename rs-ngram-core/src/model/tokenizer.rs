/// A word (lowercase letters, digits and apostrophes) or a single terminator.
pub type Token = String;

/// An ordered run of tokens closed by exactly one terminator.
pub type Sentence = Vec<Token>;

/// Characters that close a sentence.
pub const TERMINATORS: [char; 3] = ['.', '!', '?'];

/// Returns `true` if `c` closes a sentence.
pub fn is_terminator_char(c: char) -> bool {
	TERMINATORS.contains(&c)
}

/// Returns `true` if `token` is one of the terminator tokens.
pub fn is_terminator(token: &str) -> bool {
	let mut chars = token.chars();
	matches!((chars.next(), chars.next()), (Some(c), None) if is_terminator_char(c))
}

/// Characters that build up a word.
fn is_word_char(c: char) -> bool {
	c.is_alphanumeric() || c == '\''
}

/// Splits raw text into a flat stream of tokens.
///
/// - Text is lowercased first
/// - Runs of alphanumeric characters and apostrophes become words
/// - `.`, `!` and `?` become one token each
/// - Every other character only separates words and is dropped
pub fn tokenize(text: &str) -> Vec<Token> {
	let mut tokens = Vec::new();
	let mut current = String::new();

	for c in text.to_lowercase().chars() {
		if is_word_char(c) {
			current.push(c);
			continue;
		}

		if !current.is_empty() {
			tokens.push(std::mem::take(&mut current));
		}
		if is_terminator_char(c) {
			tokens.push(c.to_string());
		}
	}

	// Trailing word, not a terminator
	if !current.is_empty() {
		tokens.push(current);
	}

	tokens
}

/// Groups a token stream into sentences.
///
/// A sentence is closed by each terminator token. Tokens left after the
/// last terminator never form a sentence and are discarded.
pub fn split_sentences<I>(tokens: I) -> Vec<Sentence>
where
	I: IntoIterator<Item = Token>,
{
	let mut sentences = Vec::new();
	let mut current = Vec::new();

	for token in tokens {
		let closes = is_terminator(&token);
		current.push(token);
		if closes {
			sentences.push(std::mem::take(&mut current));
		}
	}

	if !current.is_empty() {
		log::trace!("Discarding {} unterminated trailing token(s)", current.len());
	}

	sentences
}

/// Tokenizes `text` and returns its terminated sentences.
pub fn sentences(text: &str) -> Vec<Sentence> {
	split_sentences(tokenize(text))
}

#[cfg(test)]
mod tests {
	use super::*;

	fn owned(tokens: &[&str]) -> Vec<String> {
		tokens.iter().map(|t| (*t).to_owned()).collect()
	}

	#[test]
	fn single_sentence_is_lowercased() {
		assert_eq!(sentences("Hello world."), vec![owned(&["hello", "world", "."])]);
	}

	#[test]
	fn each_terminator_closes_a_sentence() {
		assert_eq!(
			sentences("Hi! Bye?"),
			vec![owned(&["hi", "!"]), owned(&["bye", "?"])]
		);
	}

	#[test]
	fn unterminated_text_yields_nothing() {
		assert!(sentences("Hello world").is_empty());
		assert!(sentences("").is_empty());
	}

	#[test]
	fn trailing_fragment_is_dropped() {
		assert_eq!(sentences("One. two three"), vec![owned(&["one", "."])]);
	}

	#[test]
	fn apostrophes_and_digits_stay_in_words() {
		assert_eq!(
			tokenize("It's 42, isn't it"),
			owned(&["it's", "42", "isn't", "it"])
		);
	}

	#[test]
	fn separators_are_discarded() {
		assert_eq!(tokenize("a,b;\tc\n-d"), owned(&["a", "b", "c", "d"]));
	}

	#[test]
	fn consecutive_terminators_are_separate_tokens() {
		assert_eq!(tokenize("wait...!"), owned(&["wait", ".", ".", ".", "!"]));
		assert_eq!(
			sentences("wait..."),
			vec![owned(&["wait", "."]), owned(&["."]), owned(&["."])]
		);
	}

	#[test]
	fn terminator_predicate() {
		assert!(is_terminator("."));
		assert!(is_terminator("?"));
		assert!(!is_terminator(".."));
		assert!(!is_terminator("a"));
		assert!(!is_terminator(""));
	}
}
