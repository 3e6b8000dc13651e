//! # Text Preprocessing
//!
//! File: cli/src/engine/preprocess.rs
//!
//! ## Overview
//!
//! Normalises free text before it reaches the vectorizer: lowercase, split into
//! word tokens, join with single spaces. The same function is applied to the
//! training questions and to every incoming question, so both sides of the
//! model see identical token streams.
//!
//! Tokenization rules:
//! - a run of word characters is a token (`hello`, `42`, `naïve`)
//! - a negative contraction splits before the `n't` (`don't` becomes `do n't`,
//!   `can't` becomes `ca n't`)
//! - an apostrophe followed by word characters is a token (`'s`, `'re`), so
//!   `what's` becomes `what 's`
//! - any other non-space character is a token on its own (`?`, `!`, `,`)
//!
//! Every token produced is re-tokenized to itself, which makes
//! `preprocess` idempotent.
//!
use regex::Regex;
use std::sync::LazyLock;

// Alternatives are tried in order: `stem + n't`, a bare `n't`, other clitics,
// word runs, then single punctuation characters.
static WORD_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<stem>\w+?)(?P<neg>n['’]t)\b|n['’]t\b|['’]\w+|\w+|[^\w\s]")
        .expect("word tokenizer pattern is valid")
});

/// Splits lowercased `text` into word and punctuation tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let mut tokens = Vec::new();
    for caps in WORD_TOKEN.captures_iter(&lowered) {
        match (caps.name("stem"), caps.name("neg")) {
            // `don't` is two tokens.
            (Some(stem), Some(neg)) => {
                tokens.push(stem.as_str().to_string());
                tokens.push(neg.as_str().to_string());
            }
            _ => tokens.push(caps[0].to_string()),
        }
    }
    tokens
}

/// # Preprocess (`preprocess`)
///
/// Lowercases and tokenizes `text`, returning the tokens joined by single
/// spaces. Never fails; empty or whitespace-only input yields `""`.
pub fn preprocess(text: &str) -> String {
    tokenize(text).join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_splits_punctuation() {
        assert_eq!(preprocess("Hello, World!"), "hello , world !");
        assert_eq!(preprocess("What's UP?"), "what 's up ?");
    }

    #[test]
    fn test_negative_contractions_split_before_nt() {
        assert_eq!(preprocess("I don't know"), "i do n't know");
        assert_eq!(preprocess("Can't stop, WON'T stop"), "ca n't stop , wo n't stop");
        assert_eq!(preprocess("isn’t it"), "is n’t it");
        assert_eq!(tokenize("do n't"), ["do", "n't"]);
        // Not a contraction: `n't` must end the word.
        assert_eq!(preprocess("don'ts"), "don 'ts");
    }

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(preprocess("  Hello \t\n there  "), "hello there");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(preprocess(""), "");
        assert_eq!(preprocess("   \n "), "");
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_unicode_words() {
        assert_eq!(preprocess("Ça VA, naïve?"), "ça va , naïve ?");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "Hello",
            "What's the WEATHER like today?!",
            "rock'n'roll -- it's ''quoted'' ... ok",
            "  mixed\tCASE and 123 numbers, e.g. 4.5% ",
            "don’t stop",
            "I can't and WON'T, isn't it?",
            "n't",
            "",
        ];
        for sample in samples {
            let once = preprocess(sample);
            assert_eq!(preprocess(&once), once, "not idempotent for {:?}", sample);
        }
    }
}
