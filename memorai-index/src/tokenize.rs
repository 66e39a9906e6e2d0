//! Shared keyword tokenization, per spec §4.6: lowercase, replace
//! non-alphanumerics with spaces, split, discard tokens at or below
//! [`MIN_TOKEN_LEN`](memorai_core::constants::MIN_TOKEN_LEN) characters and
//! any stop word.

use memorai_core::constants::{MIN_TOKEN_LEN, STOP_WORDS};

pub fn terms(text: &str) -> Vec<String> {
    text.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .filter(|t| t.len() >= MIN_TOKEN_LEN && !STOP_WORDS.contains(t))
        .map(|t| t.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discards_short_tokens_and_stop_words() {
        let t = terms("The cat sat on a big mat");
        assert!(!t.contains(&"the".to_string()));
        assert!(!t.contains(&"on".to_string()));
        assert!(t.contains(&"cat".to_string()));
        assert!(t.contains(&"big".to_string()));
    }

    #[test]
    fn replaces_punctuation_with_spaces() {
        let t = terms("rust-lang, systems/programming!");
        assert!(t.contains(&"rust".to_string()));
        assert!(t.contains(&"lang".to_string()));
        assert!(t.contains(&"systems".to_string()));
        assert!(t.contains(&"programming".to_string()));
    }
}
