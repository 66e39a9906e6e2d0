//! Default-importance heuristic for `remember` when the caller supplies no
//! explicit value, per spec §4.7.

use memorai_core::memory::Importance;

const URGENCY_WORDS: [&str; 3] = ["important", "critical", "urgent"];
const RECALL_WORDS: [&str; 3] = ["remember", "note", "key"];
const SENSITIVE_WORDS: [&str; 3] = ["password", "secret", "private"];

fn tokenize(content: &str) -> Vec<String> {
    content
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string())
        .collect()
}

fn count_present(tokens: &[String], words: &[&str]) -> usize {
    words.iter().filter(|w| tokens.iter().any(|t| t == *w)).count()
}

/// `base 0.5, +0.3 per urgency word, +0.2 per recall cue, +0.3 per sensitivity
/// word, clamped to 1.0`. Each cue group contributes once per distinct
/// keyword it matches, not once per group — "remember" and "key" both
/// landing in `RECALL_WORDS` is two hits, not one.
pub fn default_importance(content: &str) -> Importance {
    let tokens = tokenize(content);
    let mut value = 0.5;
    value += 0.3 * count_present(&tokens, &URGENCY_WORDS) as f64;
    value += 0.2 * count_present(&tokens, &RECALL_WORDS) as f64;
    value += 0.3 * count_present(&tokens, &SENSITIVE_WORDS) as f64;
    Importance::new(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_content_gets_base_importance() {
        assert_eq!(default_importance("the sky is blue today").value(), 0.5);
    }

    #[test]
    fn urgency_cue_adds_weight() {
        assert_eq!(default_importance("this is urgent").value(), 0.8);
    }

    #[test]
    fn sensitive_content_is_clamped_to_one() {
        let v = default_importance("remember the password is critical and private").value();
        assert_eq!(v, 1.0);
    }

    #[test]
    fn substring_matches_do_not_count_as_keyword_hits() {
        assert_eq!(default_importance("a keyword appears here").value(), 0.5);
    }

    #[test]
    fn two_recall_cues_in_one_sentence_both_count() {
        let v = default_importance("Remember: backup key is XYZ").value();
        assert!(v >= 0.8, "expected >= 0.8, got {v}");
    }
}
