//! The seven ordered rule groups, one per [`MemoryType`]. Each group carries
//! weighted keyword lists and weighted regex patterns; matches accumulate
//! into `pow(keyword_match_count, 1.5) * 0.5 + pattern_match_count * 0.7`,
//! scaled by the group weight. Mirrors the shape of the teacher's
//! `INTENT_KEYWORDS` table (`cortex-retrieval/src/intent/classifier.rs`),
//! extended with weights and regex patterns per the documented formula;
//! patterns are precompiled `LazyLock<Regex>` statics, grounded on
//! `cortex-privacy/src/patterns/pii.rs`'s `pii_pattern!` macro.

use std::sync::LazyLock;

use memorai_core::memory::MemoryType;
use regex::Regex;

use crate::Score;

pub(crate) struct Keyword {
    pub word: &'static str,
    pub weight: f64,
}

pub(crate) struct Pattern {
    pub regex: &'static LazyLock<Regex>,
    pub weight: f64,
}

pub(crate) struct RuleGroup {
    pub memory_type: MemoryType,
    pub weight: f64,
    pub keywords: &'static [Keyword],
    pub patterns: &'static [Pattern],
}

macro_rules! kw {
    ($($word:expr => $weight:expr),+ $(,)?) => {
        &[$(Keyword { word: $word, weight: $weight }),+]
    };
}

macro_rules! pattern_re {
    ($name:ident, $regex_str:expr) => {
        static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($regex_str).expect("valid rule pattern"));
    };
}

const PERSONALITY_KEYWORDS: &[Keyword] = kw![
    "personality" => 1.0, "trait" => 0.8, "tends to" => 0.9, "is known for" => 0.8,
    "always" => 0.5, "never" => 0.5, "character" => 0.6, "demeanor" => 0.7,
];
pattern_re!(RE_PERSONALITY_PRONOUN, r"\b(he|she|they)\s+is\s+\w+");
pattern_re!(RE_PERSONALITY_KNOWN_FOR, r"\bknown\s+for\s+being\b");
const PERSONALITY_PATTERNS: &[Pattern] = &[
    Pattern { regex: &RE_PERSONALITY_PRONOUN, weight: 0.7 },
    Pattern { regex: &RE_PERSONALITY_KNOWN_FOR, weight: 0.8 },
];

const PROCEDURE_KEYWORDS: &[Keyword] = kw![
    "step" => 0.9, "procedure" => 1.0, "process" => 0.7, "instructions" => 0.8,
    "how to" => 0.8, "first" => 0.4, "then" => 0.4, "finally" => 0.5, "setup" => 0.6,
];
pattern_re!(RE_PROCEDURE_NUMBERED, r"(?m)^\s*\d+[.)]\s");
pattern_re!(RE_PROCEDURE_BULLET, r"(?m)^\s*[-*]\s");
pattern_re!(RE_PROCEDURE_CODE_FENCE, r"```");
const PROCEDURE_PATTERNS: &[Pattern] = &[
    Pattern { regex: &RE_PROCEDURE_NUMBERED, weight: 0.9 },
    Pattern { regex: &RE_PROCEDURE_BULLET, weight: 0.5 },
    Pattern { regex: &RE_PROCEDURE_CODE_FENCE, weight: 0.8 },
];

const PREFERENCE_KEYWORDS: &[Keyword] = kw![
    "prefer" => 1.0, "prefers" => 1.0, "favorite" => 0.9, "likes" => 0.7,
    "dislikes" => 0.7, "rather" => 0.6, "instead of" => 0.6, "over" => 0.4,
];
pattern_re!(RE_PREFERENCE_OVER, r"\bprefers?\s+\w+\s+over\s+\w+");
const PREFERENCE_PATTERNS: &[Pattern] = &[Pattern { regex: &RE_PREFERENCE_OVER, weight: 0.9 }];

const FACT_KEYWORDS: &[Keyword] = kw![
    "is a" => 0.5, "is the" => 0.5, "fact" => 0.9, "equals" => 0.7,
    "located" => 0.6, "was born" => 0.8, "consists of" => 0.6,
];
pattern_re!(RE_FACT_URL, r"https?://\S+");
pattern_re!(RE_FACT_PATH, r"(?:/[\w.-]+){2,}");
pattern_re!(RE_FACT_DATE, r"\b\d{4}-\d{2}-\d{2}\b");
const FACT_PATTERNS: &[Pattern] = &[
    Pattern { regex: &RE_FACT_URL, weight: 0.7 },
    Pattern { regex: &RE_FACT_PATH, weight: 0.6 },
    Pattern { regex: &RE_FACT_DATE, weight: 0.5 },
];

const THREAD_KEYWORDS: &[Keyword] = kw![
    "by the way" => 0.6, "also" => 0.3, "anyway" => 0.5, "so" => 0.2,
];
pattern_re!(RE_THREAD_QUESTION, r"\?");
const THREAD_PATTERNS: &[Pattern] = &[Pattern { regex: &RE_THREAD_QUESTION, weight: 0.5 }];

const TASK_KEYWORDS: &[Keyword] = kw![
    "todo" => 1.0, "task" => 0.9, "need to" => 0.8, "must" => 0.7,
    "remind" => 0.8, "deadline" => 0.8, "due" => 0.6, "schedule" => 0.6,
];
pattern_re!(
    RE_TASK_DEADLINE,
    r"\bby\s+(monday|tuesday|wednesday|thursday|friday|tomorrow|tonight)\b"
);
const TASK_PATTERNS: &[Pattern] = &[Pattern { regex: &RE_TASK_DEADLINE, weight: 0.7 }];

const EMOTION_KEYWORDS: &[Keyword] = kw![
    "love" => 0.9, "hate" => 0.9, "happy" => 0.7, "sad" => 0.7, "angry" => 0.7,
    "excited" => 0.6, "afraid" => 0.6, "feel" => 0.5, "feels" => 0.5,
];
pattern_re!(RE_EMOTION_EXCLAMATION, r"!+");
const EMOTION_PATTERNS: &[Pattern] = &[Pattern { regex: &RE_EMOTION_EXCLAMATION, weight: 0.3 }];

static GROUPS: LazyLock<[RuleGroup; 7]> = LazyLock::new(|| {
    [
        RuleGroup {
            memory_type: MemoryType::Personality,
            weight: 1.0,
            keywords: PERSONALITY_KEYWORDS,
            patterns: PERSONALITY_PATTERNS,
        },
        RuleGroup {
            memory_type: MemoryType::Procedure,
            weight: 1.0,
            keywords: PROCEDURE_KEYWORDS,
            patterns: PROCEDURE_PATTERNS,
        },
        RuleGroup {
            memory_type: MemoryType::Preference,
            weight: 1.0,
            keywords: PREFERENCE_KEYWORDS,
            patterns: PREFERENCE_PATTERNS,
        },
        RuleGroup {
            memory_type: MemoryType::Fact,
            weight: 1.0,
            keywords: FACT_KEYWORDS,
            patterns: FACT_PATTERNS,
        },
        RuleGroup {
            memory_type: MemoryType::Thread,
            weight: 0.8,
            keywords: THREAD_KEYWORDS,
            patterns: THREAD_PATTERNS,
        },
        RuleGroup {
            memory_type: MemoryType::Task,
            weight: 1.0,
            keywords: TASK_KEYWORDS,
            patterns: TASK_PATTERNS,
        },
        RuleGroup {
            memory_type: MemoryType::Emotion,
            weight: 1.0,
            keywords: EMOTION_KEYWORDS,
            patterns: EMOTION_PATTERNS,
        },
    ]
});

pub(crate) fn groups() -> &'static [RuleGroup; 7] {
    &GROUPS
}

/// Accumulate this group's contribution into `score`: weighted keyword hits
/// and weighted regex matches combine as
/// `pow(keyword_sum, 1.5) * 0.5 + pattern_sum * 0.7`, scaled by group weight.
pub(crate) fn score_group(group: &RuleGroup, lower_content: &str, tokens: &[String], score: &mut Score) {
    let keyword_sum: f64 = group
        .keywords
        .iter()
        .filter(|k| {
            if k.word.contains(' ') {
                lower_content.contains(k.word)
            } else {
                tokens.iter().any(|t| t == k.word)
            }
        })
        .map(|k| k.weight)
        .sum();

    let pattern_sum: f64 = group
        .patterns
        .iter()
        .filter(|p| p.regex.is_match(lower_content))
        .map(|p| p.weight)
        .sum();

    if keyword_sum == 0.0 && pattern_sum == 0.0 {
        return;
    }

    let raw = keyword_sum.powf(1.5) * 0.5 + pattern_sum * 0.7;
    score.add(raw * group.weight, "keyword/pattern rules");
}
