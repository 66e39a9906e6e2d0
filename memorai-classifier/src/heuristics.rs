//! Secondary heuristics applied on top of the base rule-group scores:
//! content length and surface structure (lists, code fences, URLs).

use std::collections::HashMap;
use std::sync::LazyLock;

use memorai_core::memory::MemoryType;
use regex::Regex;

use crate::Score;

/// Length boosts: long content favors `procedure`/`fact`, short content
/// favors `thread`, medium content favors `preference`.
pub(crate) fn apply_length_boost(len: usize, scores: &mut HashMap<MemoryType, Score>) {
    if len > 200 {
        boost(scores, MemoryType::Procedure, 0.6, "long content");
        boost(scores, MemoryType::Fact, 0.6, "long content");
    } else if len < 50 {
        boost(scores, MemoryType::Thread, 0.6, "short content");
    } else {
        boost(scores, MemoryType::Preference, 0.4, "medium-length content");
    }
}

static RE_NUMBERED_LIST: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^\s*\d+[.)]\s").unwrap());
static RE_BULLET_LIST: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^\s*[-*]\s").unwrap());
static RE_CODE_FENCE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"```").unwrap());
static RE_URL_OR_PATH: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"https?://\S+|(?:/[\w.-]+){2,}").unwrap());

/// Structural boosts: lists and code fences favor `procedure`/`fact`,
/// question marks favor `thread`, URLs and paths favor `fact`/`procedure`.
pub(crate) fn apply_structure_boost(content: &str, scores: &mut HashMap<MemoryType, Score>) {
    if RE_NUMBERED_LIST.is_match(content) || RE_BULLET_LIST.is_match(content) || RE_CODE_FENCE.is_match(content) {
        boost(scores, MemoryType::Procedure, 0.8, "list/code structure");
        boost(scores, MemoryType::Fact, 0.4, "list/code structure");
    }
    if content.contains('?') {
        boost(scores, MemoryType::Thread, 0.5, "question mark");
    }
    if RE_URL_OR_PATH.is_match(content) {
        boost(scores, MemoryType::Fact, 0.5, "url or path");
        boost(scores, MemoryType::Procedure, 0.3, "url or path");
    }
}

fn boost(scores: &mut HashMap<MemoryType, Score>, memory_type: MemoryType, amount: f64, note: &'static str) {
    if let Some(score) = scores.get_mut(&memory_type) {
        score.add(amount, note);
    }
}
