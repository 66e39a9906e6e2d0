//! Rule-based text classifier: maps free text to `(MemoryType, confidence,
//! reasoning)`. Pure and stateless — no I/O, no shared state — mirroring the
//! teacher's `intent::classify` (`cortex-retrieval/src/intent/classifier.rs`):
//! keyword scoring over ordered groups, then heuristic boosts, then a
//! best-score pick with an explicit tie-break default.

mod disambiguation;
mod heuristics;
mod rules;

use memorai_core::memory::MemoryType;

/// Result of classifying one piece of text.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub memory_type: MemoryType,
    pub confidence: f64,
    pub reasoning: String,
}

/// Per-type accumulated score plus the reasoning fragments that contributed
/// to it, carried through scoring, heuristics and disambiguation so the
/// final reasoning string reflects every rule that actually fired.
#[derive(Debug, Clone, Default)]
struct Score {
    value: f64,
    notes: Vec<&'static str>,
}

impl Score {
    fn add(&mut self, amount: f64, note: &'static str) {
        if amount != 0.0 {
            self.value += amount;
            self.notes.push(note);
        }
    }
}

fn tokenize(content: &str) -> Vec<String> {
    content
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string())
        .collect()
}

/// Classify a single piece of text per the documented rule-based algorithm.
pub fn classify(content: &str) -> Classification {
    let lower = content.to_lowercase();
    let tokens = tokenize(content);
    let len = content.chars().count();

    let mut scores: std::collections::HashMap<MemoryType, Score> =
        MemoryType::ALL.iter().map(|t| (*t, Score::default())).collect();

    for group in rules::groups() {
        let score = scores.get_mut(&group.memory_type).expect("all types have a rule group");
        rules::score_group(group, &lower, &tokens, score);
    }

    heuristics::apply_length_boost(len, &mut scores);
    heuristics::apply_structure_boost(content, &mut scores);
    disambiguation::apply(&lower, &mut scores);

    let (best_type, best_score, gap) = select_best(&scores);
    let confidence = compute_confidence(best_score, gap, tokens.len(), len);
    let reasoning = build_reasoning(best_type, &scores, best_score);

    Classification {
        memory_type: best_type,
        confidence,
        reasoning,
    }
}

/// `classify_batch` is `map(classify, texts)`.
pub fn classify_batch(texts: &[String]) -> Vec<Classification> {
    texts.iter().map(|t| classify(t)).collect()
}

/// Highest-scoring type, its score, and the gap to the runner-up. Ties break
/// to `Thread`, the conversational default.
fn select_best(
    scores: &std::collections::HashMap<MemoryType, Score>,
) -> (MemoryType, f64, f64) {
    let mut ranked: Vec<(MemoryType, f64)> =
        scores.iter().map(|(t, s)| (*t, s.value)).collect();
    ranked.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| {
                if a.0 == MemoryType::Thread {
                    std::cmp::Ordering::Less
                } else if b.0 == MemoryType::Thread {
                    std::cmp::Ordering::Greater
                } else {
                    std::cmp::Ordering::Equal
                }
            })
    });

    let best = ranked.first().copied().unwrap_or((MemoryType::Thread, 0.0));
    let second = ranked.get(1).map(|(_, s)| *s).unwrap_or(0.0);
    let gap = (best.1 - second).max(0.0);
    (best.0, best.1, gap)
}

/// `0.4 + up to 0.4 * best/estimated_max + up to 0.2 * gap-bonus`, clamped.
/// `estimated_max_score` grows with token count and content length so short,
/// sparse text cannot trivially saturate the scaled term.
fn compute_confidence(best_score: f64, gap: f64, token_count: usize, len: usize) -> f64 {
    let estimated_max = (token_count as f64).sqrt() * 2.0 + (len as f64) / 50.0;
    let estimated_max = estimated_max.max(1.0);

    let scaled = 0.4 * (best_score / estimated_max).min(1.0);
    let gap_bonus = 0.2 * (gap / best_score.max(f64::EPSILON)).min(1.0);

    (0.4 + scaled + gap_bonus).clamp(0.0, 1.0)
}

fn build_reasoning(
    best_type: MemoryType,
    scores: &std::collections::HashMap<MemoryType, Score>,
    best_score: f64,
) -> String {
    let notes = scores
        .get(&best_type)
        .map(|s| s.notes.join(", "))
        .unwrap_or_default();

    if notes.is_empty() {
        format!("classified as {best_type} by default (score {best_score:.2}, no rule fired)")
    } else {
        format!("classified as {best_type} (score {best_score:.2}): {notes}")
    }
}
