//! Context-sensitive disambiguation for cues that are ambiguous on their
//! own: "approach", "user", "should", "love/hate". Rules fire in order and
//! only the first matching rule applies, since they boost mutually
//! exclusive types for the same cue.

use std::collections::HashMap;

use memorai_core::memory::MemoryType;

use crate::Score;

const PROCEDURAL_CUES: &[&str] = &["step", "process", "first", "then", "setup", "install"];
const PERSONALITY_CUES: &[&str] = &["trait", "personality", "tends to", "always", "character"];

/// `lower_content` is already lowercased by the caller.
pub(crate) fn apply(lower_content: &str, scores: &mut HashMap<MemoryType, Score>) {
    if lower_content.contains("best approach") || lower_content.contains("better approach") {
        boost(scores, MemoryType::Preference, 0.8, "best/better approach");
    } else if lower_content.contains("approach") && PROCEDURAL_CUES.iter().any(|c| lower_content.contains(c)) {
        boost(scores, MemoryType::Procedure, 0.8, "approach near procedural cues");
    } else if lower_content.contains("user") {
        if PERSONALITY_CUES.iter().any(|c| lower_content.contains(c)) {
            boost(scores, MemoryType::Personality, 0.8, "user with personality cues");
        } else {
            boost(scores, MemoryType::Thread, 0.4, "user without personality cues");
        }
    } else if lower_content.contains("should") {
        if lower_content.contains("use") || lower_content.contains("choose") || lower_content.contains("instead of") {
            boost(scores, MemoryType::Preference, 0.7, "should use/choose/instead of");
        } else {
            boost(scores, MemoryType::Task, 0.7, "should (task framing)");
        }
    } else if lower_content.contains("love this")
        || lower_content.contains("love that")
        || lower_content.contains("hate this")
        || lower_content.contains("hate that")
    {
        boost(scores, MemoryType::Emotion, 0.9, "love/hate this/that");
    }
}

fn boost(scores: &mut HashMap<MemoryType, Score>, memory_type: MemoryType, amount: f64, note: &'static str) {
    if let Some(score) = scores.get_mut(&memory_type) {
        score.add(amount, note);
    }
}
