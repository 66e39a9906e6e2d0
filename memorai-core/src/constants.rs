/// Memorai engine version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Minimum content/query length after trimming whitespace.
pub const MIN_CONTENT_LEN: usize = 1;

/// Keyword index: tokens shorter than this are discarded as noise (§4.6
/// "discarding tokens ≤2 characters").
pub const MIN_TOKEN_LEN: usize = 3;

/// Stop words excluded from the keyword index, per §4.6.
pub const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "are", "but", "not", "you", "all", "can", "her",
    "was", "one", "our", "out", "day", "get", "has", "him", "his", "how",
    "man", "new", "now", "old", "see", "two", "way", "who", "boy", "did",
    "its", "let", "put", "say", "she", "too", "use", "that", "this", "with",
    "from", "have", "they", "will", "what", "when", "where", "which", "their",
];
