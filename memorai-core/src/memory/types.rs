use serde::{Deserialize, Serialize};

/// The seven memory types the classifier and temporal engine reason about,
/// per spec §3. Trimmed from the teacher's 23-variant `MemoryType` down to the
/// set this engine actually needs — the teacher's code-specific and
/// universal-v2 variants (patterns, constraints, incidents, meetings, …) have
/// no counterpart in this spec and are not carried forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoryType {
    Personality,
    Procedure,
    Preference,
    Fact,
    Thread,
    Task,
    Emotion,
}

impl MemoryType {
    pub const ALL: [MemoryType; 7] = [
        Self::Personality,
        Self::Procedure,
        Self::Preference,
        Self::Fact,
        Self::Thread,
        Self::Task,
        Self::Emotion,
    ];

    pub const COUNT: usize = 7;

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Personality => "personality",
            Self::Procedure => "procedure",
            Self::Preference => "preference",
            Self::Fact => "fact",
            Self::Thread => "thread",
            Self::Task => "task",
            Self::Emotion => "emotion",
        }
    }
}

impl std::fmt::Display for MemoryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for MemoryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "personality" => Ok(Self::Personality),
            "procedure" => Ok(Self::Procedure),
            "preference" => Ok(Self::Preference),
            "fact" => Ok(Self::Fact),
            "thread" => Ok(Self::Thread),
            "task" => Ok(Self::Task),
            "emotion" => Ok(Self::Emotion),
            other => Err(format!("unknown memory type: {other}")),
        }
    }
}
