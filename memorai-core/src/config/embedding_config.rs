use serde::{Deserialize, Serialize};

/// Embedding provider selection, per spec §6 "Embedder configuration".
/// Precedence when multiple are configured: `HostedAlternate` →
/// `HostedPrimary` → `Local`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmbeddingProvider {
    HostedPrimary,
    HostedAlternate,
    Local,
}

impl EmbeddingProvider {
    /// Fixed precedence order for provider selection, per spec §6.
    pub const PRECEDENCE: [EmbeddingProvider; 3] = [
        EmbeddingProvider::HostedAlternate,
        EmbeddingProvider::HostedPrimary,
        EmbeddingProvider::Local,
    ];
}

/// Embedding subsystem configuration, per spec §6.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    pub provider: EmbeddingProvider,
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub endpoint: Option<String>,
    pub deployment_id: Option<String>,
    pub api_version: Option<String>,
    /// Overrides `MemoraiConfig::dimension` for this provider's output, if set.
    pub output_dimension: Option<usize>,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: EmbeddingProvider::Local,
            model: None,
            api_key: None,
            endpoint: None,
            deployment_id: None,
            api_version: None,
            output_dimension: None,
        }
    }
}

impl EmbeddingConfig {
    /// Resolve which provider to actually use given which are configured,
    /// applying the fixed precedence from spec §6. `available` lists the
    /// providers with usable credentials/endpoints.
    pub fn resolve(available: &[EmbeddingProvider]) -> Option<EmbeddingProvider> {
        EmbeddingProvider::PRECEDENCE
            .into_iter()
            .find(|p| available.contains(p))
    }

    pub fn dimension(&self, engine_dimension: usize) -> usize {
        self.output_dimension.unwrap_or(engine_dimension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precedence_prefers_alternate_over_primary_over_local() {
        let available = vec![
            EmbeddingProvider::Local,
            EmbeddingProvider::HostedPrimary,
            EmbeddingProvider::HostedAlternate,
        ];
        assert_eq!(
            EmbeddingConfig::resolve(&available),
            Some(EmbeddingProvider::HostedAlternate)
        );

        let available = vec![EmbeddingProvider::Local, EmbeddingProvider::HostedPrimary];
        assert_eq!(
            EmbeddingConfig::resolve(&available),
            Some(EmbeddingProvider::HostedPrimary)
        );

        let available = vec![EmbeddingProvider::Local];
        assert_eq!(
            EmbeddingConfig::resolve(&available),
            Some(EmbeddingProvider::Local)
        );

        assert_eq!(EmbeddingConfig::resolve(&[]), None);
    }
}
