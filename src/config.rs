use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Rule for collapsing per-chunk text scores into one score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    #[default]
    Mean,
    Max,
}

/// Process-wide scanner configuration, fixed before requests are accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// Character cap applied to the body by the text normalizer.
    pub max_text_chars: usize,
    /// Character cap applied to the subject by the text normalizer.
    pub max_subject_chars: usize,
    /// Opt in to the trained text classifier backend.
    pub enable_classifier: bool,
    /// Path to the classifier artifact; ignored unless the classifier is enabled.
    pub model_path: String,
    pub aggregation: Aggregation,
    /// Comma/whitespace-separated known-malicious domains.
    pub domain_reputation_feed: Option<String>,
    /// Comma/whitespace-separated known-malicious IP literals.
    pub ip_reputation_feed: Option<String>,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            max_text_chars: 20000,
            max_subject_chars: 300,
            enable_classifier: false,
            model_path: String::new(),
            aggregation: Aggregation::Mean,
            domain_reputation_feed: None,
            ip_reputation_feed: None,
        }
    }
}

impl ScannerConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config: ScannerConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        Ok(config)
    }

    /// Build a config from `PHISH_*` environment variables, falling back to
    /// defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(value) = std::env::var("PHISH_MAX_TEXT_CHARS") {
            if let Ok(parsed) = value.parse() {
                config.max_text_chars = parsed;
            }
        }
        if let Ok(value) = std::env::var("PHISH_ENABLE_CLASSIFIER") {
            config.enable_classifier = value.eq_ignore_ascii_case("true");
        }
        if let Ok(value) = std::env::var("PHISH_MODEL_PATH") {
            config.model_path = value;
        }
        if let Ok(value) = std::env::var("PHISH_TEXT_AGGREGATION") {
            if value.eq_ignore_ascii_case("max") {
                config.aggregation = Aggregation::Max;
            }
        }
        if let Ok(value) = std::env::var("PHISH_DOMAIN_REPUTATION_FEED") {
            config.domain_reputation_feed = Some(value);
        }
        if let Ok(value) = std::env::var("PHISH_IP_REPUTATION_FEED") {
            config.ip_reputation_feed = Some(value);
        }

        config
    }
}
