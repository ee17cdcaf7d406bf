use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

fn default_max_tokens() -> usize {
    256
}

fn default_stride() -> usize {
    64
}

/// Trained linear text classifier used as the heavyweight scoring backend.
///
/// The artifact is a YAML document carrying a token-weight vocabulary, a
/// bias, and the token-window geometry used for overflow-aware chunking.
/// Loaded exactly once at startup; inference is a pure read-only computation
/// and safe to share across worker threads.
#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierModel {
    #[serde(default)]
    bias: f64,
    #[serde(default = "default_max_tokens")]
    max_tokens: usize,
    #[serde(default = "default_stride")]
    stride: usize,
    weights: HashMap<String, f64>,
}

impl ClassifierModel {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        if path.is_empty() {
            bail!("no model artifact path configured");
        }

        let content = std::fs::read_to_string(Path::new(path))
            .with_context(|| format!("reading model artifact {}", path))?;
        let model: ClassifierModel = serde_yaml::from_str(&content)
            .with_context(|| format!("parsing model artifact {}", path))?;

        if model.weights.is_empty() {
            bail!("model artifact {} has an empty vocabulary", path);
        }
        if model.max_tokens == 0 || model.stride >= model.max_tokens {
            bail!(
                "model artifact {} has an invalid token window ({} tokens, stride {})",
                path,
                model.max_tokens,
                model.stride
            );
        }

        log::debug!(
            "loaded classifier artifact {} ({} vocabulary entries)",
            path,
            model.weights.len()
        );
        Ok(model)
    }

    /// Probability in [0, 1] that a single chunk is phishing text.
    pub fn score_chunk(&self, chunk: &str) -> f64 {
        let mut activation = self.bias;
        for token in tokenize(chunk) {
            if let Some(weight) = self.weights.get(&token) {
                activation += weight;
            }
        }
        sigmoid(activation)
    }

    /// Token-window chunking with the same overlap rule as the character
    /// fallback: windows of `max_tokens` tokens, each starting
    /// `max_tokens - stride` tokens after the previous one.
    pub fn chunk_text(&self, text: &str) -> Vec<String> {
        let tokens = tokenize(text);
        if tokens.is_empty() {
            return vec![text.to_string()];
        }

        let advance = self.max_tokens.saturating_sub(self.stride).max(1);
        let mut chunks = Vec::new();
        let mut start = 0;

        while start < tokens.len() {
            let end = (start + self.max_tokens).min(tokens.len());
            chunks.push(tokens[start..end].join(" "));
            start += advance;
        }

        chunks
    }
}

fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(|token| token.to_lowercase())
        .collect()
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}
