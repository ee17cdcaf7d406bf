pub mod chunk;
pub mod classifier;

use crate::config::{Aggregation, ScannerConfig};
use crate::verdict::round2;
use classifier::ClassifierModel;
use serde::Serialize;

/// Fixed keyword list for the heuristic scorer; each case-insensitive
/// substring hit contributes 0.12 to the chunk score.
const PHISHING_KEYWORDS: [&str; 10] = [
    "urgent",
    "verify",
    "login",
    "reset",
    "suspended",
    "click below",
    "confirm",
    "invoice",
    "password",
    "account",
];

const HIGH_PRESSURE_THRESHOLD: f64 = 0.65;
const SOME_WORDING_THRESHOLD: f64 = 0.35;

/// Which backend produced a text score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringMode {
    Heuristic,
    Classifier,
}

#[derive(Debug, Clone, Serialize)]
pub struct TextAnalysis {
    pub score: f64,
    pub reasons: Vec<String>,
    pub chunk_count: usize,
    pub aggregation: Aggregation,
    pub mode: ScoringMode,
}

/// The backend is selected exactly once at construction. When the classifier
/// was requested but fails to initialize, the analyzer is pinned to the
/// heuristic scorer for the process lifetime; there is no per-call retry.
#[derive(Debug)]
enum Backend {
    Heuristic,
    Classifier(ClassifierModel),
}

/// Chunks merged subject+body text and scores each chunk through the selected
/// backend, then aggregates per the configured mode.
#[derive(Debug)]
pub struct TextAnalyzer {
    backend: Backend,
    aggregation: Aggregation,
}

impl TextAnalyzer {
    pub fn new(config: &ScannerConfig) -> Self {
        let backend = if config.enable_classifier {
            match ClassifierModel::load(&config.model_path) {
                Ok(model) => {
                    log::info!("text classifier ready: {}", config.model_path);
                    Backend::Classifier(model)
                }
                Err(e) => {
                    log::warn!(
                        "text classifier unavailable, using heuristic scorer: {:#}",
                        e
                    );
                    Backend::Heuristic
                }
            }
        } else {
            Backend::Heuristic
        };

        Self {
            backend,
            aggregation: config.aggregation,
        }
    }

    pub fn mode(&self) -> ScoringMode {
        match self.backend {
            Backend::Heuristic => ScoringMode::Heuristic,
            Backend::Classifier(_) => ScoringMode::Classifier,
        }
    }

    /// Score cleaned subject and body text. Inputs are expected to be
    /// whitespace-normalized and length-capped already.
    pub fn score(&self, subject: &str, body: &str) -> TextAnalysis {
        let merged = format!("{}\n{}", subject, body).trim().to_string();
        if merged.is_empty() {
            return TextAnalysis {
                score: 0.0,
                reasons: vec!["No text content found".to_string()],
                chunk_count: 0,
                aggregation: self.aggregation,
                mode: self.mode(),
            };
        }

        let (chunks, chunk_scores) = match &self.backend {
            Backend::Heuristic => {
                let chunks = chunk::chunk_by_chars(
                    &merged,
                    chunk::CHUNK_WINDOW_CHARS,
                    chunk::CHUNK_STRIDE_CHARS,
                );
                let scores: Vec<f64> = chunks.iter().map(|c| heuristic_chunk_score(c)).collect();
                (chunks, scores)
            }
            Backend::Classifier(model) => {
                let chunks = model.chunk_text(&merged);
                let scores: Vec<f64> = chunks.iter().map(|c| model.score_chunk(c)).collect();
                (chunks, scores)
            }
        };

        let aggregate = aggregate_scores(&chunk_scores, self.aggregation);

        let mut reasons = Vec::new();
        if aggregate >= HIGH_PRESSURE_THRESHOLD {
            reasons.push("Email text uses high-pressure or credential-themed language".to_string());
        } else if aggregate >= SOME_WORDING_THRESHOLD {
            reasons.push("Email text includes some phishing-like wording".to_string());
        }
        if matches!(self.backend, Backend::Classifier(_)) {
            reasons.push("Trained text classifier evaluated this content".to_string());
        }

        TextAnalysis {
            score: round2(aggregate.clamp(0.0, 1.0) * 100.0),
            reasons,
            chunk_count: chunks.len(),
            aggregation: self.aggregation,
            mode: self.mode(),
        }
    }
}

fn aggregate_scores(scores: &[f64], aggregation: Aggregation) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    match aggregation {
        Aggregation::Max => scores.iter().cloned().fold(0.0, f64::max),
        Aggregation::Mean => scores.iter().sum::<f64>() / scores.len() as f64,
    }
}

/// Keyword hits, uppercase density, and exclamation pressure combined into a
/// 0–1 chunk score.
fn heuristic_chunk_score(chunk: &str) -> f64 {
    let lower = chunk.to_lowercase();
    let hits = PHISHING_KEYWORDS
        .iter()
        .filter(|keyword| lower.contains(**keyword))
        .count() as f64;

    let char_count = chunk.chars().count().max(1) as f64;
    let caps_ratio = chunk.chars().filter(|c| c.is_uppercase()).count() as f64 / char_count;
    let exclamations = chunk.chars().filter(|&c| c == '!').count() as f64;

    (hits * 0.12 + caps_ratio * 1.5 + (exclamations * 0.01).min(0.2)).min(1.0)
}
