use crate::analyzers::{AttachmentAnalysis, SenderAnalysis, UrlAnalysis};
use crate::text::TextAnalysis;
use serde::Serialize;
use std::fmt;

pub const WEIGHT_TEXT: f64 = 0.40;
pub const WEIGHT_URL: f64 = 0.25;
pub const WEIGHT_SENDER: f64 = 0.20;
pub const WEIGHT_ATTACHMENT: f64 = 0.15;

const HIGH_THRESHOLD: f64 = 70.0;
const MEDIUM_THRESHOLD: f64 = 40.0;
const MAX_REASONS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "low"),
            RiskLevel::Medium => write!(f, "medium"),
            RiskLevel::High => write!(f, "high"),
        }
    }
}

/// Raw sub-scores carried on the verdict for transparency.
#[derive(Debug, Clone, Serialize)]
pub struct SignalBreakdown {
    pub text: f64,
    pub url: f64,
    pub sender: f64,
    pub attachment: f64,
}

/// The final per-request verdict, immutable and directly serializable.
#[derive(Debug, Clone, Serialize)]
pub struct RiskVerdict {
    pub risk_score: f64,
    pub risk_level: RiskLevel,
    pub reasons: Vec<String>,
    pub indicators: SignalBreakdown,
    pub recommended_action: String,
}

/// Deterministic fold of the four analyzer outputs into one verdict.
/// No I/O and no failure modes.
pub fn combine(
    text: &TextAnalysis,
    url: &UrlAnalysis,
    sender: &SenderAnalysis,
    attachment: &AttachmentAnalysis,
) -> RiskVerdict {
    let weighted = text.score * WEIGHT_TEXT
        + url.score * WEIGHT_URL
        + sender.score * WEIGHT_SENDER
        + attachment.score * WEIGHT_ATTACHMENT;

    let risk_score = round2(weighted.min(100.0));
    let risk_level = level_for(risk_score);

    let mut reasons: Vec<String> = text
        .reasons
        .iter()
        .chain(&url.reasons)
        .chain(&sender.reasons)
        .chain(&attachment.reasons)
        .cloned()
        .collect();
    reasons.truncate(MAX_REASONS);
    if reasons.is_empty() {
        reasons.push("No high-confidence phishing indicators were triggered".to_string());
    }

    RiskVerdict {
        risk_score,
        risk_level,
        reasons,
        indicators: SignalBreakdown {
            text: text.score,
            url: url.score,
            sender: sender.score,
            attachment: attachment.score,
        },
        recommended_action: recommended_action(risk_level).to_string(),
    }
}

fn level_for(score: f64) -> RiskLevel {
    if score >= HIGH_THRESHOLD {
        RiskLevel::High
    } else if score >= MEDIUM_THRESHOLD {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

pub fn recommended_action(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::High => {
            "Do not click links or open attachments. Verify sender through a trusted channel."
        }
        RiskLevel::Medium => "Proceed with caution and verify key details before taking action.",
        RiskLevel::Low => "No major phishing signals detected, but remain cautious.",
    }
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Aggregation;
    use crate::text::ScoringMode;

    fn text(score: f64, reasons: Vec<&str>) -> TextAnalysis {
        TextAnalysis {
            score,
            reasons: reasons.into_iter().map(String::from).collect(),
            chunk_count: 1,
            aggregation: Aggregation::Mean,
            mode: ScoringMode::Heuristic,
        }
    }

    fn url(score: f64, reasons: Vec<&str>) -> UrlAnalysis {
        UrlAnalysis {
            score,
            reasons: reasons.into_iter().map(String::from).collect(),
            count: 1,
        }
    }

    fn sender(score: f64, reasons: Vec<&str>) -> SenderAnalysis {
        SenderAnalysis {
            score,
            reasons: reasons.into_iter().map(String::from).collect(),
            domain: "example.com".to_string(),
        }
    }

    fn attachment(score: f64, reasons: Vec<&str>) -> AttachmentAnalysis {
        AttachmentAnalysis {
            score,
            reasons: reasons.into_iter().map(String::from).collect(),
            count: 1,
        }
    }

    #[test]
    fn test_weighted_sum_reaches_high() {
        let verdict = combine(
            &text(90.0, vec!["text risk"]),
            &url(80.0, vec!["url risk"]),
            &sender(70.0, vec!["sender risk"]),
            &attachment(60.0, vec!["attachment risk"]),
        );
        // 90*0.4 + 80*0.25 + 70*0.2 + 60*0.15 = 79.
        assert_eq!(verdict.risk_score, 79.0);
        assert_eq!(verdict.risk_level, RiskLevel::High);
        assert!(verdict.recommended_action.contains("Do not click"));
        assert_eq!(verdict.indicators.text, 90.0);
        assert_eq!(verdict.indicators.attachment, 60.0);
    }

    #[test]
    fn test_weighted_sum_stays_low() {
        let verdict = combine(
            &text(5.0, vec![]),
            &url(0.0, vec![]),
            &sender(5.0, vec![]),
            &attachment(0.0, vec![]),
        );
        assert_eq!(verdict.risk_score, 3.0);
        assert_eq!(verdict.risk_level, RiskLevel::Low);
    }

    #[test]
    fn test_medium_band_is_inclusive_at_forty() {
        let verdict = combine(
            &text(100.0, vec![]),
            &url(0.0, vec![]),
            &sender(0.0, vec![]),
            &attachment(0.0, vec![]),
        );
        assert_eq!(verdict.risk_score, 40.0);
        assert_eq!(verdict.risk_level, RiskLevel::Medium);
    }

    #[test]
    fn test_reasons_merge_in_fixed_order_and_truncate() {
        let verdict = combine(
            &text(10.0, vec!["t1", "t2", "t3"]),
            &url(10.0, vec!["u1", "u2", "u3"]),
            &sender(10.0, vec!["s1", "s2"]),
            &attachment(10.0, vec!["a1"]),
        );
        assert_eq!(verdict.reasons.len(), 8);
        assert_eq!(verdict.reasons[0], "t1");
        assert_eq!(verdict.reasons[3], "u1");
        assert_eq!(verdict.reasons[7], "s2");
    }

    #[test]
    fn test_empty_reasons_get_substitute() {
        let verdict = combine(
            &text(0.0, vec![]),
            &url(0.0, vec![]),
            &sender(0.0, vec![]),
            &attachment(0.0, vec![]),
        );
        assert_eq!(
            verdict.reasons,
            vec!["No high-confidence phishing indicators were triggered"]
        );
    }

    #[test]
    fn test_final_score_clamped_and_rounded() {
        let verdict = combine(
            &text(100.0, vec![]),
            &url(100.0, vec![]),
            &sender(100.0, vec![]),
            &attachment(100.0, vec![]),
        );
        assert_eq!(verdict.risk_score, 100.0);
        assert_eq!(verdict.risk_level, RiskLevel::High);

        let fractional = combine(
            &text(33.333, vec![]),
            &url(0.0, vec![]),
            &sender(0.0, vec![]),
            &attachment(0.0, vec![]),
        );
        assert_eq!(fractional.risk_score, 13.33);
    }
}
