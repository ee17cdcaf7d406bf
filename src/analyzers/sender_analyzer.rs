use crate::verdict::round2;
use regex::Regex;
use serde::Serialize;

/// Brands commonly impersonated in display names, with the domain a genuine
/// sender would use. "bank" is too generic to pin to one domain and is only
/// kept so the table reads as the complete watch list.
const TRUSTED_BRANDS: [(&str, Option<&str>); 6] = [
    ("paypal", Some("paypal.com")),
    ("microsoft", Some("microsoft.com")),
    ("google", Some("google.com")),
    ("apple", Some("apple.com")),
    ("amazon", Some("amazon.com")),
    ("bank", None),
];

const FREE_EMAIL_DOMAINS: [&str; 5] = [
    "gmail.com",
    "outlook.com",
    "yahoo.com",
    "hotmail.com",
    "proton.me",
];

#[derive(Debug, Clone, Serialize)]
pub struct SenderAnalysis {
    pub score: f64,
    pub reasons: Vec<String>,
    /// Lowercase domain after the last `@`; empty only for the
    /// invalid-format short-circuit.
    pub domain: String,
}

/// Scores the sender address and display name for spoofing and
/// brand-impersonation patterns.
#[derive(Debug)]
pub struct SenderAnalyzer {
    digit_run: Regex,
}

impl SenderAnalyzer {
    pub fn new() -> Self {
        Self {
            digit_run: Regex::new(r"\d{3,}").unwrap(),
        }
    }

    pub fn analyze(&self, sender_email: &str, sender_name: Option<&str>) -> SenderAnalysis {
        let domain = extract_domain(sender_email);
        if domain.is_empty() {
            // Hard short-circuit: an unparsable address is a terminal
            // high-risk verdict for this signal, not an error.
            return SenderAnalysis {
                score: 100.0,
                reasons: vec!["Invalid sender email format".to_string()],
                domain,
            };
        }

        let mut score = 0.0;
        let mut reasons = Vec::new();

        if self.digit_run.is_match(&domain) {
            score += 8.0;
            reasons.push("Sender domain contains unusual numeric pattern".to_string());
        }

        if FREE_EMAIL_DOMAINS.contains(&domain.as_str()) {
            score += 6.0;
            reasons.push("Sender uses a free email provider".to_string());
        }

        if let Some(name) = sender_name {
            let lower_name = name.to_lowercase();
            for (brand, expected_domain) in TRUSTED_BRANDS {
                let Some(expected_domain) = expected_domain else {
                    continue;
                };
                if lower_name.contains(brand) && !domain.contains(expected_domain) {
                    score += 25.0;
                    reasons.push(format!(
                        "Sender name references {} but email domain is {}",
                        title_case(brand),
                        domain
                    ));
                }
            }
        }

        SenderAnalysis {
            score: round2(score.min(100.0)),
            reasons,
            domain,
        }
    }
}

impl Default for SenderAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

fn extract_domain(email: &str) -> String {
    match email.rsplit_once('@') {
        Some((_, domain)) => domain.trim().to_lowercase(),
        None => String::new(),
    }
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
