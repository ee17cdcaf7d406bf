use crate::reputation::ReputationFeed;
use crate::verdict::round2;
use serde::Serialize;
use std::net::IpAddr;
use std::sync::Arc;
use url::Url;

const SUSPICIOUS_KEYWORDS: [&str; 6] = ["verify", "urgent", "login", "reset", "invoice", "password"];
const SHORTENER_HOSTS: [&str; 6] = ["bit.ly", "tinyurl.com", "t.co", "goo.gl", "ow.ly", "is.gd"];
const UNCOMMON_TLDS: [&str; 9] = ["top", "xyz", "click", "work", "gq", "ml", "cf", "tk", "zip"];

const MAX_URL_LENGTH: usize = 120;

#[derive(Debug, Clone, Serialize)]
pub struct UrlAnalysis {
    pub score: f64,
    pub reasons: Vec<String>,
    pub count: usize,
}

/// Scores a deduplicated URL list against the reputation feed and a set of
/// structural heuristics. Every rule is additive; the total is clamped to 100.
#[derive(Debug, Clone)]
pub struct UrlAnalyzer {
    feed: Arc<ReputationFeed>,
}

impl UrlAnalyzer {
    pub fn new(feed: Arc<ReputationFeed>) -> Self {
        Self { feed }
    }

    pub fn analyze(&self, urls: &[String]) -> UrlAnalysis {
        let mut score = 0.0;
        let mut reasons = Vec::new();

        for url in urls {
            self.analyze_url(url, &mut score, &mut reasons);
        }

        UrlAnalysis {
            score: round2(score.min(100.0)),
            reasons,
            count: urls.len(),
        }
    }

    fn analyze_url(&self, raw: &str, score: &mut f64, reasons: &mut Vec<String>) {
        let parsed = match Url::parse(raw) {
            Ok(parsed) => parsed,
            Err(_) => {
                *score += 5.0;
                reasons.push(format!("Malformed URL detected: {}", raw));
                return;
            }
        };

        // Bracketed IPv6 hosts are compared against the feed without brackets.
        let hostname = match parsed.host_str() {
            Some(host) if !host.is_empty() => host
                .trim_start_matches('[')
                .trim_end_matches(']')
                .to_lowercase(),
            _ => {
                *score += 5.0;
                reasons.push(format!("Malformed URL detected: {}", raw));
                return;
            }
        };

        let path_and_query = format!("{} {}", parsed.path(), parsed.query().unwrap_or(""))
            .to_lowercase();
        let host_is_ip = hostname.parse::<IpAddr>().is_ok();

        if host_is_ip {
            if self.feed.is_malicious_ip(&hostname) {
                *score += 35.0;
                reasons.push(format!("IP reputation feed flagged URL host: {}", hostname));
            }
        } else if let Some(matched) = self.feed.matched_parent_domain(&hostname) {
            *score += 35.0;
            reasons.push(format!("Domain reputation feed flagged URL host: {}", matched));
        }

        // A bare IP instead of a domain is suspicious on its own, independent
        // of any feed match.
        if host_is_ip {
            *score += 20.0;
            reasons.push(format!(
                "URL uses an IP address instead of a domain: {}",
                hostname
            ));
        }

        let subdomain_count = hostname.split('.').count().saturating_sub(2);
        if subdomain_count >= 3 {
            *score += 12.0;
            reasons.push(format!("URL has excessive subdomains: {}", hostname));
        }

        if hostname.contains("xn--") {
            *score += 18.0;
            reasons.push(format!("Possible punycode domain detected: {}", hostname));
        }

        if SHORTENER_HOSTS.contains(&hostname.as_str()) {
            *score += 14.0;
            reasons.push(format!("Shortened URL service used: {}", hostname));
        }

        if SUSPICIOUS_KEYWORDS
            .iter()
            .any(|keyword| path_and_query.contains(keyword) || hostname.contains(keyword))
        {
            *score += 8.0;
            reasons.push(format!("Suspicious keyword found in URL: {}", raw));
        }

        if hostname.contains('.') {
            if let Some(tld) = hostname.rsplit('.').next() {
                if UNCOMMON_TLDS.contains(&tld) {
                    *score += 10.0;
                    reasons.push(format!("Uncommon TLD found in URL: .{}", tld));
                }
            }
        }

        if raw.chars().count() > MAX_URL_LENGTH {
            *score += 7.0;
            reasons.push("Very long URL detected".to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer() -> UrlAnalyzer {
        UrlAnalyzer::new(Arc::new(ReputationFeed::default()))
    }

    fn analyze_one(url: &str) -> UrlAnalysis {
        analyzer().analyze(&[url.to_string()])
    }

    #[test]
    fn test_empty_list_scores_zero() {
        let result = analyzer().analyze(&[]);
        assert_eq!(result.score, 0.0);
        assert!(result.reasons.is_empty());
        assert_eq!(result.count, 0);
    }

    #[test]
    fn test_ip_host_with_keyword_flags_both() {
        let result = analyze_one("http://10.0.0.1/verify/login");
        assert!(result.score > 0.0);
        assert!(result
            .reasons
            .iter()
            .any(|r| r.contains("IP address instead of a domain")));
        assert!(result
            .reasons
            .iter()
            .any(|r| r.contains("Suspicious keyword")));
    }

    #[test]
    fn test_clean_url_low_score() {
        let result = analyze_one("https://www.python.org/downloads/");
        assert!(result.score <= 10.0);
    }

    #[test]
    fn test_malformed_url_small_penalty_and_skip() {
        let result = analyze_one("not a url at all");
        assert_eq!(result.score, 5.0);
        assert_eq!(result.reasons.len(), 1);
        assert!(result.reasons[0].contains("Malformed URL"));
    }

    #[test]
    fn test_feed_ip_match_adds_both_penalties() {
        let result = analyze_one("http://45.10.120.7/");
        // 35 for the feed hit plus 20 for the bare IP host.
        assert_eq!(result.score, 55.0);
        assert!(result.reasons.iter().any(|r| r.contains("IP reputation feed")));
    }

    #[test]
    fn test_feed_domain_match_walks_parents() {
        let result = analyze_one("https://portal.example-phish.com/home");
        assert!(result
            .reasons
            .iter()
            .any(|r| r.contains("Domain reputation feed flagged URL host: example-phish.com")));
        assert!(result.score >= 35.0);
    }

    #[test]
    fn test_structural_rules_accumulate() {
        let result = analyze_one("http://a.b.c.d.evil.top/verify");
        // Excessive subdomains + keyword + uncommon TLD.
        assert!(result.reasons.iter().any(|r| r.contains("excessive subdomains")));
        assert!(result.reasons.iter().any(|r| r.contains("Uncommon TLD")));
        assert!(result.reasons.iter().any(|r| r.contains("Suspicious keyword")));
        assert_eq!(result.score, 30.0);
    }

    #[test]
    fn test_shortener_and_punycode_hosts() {
        let shortened = analyze_one("https://bit.ly/3abc");
        assert!(shortened.reasons.iter().any(|r| r.contains("Shortened URL")));

        let punycode = analyze_one("https://xn--pple-43d.com/");
        assert!(punycode.reasons.iter().any(|r| r.contains("punycode")));
    }

    #[test]
    fn test_very_long_url_penalty() {
        let long_url = format!("https://example.com/{}", "a".repeat(120));
        let result = analyze_one(&long_url);
        assert!(result.reasons.iter().any(|r| r == "Very long URL detected"));
    }

    #[test]
    fn test_score_is_clamped_to_100() {
        let urls: Vec<String> = (0..10)
            .map(|i| format!("http://45.10.120.7/verify?attempt={}", i))
            .collect();
        let result = analyzer().analyze(&urls);
        assert_eq!(result.score, 100.0);
        assert_eq!(result.count, 10);
    }

    #[test]
    fn test_injected_feed_substitutes_defaults() {
        let feed = Arc::new(ReputationFeed::new(Some("trap.example"), Some("9.9.9.9")));
        let analyzer = UrlAnalyzer::new(feed);
        let flagged = analyzer.analyze(&["https://trap.example/".to_string()]);
        assert!(flagged
            .reasons
            .iter()
            .any(|r| r.contains("Domain reputation feed")));

        let unflagged = analyzer.analyze(&["https://portal.example-phish.com/".to_string()]);
        assert!(!unflagged
            .reasons
            .iter()
            .any(|r| r.contains("Domain reputation feed")));
    }
}
