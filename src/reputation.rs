use std::collections::HashSet;

/// Built-in blocklists used when no feed values are configured.
const DEFAULT_MALICIOUS_DOMAINS: [&str; 3] = [
    "example-phish.com",
    "secure-login-alert.net",
    "account-verify-now.top",
];
const DEFAULT_MALICIOUS_IPS: [&str; 3] = ["45.10.120.7", "185.234.218.12", "91.219.236.221"];

/// Known-malicious domain and IP sets consulted by the URL analyzer.
///
/// Built once at startup from configured feed values and injected into the
/// analyzer, so tests can substitute feeds without touching the process
/// environment. Read-only for the process lifetime; reload requires restart.
#[derive(Debug, Clone)]
pub struct ReputationFeed {
    domains: HashSet<String>,
    ips: HashSet<String>,
}

impl ReputationFeed {
    /// Parse comma/whitespace-separated feed values. Either feed falls back
    /// to the built-in defaults when its value is absent or empty.
    pub fn new(domain_values: Option<&str>, ip_values: Option<&str>) -> Self {
        let mut domains = parse_feed_values(domain_values.unwrap_or(""));
        if domains.is_empty() {
            domains = DEFAULT_MALICIOUS_DOMAINS
                .iter()
                .map(|d| d.to_string())
                .collect();
        }

        let mut ips = parse_feed_values(ip_values.unwrap_or(""));
        if ips.is_empty() {
            ips = DEFAULT_MALICIOUS_IPS.iter().map(|ip| ip.to_string()).collect();
        }

        Self { domains, ips }
    }

    pub fn is_malicious_ip(&self, ip: &str) -> bool {
        self.ips.contains(ip)
    }

    /// Walk the hostname and its parent domains (`a.b.evil.com` checks
    /// `a.b.evil.com`, `b.evil.com`, `evil.com`) and return the first feed
    /// match, if any.
    pub fn matched_parent_domain(&self, hostname: &str) -> Option<String> {
        let parts: Vec<&str> = hostname.split('.').collect();
        if parts.len() < 2 {
            return None;
        }

        for start in 0..parts.len() - 1 {
            let candidate = parts[start..].join(".");
            if self.domains.contains(&candidate) {
                return Some(candidate);
            }
        }

        None
    }

    pub fn domain_count(&self) -> usize {
        self.domains.len()
    }

    pub fn ip_count(&self) -> usize {
        self.ips.len()
    }
}

impl Default for ReputationFeed {
    fn default() -> Self {
        Self::new(None, None)
    }
}

fn parse_feed_values(raw: &str) -> HashSet<String> {
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| item.to_lowercase())
        .collect()
}
