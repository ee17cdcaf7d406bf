use crate::analyzers::{AttachmentAnalyzer, SenderAnalyzer, UrlAnalyzer};
use crate::config::ScannerConfig;
use crate::payload::EmailPayload;
use crate::preprocess::{clean_text, dedupe_urls};
use crate::reputation::ReputationFeed;
use crate::text::TextAnalyzer;
use crate::verdict::{combine, RiskVerdict};
use std::sync::Arc;

/// The scoring entry point. Built once at startup; all shared state
/// (reputation feed, keyword tables, optional classifier) is read-only
/// afterward, so one engine serves concurrent requests without locking.
pub struct RiskEngine {
    config: ScannerConfig,
    url_analyzer: UrlAnalyzer,
    sender_analyzer: SenderAnalyzer,
    attachment_analyzer: AttachmentAnalyzer,
    text_analyzer: TextAnalyzer,
}

impl RiskEngine {
    pub fn new(config: ScannerConfig) -> Self {
        let feed = Arc::new(ReputationFeed::new(
            config.domain_reputation_feed.as_deref(),
            config.ip_reputation_feed.as_deref(),
        ));
        Self::with_feed(config, feed)
    }

    /// Build an engine around an explicit feed, so tests and embedding hosts
    /// can substitute reputation data without touching the process
    /// environment.
    pub fn with_feed(config: ScannerConfig, feed: Arc<ReputationFeed>) -> Self {
        let text_analyzer = TextAnalyzer::new(&config);
        log::info!(
            "risk engine ready: text backend {:?}, {} feed domains, {} feed ips",
            text_analyzer.mode(),
            feed.domain_count(),
            feed.ip_count()
        );

        Self {
            url_analyzer: UrlAnalyzer::new(feed),
            sender_analyzer: SenderAnalyzer::new(),
            attachment_analyzer: AttachmentAnalyzer::new(),
            text_analyzer,
            config,
        }
    }

    /// Score one email end to end: normalize, dedupe, run the four
    /// independent analyzers, and fold their outputs into a verdict.
    /// Never fails on well-typed input.
    pub fn evaluate(&self, payload: &EmailPayload) -> RiskVerdict {
        let subject = clean_text(&payload.subject, self.config.max_subject_chars);
        let body = clean_text(&payload.body_text, self.config.max_text_chars);
        let urls = dedupe_urls(&payload.urls);

        let text = self.text_analyzer.score(&subject, &body);
        let url = self.url_analyzer.analyze(&urls);
        let sender = self
            .sender_analyzer
            .analyze(&payload.sender_email, payload.sender_name.as_deref());
        let attachment = self.attachment_analyzer.analyze(&payload.attachments);

        let verdict = combine(&text, &url, &sender, &attachment);
        log::debug!(
            "scored email from {}: {} ({})",
            payload.sender_email,
            verdict.risk_score,
            verdict.risk_level
        );
        verdict
    }
}
