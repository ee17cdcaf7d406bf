use crate::payload::Attachment;
use crate::verdict::round2;
use serde::Serialize;

const EXECUTABLE_EXTENSIONS: [&str; 9] =
    ["exe", "scr", "bat", "cmd", "js", "vbs", "ps1", "msi", "com"];
const MACRO_EXTENSIONS: [&str; 3] = ["docm", "xlsm", "pptm"];
const ARCHIVE_EXTENSIONS: [&str; 4] = ["zip", "rar", "7z", "iso"];

#[derive(Debug, Clone, Serialize)]
pub struct AttachmentAnalysis {
    pub score: f64,
    pub reasons: Vec<String>,
    pub count: usize,
}

/// Scores attachments by extension class and filename shape. Rules are
/// additive per attachment; a double-extension executable fires both the
/// plain executable rule and the masquerade rule.
#[derive(Debug, Clone, Default)]
pub struct AttachmentAnalyzer;

impl AttachmentAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, attachments: &[Attachment]) -> AttachmentAnalysis {
        let mut score = 0.0;
        let mut reasons = Vec::new();

        for attachment in attachments {
            let extension = attachment.extension.to_lowercase();
            let extension = extension.trim_matches('.');
            let filename_lower = attachment.filename.to_lowercase();

            if EXECUTABLE_EXTENSIONS.contains(&extension) {
                score += 30.0;
                reasons.push(format!(
                    "Executable-like attachment detected: {}",
                    attachment.filename
                ));
            }

            if MACRO_EXTENSIONS.contains(&extension) {
                score += 18.0;
                reasons.push(format!(
                    "Macro-enabled document detected: {}",
                    attachment.filename
                ));
            }

            if ARCHIVE_EXTENSIONS.contains(&extension) {
                score += 12.0;
                reasons.push(format!(
                    "Archive attachment detected: {}",
                    attachment.filename
                ));
            }

            // invoice.pdf.exe style masquerade: 3+ dot-separated segments
            // ending in an executable extension.
            let segments: Vec<&str> = filename_lower.split('.').collect();
            if segments.len() >= 3 {
                if let Some(last) = segments.last() {
                    if EXECUTABLE_EXTENSIONS.contains(last) {
                        score += 25.0;
                        reasons.push(format!(
                            "Double extension pattern detected: {}",
                            attachment.filename
                        ));
                    }
                }
            }
        }

        AttachmentAnalysis {
            score: round2(score.min(100.0)),
            reasons,
            count: attachments.len(),
        }
    }
}
