pub mod attachment_analyzer;
pub mod sender_analyzer;
pub mod url_analyzer;

pub use attachment_analyzer::{AttachmentAnalysis, AttachmentAnalyzer};
pub use sender_analyzer::{SenderAnalysis, SenderAnalyzer};
pub use url_analyzer::{UrlAnalysis, UrlAnalyzer};
