/// Collapse all whitespace runs (including newlines) to single spaces, trim,
/// and cap the result at `max_chars` characters. The cap is a hard character
/// cut, not word-aware. Empty input yields an empty string.
pub fn clean_text(text: &str, max_chars: usize) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max_chars {
        return collapsed;
    }
    collapsed.chars().take(max_chars).collect()
}

/// Trim each URL, drop empties, and keep each distinct value exactly once in
/// order of first occurrence.
pub fn dedupe_urls(urls: &[String]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::new();

    for url in urls {
        let trimmed = url.trim();
        if trimmed.is_empty() {
            continue;
        }
        if seen.insert(trimmed.to_string()) {
            out.push(trimmed.to_string());
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_collapses_whitespace() {
        assert_eq!(clean_text("  hello \n\t world  ", 100), "hello world");
        assert_eq!(clean_text("", 100), "");
        assert_eq!(clean_text(" \n ", 100), "");
    }

    #[test]
    fn test_clean_text_truncates_by_chars() {
        assert_eq!(clean_text("abcdef", 3), "abc");
        // Cap is applied after collapsing, counting characters not bytes.
        assert_eq!(clean_text("héllo wörld", 7), "héllo w");
    }

    #[test]
    fn test_dedupe_preserves_first_occurrence_order() {
        let urls = vec![
            "https://a.example".to_string(),
            " https://b.example ".to_string(),
            "https://a.example".to_string(),
            "".to_string(),
            "https://c.example".to_string(),
        ];
        let deduped = dedupe_urls(&urls);
        assert_eq!(
            deduped,
            vec!["https://a.example", "https://b.example", "https://c.example"]
        );
    }

    #[test]
    fn test_dedupe_is_idempotent() {
        let urls = vec![
            "https://a.example".to_string(),
            "https://b.example".to_string(),
        ];
        let once = dedupe_urls(&urls);
        let twice = dedupe_urls(&once);
        assert_eq!(once, twice);
    }
}
