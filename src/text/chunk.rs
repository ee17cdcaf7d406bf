pub const CHUNK_WINDOW_CHARS: usize = 1200;
pub const CHUNK_STRIDE_CHARS: usize = 300;

/// Split text into fixed-size character windows. Each window starts
/// `window - stride` characters after the previous one, so consecutive
/// chunks overlap by `stride` characters. Text shorter than the window
/// yields exactly one chunk. Keyword hits inside the overlap region are
/// counted in both chunks; that double-counting is a known property of the
/// windowing, not corrected downstream.
pub fn chunk_by_chars(text: &str, window: usize, stride: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return vec![text.to_string()];
    }

    let advance = window.saturating_sub(stride).max(1);
    let mut chunks = Vec::new();
    let mut start = 0;

    while start < chars.len() {
        let end = (start + window).min(chars.len());
        chunks.push(chars[start..end].iter().collect());
        start += advance;
    }

    chunks
}
