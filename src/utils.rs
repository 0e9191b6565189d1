//! Display helpers for report rendering
//!
//! Interface names can contain any Unicode the source language allows, so
//! column truncation has to respect char boundaries.

/// Truncate a string to at most `max_bytes`, backing off to a UTF-8 char boundary.
///
/// # Examples
/// ```
/// use ipi_engine::utils::truncate_to_char_boundary;
///
/// assert_eq!(truncate_to_char_boundary("RepositoryFactory", 10), "Repository");
/// // 'é' spans bytes 1-2, so a cut at byte 2 falls back to byte 1
/// assert_eq!(truncate_to_char_boundary("Xécute", 2), "X");
/// ```
pub fn truncate_to_char_boundary(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Fit a name into a table column of `width` bytes, marking cuts with "..."
pub fn fit_column(s: &str, width: usize) -> String {
    if s.len() <= width {
        s.to_string()
    } else {
        let keep = width.saturating_sub(3);
        format!("{}...", truncate_to_char_boundary(s, keep))
    }
}

/// Round to three decimal places for display and serialized records
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
