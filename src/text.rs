//! Display-width truncation for log excerpts.

use crate::http::Body;

/// Sentinel substituted for a body whose contents cannot be read.
pub const NOT_READABLE: &str = "[not readable]";

/// Suffix appended to truncated excerpts.
pub const ELLIPSIS: &str = "...";

/// Returns the display width of a string.
///
/// Width is counted in characters (Unicode scalar values), never bytes, so
/// multi-byte text measures by what a reader sees rather than by encoding
/// length.
pub fn display_width(s: &str) -> usize {
    s.chars().count()
}

/// Truncates a string to at most `max` display-width characters.
///
/// Strings at or under the limit are returned unchanged. Longer strings
/// are cut on a character boundary at exactly `max` characters and
/// suffixed with [`ELLIPSIS`].
pub fn truncate_display(s: &str, max: usize) -> String {
    if display_width(s) > max {
        let mut out: String = s.chars().take(max).collect();
        out.push_str(ELLIPSIS);
        out
    } else {
        s.to_string()
    }
}

/// Reads a body and produces its truncated log excerpt.
///
/// Advances the body's cursor; the caller decides whether to rewind.
/// Unreadable bodies yield [`NOT_READABLE`], which is subject to the same
/// truncation as real contents.
pub fn body_excerpt(body: &mut Body, max: usize) -> String {
    let contents = body
        .contents()
        .unwrap_or_else(|| NOT_READABLE.to_string());
    truncate_display(&contents, max)
}

/// Reads a response body for logging and rewinds it afterwards.
///
/// Downstream consumers expect an unconsumed stream, so the cursor is
/// reset once the excerpt has been taken.
pub fn response_excerpt(body: &mut Body, max: usize) -> String {
    let excerpt = body_excerpt(body, max);
    body.rewind();
    excerpt
}
