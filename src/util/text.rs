use std::borrow::Cow;
use unicode_width::UnicodeWidthStr;
use url::Url;

/// Terminal display width of a string (wide CJK glyphs count as 2).
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncate `s` to at most `max_width` terminal columns, appending an
/// ellipsis when anything was cut. Splits on char boundaries only.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if display_width(s) <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    // Reserve one column for the ellipsis.
    let budget = max_width.saturating_sub(1);
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = UnicodeWidthStr::width(ch.encode_utf8(&mut [0u8; 4]) as &str);
        if used + w > budget {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

/// Strip control characters that would corrupt terminal output.
///
/// Remote article titles and descriptions are untrusted; escape sequences
/// in them must never reach the terminal. Returns a borrowed value when no
/// filtering was needed.
pub fn sanitize_line(s: &str) -> Cow<'_, str> {
    if s.chars().any(|c| c.is_control()) {
        Cow::Owned(s.chars().filter(|c| !c.is_control()).collect())
    } else {
        Cow::Borrowed(s)
    }
}

/// Check that a link is safe to hand to the system browser.
///
/// Only absolute http/https URLs pass; anything else (file, javascript,
/// relative paths, unparsable strings) is rejected.
pub fn validate_open_url(s: &str) -> bool {
    match Url::parse(s) {
        Ok(url) => matches!(url.scheme(), "http" | "https"),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_counts_wide_glyphs() {
        assert_eq!(display_width("abc"), 3);
        assert_eq!(display_width("日本"), 4);
    }

    #[test]
    fn truncate_short_string_unchanged() {
        assert_eq!(truncate_to_width("hello", 10), "hello");
        assert_eq!(truncate_to_width("hello", 5), "hello");
    }

    #[test]
    fn truncate_appends_ellipsis() {
        assert_eq!(truncate_to_width("hello world", 6), "hello…");
    }

    #[test]
    fn truncate_respects_wide_chars() {
        // Each glyph is 2 columns; budget of 5 leaves room for two glyphs
        // plus the ellipsis.
        let t = truncate_to_width("日本語見出し", 5);
        assert_eq!(t, "日本…");
        assert!(display_width(&t) <= 5);
    }

    #[test]
    fn truncate_zero_width() {
        assert_eq!(truncate_to_width("hello", 0), "");
    }

    #[test]
    fn sanitize_passes_clean_text_borrowed() {
        let s = "A normal headline";
        assert!(matches!(sanitize_line(s), Cow::Borrowed(_)));
    }

    #[test]
    fn sanitize_strips_escape_sequences() {
        assert_eq!(sanitize_line("bad\x1b[31mtitle\x07"), "bad[31mtitle");
        assert_eq!(sanitize_line("tab\there"), "tabhere");
    }

    #[test]
    fn validate_accepts_http_and_https() {
        assert!(validate_open_url("https://example.com/story"));
        assert!(validate_open_url("http://example.com"));
    }

    #[test]
    fn validate_rejects_other_schemes() {
        assert!(!validate_open_url("file:///etc/passwd"));
        assert!(!validate_open_url("javascript:alert(1)"));
        assert!(!validate_open_url("not a url"));
        assert!(!validate_open_url("/relative/path"));
        assert!(!validate_open_url(""));
    }
}
