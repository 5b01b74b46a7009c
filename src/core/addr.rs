// src/core/addr.rs
//
// Dotted-quad location and ordering. Shape-only: four digit runs joined by
// single dots. Segment range (0–255) is deliberately not checked — the
// exports themselves never guarantee it and the registry keys on the literal
// string, so a loose shape keeps extraction and dedup consistent.

use crate::core::html::to_lower;

/// Parse a quad starting exactly at byte `i`; returns the end offset.
/// Digit runs are maximal, separators are single dots.
fn quad_at(s: &str, i: usize) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut pos = i;
    for seg in 0..4 {
        if seg > 0 {
            if pos >= bytes.len() || bytes[pos] != b'.' { return None; }
            pos += 1;
        }
        let run = bytes[pos..].iter().take_while(|b| b.is_ascii_digit()).count();
        if run == 0 { return None; }
        pos += run;
    }
    Some(pos)
}

/// Leftmost dotted quad anywhere in `s`, as a byte range.
pub fn find_quad(s: &str) -> Option<(usize, usize)> {
    let bytes = s.as_bytes();
    for i in 0..bytes.len() {
        if !bytes[i].is_ascii_digit() { continue; }
        if i > 0 && bytes[i - 1].is_ascii_digit() { continue; }
        if let Some(end) = quad_at(s, i) {
            return Some((i, end));
        }
    }
    None
}

/// Rightmost dotted quad in `s`.
pub fn rfind_quad(s: &str) -> Option<(usize, usize)> {
    let bytes = s.as_bytes();
    let mut found = None;
    for i in 0..bytes.len() {
        if !bytes[i].is_ascii_digit() { continue; }
        if i > 0 && bytes[i - 1].is_ascii_digit() { continue; }
        if let Some(end) = quad_at(s, i) {
            found = Some((i, end));
        }
    }
    found
}

/// Whole string is exactly one dotted quad.
pub fn is_quad(s: &str) -> bool {
    quad_at(s, 0) == Some(s.len()) && !s.is_empty()
}

/// A bare quad at the very end of `s`, preceded by whitespace.
pub fn trailing_quad(s: &str) -> Option<(usize, usize)> {
    let (start, end) = rfind_quad(s)?;
    if end != s.len() || start == 0 { return None; }
    if !s[..start].ends_with(char::is_whitespace) { return None; }
    Some((start, end))
}

/// Search for `label` (case-insensitive, token start) followed by a short
/// separator run and then a quad. Separators are colons, whitespace and
/// complete `<...>` tags, budgeted so the match never wanders into unrelated
/// text; this is what lets `Ping:<br>10.8.3.50` resolve. Returns the label
/// offset and the quad's byte range.
pub fn labeled_quad(text: &str, label: &str) -> Option<(usize, (usize, usize))> {
    const SEP_BUDGET: usize = 24;

    let lc = to_lower(text);
    let tok = to_lower(label);
    if tok.is_empty() { return None; }

    let bytes = text.as_bytes();
    let mut from = 0usize;
    while let Some(rel) = lc[from..].find(&tok) {
        let at = from + rel;
        from = at + tok.len();

        if at > 0 && (lc.as_bytes()[at - 1].is_ascii_alphanumeric()) { continue; }

        let mut i = at + tok.len();
        let mut seps = 0usize;
        while i < bytes.len() && seps < SEP_BUDGET {
            match bytes[i] {
                b':' | b' ' | b'\t' | b'\r' | b'\n' => { i += 1; seps += 1; }
                b'<' => match text[i..].find('>') {
                    Some(close) => { i += close + 1; seps += 1; }
                    None => break,
                },
                _ => break,
            }
        }
        if seps == 0 { continue; } // "Pingback1.2.3.4" is not a labeled quad

        if let Some(end) = quad_at(text, i) {
            return Some((at, (i, end)));
        }
    }
    None
}

/// Numeric per-segment ordering key. Lexicographic sort would put
/// "10.8.3.44" before "10.8.3.9"; this does not.
pub fn sort_key(addr: &str) -> [u64; 4] {
    let mut key = [0u64; 4];
    for (slot, seg) in key.iter_mut().zip(addr.split('.')) {
        *slot = seg.parse().unwrap_or(u64::MAX);
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_quad_anywhere() {
        assert_eq!(find_quad("C11-10.8.3.39x"), Some((4, 13)));
        assert_eq!(find_quad("no address"), None);
        assert_eq!(find_quad("1.2.3"), None);
    }

    #[test]
    fn quad_shape_only_no_range_check() {
        assert!(is_quad("999.999.999.999"));
        assert!(is_quad("10.8.3.44"));
        assert!(!is_quad("10.8.3"));
        assert!(!is_quad("10..8.3.44"));
        assert!(!is_quad(""));
    }

    #[test]
    fn trailing_requires_whitespace() {
        let s = "Lab A 10.8.3.41";
        let (a, b) = trailing_quad(s).unwrap();
        assert_eq!(&s[a..b], "10.8.3.41");
        assert_eq!(trailing_quad("C11-10.8.3.39"), None);
        assert_eq!(trailing_quad("10.8.3.39"), None);
    }

    #[test]
    fn labeled_plain_and_markup_separators() {
        let s = "B2 Lab Ping: 10.8.3.44";
        let (at, (qs, qe)) = labeled_quad(s, "Ping").unwrap();
        assert_eq!(at, 7);
        assert_eq!(&s[qs..qe], "10.8.3.44");

        let s = "room<br>Ping:<br>10.8.3.50 gateway";
        let (_, (qs, qe)) = labeled_quad(s, "Ping").unwrap();
        assert_eq!(&s[qs..qe], "10.8.3.50");
    }

    #[test]
    fn labeled_needs_token_start_and_separator() {
        assert_eq!(labeled_quad("Shipping: 10.8.3.44", "Ping"), None);
        assert_eq!(labeled_quad("Ping10.8.3.44", "Ping"), None);
    }

    #[test]
    fn labeled_does_not_cross_unrelated_text() {
        assert_eq!(labeled_quad("Ping: the gateway host at 10.8.3.44", "Ping"), None);
    }

    #[test]
    fn labeled_skips_false_starts() {
        let s = "Ping me later. Real entry Ping: 10.8.3.7";
        let (_, (qs, qe)) = labeled_quad(s, "Ping").unwrap();
        assert_eq!(&s[qs..qe], "10.8.3.7");
    }

    #[test]
    fn numeric_sort_key() {
        assert!(sort_key("10.8.3.9") < sort_key("10.8.3.44"));
        assert!(sort_key("9.0.0.0") < sort_key("10.0.0.0"));
    }
}
