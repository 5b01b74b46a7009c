// src/core/html.rs
//
// Minimal markup scanning for control-record fragments. Exports wrap
// attributes in wildly inconsistent ways (quote style varies, hint/onclick
// values embed <br> tags and escaped quotes), so attribute extraction is a
// hand-rolled scan rather than a real HTML parser.

pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii() {
                c.to_ascii_lowercase()
            } else {
                c
            }
        })
        .collect()
}

/// Extract the value of `attr` from one fragment, tolerating either quote
/// style. The quote character that follows `=` is the delimiter; a quote
/// preceded by a backslash does not terminate. An unterminated value is
/// malformed and reported as `None` so scanning of other attributes can
/// continue.
pub fn attr_value(fragment: &str, attr: &str) -> Option<String> {
    let lc = to_lower(fragment);
    let needle = join!(&to_lower(attr), "=");

    let mut from = 0usize;
    while let Some(rel) = lc[from..].find(&needle) {
        let at = from + rel;
        from = at + needle.len();

        // Word boundary: "id=" must not match inside "grid=" or "valid=".
        if at > 0 {
            let prev = lc.as_bytes()[at - 1];
            if prev.is_ascii_alphanumeric() || prev == b'-' || prev == b'_' {
                continue;
            }
        }

        let after_eq = at + needle.len();
        let Some(quote) = fragment[after_eq..].chars().next() else { continue };
        if quote != '\'' && quote != '"' { continue; }

        let body_start = after_eq + 1;
        return scan_to_delim(fragment, body_start, quote);
    }
    None
}

/// Scan forward from `start` to the first unescaped `delim`.
fn scan_to_delim(s: &str, start: usize, delim: char) -> Option<String> {
    let bytes = s.as_bytes();
    let mut i = start;
    while i < bytes.len() {
        if bytes[i] == delim as u8 && bytes[i - 1] != b'\\' {
            return Some(s[start..i].to_string());
        }
        i += 1;
    }
    None // no terminator before fragment end: malformed
}

/// Drop `<...>` tag spans, keeping text content.
pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();

    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;

    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out
}
