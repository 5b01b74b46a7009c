// src/extract/call.rs
//
// Exports attach a popup handler to each device control:
//
//   onclick="showInfo('B2 Lab','Device details<br>Ping: 10.8.3.44<br>...')"
//
// The first argument is a short label, the second a free-text block. The
// handler name varies between export versions, so we match the shape — first
// two-argument single-quoted call — rather than any particular identifier.

/// A parsed two-argument call found inside an attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedCall {
    pub label: String,
    pub body: String,
}

impl EmbeddedCall {
    /// First `('...','...')` pair in `text`, if any. Quotes escaped with a
    /// backslash are argument content, not terminators.
    pub fn parse(text: &str) -> Option<EmbeddedCall> {
        let bytes = text.as_bytes();
        let mut i = 0usize;
        while i + 1 < bytes.len() {
            if bytes[i] == b'(' && bytes[i + 1] == b'\'' {
                if let Some(call) = parse_args(text, i + 2) {
                    return Some(call);
                }
            }
            i += 1;
        }
        None
    }
}

fn parse_args(text: &str, first_start: usize) -> Option<EmbeddedCall> {
    let (label, after) = quoted_span(text, first_start)?;

    // `,` between the arguments, whitespace allowed on either side
    let bytes = text.as_bytes();
    let mut i = after;
    while i < bytes.len() && bytes[i].is_ascii_whitespace() { i += 1; }
    if i >= bytes.len() || bytes[i] != b',' { return None; }
    i += 1;
    while i < bytes.len() && bytes[i].is_ascii_whitespace() { i += 1; }
    if i >= bytes.len() || bytes[i] != b'\'' { return None; }

    let (body, after) = quoted_span(text, i + 1)?;
    if !text[after..].starts_with(')') { return None; }

    Some(EmbeddedCall { label: unescape(&label), body: unescape(&body) })
}

/// Span from `start` to the first unescaped `'`; returns (content, index past
/// the closing quote).
fn quoted_span(text: &str, start: usize) -> Option<(String, usize)> {
    let bytes = text.as_bytes();
    let mut i = start;
    while i < bytes.len() {
        if bytes[i] == b'\'' && bytes[i - 1] != b'\\' {
            return Some((text[start..i].to_string(), i + 1));
        }
        i += 1;
    }
    None
}

fn unescape(s: &str) -> String {
    s.replace("\\'", "'").replace("\\\"", "\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_two_arg_call() {
        let c = EmbeddedCall::parse("showInfo('B2 Lab','Ping: 10.8.3.44')").unwrap();
        assert_eq!(c.label, "B2 Lab");
        assert_eq!(c.body, "Ping: 10.8.3.44");
    }

    #[test]
    fn whitespace_after_comma() {
        let c = EmbeddedCall::parse("showInfo('a',  'b')").unwrap();
        assert_eq!((c.label.as_str(), c.body.as_str()), ("a", "b"));
    }

    #[test]
    fn escaped_quotes_are_content() {
        let c = EmbeddedCall::parse(r"show('O\'Brien wing','x')").unwrap();
        assert_eq!(c.label, "O'Brien wing");
    }

    #[test]
    fn ignores_non_call_text_and_other_handlers() {
        assert_eq!(EmbeddedCall::parse("location.reload()"), None);
        assert_eq!(EmbeddedCall::parse("show('only one arg')"), None);
        assert_eq!(EmbeddedCall::parse(""), None);
    }

    #[test]
    fn first_call_wins() {
        let c = EmbeddedCall::parse("a('1','2'); b('3','4')").unwrap();
        assert_eq!((c.label.as_str(), c.body.as_str()), ("1", "2"));
    }
}
