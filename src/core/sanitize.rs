// src/core/sanitize.rs

use crate::core::addr;
use crate::core::html::{strip_tags, to_lower};

pub fn normalize_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Normalize a raw candidate device name into display form: decode entities,
/// drop markup, strip a trailing label token ("Ping" / "Ping:"), strip a
/// trailing appended dotted quad, collapse whitespace, and trim the
/// punctuation runs truncated display text leaves behind ("C11-", "Lab…").
///
/// Each pass either shrinks the string or leaves it alone, so iterating to a
/// fixpoint terminates and makes the whole thing idempotent:
/// `clean_name(clean_name(x)) == clean_name(x)` for any input.
pub fn clean_name(raw: &str, label: &str) -> String {
    let mut cur = raw.to_string();
    loop {
        let next = clean_pass(&cur, label);
        if next == cur { return cur; }
        cur = next;
    }
}

fn clean_pass(s: &str, label: &str) -> String {
    let s = normalize_entities(s);
    let s = strip_tags(&s);
    let s = normalize_ws(&s);
    let s = strip_trailing_label(&s, label);
    let s = strip_trailing_quad(&s);
    s.trim_end_matches(['.', '…', '-', ' ']).trim().to_string()
}

/// Drop a trailing `label` or `label:` token, e.g. "B2 Lab Ping:" → "B2 Lab".
/// Token only: "Shipping" keeps its "ping" tail.
fn strip_trailing_label(s: &str, label: &str) -> String {
    let lc = to_lower(s);
    let tok = to_lower(label);
    for suffix in [join!(&tok, ":"), tok] {
        if !lc.ends_with(&suffix) { continue; }
        let cut = s.len() - suffix.len();
        if cut == 0 || s[..cut].ends_with(char::is_whitespace) {
            return s[..cut].trim_end().to_string();
        }
    }
    s.to_string()
}

/// Drop a dotted quad appended to the end of a name ("C11-10.8.3.39").
fn strip_trailing_quad(s: &str) -> String {
    if let Some((start, end)) = addr::rfind_quad(s) {
        if end == s.len() {
            return s[..start].trim_end().to_string();
        }
    }
    s.to_string()
}
