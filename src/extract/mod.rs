// src/extract/mod.rs
//
// Per-fragment field resolution. One fragment = one candidate device control
// as split out of the export by the caller. We scan its attributes once, run
// the strategy chain, sanitize the winning name and hand back either a
// resolved device, a skipped UI control, or an unresolved marker for audit.

pub mod call;
pub mod strategies;

use crate::core::html::attr_value;
use crate::core::sanitize::clean_name;
use crate::report::UnresolvedEntry;

use strategies::Ctx;

/// One control-record text span, with its position in the source document.
/// Immutable once captured.
#[derive(Debug, Clone)]
pub struct Fragment {
    pub id: usize,
    pub raw: String,
}

impl Fragment {
    pub fn new(id: usize, raw: impl Into<String>) -> Fragment {
        Fragment { id, raw: raw.into() }
    }
}

/// The recognized attributes of one fragment. `None` covers both "not
/// present" and "present but malformed" (unterminated quote) — either way the
/// strategies just work with what survived.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttrSet {
    pub value: Option<String>,
    pub title: Option<String>,
    pub onclick: Option<String>,
    pub id: Option<String>,
    pub class: Option<String>,
}

impl AttrSet {
    pub fn scan(fragment_text: &str) -> AttrSet {
        AttrSet {
            value: attr_value(fragment_text, "value"),
            title: attr_value(fragment_text, "title"),
            onclick: attr_value(fragment_text, "onclick"),
            id: attr_value(fragment_text, "id"),
            class: attr_value(fragment_text, "class"),
        }
    }
}

/// Caller-supplied extraction configuration. The exports mix device controls
/// with dashboard UI buttons (pagers, refresh, dialog OK); which identifiers
/// are UI chrome is the caller's call, not something the strategies guess at.
#[derive(Debug, Clone)]
pub struct ResolveRules {
    /// Marker word preceding an address in descriptive text.
    pub label: String,
    /// Fragment `id` values to treat as non-device UI controls.
    pub control_ids: Vec<String>,
    /// Also skip fragments with no display text at all (value, title and
    /// onclick all empty or absent). Off by default: such fragments surface
    /// as unresolved entries so nothing drops out of the audit silently.
    pub skip_blank: bool,
}

impl Default for ResolveRules {
    fn default() -> ResolveRules {
        ResolveRules {
            label: s!("Ping"),
            control_ids: Vec::new(),
            skip_blank: false,
        }
    }
}

/// Outcome of resolving one fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Device { name: String, address: String },
    /// Non-device UI control, skipped by rule.
    Control,
    Unresolved(UnresolvedEntry),
}

pub fn resolve_fragment(fragment: &Fragment, rules: &ResolveRules) -> Resolution {
    let attrs = AttrSet::scan(&fragment.raw);

    if is_control(&attrs, rules) {
        return Resolution::Control;
    }

    let ctx = Ctx::new(&attrs, &rules.label);
    let (name, address) = strategies::resolve(&ctx);

    let Some((address, _)) = address else {
        return Resolution::Unresolved(UnresolvedEntry::from_attrs(fragment.id, &attrs));
    };

    // Committed name, else the rawest non-empty display attribute; never a
    // synthesized placeholder.
    let raw_name = name
        .map(|(n, _)| n)
        .or_else(|| non_empty(&attrs.value))
        .or_else(|| non_empty(&attrs.title))
        .unwrap_or_default();

    Resolution::Device { name: clean_name(&raw_name, &rules.label), address }
}

fn is_control(attrs: &AttrSet, rules: &ResolveRules) -> bool {
    if let Some(id) = &attrs.id {
        if rules.control_ids.iter().any(|c| c == id) {
            return true;
        }
    }
    if rules.skip_blank {
        let blank = |a: &Option<String>| a.as_deref().is_none_or(|s| s.trim().is_empty());
        if blank(&attrs.value) && blank(&attrs.title) && blank(&attrs.onclick) {
            return true;
        }
    }
    false
}

fn non_empty(attr: &Option<String>) -> Option<String> {
    attr.as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frag(raw: &str) -> Fragment { Fragment::new(0, raw) }

    #[test]
    fn scan_collects_recognized_attrs() {
        let a = AttrSet::scan(r#"<input type=button id="sw4" class='dev' value="C4" title='x'>"#);
        assert_eq!(a.id.as_deref(), Some("sw4"));
        assert_eq!(a.class.as_deref(), Some("dev"));
        assert_eq!(a.value.as_deref(), Some("C4"));
        assert_eq!(a.title.as_deref(), Some("x"));
        assert_eq!(a.onclick, None);
    }

    #[test]
    fn labeled_value_resolves_and_sanitizes() {
        let r = resolve_fragment(&frag(r#"<input value="B2 1st Floor Lab Ping: 10.8.3.44">"#),
            &ResolveRules::default());
        assert_eq!(r, Resolution::Device { name: s!("B2 1st Floor Lab"), address: s!("10.8.3.44") });
    }

    #[test]
    fn embedded_quad_name_comes_from_raw_value() {
        let r = resolve_fragment(&frag(r#"<input value="C11-10.8.3.39">"#), &ResolveRules::default());
        // fallback name is the raw value; the sanitizer strips the appended
        // quad and the dangling hyphen
        assert_eq!(r, Resolution::Device { name: s!("C11"), address: s!("10.8.3.39") });
    }

    #[test]
    fn control_ids_are_skipped() {
        let rules = ResolveRules {
            control_ids: vec![s!("btn1g"), s!("jsBtnOk")],
            ..ResolveRules::default()
        };
        let r = resolve_fragment(&frag(r#"<input id="jsBtnOk" value="OK">"#), &rules);
        assert_eq!(r, Resolution::Control);
    }

    #[test]
    fn empty_value_is_unresolved_not_control() {
        let r = resolve_fragment(&frag(r#"<input value="">"#), &ResolveRules::default());
        let Resolution::Unresolved(u) = r else { panic!("expected unresolved") };
        assert_eq!(u.fragment_id, 0);
        assert_eq!(u.raw_value.as_deref(), Some(""));
        assert_eq!(u.raw_title, None);
    }

    #[test]
    fn skip_blank_rule_reclassifies_empty_fragments() {
        let rules = ResolveRules { skip_blank: true, ..ResolveRules::default() };
        let r = resolve_fragment(&frag(r#"<input value="">"#), &rules);
        assert_eq!(r, Resolution::Control);
    }

    #[test]
    fn markup_between_label_and_address() {
        let r = resolve_fragment(
            &frag(r#"<input onclick="showInfo('D7 Riser','Last seen<br>Ping:<br>10.8.3.50')">"#),
            &ResolveRules::default(),
        );
        assert_eq!(r, Resolution::Device { name: s!("D7 Riser"), address: s!("10.8.3.50") });
    }
}
