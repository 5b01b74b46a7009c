// src/extract/strategies.rs
//
// The ordered extraction chain. Every strategy is a total function from one
// fragment's attributes to a (possibly empty) field candidate; the resolver
// walks the chain once per field and commits the first hit. Name and address
// are resolved independently — the address may come from the structured call
// while the name comes from a later fallback.

use serde::Serialize;

use crate::core::addr;
use super::call::EmbeddedCall;
use super::AttrSet;

/// Which strategy produced a candidate. Order here is priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    StructuredCall,
    ValueLabeled,
    TitleLabeled,
    TrailingQuad,
    AnyQuad,
}

/// One strategy's output. Absent fields simply mean "this strategy has no
/// opinion"; they never block later strategies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldCandidate {
    pub name: Option<String>,
    pub address: Option<String>,
}

pub struct Ctx<'a> {
    pub attrs: &'a AttrSet,
    pub call: Option<EmbeddedCall>,
    pub label: &'a str,
}

impl<'a> Ctx<'a> {
    pub fn new(attrs: &'a AttrSet, label: &'a str) -> Ctx<'a> {
        let call = attrs.onclick.as_deref().and_then(EmbeddedCall::parse);
        Ctx { attrs, call, label }
    }
}

type Strategy = fn(&Ctx) -> FieldCandidate;

pub const CHAIN: &[(Source, Strategy)] = &[
    (Source::StructuredCall, structured_call),
    (Source::ValueLabeled, value_labeled),
    (Source::TitleLabeled, title_labeled),
    (Source::TrailingQuad, trailing_quad),
    (Source::AnyQuad, any_quad),
];

/// Walk the chain, committing the first non-absent value per field.
/// Returns raw (unsanitized) name text plus the matched address, with the
/// winning source per field for audit.
pub fn resolve(ctx: &Ctx) -> (Option<(String, Source)>, Option<(String, Source)>) {
    let mut name = None;
    let mut address = None;
    for (source, strategy) in CHAIN {
        let cand = strategy(ctx);
        if name.is_none() {
            if let Some(n) = cand.name {
                name = Some((n, *source));
            }
        }
        if address.is_none() {
            if let Some(a) = cand.address {
                address = Some((a, *source));
            }
        }
        if name.is_some() && address.is_some() { break; }
    }
    (name, address)
}

/// 1. Popup-handler call: name from the short first argument, address from a
///    labeled quad in the free-text second argument.
fn structured_call(ctx: &Ctx) -> FieldCandidate {
    let Some(call) = &ctx.call else { return FieldCandidate::default() };

    let name = if call.label.trim().is_empty() {
        None
    } else {
        Some(call.label.clone())
    };
    let address = addr::labeled_quad(&call.body, ctx.label)
        .map(|(_, (s, e))| call.body[s..e].to_string());

    FieldCandidate { name, address }
}

/// 2. "B2 1st Floor Lab Ping: 10.8.3.44" in the display value; the text
///    before the label is the name.
fn value_labeled(ctx: &Ctx) -> FieldCandidate {
    labeled_attr(ctx.attrs.value.as_deref(), ctx.label)
}

/// 3. Same pattern against the tooltip.
fn title_labeled(ctx: &Ctx) -> FieldCandidate {
    labeled_attr(ctx.attrs.title.as_deref(), ctx.label)
}

fn labeled_attr(attr: Option<&str>, label: &str) -> FieldCandidate {
    let Some(text) = attr else { return FieldCandidate::default() };
    let Some((label_at, (s, e))) = addr::labeled_quad(text, label) else {
        return FieldCandidate::default();
    };
    let head = text[..label_at].trim();
    FieldCandidate {
        name: (!head.is_empty()).then(|| head.to_string()),
        address: Some(text[s..e].to_string()),
    }
}

/// 4. No label, but the value (or title) ends in whitespace + bare quad.
fn trailing_quad(ctx: &Ctx) -> FieldCandidate {
    for attr in [&ctx.attrs.value, &ctx.attrs.title] {
        let Some(text) = attr.as_deref() else { continue };
        if let Some((s, e)) = addr::trailing_quad(text) {
            let head = text[..s].trim();
            return FieldCandidate {
                name: (!head.is_empty()).then(|| head.to_string()),
                address: Some(text[s..e].to_string()),
            };
        }
    }
    FieldCandidate::default()
}

/// 5. Last resort: any quad anywhere in the handler text or either display
///    attribute. No name inference at this level.
fn any_quad(ctx: &Ctx) -> FieldCandidate {
    let raw_call = ctx.attrs.onclick.as_deref();
    for text in [raw_call, ctx.attrs.value.as_deref(), ctx.attrs.title.as_deref()] {
        let Some(text) = text else { continue };
        if let Some((s, e)) = addr::find_quad(text) {
            return FieldCandidate { name: None, address: Some(text[s..e].to_string()) };
        }
    }
    FieldCandidate::default()
}
