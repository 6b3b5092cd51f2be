//! Structural selector builder.
//!
//! Computes a child-combinator path (`body > div#main.card > h1`) for an
//! element so it can be located again later. The path excludes the `html`
//! root. Structurally identical siblings collapse to the same selector, so
//! re-applying a selector yields a superset containing the original element.

use scraper::node::Element;
use scraper::ElementRef;

/// Build the selector path for `element`, from the first child of `html`
/// down to the element itself. Always returns at least one segment.
pub fn build_selector(element: ElementRef<'_>) -> String {
    let mut parts = vec![segment(element.value())];
    let mut current = element.parent().and_then(ElementRef::wrap);

    while let Some(ancestor) = current {
        if ancestor.value().name() == "html" {
            break;
        }
        parts.push(segment(ancestor.value()));
        current = ancestor.parent().and_then(ElementRef::wrap);
    }

    parts.reverse();
    parts.join(" > ")
}

/// One path segment: `tag[#id][.class...]`.
fn segment(element: &Element) -> String {
    let mut part = element.name().to_string();
    if let Some(id) = element.id().filter(|id| !id.is_empty()) {
        part.push('#');
        part.push_str(&escape_ident(id));
    }
    for class in element.classes() {
        part.push('.');
        part.push_str(&escape_ident(class));
    }
    part
}

/// Escape a CSS identifier so class names like `md:flex` or ids that start
/// with a digit still parse as selectors.
pub fn escape_ident(ident: &str) -> String {
    let mut out = String::with_capacity(ident.len());
    for (i, ch) in ident.chars().enumerate() {
        if ch.is_ascii_digit() && i == 0 {
            out.push_str(&format!("\\{:x} ", ch as u32));
        } else if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' || !ch.is_ascii() {
            out.push(ch);
        } else {
            out.push('\\');
            out.push(ch);
        }
    }
    out
}
