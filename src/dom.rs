//! Parsed markup document, edited in place.
//!
//! Edits go straight into the `scraper` node tree and the document is
//! written back with the html5ever serializer. Elements are addressed by
//! tree node id, which stays valid across edits.

use ego_tree::{NodeId, NodeMut, NodeRef};
use html5ever::serialize::{serialize, SerializeOpts, TraversalScope};
use html5ever::tendril::StrTendril;
use html5ever::{Attribute, LocalName, Namespace, QualName};
use scraper::node::{Doctype, Element, Text};
use scraper::{ElementRef, Html, Node, Selector};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomError {
    #[error("invalid selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },
    #[error("failed to serialize document: {0}")]
    Serialize(#[from] std::io::Error),
}

/// An element of a parsed [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementHandle(NodeId);

pub struct Document {
    html: Html,
}

impl Document {
    pub fn parse(source: &str) -> Self {
        Self {
            html: Html::parse_document(source),
        }
    }

    fn element(&self, handle: ElementHandle) -> Option<ElementRef<'_>> {
        self.html.tree.get(handle.0).and_then(ElementRef::wrap)
    }

    /// All elements matching `css`, in document order. Nodes detached by
    /// earlier edits are not reachable from the root and never match.
    pub fn select(&self, css: &str) -> Result<Vec<ElementHandle>, DomError> {
        let selector = Selector::parse(css).map_err(|e| DomError::InvalidSelector {
            selector: css.to_string(),
            reason: format!("{:?}", e),
        })?;

        Ok(self
            .html
            .tree
            .root()
            .descendants()
            .filter_map(ElementRef::wrap)
            .filter(|el| selector.matches(el))
            .map(|el| ElementHandle(el.id()))
            .collect())
    }

    pub fn first(&self, css: &str) -> Result<Option<ElementHandle>, DomError> {
        Ok(self.select(css)?.into_iter().next())
    }

    pub fn text(&self, handle: ElementHandle) -> String {
        self.element(handle)
            .map(|el| el.text().collect())
            .unwrap_or_default()
    }

    pub fn attr(&self, handle: ElementHandle, name: &str) -> Option<String> {
        self.element(handle)
            .and_then(|el| el.value().attr(name).map(str::to_string))
    }

    pub fn set_attr(&mut self, handle: ElementHandle, name: &str, value: &str) {
        self.rewrite_attrs(handle, |attrs| {
            let value = StrTendril::from_slice(value);
            match attrs.iter_mut().find(|attr| is_plain(&attr.name, name)) {
                Some(attr) => attr.value = value,
                None => attrs.push(Attribute {
                    name: QualName::new(None, Namespace::from(""), LocalName::from(name)),
                    value,
                }),
            }
        });
    }

    pub fn remove_attr(&mut self, handle: ElementHandle, name: &str) {
        self.rewrite_attrs(handle, |attrs| attrs.retain(|attr| !is_plain(&attr.name, name)));
    }

    /// Replace all children with a single text node.
    pub fn set_text(&mut self, handle: ElementHandle, text: &str) {
        let Some(mut node) = self.html.tree.get_mut(handle.0) else {
            return;
        };
        while let Some(mut child) = node.first_child() {
            child.detach();
        }
        node.append(text_node(text));
    }

    /// Append a text node as the last child.
    pub fn append_text(&mut self, handle: ElementHandle, text: &str) {
        if let Some(mut node) = self.html.tree.get_mut(handle.0) {
            node.append(text_node(text));
        }
    }

    /// Parse `fragment` in body context and append its nodes as the last
    /// children of the element.
    pub fn append_html(&mut self, handle: ElementHandle, fragment: &str) {
        let parsed = Html::parse_fragment(fragment);
        if let Some(mut node) = self.html.tree.get_mut(handle.0) {
            graft(&mut node, *parsed.root_element());
        }
    }

    pub fn add_class(&mut self, handle: ElementHandle, class: &str) {
        if class.is_empty() {
            return;
        }
        let current = self.attr(handle, "class").unwrap_or_default();
        if current.split_whitespace().any(|c| c == class) {
            return;
        }
        let updated = if current.trim().is_empty() {
            class.to_string()
        } else {
            format!("{} {}", current.trim(), class)
        };
        self.set_attr(handle, "class", &updated);
    }

    /// Rebuild the element around the edited attribute list so its cached
    /// id and class lookups follow the change.
    fn rewrite_attrs<F>(&mut self, handle: ElementHandle, edit: F)
    where
        F: FnOnce(&mut Vec<Attribute>),
    {
        let Some(mut node) = self.html.tree.get_mut(handle.0) else {
            return;
        };
        let Node::Element(element) = node.value() else {
            return;
        };
        let mut attrs: Vec<Attribute> = element
            .attrs
            .iter()
            .map(|(name, value)| Attribute {
                name: name.clone(),
                value: value.clone(),
            })
            .collect();
        edit(&mut attrs);
        *element = Element::new(element.name.clone(), attrs);
    }

    fn doctype(&self) -> Option<&Doctype> {
        self.html
            .tree
            .root()
            .children()
            .find_map(|node| node.value().as_doctype())
    }

    /// Serialize the full document.
    pub fn to_html(&self) -> Result<String, DomError> {
        // Parsing ran with scripting enabled, so `noscript` holds raw text.
        let opts = SerializeOpts {
            scripting_enabled: true,
            traversal_scope: TraversalScope::IncludeNode,
            create_missing_parent: false,
        };
        let mut buf = Vec::new();
        serialize(&mut buf, &self.html, opts)?;
        let html = String::from_utf8_lossy(&buf).into_owned();

        // The serializer writes only the doctype name.
        Ok(match self.doctype() {
            Some(doctype) if !doctype.public_id().is_empty() || !doctype.system_id().is_empty() => {
                html.replacen(
                    &format!("<!DOCTYPE {}>", doctype.name()),
                    &doctype_declaration(doctype),
                    1,
                )
            }
            _ => html,
        })
    }
}

fn is_plain(name: &QualName, local: &str) -> bool {
    name.ns.is_empty() && name.local.as_ref() == local
}

fn text_node(text: &str) -> Node {
    Node::Text(Text {
        text: StrTendril::from_slice(text),
    })
}

/// Deep-copy the children of `source` under `target`.
fn graft(target: &mut NodeMut<'_, Node>, source: NodeRef<'_, Node>) {
    for child in source.children() {
        let mut copy = target.append(child.value().clone());
        graft(&mut copy, child);
    }
}

fn doctype_declaration(doctype: &Doctype) -> String {
    let mut out = format!("<!DOCTYPE {}", doctype.name());
    match (doctype.public_id(), doctype.system_id()) {
        ("", system) => out.push_str(&format!(" SYSTEM \"{}\"", system)),
        (public, "") => out.push_str(&format!(" PUBLIC \"{}\"", public)),
        (public, system) => out.push_str(&format!(" PUBLIC \"{}\" \"{}\"", public, system)),
    }
    out.push('>');
    out
}
