//! Field modification: locate an existing form field and change it.
//!
//! The field is resolved by the first identifier that matches, in order:
//! explicit name, id, placeholder, then a label-derived fuzzy lookup. Every
//! change mentioned in the command becomes its own action.

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

use super::forms::wants_input;
use super::{capture, unquoted_lower, Command};
use crate::actions::Action;
use crate::selector::escape_ident;

const VERBS: &[&str] = &["change", "modify", "update", "set", "make", "rename", "mark"];
const FIELD_WORDS: &[&str] = &["input", "field", "textbox", "label"];

/// Everyday field names and the fragment their `name`/`id` usually contains.
const SHORTCUTS: &[(&str, &str)] = &[
    ("first name", "first"),
    ("last name", "last"),
    ("full name", "name"),
    ("user name", "user"),
    ("username", "user"),
    ("e-mail", "email"),
    ("email", "email"),
    ("phone", "phone"),
    ("password", "password"),
    ("address", "address"),
    ("city", "city"),
    ("zip", "zip"),
    ("message", "message"),
];

/// Words that point at page content rather than a field.
const CONTENT_WORDS: &[&str] = &[
    "heading", "paragraph", "title", "text", "image", "button", "link", "form",
];

const TYPES: &[&str] = &[
    "text", "email", "password", "number", "tel", "url", "date", "time", "datetime-local",
    "search", "color", "range", "file", "checkbox", "radio", "hidden",
];

const FIELD_COLORS: &[(&str, &str)] = &[
    ("light blue", "#e3f2fd"),
    ("light green", "#e8f5e9"),
    ("light yellow", "#fffde7"),
    ("red", "#ffebee"),
    ("blue", "#e3f2fd"),
    ("green", "#e8f5e9"),
    ("yellow", "#fff9c4"),
    ("orange", "#fff3e0"),
    ("pink", "#fce4ec"),
    ("purple", "#f3e5f5"),
    ("gray", "#f5f5f5"),
    ("grey", "#f5f5f5"),
    ("white", "#ffffff"),
];

static BY_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\b(?:(?:field|input|textbox)\s+(?:with\s+(?:the\s+)?)?named?\s+|name\s*=\s*)["']?([\w-]+)"#)
        .expect("field name regex must compile")
});

static BY_ID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\bid\s*(?:=\s*|\s)["']?#?([\w-]+)"#).expect("field id regex must compile")
});

static BY_PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\bwith\s+placeholder\s+(?:"([^"]+)"|'([^']+)'|([\w-]+))"#)
        .expect("field placeholder regex must compile")
});

static BY_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b((?:[\w-]+\s+)?[\w-]+)\s+(?:field|input|textbox)\b").expect("field label regex must compile")
});

static LABEL_TO: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\b(?:label\s+to|rename\b.*?\bto)\s+(?:"([^"]+)"|'([^']+)'|([\w -]+?))(?:\s+and\b|$)"#)
        .expect("label regex must compile")
});

static NAME_TO: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\bname\s+to\s+(?:"([^"]+)"|'([^']+)'|([\w-]+))"#).expect("name regex must compile")
});

static PLACEHOLDER_TO: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\bplaceholder\s+(?:text\s+)?to\s+(?:"([^"]*)"|'([^']*)'|(.+?))(?:\s+and\b|$)"#)
        .expect("placeholder regex must compile")
});

static VALUE_TO: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\b(?:default\s+)?value\s+to\s+(?:"([^"]*)"|'([^']*)'|(\S+))"#)
        .expect("value regex must compile")
});

static TYPE_TO: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\btype\s+to\s+([\w-]+)").expect("type regex must compile"));

static MIN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bmin(?:imum)?\s+(?:to\s+|of\s+)?(-?\d+(?:\.\d+)?)").expect("min regex must compile")
});

static MAX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bmax(?:imum)?\s+(?:to\s+|of\s+)?(-?\d+(?:\.\d+)?)").expect("max regex must compile")
});

static STEP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bstep\s+(?:to\s+|of\s+)?(-?\d+(?:\.\d+)?)").expect("step regex must compile")
});

fn shortcut(text: &str) -> Option<&'static str> {
    SHORTCUTS
        .iter()
        .find(|(phrase, _)| text.contains(phrase))
        .map(|(_, key)| *key)
}

fn triggered(cmd: &Command) -> bool {
    if !cmd.has_any_word(VERBS) || wants_input(cmd) {
        return false;
    }
    cmd.has_any_word(FIELD_WORDS)
        || (shortcut(&unquoted_lower(cmd)).is_some() && !cmd.has_any_word(CONTENT_WORDS))
}

fn fuzzy(key: &str) -> String {
    format!("input[name*=\"{0}\"], input[id*=\"{0}\"]", key)
}

/// Selector for the field named in the command, if any identifier resolves.
fn field_selector(cmd: &Command) -> Option<String> {
    if let Some(name) = capture(&BY_NAME, &cmd.raw) {
        return Some(format!("input[name=\"{}\"]", name));
    }
    if let Some(id) = capture(&BY_ID, &cmd.raw).filter(|id| !id.eq_ignore_ascii_case("to")) {
        return Some(format!("#{}", escape_ident(&id)));
    }
    if let Some(placeholder) = capture(&BY_PLACEHOLDER, &cmd.raw) {
        return Some(format!(
            "input[placeholder*=\"{}\"]",
            placeholder.replace('"', "\\\"")
        ));
    }

    let lower = unquoted_lower(cmd);
    if let Some(phrase) = capture(&BY_LABEL, &lower) {
        if let Some(key) = shortcut(&phrase) {
            return Some(fuzzy(key));
        }
        let last = phrase.split_whitespace().last()?;
        if !VERBS.contains(&last) && !["the", "a", "an"].contains(&last) {
            return Some(fuzzy(last));
        }
    }
    shortcut(&lower).map(fuzzy)
}

fn slug(label: &str) -> String {
    label
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

/// `name to X`, unless the "name" belongs to a shortcut like "first name".
fn renamed(cmd: &Command) -> Option<String> {
    let caps = NAME_TO.captures(&cmd.raw)?;
    let start = caps.get(0)?.start();
    let before = cmd.raw[..start].trim_end().to_lowercase();
    if ["first", "last", "full", "user"].iter().any(|w| before.ends_with(w)) {
        return None;
    }
    caps.iter()
        .skip(1)
        .flatten()
        .map(|m| m.as_str().to_string())
        .next()
}

/// Every change the command asks for, against `selector`.
fn field_changes(cmd: &Command, file: &Path, selector: &str) -> Vec<Action> {
    let set = |attribute: &str, value: String| Action::ModifyAttribute {
        file: file.to_path_buf(),
        selector: selector.to_string(),
        attribute: attribute.to_string(),
        value,
    };
    let add = |attribute: &str| Action::AddAttribute {
        file: file.to_path_buf(),
        selector: selector.to_string(),
        attribute: attribute.to_string(),
        value: String::new(),
    };
    let remove = |attribute: &str| Action::RemoveAttribute {
        file: file.to_path_buf(),
        selector: selector.to_string(),
        attribute: attribute.to_string(),
    };

    let mut actions = Vec::new();

    if let Some(label) = capture(&LABEL_TO, &cmd.raw) {
        actions.push(set("name", slug(&label)));
    }
    if let Some(name) = renamed(cmd) {
        actions.push(set("name", name));
    }
    if let Some(placeholder) = capture(&PLACEHOLDER_TO, &cmd.raw) {
        actions.push(set("placeholder", placeholder));
    }
    if let Some(value) = capture(&VALUE_TO, &cmd.raw) {
        actions.push(set("value", value));
    }
    if let Some(kind) = capture(&TYPE_TO, &cmd.raw).map(|t| t.to_lowercase()) {
        if TYPES.contains(&kind.as_str()) {
            actions.push(set("type", kind));
        }
    }

    if cmd.has("not required") || cmd.has_word("optional") {
        actions.push(remove("required"));
    } else if cmd.has_word("required") {
        actions.push(add("required"));
    }

    if cmd.has_any_word(&["enable", "enabled"]) {
        actions.push(remove("disabled"));
    } else if cmd.has_any_word(&["disable", "disabled"]) {
        actions.push(add("disabled"));
    }

    if cmd.has_any(&["readonly", "read-only", "read only"]) {
        actions.push(add("readonly"));
    }

    for (attribute, re) in [("min", &MIN), ("max", &MAX), ("step", &STEP)] {
        if let Some(n) = capture(re, &cmd.raw) {
            actions.push(set(attribute, n));
        }
    }

    if cmd.has("background") {
        let lower = unquoted_lower(cmd);
        if let Some((_, hex)) = FIELD_COLORS.iter().find(|(name, _)| lower.contains(name)) {
            actions.push(Action::ModifyStyle {
                file: file.to_path_buf(),
                selector: selector.to_string(),
                style: format!("background-color: {}", hex),
            });
        }
    }

    actions
}

/// `make email field required`, `change the input named q placeholder to "Find"`.
pub fn modify_field(cmd: &Command, file: &Path) -> Vec<Action> {
    if !triggered(cmd) {
        return Vec::new();
    }
    match field_selector(cmd) {
        Some(selector) => field_changes(cmd, file, &selector),
        None => Vec::new(),
    }
}
