//! Text-change matchers: heading, paragraph, and generic "change text".

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

use super::{capture, unquote, Command};
use crate::actions::{Action, ANY_TEXT};

static HEADING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:change|update|modify|set|edit)\s+(?:the\s+)?(?:main\s+)?(heading|h1|h2|h3)\b")
        .expect("heading regex must compile")
});

static PARAGRAPH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:change|update|modify|set|edit)\s+(?:the\s+)?(?:first\s+)?(?:paragraph|p)\b")
        .expect("paragraph regex must compile")
});

/// Replacement text directly after the element noun (`heading to X`,
/// `heading text to X`), ending at a trailing "and"/"with" clause. Anything
/// else between the noun and "to" (`heading color to red`) is not a text edit.
static REPLACEMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s+(?:(?:text|content|copy)\s+)?to\s+(.+?)(?:\s+(?:and|with)\s+.*)?$")
        .expect("replacement regex must compile")
});

static TEXT_VERB: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:change|modify|update|set|replace)\b.*\btext\b")
        .expect("text verb regex must compile")
});

static FROM_TO: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\bfrom\s+(".+?"|'.+?'|.+?)\s+to\s+(.+)$"#).expect("from-to regex must compile")
});

static TO_ANY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bto\s+(.+)$").expect("to regex must compile"));

/// Replacement text following the first match of `trigger`.
fn replacement_after(trigger: &Regex, cmd: &Command) -> Option<String> {
    let end = trigger.find(&cmd.raw)?.end();
    let text = capture(&REPLACEMENT, &cmd.raw[end..])?;
    let text = unquote(&text);
    (!text.is_empty()).then_some(text)
}

fn wildcard_change(file: &Path, selector: &str, new_text: String) -> Action {
    Action::ChangeText {
        file: file.to_path_buf(),
        selector: selector.to_string(),
        old_text: ANY_TEXT.to_string(),
        new_text,
    }
}

/// `change heading to Welcome` → `h1` (or the named level).
pub fn heading_text(cmd: &Command, file: &Path) -> Vec<Action> {
    let Some(caps) = HEADING.captures(&cmd.raw) else {
        return Vec::new();
    };
    let selector = match caps[1].to_ascii_lowercase().as_str() {
        "h2" => "h2",
        "h3" => "h3",
        _ => "h1",
    };
    match replacement_after(&HEADING, cmd) {
        Some(text) => vec![wildcard_change(file, selector, text)],
        None => Vec::new(),
    }
}

/// `change paragraph to ...` → `p`.
pub fn paragraph_text(cmd: &Command, file: &Path) -> Vec<Action> {
    match replacement_after(&PARAGRAPH, cmd) {
        Some(text) => vec![wildcard_change(file, "p", text)],
        None => Vec::new(),
    }
}

/// `change text from Old to New`, or `change button text to Go`.
pub fn generic_text(cmd: &Command, file: &Path) -> Vec<Action> {
    if !TEXT_VERB.is_match(&cmd.raw)
        || HEADING.is_match(&cmd.raw)
        || PARAGRAPH.is_match(&cmd.raw)
        || cmd.has_any(&["color", "colour", "size", "font"])
        || cmd.has_any(&["input", "field", "textbox", "placeholder"])
    {
        return Vec::new();
    }

    let selector = if cmd.has("heading") {
        "h1"
    } else if cmd.has("paragraph") {
        "p"
    } else if cmd.has("title") {
        "title"
    } else if cmd.has("button") {
        "button"
    } else if cmd.has("link") {
        "a"
    } else {
        "body"
    };

    if let Some(caps) = FROM_TO.captures(&cmd.raw) {
        let old_text = unquote(&caps[1]);
        let new_text = unquote(&caps[2]);
        if !old_text.is_empty() {
            return vec![Action::ChangeText {
                file: file.to_path_buf(),
                selector: selector.to_string(),
                old_text,
                new_text,
            }];
        }
    }

    match capture(&TO_ANY, &cmd.raw).map(|t| unquote(&t)) {
        Some(text) if !text.is_empty() => vec![wildcard_change(file, selector, text)],
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(f: fn(&Command, &Path) -> Vec<Action>, text: &str) -> Vec<Action> {
        f(&Command::new(text), Path::new("index.html"))
    }

    fn change(selector: &str, old: &str, new: &str) -> Action {
        Action::ChangeText {
            file: "index.html".into(),
            selector: selector.to_string(),
            old_text: old.to_string(),
            new_text: new.to_string(),
        }
    }

    #[test]
    fn heading_keeps_case_and_stops_at_and() {
        assert_eq!(
            run(heading_text, "Change heading to New Title"),
            vec![change("h1", "*", "New Title")]
        );
        assert_eq!(
            run(heading_text, "update the main heading to \"Hello\" and make it blue"),
            vec![change("h1", "*", "Hello")]
        );
        assert_eq!(
            run(heading_text, "change h2 to Services"),
            vec![change("h2", "*", "Services")]
        );
    }

    #[test]
    fn heading_without_replacement_is_ignored() {
        assert!(run(heading_text, "change heading").is_empty());
        assert!(run(heading_text, "add a heading").is_empty());
    }

    #[test]
    fn style_requests_are_not_text_edits() {
        assert!(run(heading_text, "change heading color to red").is_empty());
        assert!(run(heading_text, "change h2 font size to 24px").is_empty());
        assert!(run(paragraph_text, "change paragraph background to yellow").is_empty());
        assert_eq!(
            run(heading_text, "change heading text to Hello"),
            vec![change("h1", "*", "Hello")]
        );
    }

    #[test]
    fn paragraph_text_targets_p() {
        assert_eq!(
            run(paragraph_text, "change paragraph to Open 9 to 5"),
            vec![change("p", "*", "Open 9 to 5")]
        );
    }

    #[test]
    fn generic_from_to() {
        assert_eq!(
            run(generic_text, "replace text from 'Buy now' to 'Order today'"),
            vec![change("body", "Buy now", "Order today")]
        );
        assert_eq!(
            run(generic_text, "change button text to Go"),
            vec![change("button", "*", "Go")]
        );
        assert_eq!(
            run(generic_text, "set the title text to My Site"),
            vec![change("title", "*", "My Site")]
        );
    }

    #[test]
    fn generic_defers_to_specific_matchers() {
        assert!(run(generic_text, "change heading text to X").is_empty());
        assert!(run(generic_text, "change text color to red").is_empty());
        assert!(run(generic_text, "change text size to 18px").is_empty());
    }
}
