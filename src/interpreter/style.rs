//! Style matchers: background color, text color, font size.

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

use super::{capture, context_selector, Command};
use crate::actions::Action;

/// Trailing value after to/as/set/make, e.g. `... to #f0f0f0`.
static TRAILING_VALUE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:to|as|set|make)\s+([#\w(),.%-]+)\s*$").expect("value regex must compile")
});

/// Trailing size, e.g. `... to 1.5rem`. The leading `\b` keeps tag digits
/// such as the `2` in `h2` out of the value.
static FONT_SIZE_VALUE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(\d+(?:\.\d+)?)\s*(px|em|rem|pt|%)?\s*$").expect("font size regex must compile")
});

const BACKGROUND_KEYWORDS: &[&str] = &["background", "bgcolor"];
const FIELD_KEYWORDS: &[&str] = &["input", "field", "textbox", "text box"];

fn trailing_value(cmd: &Command, rejected: &[&str]) -> Option<String> {
    let value = capture(&TRAILING_VALUE, &cmd.raw)?;
    let lower = value.to_lowercase();
    // A trigger keyword captured as its own value is not a color.
    if rejected.contains(&lower.as_str()) {
        return None;
    }
    Some(value)
}

fn style(file: &Path, selector: &str, property: &str, value: String) -> Action {
    Action::ChangeStyle {
        file: file.to_path_buf(),
        selector: selector.to_string(),
        property: property.to_string(),
        value,
    }
}

/// `set background color to #eee` → `body { background-color }`.
pub fn background_color(cmd: &Command, file: &Path) -> Vec<Action> {
    if !cmd.has_any(BACKGROUND_KEYWORDS) || cmd.has_any(FIELD_KEYWORDS) {
        return Vec::new();
    }
    match trailing_value(cmd, &["background", "bgcolor", "background-color", "color"]) {
        Some(value) => vec![style(file, "body", "background-color", value)],
        None => Vec::new(),
    }
}

/// `change heading color to red`. Never fires alongside a background request.
pub fn text_color(cmd: &Command, file: &Path) -> Vec<Action> {
    if cmd.has_any(BACKGROUND_KEYWORDS)
        || cmd.has_any(FIELD_KEYWORDS)
        || !cmd.has_any(&["color", "colour"])
    {
        return Vec::new();
    }
    match trailing_value(cmd, &["color", "colour", "text"]) {
        Some(value) => vec![style(file, context_selector(cmd, "body"), "color", value)],
        None => Vec::new(),
    }
}

/// `set font size to 18px`. Sizes without a number are app settings.
pub fn font_size(cmd: &Command, file: &Path) -> Vec<Action> {
    if !cmd.has_any(&["font size", "font-size", "text size"]) {
        return Vec::new();
    }
    let Some(caps) = FONT_SIZE_VALUE.captures(&cmd.raw) else {
        return Vec::new();
    };
    let unit = caps.get(2).map_or("px", |m| m.as_str());
    let value = format!("{}{}", &caps[1], unit.to_ascii_lowercase());
    vec![style(file, context_selector(cmd, "body"), "font-size", value)]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(f: fn(&Command, &Path) -> Vec<Action>, text: &str) -> Vec<Action> {
        f(&Command::new(text), Path::new("index.html"))
    }

    fn expect(selector: &str, property: &str, value: &str) -> Vec<Action> {
        vec![style(Path::new("index.html"), selector, property, value.to_string())]
    }

    #[test]
    fn background_value_is_extracted() {
        assert_eq!(
            run(background_color, "set background color to #F0F0F0"),
            expect("body", "background-color", "#F0F0F0")
        );
        assert_eq!(
            run(background_color, "make the bgcolor as rgb(1,2,3)"),
            expect("body", "background-color", "rgb(1,2,3)")
        );
    }

    #[test]
    fn background_rejects_its_own_keyword() {
        assert!(run(background_color, "set background to background").is_empty());
        assert!(run(text_color, "set background to background").is_empty());
    }

    #[test]
    fn background_suppresses_text_color() {
        assert!(run(text_color, "set background color to blue").is_empty());
        assert_eq!(run(background_color, "set background color to blue").len(), 1);
    }

    #[test]
    fn text_color_uses_context() {
        assert_eq!(
            run(text_color, "change heading color to red"),
            expect("h1", "color", "red")
        );
        assert_eq!(run(text_color, "change color to navy"), expect("body", "color", "navy"));
        assert!(run(text_color, "change text to color").is_empty());
    }

    #[test]
    fn field_colors_are_left_to_field_matcher() {
        assert!(run(background_color, "make email field background to yellow").is_empty());
    }

    #[test]
    fn font_size_units() {
        assert_eq!(
            run(font_size, "set font size to 18"),
            expect("body", "font-size", "18px")
        );
        assert_eq!(
            run(font_size, "change paragraph text size to 1.2 REM"),
            expect("p", "font-size", "1.2rem")
        );
        assert!(run(font_size, "make font size large").is_empty());
    }

    #[test]
    fn font_size_ignores_digits_in_tag_names() {
        assert_eq!(
            run(font_size, "change h2 font size to 24px"),
            expect("h2", "font-size", "24px")
        );
        assert_eq!(
            run(font_size, "set h3 font size to 120%"),
            expect("h3", "font-size", "120%")
        );
        assert!(run(font_size, "change h2 font size to big").is_empty());
    }
}
