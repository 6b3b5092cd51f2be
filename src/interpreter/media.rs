//! Image, template, animation and backup matchers.

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

use super::{capture, context_selector, Command};
use crate::actions::Action;
use crate::presets::{ANIMATION_NAMES, TEMPLATE_NAMES};

static IMAGE_SOURCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\b(?:to|with|use)\s+["']?(https?://\S+?|[\w./-]+\.(?:png|jpe?g|gif|svg|webp|avif))["']?\s*$"#)
        .expect("image source regex must compile")
});

/// `change image to logo.png`.
pub fn image(cmd: &Command, file: &Path) -> Vec<Action> {
    if !cmd.has_any_word(&["image", "img", "picture", "photo", "logo"])
        || !cmd.has_any_word(&["change", "update", "replace", "set", "swap"])
    {
        return Vec::new();
    }
    match capture(&IMAGE_SOURCE, &cmd.raw) {
        Some(new_src) => vec![Action::UpdateImage {
            file: file.to_path_buf(),
            selector: "img".to_string(),
            new_src,
        }],
        None => Vec::new(),
    }
}

/// `apply modern template`. Unnamed templates default to `modern`.
pub fn template(cmd: &Command, file: &Path) -> Vec<Action> {
    if !cmd.has_word("template") {
        return Vec::new();
    }
    let name = TEMPLATE_NAMES
        .iter()
        .find(|name| cmd.has_word(name))
        .copied()
        .unwrap_or("modern");
    vec![Action::ApplyTemplate {
        file: file.to_path_buf(),
        template_type: name.to_string(),
    }]
}

/// `add fade animation to heading`.
pub fn animation(cmd: &Command, file: &Path) -> Vec<Action> {
    if !cmd.has_any(&["animation", "animate"]) {
        return Vec::new();
    }
    let name = ANIMATION_NAMES
        .iter()
        .copied()
        .find(|name| cmd.has(name))
        .or_else(|| cmd.has("spin").then_some("rotate"));
    match name {
        Some(name) => vec![Action::AddAnimation {
            file: file.to_path_buf(),
            selector: context_selector(cmd, "body").to_string(),
            animation_type: name.to_string(),
        }],
        None => Vec::new(),
    }
}

/// `backup the page`.
pub fn backup(cmd: &Command, file: &Path) -> Vec<Action> {
    if !cmd.has_any(&["backup", "back up", "back-up"]) {
        return Vec::new();
    }
    vec![Action::Backup {
        file: file.to_path_buf(),
        timestamp: cmd.timestamp.clone(),
    }]
}
