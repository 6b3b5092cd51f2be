//! The deterministic matcher cascade.
//!
//! Document matchers run in a fixed order and their outputs are
//! concatenated. Setting matchers are a second chance: they run only when no
//! document matcher produced anything, and they are the only matchers that
//! run when the index has no markup file to target.

use std::path::Path;

use super::{fields, forms, media, settings, style, text, Command};
use crate::actions::Action;

pub type DocumentMatcher = fn(&Command, &Path) -> Vec<Action>;
pub type SettingMatcher = fn(&Command) -> Option<Action>;

/// Document matchers in cascade order.
pub const DOCUMENT_MATCHERS: &[(&str, DocumentMatcher)] = &[
    ("background-color", style::background_color),
    ("text-color", style::text_color),
    ("font-size", style::font_size),
    ("heading-text", text::heading_text),
    ("paragraph-text", text::paragraph_text),
    ("generic-text", text::generic_text),
    ("input", forms::input),
    ("form", forms::form),
    ("button", forms::button),
    ("field", fields::modify_field),
    ("image", media::image),
    ("template", media::template),
    ("animation", media::animation),
    ("backup", media::backup),
];

pub const SETTING_MATCHERS: &[(&str, SettingMatcher)] = &[
    ("theme", settings::theme),
    ("font-size", settings::font_size),
    ("language", settings::language),
    ("auto-save", settings::auto_save),
    ("shortcuts", settings::shortcuts),
    ("file-history", settings::file_history),
    ("export-settings", settings::export_settings),
    ("import-settings", settings::import_settings),
    ("notifications", settings::notifications),
    ("fullscreen", settings::fullscreen),
    ("help", settings::help),
    ("about", settings::about),
    ("reset", settings::reset),
];

/// Run the cascade. `file` is the document targeted by document actions.
pub fn run(cmd: &Command, file: Option<&Path>) -> Vec<Action> {
    let mut actions = Vec::new();

    if let Some(file) = file {
        for (name, matcher) in DOCUMENT_MATCHERS {
            let found = matcher(cmd, file);
            if !found.is_empty() {
                tracing::debug!(matcher = name, actions = found.len(), "matcher fired");
            }
            actions.extend(found);
        }
    }

    if actions.is_empty() {
        for (name, matcher) in SETTING_MATCHERS {
            if let Some(action) = matcher(cmd) {
                tracing::debug!(matcher = name, "setting matcher fired");
                actions.push(action);
            }
        }
    }

    actions
}
