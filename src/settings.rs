//! Acknowledgements for app-setting actions.
//!
//! Setting actions never touch the filesystem and are not persisted; each
//! returns a fixed message plus a payload echoing the requested value.

use serde_json::{json, Value};

use crate::actions::Action;

#[derive(Debug, Clone, PartialEq)]
pub struct Acknowledgement {
    pub message: String,
    pub details: Value,
}

impl Acknowledgement {
    fn new(message: impl Into<String>, details: Value) -> Self {
        Self {
            message: message.into(),
            details,
        }
    }
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "enabled"
    } else {
        "disabled"
    }
}

/// Build the acknowledgement for an action. Document actions are not
/// settings and get an empty payload naming their kind.
pub fn acknowledge(action: &Action) -> Acknowledgement {
    match action {
        Action::ChangeTheme { theme } => Acknowledgement::new(
            format!("Theme changed to {}", theme),
            json!({ "theme": theme }),
        ),
        Action::ChangeFontSize { size } => Acknowledgement::new(
            format!("Font size changed to {}", size),
            json!({ "size": size }),
        ),
        Action::ChangeLanguage { language } => Acknowledgement::new(
            format!("Language changed to {}", language),
            json!({ "language": language }),
        ),
        Action::SetAutoSave { enabled } => Acknowledgement::new(
            format!("Auto-save {}", on_off(*enabled)),
            json!({ "autoSave": enabled }),
        ),
        Action::SetNotifications { enabled } => Acknowledgement::new(
            format!("Notifications {}", on_off(*enabled)),
            json!({ "notifications": enabled }),
        ),
        Action::SetFullscreen { enabled } => Acknowledgement::new(
            format!("Fullscreen mode {}", on_off(*enabled)),
            json!({ "fullscreen": enabled }),
        ),
        Action::ImportSettings => Acknowledgement::new(
            "Settings imported successfully",
            json!({}),
        ),
        Action::ResetSettings => Acknowledgement::new(
            "Settings reset to default values",
            json!({ "settings": default_settings() }),
        ),
        Action::ShowShortcuts => Acknowledgement::new(
            "Keyboard shortcuts displayed",
            json!({
                "shortcuts": {
                    "Ctrl+S": "Save file",
                    "Ctrl+O": "Open file",
                    "Ctrl+N": "New file",
                    "Ctrl+Z": "Undo",
                    "Ctrl+Y": "Redo",
                    "F1": "Help",
                    "Ctrl+Shift+T": "Toggle theme",
                    "Ctrl+Shift+F": "Toggle fullscreen"
                }
            }),
        ),
        Action::ShowFileHistory => Acknowledgement::new(
            "File history displayed",
            json!({ "recentFiles": ["index.html", "about.html", "contact.html"] }),
        ),
        Action::ExportSettings => Acknowledgement::new(
            "Settings exported successfully",
            json!({ "settings": default_settings() }),
        ),
        Action::ShowHelp => Acknowledgement::new("Help displayed", json!({ "help": help() })),
        Action::ShowAbout => Acknowledgement::new(
            "About information displayed",
            json!({
                "about": {
                    "name": "SiteScribe",
                    "version": env!("CARGO_PKG_VERSION"),
                    "description": "Natural-language website editor",
                    "features": [
                        "Natural language commands",
                        "Rule-based fallback when no planner is configured",
                        "Page templates and animations",
                        "Timestamped backups"
                    ]
                }
            }),
        ),
        document => Acknowledgement::new(
            format!("{} edits a document, not a setting", document.kind()),
            json!({}),
        ),
    }
}

fn default_settings() -> Value {
    json!({
        "theme": "default",
        "fontSize": "medium",
        "language": "english",
        "autoSave": true,
        "notifications": true
    })
}

fn help() -> Value {
    json!({
        "title": "SiteScribe Help",
        "sections": [
            {
                "title": "Editing",
                "commands": [
                    "change heading to Welcome",
                    "change paragraph to Opening hours are 9 to 5",
                    "change text from Old to New",
                    "set background color to #f0f0f0",
                    "set font size to 18px",
                    "change image to hero.png"
                ]
            },
            {
                "title": "Forms",
                "commands": [
                    "add contact form",
                    "add email input with placeholder \"you@example.com\" required",
                    "add submit button labeled \"Send\"",
                    "make email field required"
                ]
            },
            {
                "title": "Styling",
                "commands": [
                    "apply modern template",
                    "add fade animation to heading",
                    "backup the page"
                ]
            },
            {
                "title": "App",
                "commands": [
                    "change theme to dark",
                    "show keyboard shortcuts",
                    "turn off notifications"
                ]
            }
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn echoes_requested_values() {
        let ack = acknowledge(&Action::ChangeTheme {
            theme: "dark".to_string(),
        });
        assert_eq!(ack.message, "Theme changed to dark");
        assert_eq!(ack.details["theme"], "dark");

        let ack = acknowledge(&Action::SetAutoSave { enabled: false });
        assert_eq!(ack.message, "Auto-save disabled");
        assert_eq!(ack.details["autoSave"], false);
    }

    #[test]
    fn display_requests_carry_their_payload() {
        let ack = acknowledge(&Action::ShowShortcuts);
        assert_eq!(ack.message, "Keyboard shortcuts displayed");
        assert_eq!(ack.details["shortcuts"]["F1"], "Help");
    }

    #[test]
    fn document_actions_are_named_not_acknowledged() {
        let action = Action::Backup {
            file: PathBuf::from("a.html"),
            timestamp: "1".to_string(),
        };
        let ack = acknowledge(&action);
        assert_eq!(ack.message, "backup edits a document, not a setting");
        assert_eq!(ack.details, json!({}));
    }
}
