//! The closed set of edit and setting actions.
//!
//! [`Action`] is both the interpreter's output and the executor's input. Its
//! serde form is the wire schema the planning service is asked to produce:
//! one JSON object per action, discriminated by `action` (or `kind`), with
//! camelCase fields.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// `oldText` value that matches any current text.
pub const ANY_TEXT: &str = "*";

fn any_text() -> String {
    ANY_TEXT.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Action {
    ChangeText {
        file: PathBuf,
        selector: String,
        #[serde(default = "any_text")]
        old_text: String,
        new_text: String,
    },
    AddBlock {
        file: PathBuf,
        parent_selector: String,
        html_block: String,
    },
    UpdateImage {
        file: PathBuf,
        selector: String,
        new_src: String,
    },
    ChangeStyle {
        file: PathBuf,
        selector: String,
        property: String,
        value: String,
    },
    ModifyStyle {
        file: PathBuf,
        selector: String,
        style: String,
    },
    ModifyAttribute {
        file: PathBuf,
        selector: String,
        attribute: String,
        value: String,
    },
    AddAttribute {
        file: PathBuf,
        selector: String,
        attribute: String,
        #[serde(default)]
        value: String,
    },
    RemoveAttribute {
        file: PathBuf,
        selector: String,
        attribute: String,
    },
    Backup {
        file: PathBuf,
        #[serde(deserialize_with = "string_or_number")]
        timestamp: String,
    },
    ApplyTemplate {
        file: PathBuf,
        template_type: String,
    },
    AddAnimation {
        file: PathBuf,
        selector: String,
        animation_type: String,
    },
    ChangeTheme {
        theme: String,
    },
    ChangeFontSize {
        size: String,
    },
    ChangeLanguage {
        language: String,
    },
    SetAutoSave {
        enabled: bool,
    },
    ShowShortcuts,
    ShowFileHistory,
    ExportSettings,
    ImportSettings,
    SetNotifications {
        enabled: bool,
    },
    SetFullscreen {
        enabled: bool,
    },
    ShowHelp,
    ShowAbout,
    ResetSettings,
}

/// Every wire discriminator, in declaration order.
pub const ACTION_KINDS: &[&str] = &[
    "changeText",
    "addBlock",
    "updateImage",
    "changeStyle",
    "modifyStyle",
    "modifyAttribute",
    "addAttribute",
    "removeAttribute",
    "backup",
    "applyTemplate",
    "addAnimation",
    "changeTheme",
    "changeFontSize",
    "changeLanguage",
    "setAutoSave",
    "showShortcuts",
    "showFileHistory",
    "exportSettings",
    "importSettings",
    "setNotifications",
    "setFullscreen",
    "showHelp",
    "showAbout",
    "resetSettings",
];

#[derive(Debug, Error, PartialEq)]
pub enum ActionError {
    #[error("action is not a JSON object")]
    NotAnObject,
    #[error("action has no 'action' or 'kind' field")]
    MissingKind,
    #[error("Unknown action: {0}")]
    UnknownKind(String),
    #[error("invalid {kind} action: {reason}")]
    Invalid { kind: String, reason: String },
}

impl ActionError {
    /// Discriminator of the offending action, when one was present.
    pub fn kind(&self) -> Option<&str> {
        match self {
            ActionError::UnknownKind(kind) | ActionError::Invalid { kind, .. } => Some(kind),
            ActionError::NotAnObject | ActionError::MissingKind => None,
        }
    }
}

impl Action {
    /// Decode one wire object, accepting `kind` as an alias for `action`.
    pub fn from_wire(value: Value) -> Result<Action, ActionError> {
        let Value::Object(mut map) = value else {
            return Err(ActionError::NotAnObject);
        };

        let kind = match map.get("action").or_else(|| map.get("kind")) {
            Some(Value::String(kind)) => kind.clone(),
            Some(other) => other.to_string(),
            None => return Err(ActionError::MissingKind),
        };

        if !ACTION_KINDS.contains(&kind.as_str()) {
            return Err(ActionError::UnknownKind(kind));
        }

        map.remove("kind");
        map.insert("action".to_string(), Value::String(kind.clone()));

        serde_json::from_value(Value::Object(map)).map_err(|e| ActionError::Invalid {
            kind,
            reason: e.to_string(),
        })
    }

    /// Wire discriminator for this action.
    pub fn kind(&self) -> &'static str {
        match self {
            Action::ChangeText { .. } => "changeText",
            Action::AddBlock { .. } => "addBlock",
            Action::UpdateImage { .. } => "updateImage",
            Action::ChangeStyle { .. } => "changeStyle",
            Action::ModifyStyle { .. } => "modifyStyle",
            Action::ModifyAttribute { .. } => "modifyAttribute",
            Action::AddAttribute { .. } => "addAttribute",
            Action::RemoveAttribute { .. } => "removeAttribute",
            Action::Backup { .. } => "backup",
            Action::ApplyTemplate { .. } => "applyTemplate",
            Action::AddAnimation { .. } => "addAnimation",
            Action::ChangeTheme { .. } => "changeTheme",
            Action::ChangeFontSize { .. } => "changeFontSize",
            Action::ChangeLanguage { .. } => "changeLanguage",
            Action::SetAutoSave { .. } => "setAutoSave",
            Action::ShowShortcuts => "showShortcuts",
            Action::ShowFileHistory => "showFileHistory",
            Action::ExportSettings => "exportSettings",
            Action::ImportSettings => "importSettings",
            Action::SetNotifications { .. } => "setNotifications",
            Action::SetFullscreen { .. } => "setFullscreen",
            Action::ShowHelp => "showHelp",
            Action::ShowAbout => "showAbout",
            Action::ResetSettings => "resetSettings",
        }
    }

    /// Target document, for document actions.
    pub fn file(&self) -> Option<&Path> {
        match self {
            Action::ChangeText { file, .. }
            | Action::AddBlock { file, .. }
            | Action::UpdateImage { file, .. }
            | Action::ChangeStyle { file, .. }
            | Action::ModifyStyle { file, .. }
            | Action::ModifyAttribute { file, .. }
            | Action::AddAttribute { file, .. }
            | Action::RemoveAttribute { file, .. }
            | Action::Backup { file, .. }
            | Action::ApplyTemplate { file, .. }
            | Action::AddAnimation { file, .. } => Some(file),
            _ => None,
        }
    }

    /// Element selector, for actions that target elements.
    pub fn selector(&self) -> Option<&str> {
        match self {
            Action::ChangeText { selector, .. }
            | Action::UpdateImage { selector, .. }
            | Action::ChangeStyle { selector, .. }
            | Action::ModifyStyle { selector, .. }
            | Action::ModifyAttribute { selector, .. }
            | Action::AddAttribute { selector, .. }
            | Action::RemoveAttribute { selector, .. }
            | Action::AddAnimation { selector, .. } => Some(selector),
            Action::AddBlock {
                parent_selector, ..
            } => Some(parent_selector),
            _ => None,
        }
    }
}

/// Accept `"20240101"` or `20240101` for fields the planner may emit as numbers.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {}",
            other
        ))),
    }
}
