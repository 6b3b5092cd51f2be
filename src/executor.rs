//! Action executor.
//!
//! Applies actions strictly in order. Every document action re-reads its
//! target from disk, mutates the parsed tree, and rewrites the whole file,
//! so later actions on the same file see earlier writes. Failures are
//! captured per action and never stop the remaining actions.

use serde_json::{json, Value};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::actions::{Action, ActionError, ANY_TEXT};
use crate::dom::{Document, DomError, ElementHandle};
use crate::models::{ActionResult, ActionStatus};
use crate::presets;
use crate::settings;
use crate::style::{overlay_patch, overlay_property};

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("No elements found with selector: {0}")]
    NoMatch(String),
    #[error("Parent element not found: {0}")]
    ParentNotFound(String),
    #[error(transparent)]
    Dom(#[from] DomError),
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Successful outcome of one action before it is turned into a result.
struct Applied {
    status: ActionStatus,
    message: String,
    details: Option<Value>,
}

impl Applied {
    fn modified(message: impl Into<String>) -> Self {
        Self {
            status: ActionStatus::Modified,
            message: message.into(),
            details: None,
        }
    }

    fn unchanged(message: impl Into<String>) -> Self {
        Self {
            status: ActionStatus::NoChange,
            message: message.into(),
            details: None,
        }
    }

    fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// Apply `actions` in order, producing one result per action.
pub fn apply_actions(actions: &[Action]) -> Vec<ActionResult> {
    actions.iter().map(apply_action).collect()
}

/// Decode and apply raw wire actions. Items that fail to decode (including
/// unknown kinds) become error results in place.
pub fn apply_wire(plan: Vec<Value>) -> Vec<ActionResult> {
    plan.into_iter()
        .map(|raw| {
            let file = raw.get("file").and_then(Value::as_str).map(PathBuf::from);
            let selector = raw
                .get("selector")
                .or_else(|| raw.get("parentSelector"))
                .and_then(Value::as_str)
                .map(str::to_string);
            match Action::from_wire(raw) {
                Ok(action) => apply_action(&action),
                Err(e) => decode_failure(e, file, selector),
            }
        })
        .collect()
}

fn decode_failure(e: ActionError, file: Option<PathBuf>, selector: Option<String>) -> ActionResult {
    tracing::warn!(error = %e, "rejected action");
    let kind = e.kind().unwrap_or("unknown").to_string();
    let message = e.to_string();
    ActionResult {
        kind,
        file,
        selector,
        status: ActionStatus::Error,
        message: message.clone(),
        error: Some(message),
        details: None,
    }
}

/// Apply a single action, converting any failure into an error result.
pub fn apply_action(action: &Action) -> ActionResult {
    let kind = action.kind().to_string();
    let file = action.file().map(Path::to_path_buf);
    let selector = action.selector().map(str::to_string);

    match execute(action) {
        Ok(applied) => {
            tracing::debug!(kind = %kind, message = %applied.message, "action applied");
            ActionResult {
                kind,
                file,
                selector,
                status: applied.status,
                message: applied.message,
                error: None,
                details: applied.details,
            }
        }
        Err(e) => {
            tracing::warn!(kind = %kind, error = %e, "action failed");
            let error = e.to_string();
            ActionResult {
                kind,
                file,
                selector,
                status: ActionStatus::Error,
                message: format!("Failed to apply action: {}", error),
                error: Some(error),
                details: None,
            }
        }
    }
}

fn execute(action: &Action) -> Result<Applied, ExecError> {
    match action {
        Action::ChangeText {
            file,
            selector,
            old_text,
            new_text,
        } => change_text(file, selector, old_text, new_text),
        Action::AddBlock {
            file,
            parent_selector,
            html_block,
        } => add_block(file, parent_selector, html_block),
        Action::UpdateImage {
            file,
            selector,
            new_src,
        } => edit_document(file, |doc| {
            let images = matching(doc, selector)?;
            for &img in &images {
                doc.set_attr(img, "src", new_src);
            }
            Ok(Applied::modified(format!(
                "Updated src on {} image(s)",
                images.len()
            )))
        }),
        Action::ChangeStyle {
            file,
            selector,
            property,
            value,
        } => edit_document(file, |doc| {
            let targets = matching(doc, selector)?;
            for &el in &targets {
                let current = doc.attr(el, "style").unwrap_or_default();
                doc.set_attr(el, "style", &overlay_property(&current, property, value));
            }
            Ok(Applied::modified(format!(
                "Set {} on {} element(s)",
                property,
                targets.len()
            )))
        }),
        Action::ModifyStyle {
            file,
            selector,
            style,
        } => edit_document(file, |doc| {
            let targets = matching(doc, selector)?;
            for &el in &targets {
                let current = doc.attr(el, "style").unwrap_or_default();
                doc.set_attr(el, "style", &overlay_patch(&current, style));
            }
            Ok(Applied::modified(format!(
                "Updated style on {} element(s)",
                targets.len()
            )))
        }),
        Action::ModifyAttribute {
            file,
            selector,
            attribute,
            value,
        }
        | Action::AddAttribute {
            file,
            selector,
            attribute,
            value,
        } => edit_document(file, |doc| {
            let targets = matching(doc, selector)?;
            for &el in &targets {
                doc.set_attr(el, attribute, value);
            }
            Ok(Applied::modified(format!(
                "Set {} on {} element(s)",
                attribute,
                targets.len()
            )))
        }),
        Action::RemoveAttribute {
            file,
            selector,
            attribute,
        } => edit_document(file, |doc| {
            let targets = matching(doc, selector)?;
            for &el in &targets {
                doc.remove_attr(el, attribute);
            }
            Ok(Applied::modified(format!(
                "Removed {} from {} element(s)",
                attribute,
                targets.len()
            )))
        }),
        Action::Backup { file, timestamp } => backup(file, timestamp),
        Action::ApplyTemplate {
            file,
            template_type,
        } => apply_template(file, template_type),
        Action::AddAnimation {
            file,
            selector,
            animation_type,
        } => add_animation(file, selector, animation_type),
        Action::ChangeTheme { .. }
        | Action::ChangeFontSize { .. }
        | Action::ChangeLanguage { .. }
        | Action::SetAutoSave { .. }
        | Action::ShowShortcuts
        | Action::ShowFileHistory
        | Action::ExportSettings
        | Action::ImportSettings
        | Action::SetNotifications { .. }
        | Action::SetFullscreen { .. }
        | Action::ShowHelp
        | Action::ShowAbout
        | Action::ResetSettings => Ok(acknowledge_setting(action)),
    }
}

/// Setting actions always succeed.
fn acknowledge_setting(action: &Action) -> Applied {
    let ack = settings::acknowledge(action);
    Applied::modified(ack.message).with_details(ack.details)
}

fn read_document(file: &Path) -> Result<Document, ExecError> {
    let source = std::fs::read_to_string(file).map_err(|source| ExecError::Read {
        path: file.to_path_buf(),
        source,
    })?;
    Ok(Document::parse(&source))
}

fn write_document(file: &Path, doc: &Document) -> Result<(), ExecError> {
    std::fs::write(file, doc.to_html()?).map_err(|source| ExecError::Write {
        path: file.to_path_buf(),
        source,
    })
}

/// Read `file`, run `edit`, and rewrite the whole file when the edit
/// reports a modification.
fn edit_document<F>(file: &Path, edit: F) -> Result<Applied, ExecError>
where
    F: FnOnce(&mut Document) -> Result<Applied, ExecError>,
{
    let mut doc = read_document(file)?;
    let applied = edit(&mut doc)?;
    if applied.status == ActionStatus::Modified {
        write_document(file, &doc)?;
    }
    Ok(applied)
}

fn matching(doc: &Document, selector: &str) -> Result<Vec<ElementHandle>, ExecError> {
    let found = doc.select(selector)?;
    if found.is_empty() {
        return Err(ExecError::NoMatch(selector.to_string()));
    }
    Ok(found)
}

fn change_text(
    file: &Path,
    selector: &str,
    old_text: &str,
    new_text: &str,
) -> Result<Applied, ExecError> {
    edit_document(file, |doc| {
        let targets = matching(doc, selector)?;
        let mut changed = 0usize;
        for &el in &targets {
            if old_text == ANY_TEXT {
                doc.set_text(el, new_text);
                changed += 1;
                continue;
            }
            let current = doc.text(el);
            if current.contains(old_text) {
                doc.set_text(el, &current.replacen(old_text, new_text, 1));
                changed += 1;
            }
        }
        // Reported as modified even when no element contained the old text.
        Ok(Applied::modified(format!(
            "Changed text in {} of {} element(s)",
            changed,
            targets.len()
        ))
        .with_details(json!({ "matched": targets.len(), "changed": changed })))
    })
}

fn add_block(file: &Path, parent_selector: &str, html_block: &str) -> Result<Applied, ExecError> {
    edit_document(file, |doc| {
        let parents = doc.select(parent_selector)?;
        if parents.is_empty() {
            return Err(ExecError::ParentNotFound(parent_selector.to_string()));
        }
        for &parent in &parents {
            doc.append_html(parent, html_block);
        }
        Ok(Applied::modified(format!(
            "Appended block to {} element(s)",
            parents.len()
        )))
    })
}

fn backup(file: &Path, timestamp: &str) -> Result<Applied, ExecError> {
    let contents = std::fs::read(file).map_err(|source| ExecError::Read {
        path: file.to_path_buf(),
        source,
    })?;

    let mut name = OsString::from(file.as_os_str());
    name.push(format!(".backup.{}", timestamp));
    let backup_path = PathBuf::from(name);

    std::fs::write(&backup_path, contents).map_err(|source| ExecError::Write {
        path: backup_path.clone(),
        source,
    })?;

    Ok(
        Applied::modified(format!("Backup written to {}", backup_path.display()))
            .with_details(json!({ "backupPath": backup_path })),
    )
}

/// Write `css` into the first `<style>` element, either replacing its text
/// or appending to it, creating the element in `<head>` when absent.
fn write_style_block(doc: &mut Document, css: &str, replace: bool) -> Result<(), ExecError> {
    if let Some(style) = doc.first("style")? {
        if replace {
            doc.set_text(style, css);
        } else {
            doc.append_text(style, css);
        }
        return Ok(());
    }

    let container = match doc.first("head")? {
        Some(head) => head,
        None => doc
            .first("body")?
            .ok_or_else(|| ExecError::ParentNotFound("head".to_string()))?,
    };
    doc.append_html(container, &format!("<style>{}</style>", css));
    Ok(())
}

fn apply_template(file: &Path, template: &str) -> Result<Applied, ExecError> {
    edit_document(file, |doc| {
        let css = presets::template_css(template);
        write_style_block(doc, css, true)?;
        let message = if css.is_empty() {
            format!("Unknown template '{}'; style block cleared", template)
        } else {
            format!("Applied {} template", template)
        };
        Ok(Applied::modified(message))
    })
}

fn add_animation(file: &Path, selector: &str, animation: &str) -> Result<Applied, ExecError> {
    edit_document(file, |doc| {
        let targets = matching(doc, selector)?;
        let Some(preset) = presets::animation(animation) else {
            return Ok(Applied::unchanged(format!(
                "Unknown animation '{}'; nothing applied",
                animation
            )));
        };
        write_style_block(doc, preset.css, false)?;
        for &el in &targets {
            doc.add_class(el, preset.class);
        }
        Ok(Applied::modified(format!(
            "Added {} animation to {} element(s)",
            animation,
            targets.len()
        ))
        .with_details(json!({ "class": preset.class })))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn page(tmp: &TempDir, html: &str) -> PathBuf {
        let path = tmp.path().join("page.html");
        fs::write(&path, html).unwrap();
        path
    }

    #[test]
    fn change_text_wildcard_replaces_whole_text() {
        let tmp = TempDir::new().unwrap();
        let file = page(&tmp, "<h1>Old Title</h1>");
        let results = apply_actions(&[Action::ChangeText {
            file: file.clone(),
            selector: "h1".to_string(),
            old_text: ANY_TEXT.to_string(),
            new_text: "New Title".to_string(),
        }]);
        assert_eq!(results[0].status, ActionStatus::Modified);
        assert!(fs::read_to_string(&file)
            .unwrap()
            .contains("<h1>New Title</h1>"));
    }

    #[test]
    fn change_text_replaces_first_occurrence_only() {
        let tmp = TempDir::new().unwrap();
        let file = page(&tmp, "<p>cat and cat</p>");
        apply_actions(&[Action::ChangeText {
            file: file.clone(),
            selector: "p".to_string(),
            old_text: "cat".to_string(),
            new_text: "dog".to_string(),
        }]);
        assert!(fs::read_to_string(&file)
            .unwrap()
            .contains("<p>dog and cat</p>"));
    }

    #[test]
    fn change_text_without_occurrence_still_reports_modified() {
        let tmp = TempDir::new().unwrap();
        let file = page(&tmp, "<p>hello</p>");
        let results = apply_actions(&[Action::ChangeText {
            file,
            selector: "p".to_string(),
            old_text: "absent".to_string(),
            new_text: "x".to_string(),
        }]);
        assert_eq!(results[0].status, ActionStatus::Modified);
        assert_eq!(results[0].details.as_ref().unwrap()["changed"], 0);
    }

    #[test]
    fn no_match_is_an_error_and_processing_continues() {
        let tmp = TempDir::new().unwrap();
        let file = page(&tmp, "<p style=\"color: red; font-size: 12px\">x</p>");
        let results = apply_actions(&[
            Action::UpdateImage {
                file: file.clone(),
                selector: "img".to_string(),
                new_src: "a.png".to_string(),
            },
            Action::ChangeStyle {
                file: file.clone(),
                selector: "p".to_string(),
                property: "font-size".to_string(),
                value: "16px".to_string(),
            },
        ]);
        assert_eq!(results[0].status, ActionStatus::Error);
        assert_eq!(
            results[0].error.as_deref(),
            Some("No elements found with selector: img")
        );
        assert_eq!(results[1].status, ActionStatus::Modified);
        assert!(fs::read_to_string(&file)
            .unwrap()
            .contains("style=\"color: red; font-size: 16px\""));
    }

    #[test]
    fn later_actions_see_earlier_writes() {
        let tmp = TempDir::new().unwrap();
        let file = page(&tmp, "<body></body>");
        let results = apply_actions(&[
            Action::AddBlock {
                file: file.clone(),
                parent_selector: "body".to_string(),
                html_block: "<button id=\"go\">Go</button>".to_string(),
            },
            Action::AddAttribute {
                file: file.clone(),
                selector: "#go".to_string(),
                attribute: "disabled".to_string(),
                value: "disabled".to_string(),
            },
        ]);
        assert!(results.iter().all(|r| !r.is_error()));
        assert!(fs::read_to_string(&file)
            .unwrap()
            .contains("<button id=\"go\" disabled=\"disabled\">Go</button>"));
    }

    #[test]
    fn modify_style_patch_wins() {
        let tmp = TempDir::new().unwrap();
        let file = page(&tmp, "<div style=\"color: red; margin: 0\">x</div>");
        apply_actions(&[Action::ModifyStyle {
            file: file.clone(),
            selector: "div".to_string(),
            style: "color: blue; padding: 4px".to_string(),
        }]);
        assert!(fs::read_to_string(&file)
            .unwrap()
            .contains("style=\"color: blue; margin: 0; padding: 4px\""));
    }

    #[test]
    fn rewrite_keeps_doctype_and_svg_attributes() {
        let tmp = TempDir::new().unwrap();
        let doctype = "<!DOCTYPE html PUBLIC \"-//W3C//DTD XHTML 1.0 Strict//EN\" \
            \"http://www.w3.org/TR/xhtml1/DTD/xhtml1-strict.dtd\">";
        let file = page(
            &tmp,
            &format!(
                "{}<html><head></head><body><h1>Hi</h1><svg><use xlink:href=\"#icon\"></use></svg></body></html>",
                doctype
            ),
        );
        let results = apply_actions(&[Action::ChangeStyle {
            file: file.clone(),
            selector: "h1".to_string(),
            property: "color".to_string(),
            value: "teal".to_string(),
        }]);
        assert_eq!(results[0].status, ActionStatus::Modified);
        let html = fs::read_to_string(&file).unwrap();
        assert!(html.starts_with(doctype));
        assert!(html.contains("<h1 style=\"color: teal\">Hi</h1>"));
        assert!(html.contains("<use xlink:href=\"#icon\">"));
    }

    #[test]
    fn remove_attribute_drops_it() {
        let tmp = TempDir::new().unwrap();
        let file = page(&tmp, "<input name=\"email\" required=\"\">");
        apply_actions(&[Action::RemoveAttribute {
            file: file.clone(),
            selector: "input[name=\"email\"]".to_string(),
            attribute: "required".to_string(),
        }]);
        assert!(fs::read_to_string(&file)
            .unwrap()
            .contains("<input name=\"email\">"));
    }

    #[test]
    fn backup_copies_to_timestamped_sibling() {
        let tmp = TempDir::new().unwrap();
        let file = page(&tmp, "<p>keep</p>");
        let results = apply_actions(&[Action::Backup {
            file: file.clone(),
            timestamp: "20240101".to_string(),
        }]);
        let backup = tmp.path().join("page.html.backup.20240101");
        assert_eq!(fs::read_to_string(backup).unwrap(), "<p>keep</p>");
        assert_eq!(results[0].status, ActionStatus::Modified);
    }

    #[test]
    fn backup_of_missing_file_fails() {
        let tmp = TempDir::new().unwrap();
        let results = apply_actions(&[Action::Backup {
            file: tmp.path().join("missing.html"),
            timestamp: "1".to_string(),
        }]);
        assert!(results[0].is_error());
    }

    #[test]
    fn template_creates_then_replaces_style_block() {
        let tmp = TempDir::new().unwrap();
        let file = page(&tmp, "<html><head></head><body></body></html>");
        apply_actions(&[Action::ApplyTemplate {
            file: file.clone(),
            template_type: "minimal".to_string(),
        }]);
        let html = fs::read_to_string(&file).unwrap();
        assert!(html.contains("<head><style>"));
        assert!(html.contains("font-weight: 300"));

        apply_actions(&[Action::ApplyTemplate {
            file: file.clone(),
            template_type: "unknown".to_string(),
        }]);
        let html = fs::read_to_string(&file).unwrap();
        assert!(html.contains("<style></style>"));
        assert_eq!(html.matches("<style>").count(), 1);
    }

    #[test]
    fn animation_appends_keyframes_and_class() {
        let tmp = TempDir::new().unwrap();
        let file = page(
            &tmp,
            "<html><head><style>p { margin: 0; }</style></head><body><h1>Hi</h1></body></html>",
        );
        let results = apply_actions(&[Action::AddAnimation {
            file: file.clone(),
            selector: "h1".to_string(),
            animation_type: "fade".to_string(),
        }]);
        assert_eq!(results[0].status, ActionStatus::Modified);
        let html = fs::read_to_string(&file).unwrap();
        assert!(html.contains("p { margin: 0; }\n.fade-in"));
        assert!(html.contains("<h1 class=\"fade-in\">Hi</h1>"));
    }

    #[test]
    fn settings_never_touch_files() {
        let results = apply_actions(&[
            Action::ChangeTheme {
                theme: "dark".to_string(),
            },
            Action::ShowHelp,
        ]);
        assert_eq!(results[0].status, ActionStatus::Modified);
        assert_eq!(results[0].message, "Theme changed to dark");
        assert!(results[0].file.is_none());
        assert_eq!(results[1].status, ActionStatus::Modified);
        assert_eq!(results[1].message, "Help displayed");
        assert!(results[1].details.as_ref().unwrap()["help"]["sections"].is_array());
    }

    #[test]
    fn unknown_wire_kind_becomes_single_error_result() {
        let results = apply_wire(vec![json!({"action": "teleport", "file": "x.html"})]);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].status, ActionStatus::Error);
        assert_eq!(results[0].kind, "teleport");
        assert!(results[0].error.as_ref().unwrap().contains("teleport"));
    }
}
