//! Core data models used throughout SiteScribe.
//!
//! These types represent the indexed site, the per-action results, and the
//! final outcome that flow through the index → interpret → execute pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Outcome message when at least one action was executed.
pub const MSG_SUCCESS: &str = "Success";
/// Outcome message when neither interpretation tier produced an action.
pub const MSG_NO_ACTIONS: &str = "No actions generated";
/// Outcome message for fatal errors (missing path, unreadable root).
pub const MSG_ERROR: &str = "Error processing command";

/// Structured summary of a file or folder, built fresh for every command.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteIndex {
    pub root_directory: PathBuf,
    /// Every file that matched the supported extension set, in walk order.
    pub files: Vec<PathBuf>,
    /// One record per readable file in `files`.
    pub records: Vec<KnowledgeRecord>,
}

impl SiteIndex {
    /// Markup records only, in index order.
    pub fn html_records(&self) -> impl Iterator<Item = (&PathBuf, &[ElementDescriptor])> {
        self.records.iter().filter_map(|record| match record {
            KnowledgeRecord::Html { file, items } => Some((file, items.as_slice())),
            KnowledgeRecord::Text { .. } => None,
        })
    }
}

/// Indexed summary of one document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum KnowledgeRecord {
    Html {
        file: PathBuf,
        items: Vec<ElementDescriptor>,
    },
    Text {
        file: PathBuf,
        lines: Vec<String>,
    },
}

impl KnowledgeRecord {
    pub fn file(&self) -> &PathBuf {
        match self {
            KnowledgeRecord::Html { file, .. } | KnowledgeRecord::Text { file, .. } => file,
        }
    }
}

/// One element of interest found while indexing a markup document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementDescriptor {
    pub tag_name: String,
    pub text: String,
    pub id: Option<String>,
    pub class_name: Option<String>,
    pub src: Option<String>,
    pub href: Option<String>,
    pub selector: String,
    pub file: PathBuf,
}

/// Per-action status reported back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionStatus {
    Modified,
    NoChange,
    Error,
}

/// The outcome of attempting one action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionResult {
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selector: Option<String>,
    pub status: ActionStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Extra payload, e.g. the backup path or a settings acknowledgement.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ActionResult {
    pub fn is_error(&self) -> bool {
        self.status == ActionStatus::Error
    }
}

/// Final result of one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommandOutcome {
    Completed {
        message: String,
        results: Vec<ActionResult>,
    },
    Failed {
        message: String,
        error: String,
    },
}

impl CommandOutcome {
    pub fn completed(results: Vec<ActionResult>) -> Self {
        let message = if results.is_empty() {
            MSG_NO_ACTIONS
        } else {
            MSG_SUCCESS
        };
        CommandOutcome::Completed {
            message: message.to_string(),
            results,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        CommandOutcome::Failed {
            message: MSG_ERROR.to_string(),
            error: error.into(),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            CommandOutcome::Completed { message, .. } | CommandOutcome::Failed { message, .. } => {
                message
            }
        }
    }

    pub fn results(&self) -> &[ActionResult] {
        match self {
            CommandOutcome::Completed { results, .. } => results,
            CommandOutcome::Failed { .. } => &[],
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, CommandOutcome::Failed { .. })
    }
}
