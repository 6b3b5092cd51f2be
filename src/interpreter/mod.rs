//! Command interpretation: natural-language command to ordered actions.
//!
//! Tier 1 asks the configured [`Planner`]; when it fails or has no opinion,
//! tier 2 runs the deterministic matcher [`cascade`] over the command text.

pub mod cascade;
mod fields;
mod forms;
mod media;
mod settings;
mod style;
mod text;

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::PathBuf;

use crate::actions::Action;
use crate::models::SiteIndex;
use crate::planner::Planner;

/// A command prepared for the matcher cascade.
#[derive(Debug, Clone)]
pub struct Command {
    /// Text as typed, used for value extraction so case survives.
    pub raw: String,
    /// Lowercased text, used for keyword triggers.
    pub lower: String,
    /// Stamp for backup actions, `YYYYMMDDHHMMSS` in UTC.
    pub timestamp: String,
}

impl Command {
    pub fn new(text: &str) -> Self {
        let timestamp = chrono::Utc::now().format("%Y%m%d%H%M%S").to_string();
        Self::with_timestamp(text, &timestamp)
    }

    pub fn with_timestamp(text: &str, timestamp: &str) -> Self {
        let raw = text.trim().to_string();
        Self {
            lower: raw.to_lowercase(),
            raw,
            timestamp: timestamp.to_string(),
        }
    }

    pub fn has(&self, keyword: &str) -> bool {
        self.lower.contains(keyword)
    }

    pub fn has_any(&self, keywords: &[&str]) -> bool {
        keywords.iter().any(|k| self.lower.contains(k))
    }

    /// Whole-word match on the lowercased text.
    pub fn has_word(&self, word: &str) -> bool {
        self.lower
            .split(|c: char| !c.is_alphanumeric() && c != '-')
            .any(|w| w == word)
    }

    pub fn has_any_word(&self, words: &[&str]) -> bool {
        words.iter().any(|w| self.has_word(w))
    }
}

/// Document targeted by rule-based actions: `index.html`/`index.htm` when
/// indexed, otherwise the first markup record.
pub fn target_file(index: &SiteIndex) -> Option<PathBuf> {
    let mut markup = index.html_records().map(|(file, _)| file);
    let first = markup.next()?;
    let is_index = |file: &PathBuf| {
        file.file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.eq_ignore_ascii_case("index.html") || n.eq_ignore_ascii_case("index.htm"))
    };
    if is_index(first) {
        return Some(first.clone());
    }
    Some(markup.find(|f| is_index(*f)).unwrap_or(first).clone())
}

/// Resolve `command` into actions, trying the planner before the cascade.
pub async fn interpret(index: &SiteIndex, command: &str, planner: &dyn Planner) -> Vec<Action> {
    match planner.plan(index, command).await {
        Ok(plan) if !plan.is_empty() => {
            tracing::info!(planner = planner.name(), actions = plan.len(), "planned by language model");
            return plan;
        }
        Ok(_) => tracing::debug!(planner = planner.name(), "planner returned no actions"),
        Err(e) => tracing::warn!(planner = planner.name(), error = %e, "planner failed, using rules"),
    }

    let actions = cascade::run(&Command::new(command), target_file(index).as_deref());
    tracing::info!(actions = actions.len(), "planned by rule cascade");
    actions
}

static QUOTED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""[^"]*"|'[^']*'"#).expect("quoted regex must compile"));

/// Lowercased text with quoted spans removed, so user-supplied labels do
/// not trigger keyword tables.
pub(crate) fn unquoted_lower(cmd: &Command) -> String {
    QUOTED.replace_all(&cmd.lower, " ").into_owned()
}

/// First non-empty capture group of `re` in `text`, trimmed.
pub(crate) fn capture(re: &Regex, text: &str) -> Option<String> {
    let caps = re.captures(text)?;
    caps.iter()
        .skip(1)
        .flatten()
        .map(|m| m.as_str().trim())
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

/// Strip one layer of matching quotes.
pub(crate) fn unquote(value: &str) -> String {
    let v = value.trim();
    for q in ['"', '\''] {
        if v.len() >= 2 && v.starts_with(q) && v.ends_with(q) {
            return v[1..v.len() - 1].to_string();
        }
    }
    v.to_string()
}

/// Element selector implied by words like "heading" or "paragraph".
pub(crate) fn context_selector(cmd: &Command, fallback: &'static str) -> &'static str {
    if cmd.has_word("h2") {
        "h2"
    } else if cmd.has_word("h3") {
        "h3"
    } else if cmd.has_any(&["heading", "title", "h1"]) {
        "h1"
    } else if cmd.has("paragraph") {
        "p"
    } else if cmd.has("button") {
        "button"
    } else if cmd.has("link") {
        "a"
    } else if cmd.has_any(&["image", "picture"]) {
        "img"
    } else {
        fallback
    }
}

/// Escape text for a double-quoted attribute value.
pub(crate) fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

pub(crate) fn escape_text(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ElementDescriptor, KnowledgeRecord};
    use crate::planner::{DisabledPlanner, PlanError};
    use async_trait::async_trait;

    fn html(file: &str) -> KnowledgeRecord {
        KnowledgeRecord::Html {
            file: PathBuf::from(file),
            items: Vec::<ElementDescriptor>::new(),
        }
    }

    fn index(records: Vec<KnowledgeRecord>) -> SiteIndex {
        SiteIndex {
            root_directory: PathBuf::from("."),
            files: records.iter().map(|r| r.file().clone()).collect(),
            records,
        }
    }

    #[test]
    fn target_prefers_index_page() {
        let idx = index(vec![html("site/about.html"), html("site/INDEX.HTML")]);
        assert_eq!(target_file(&idx), Some(PathBuf::from("site/INDEX.HTML")));

        let idx = index(vec![
            KnowledgeRecord::Text {
                file: PathBuf::from("site/a.css"),
                lines: vec![],
            },
            html("site/b.html"),
        ]);
        assert_eq!(target_file(&idx), Some(PathBuf::from("site/b.html")));

        assert_eq!(target_file(&index(vec![])), None);
    }

    #[test]
    fn capture_and_unquote() {
        let re = Regex::new(r#"to\s+(?:"([^"]*)"|(\S+))"#).unwrap();
        assert_eq!(capture(&re, r#"set to "Hello there""#).as_deref(), Some("Hello there"));
        assert_eq!(capture(&re, "set to blue").as_deref(), Some("blue"));
        assert_eq!(unquote("'Hi'"), "Hi");
        assert_eq!(unquote("\"Hi"), "\"Hi");
    }

    #[test]
    fn whole_words_only() {
        let cmd = Command::new("Enable auto-save");
        assert!(cmd.has_word("enable"));
        assert!(cmd.has_word("auto-save"));
        assert!(!cmd.has_word("able"));
    }

    struct FixedPlanner(Result<Vec<Action>, ()>);

    #[async_trait]
    impl Planner for FixedPlanner {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn plan(&self, _index: &SiteIndex, _command: &str) -> Result<Vec<Action>, PlanError> {
            self.0.clone().map_err(|_| PlanError::EmptyResponse)
        }
    }

    #[tokio::test]
    async fn planner_output_wins_when_non_empty() {
        let planned = vec![Action::ShowAbout];
        let planner = FixedPlanner(Ok(planned.clone()));
        let actions = interpret(&index(vec![html("index.html")]), "change heading to X", &planner).await;
        assert_eq!(actions, planned);
    }

    #[tokio::test]
    async fn planner_failure_falls_back_to_rules() {
        let idx = index(vec![html("index.html")]);
        for planner in [FixedPlanner(Err(())), FixedPlanner(Ok(vec![]))] {
            let actions = interpret(&idx, "change heading to X", &planner).await;
            assert_eq!(actions.len(), 1);
            assert_eq!(actions[0].kind(), "changeText");
        }
        assert!(interpret(&idx, "xyzzy plugh", &DisabledPlanner).await.is_empty());
    }
}
