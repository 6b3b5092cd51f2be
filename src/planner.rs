//! Tier-1 planning through an external language model.
//!
//! A [`Planner`] turns a site summary plus the raw command into a list of
//! [`Action`]s. Output is best-effort: anything that is not a well-formed
//! action array is rejected here, and the interpreter falls back to the
//! rule cascade.
//!
//! # Providers
//!
//! | Provider | Behavior |
//! |----------|----------|
//! | `disabled` | Always returns an empty plan. |
//! | `openai` | OpenAI-compatible chat completions with retry on 429/5xx. |

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use crate::actions::Action;
use crate::config::PlannerConfig;
use crate::models::{KnowledgeRecord, SiteIndex};

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("OPENAI_API_KEY not set")]
    MissingApiKey,
    #[error("planner request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("planner API error {status}: {body}")]
    Status { status: u16, body: String },
    #[error("planner returned no content")]
    EmptyResponse,
    #[error("planner response is not an action array: {0}")]
    Malformed(String),
}

/// Produces an action plan for one command.
#[async_trait]
pub trait Planner: Send + Sync {
    /// Short provider name for logs.
    fn name(&self) -> &str;

    /// Plan `command` against `index`. An empty vector means "no opinion".
    async fn plan(&self, index: &SiteIndex, command: &str) -> Result<Vec<Action>, PlanError>;
}

/// Planner used when no provider is configured.
pub struct DisabledPlanner;

#[async_trait]
impl Planner for DisabledPlanner {
    fn name(&self) -> &str {
        "disabled"
    }

    async fn plan(&self, _index: &SiteIndex, _command: &str) -> Result<Vec<Action>, PlanError> {
        Ok(Vec::new())
    }
}

pub struct OpenAIPlanner {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
    model: String,
    temperature: f32,
    max_retries: u32,
    max_documents: usize,
}

impl OpenAIPlanner {
    /// Build from config, reading `OPENAI_API_KEY` from the environment.
    pub fn from_env(config: &PlannerConfig) -> Result<Self, PlanError> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or(PlanError::MissingApiKey)?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_key,
            endpoint: config.endpoint.clone(),
            model: config.resolved_model(),
            temperature: config.temperature,
            max_retries: config.max_retries,
            max_documents: config.max_documents,
        })
    }

    async fn complete(&self, system: &str, user: &str) -> Result<String, PlanError> {
        let request = ChatRequest {
            model: &self.model,
            temperature: self.temperature,
            messages: vec![
                Message {
                    role: "system",
                    content: system,
                },
                Message {
                    role: "user",
                    content: user,
                },
            ],
        };

        let mut last_err = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = Duration::from_secs(1 << (attempt - 1).min(5));
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(&self.endpoint)
                .header("Authorization", format!("Bearer {}", self.api_key))
                .json(&request)
                .send()
                .await;

            match response {
                Ok(response) => {
                    let status = response.status();

                    if status.is_success() {
                        let completion: ChatResponse = response.json().await?;
                        return completion
                            .choices
                            .into_iter()
                            .next()
                            .and_then(|c| c.message.content)
                            .filter(|c| !c.trim().is_empty())
                            .ok_or(PlanError::EmptyResponse);
                    }

                    let body = response.text().await.unwrap_or_default();
                    let err = PlanError::Status {
                        status: status.as_u16(),
                        body,
                    };

                    // Rate limited or server error: retry
                    if status.as_u16() == 429 || status.is_server_error() {
                        tracing::debug!(attempt, error = %err, "planner request will be retried");
                        last_err = Some(err);
                        continue;
                    }

                    return Err(err);
                }
                Err(e) => {
                    tracing::debug!(attempt, error = %e, "planner request will be retried");
                    last_err = Some(e.into());
                }
            }
        }

        Err(last_err.unwrap_or(PlanError::EmptyResponse))
    }
}

#[async_trait]
impl Planner for OpenAIPlanner {
    fn name(&self) -> &str {
        "openai"
    }

    async fn plan(&self, index: &SiteIndex, command: &str) -> Result<Vec<Action>, PlanError> {
        let user = build_user_prompt(index, command, self.max_documents);
        let content = self.complete(SYSTEM_PROMPT, &user).await?;
        parse_plan(&content)
    }
}

/// Pick the planner for `config`. A missing API key downgrades to
/// [`DisabledPlanner`] for this run.
pub fn create_planner(config: &PlannerConfig) -> Box<dyn Planner> {
    if !config.is_enabled() {
        return Box::new(DisabledPlanner);
    }
    match OpenAIPlanner::from_env(config) {
        Ok(planner) => Box::new(planner),
        Err(e) => {
            tracing::warn!(error = %e, "language-model planner unavailable, using rules only");
            Box::new(DisabledPlanner)
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

pub const SYSTEM_PROMPT: &str = r#"You are a website content editing planner.
Translate the user's command into a JSON array of edit actions for the listed files.
Return ONLY the JSON array, no prose. Return [] when nothing applies.

Each action is an object with an "action" field and these fields:
- changeText: file, selector, oldText ("*" for any), newText
- addBlock: file, parentSelector, htmlBlock
- updateImage: file, selector, newSrc
- changeStyle: file, selector, property, value
- modifyStyle: file, selector, style ("prop: value; prop: value")
- modifyAttribute / addAttribute: file, selector, attribute, value
- removeAttribute: file, selector, attribute
- backup: file, timestamp
- applyTemplate: file, templateType (modern | professional | minimal | colorful)
- addAnimation: file, selector, animationType (fade | slide | bounce | rotate)
- changeTheme: theme; changeFontSize: size; changeLanguage: language
- setAutoSave / setNotifications / setFullscreen: enabled (true | false)
- showShortcuts, showFileHistory, exportSettings, importSettings, showHelp, showAbout, resetSettings

Selectors are CSS selectors. Use file paths exactly as listed in the site summary."#;

/// Summarize the first `max_documents` records and append the command.
pub fn build_user_prompt(index: &SiteIndex, command: &str, max_documents: usize) -> String {
    let summary: Vec<String> = index
        .records
        .iter()
        .take(max_documents)
        .map(|record| match record {
            KnowledgeRecord::Html { file, items } => {
                let headings: Vec<&str> = items
                    .iter()
                    .filter(|item| item.tag_name == "h1" || item.tag_name == "h2")
                    .take(3)
                    .map(|item| item.text.as_str())
                    .collect();
                format!(
                    "HTML {}: headings={}",
                    file.display(),
                    serde_json::to_string(&headings).unwrap_or_default()
                )
            }
            KnowledgeRecord::Text { file, lines } => {
                let first = lines.first().map(String::as_str).unwrap_or("");
                format!(
                    "TEXT {}: firstLine={}",
                    file.display(),
                    serde_json::to_string(first).unwrap_or_default()
                )
            }
        })
        .collect();

    format!(
        "User command: {}\nSite summary:\n{}",
        command,
        summary.join("\n")
    )
}

/// Slice from the first `[` to the last `]`, dropping fences or prose.
fn extract_json(response: &str) -> Result<&str, PlanError> {
    let start = response
        .find('[')
        .ok_or_else(|| PlanError::Malformed("no JSON array found".into()))?;
    let end = response
        .rfind(']')
        .filter(|&end| end > start)
        .ok_or_else(|| PlanError::Malformed("no closing bracket found".into()))?;
    Ok(&response[start..=end])
}

/// Validate a planner response. Any invalid item rejects the whole plan.
pub fn parse_plan(response: &str) -> Result<Vec<Action>, PlanError> {
    let json = extract_json(response)?;
    let items: Vec<Value> =
        serde_json::from_str(json).map_err(|e| PlanError::Malformed(e.to_string()))?;

    items
        .into_iter()
        .map(|item| Action::from_wire(item).map_err(|e| PlanError::Malformed(e.to_string())))
        .collect()
}
