use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub planner: PlannerConfig,
    #[serde(default)]
    pub indexer: IndexerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PlannerConfig {
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_max_documents")]
    pub max_documents: usize,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: None,
            endpoint: default_endpoint(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            max_documents: default_max_documents(),
        }
    }
}

fn default_provider() -> String {
    "disabled".to_string()
}
fn default_endpoint() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}
fn default_temperature() -> f32 {
    0.1
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_max_retries() -> u32 {
    2
}
fn default_max_documents() -> usize {
    30
}

impl PlannerConfig {
    pub fn is_enabled(&self) -> bool {
        self.provider != "disabled"
    }

    /// Model from config, then `OPENAI_MODEL`, then `gpt-4o-mini`.
    pub fn resolved_model(&self) -> String {
        self.model
            .clone()
            .or_else(|| std::env::var("OPENAI_MODEL").ok())
            .unwrap_or_else(|| "gpt-4o-mini".to_string())
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct IndexerConfig {
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    #[serde(default = "default_max_text_lines")]
    pub max_text_lines: usize,
    #[serde(default)]
    pub follow_symlinks: bool,
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            max_text_lines: default_max_text_lines(),
            follow_symlinks: false,
        }
    }
}

fn default_extensions() -> Vec<String> {
    ["html", "htm", "css", "md"]
        .iter()
        .map(|ext| ext.to_string())
        .collect()
}

fn default_max_text_lines() -> usize {
    500
}

impl Config {
    /// Configuration used when no config file exists: tier 1 disabled,
    /// default indexer settings.
    pub fn minimal() -> Self {
        Self::default()
    }

    fn validate(&self) -> Result<()> {
        match self.planner.provider.as_str() {
            "disabled" | "openai" => {}
            other => anyhow::bail!(
                "Unknown planner provider: '{}'. Must be disabled or openai.",
                other
            ),
        }

        if !(0.0..=2.0).contains(&self.planner.temperature) {
            anyhow::bail!("planner.temperature must be in [0.0, 2.0]");
        }

        if self.planner.max_documents == 0 {
            anyhow::bail!("planner.max_documents must be >= 1");
        }

        if self.indexer.max_text_lines == 0 {
            anyhow::bail!("indexer.max_text_lines must be >= 1");
        }

        if self.indexer.extensions.is_empty() {
            anyhow::bail!("indexer.extensions must not be empty");
        }

        Ok(())
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_config(&content)
}

pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).with_context(|| "Failed to parse config file")?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let cfg = parse_config("").unwrap();
        assert!(!cfg.planner.is_enabled());
        assert_eq!(cfg.planner.max_documents, 30);
        assert_eq!(cfg.indexer.max_text_lines, 500);
        assert_eq!(cfg.indexer.extensions, vec!["html", "htm", "css", "md"]);
    }

    #[test]
    fn reads_planner_section() {
        let cfg = parse_config(
            r#"
[planner]
provider = "openai"
model = "gpt-4o"
timeout_secs = 5
"#,
        )
        .unwrap();
        assert!(cfg.planner.is_enabled());
        assert_eq!(cfg.planner.resolved_model(), "gpt-4o");
        assert_eq!(cfg.planner.timeout_secs, 5);
    }

    #[test]
    fn rejects_unknown_provider() {
        let err = parse_config("[planner]\nprovider = \"llama\"\n").unwrap_err();
        assert!(err.to_string().contains("Unknown planner provider"));
    }

    #[test]
    fn rejects_zero_line_limit() {
        assert!(parse_config("[indexer]\nmax_text_lines = 0\n").is_err());
    }
}
