//! Locale-scoped prompt templates and per-scenario model selection.
//!
//! Backed by one TOML file with a `[prompts.<locale>]` table per locale and
//! a `[scenarios.<scenario>]` table per scenario:
//!
//! ```toml
//! [prompts.en]
//! stroke = "Explain the stroke order of {character}."
//!
//! [scenarios.stroke]
//! model = "gpt-4o-mini"
//! ```
//!
//! The file is parsed at most once per process; a fresh process is required
//! to pick up edits.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tokio::sync::OnceCell;

use crate::config::PromptsConfig;
use crate::error::{ExplainError, Result};
use crate::models::Scenario;

/// Model selection for one scenario.
#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioModel {
    pub model: String,
    pub temperature: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct PromptTable {
    /// locale -> scenario -> template
    prompts: HashMap<String, HashMap<String, String>>,
    /// scenario -> model config
    scenarios: HashMap<String, ScenarioModel>,
}

pub struct PromptStore {
    path: PathBuf,
    table: OnceCell<PromptTable>,
}

impl PromptStore {
    pub fn new(config: &PromptsConfig) -> Self {
        Self {
            path: PathBuf::from(&config.path),
            table: OnceCell::new(),
        }
    }

    /// The prompt template for `(locale, scenario)`. `{character}` is the
    /// only substitution slot; rendering happens at generation time.
    pub async fn prompt(&self, locale: &str, scenario: Scenario) -> Result<String> {
        let table = self.table().await?;

        let locale_prompts = table.prompts.get(locale).ok_or_else(|| {
            ExplainError::Config(format!("No prompt templates for locale '{locale}'"))
        })?;

        locale_prompts
            .get(scenario.as_str())
            .cloned()
            .ok_or_else(|| {
                ExplainError::Config(format!(
                    "No prompt template for scenario '{scenario}' in locale '{locale}'"
                ))
            })
    }

    pub async fn model(&self, scenario: Scenario) -> Result<ScenarioModel> {
        let table = self.table().await?;

        table.scenarios.get(scenario.as_str()).cloned().ok_or_else(|| {
            ExplainError::Config(format!("No model configured for scenario '{scenario}'"))
        })
    }

    /// Loads the table on first access. The `OnceCell` guard makes the
    /// parse happen exactly once even under concurrent first use; the
    /// synchronous file parse runs off the event loop.
    async fn table(&self) -> Result<&PromptTable> {
        self.table
            .get_or_try_init(|| async {
                let path = self.path.clone();
                tokio::task::spawn_blocking(move || load_table(&path))
                    .await
                    .map_err(|e| {
                        ExplainError::Config(format!("Prompt table load task failed: {e}"))
                    })?
            })
            .await
    }
}

fn load_table(path: &Path) -> Result<PromptTable> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path))
        .build()
        .map_err(|e| {
            ExplainError::Config(format!(
                "Failed to read prompt table {}: {e}",
                path.display()
            ))
        })?;

    settings.try_deserialize().map_err(|e| {
        ExplainError::Config(format!(
            "Malformed prompt table {}: {e}",
            path.display()
        ))
    })
}
