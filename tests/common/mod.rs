#![allow(dead_code)]

use std::io::Write;
use std::sync::Arc;

use chrono::Utc;
use libsql::params;
use tempfile::NamedTempFile;

use hanzi_explain::config::{Config, DatabaseConfig, LlmConfig, OcrConfig, PromptsConfig};
use hanzi_explain::Database;

pub const PROMPTS_TOML: &str = r#"
[prompts.en]
pronunciation = "Explain the pronunciation of {character}."
stroke = "Explain the stroke order of {character}."
meaning = "Explain the meaning of {character}."
idioms = "List idioms containing {character}."
culture = "Explain the cultural background of {character}."
practice = "Suggest practice exercises for {character}."

[scenarios.pronunciation]
model = "test-model"

[scenarios.stroke]
model = "test-model"

[scenarios.meaning]
model = "test-model"

[scenarios.idioms]
model = "test-model"

[scenarios.culture]
model = "test-model"

[scenarios.practice]
model = "test-model"
"#;

/// Write a prompt table to disk; the caller keeps the handle alive for the
/// duration of the test.
pub fn prompts_file() -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("create prompts file");
    file.write_all(PROMPTS_TOML.as_bytes())
        .expect("write prompts file");
    file
}

pub fn test_config(llm_base: &str, ocr_base: &str, prompts_path: &str) -> Config {
    Config {
        database: DatabaseConfig {
            url: ":memory:".to_string(),
            auth_token: None,
            local_path: None,
        },
        ocr: OcrConfig {
            base_url: ocr_base.to_string(),
            file_type: 1,
            timeout_secs: 5,
        },
        llm: LlmConfig {
            api_key: Some("test-key".to_string()),
            base_url: llm_base.to_string(),
            timeout_secs: 5,
        },
        prompts: PromptsConfig {
            path: prompts_path.to_string(),
        },
    }
}

pub async fn in_memory_db() -> Arc<Database> {
    // libsql gives every connection to ":memory:" its own private database,
    // so a shared throwaway store has to live in a temp file instead.
    let path = tempfile::Builder::new()
        .prefix("hanzi-explain-test-")
        .suffix(".db")
        .tempfile()
        .expect("create temp db file")
        .into_temp_path()
        .keep()
        .expect("persist temp db file");
    let db = Database::new(&DatabaseConfig {
        url: path.to_string_lossy().into_owned(),
        auth_token: None,
        local_path: None,
    })
    .await
    .expect("create test database");
    Arc::new(db)
}

/// Insert a row with the given scenario fields; `None` leaves the column
/// NULL so completeness-gate behavior can be exercised.
#[allow(clippy::too_many_arguments)]
pub async fn seed_record(
    db: &Database,
    character: &str,
    locale: &str,
    pronunciation: Option<&str>,
    stroke: Option<&str>,
    meaning: Option<&str>,
    idioms: Option<&str>,
    culture: Option<&str>,
    practice: Option<&str>,
) {
    let now = Utc::now().to_rfc3339();
    let conn = db.connect().expect("connect");
    conn.execute(
        "INSERT INTO character_explanations (
            character, locale, pronunciation, stroke, meaning, idioms,
            culture, practice, created_at, updated_at
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            character.to_string(),
            locale.to_string(),
            pronunciation.map(str::to_string),
            stroke.map(str::to_string),
            meaning.map(str::to_string),
            idioms.map(str::to_string),
            culture.map(str::to_string),
            practice.map(str::to_string),
            now.clone(),
            now,
        ],
    )
    .await
    .expect("seed record");
}

pub async fn seed_full_record(db: &Database, character: &str, locale: &str) {
    seed_record(
        db,
        character,
        locale,
        Some("pronunciation text"),
        Some("stroke text"),
        Some("meaning text"),
        Some("idioms text"),
        Some("culture text"),
        Some("practice text"),
    )
    .await;
}
