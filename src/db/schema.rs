use libsql::Connection;

use crate::error::Result;

pub async fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        -- Persisted character explanations, one row per (character, locale).
        -- Scenario fields are nullable on purpose: rows under curation may
        -- be partially filled, and the completeness gate keeps them from
        -- reaching callers until every field is populated.
        CREATE TABLE IF NOT EXISTS character_explanations (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            character TEXT NOT NULL,
            locale TEXT NOT NULL,
            pronunciation TEXT,
            stroke TEXT,
            meaning TEXT,
            idioms TEXT,
            culture TEXT,
            practice TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            UNIQUE(character, locale)
        );

        CREATE INDEX IF NOT EXISTS idx_character_explanations_lookup
            ON character_explanations(character, locale);
        "#,
    )
    .await?;

    Ok(())
}
