use chrono::{DateTime, Utc};
use libsql::{params, Connection};

use crate::error::Result;
use crate::models::CharacterRecord;

pub struct CharacterRepository;

impl CharacterRepository {
    /// Fetch the row for `(character, locale)`, or `None` when absent.
    /// Completeness is judged by the caller; this returns the row as stored.
    pub async fn get(
        conn: &Connection,
        character: &str,
        locale: &str,
    ) -> Result<Option<CharacterRecord>> {
        let mut rows = conn
            .query(
                "SELECT id, character, locale, pronunciation, stroke, meaning,
                        idioms, culture, practice, created_at, updated_at
                 FROM character_explanations
                 WHERE character = ?1 AND locale = ?2",
                params![character, locale],
            )
            .await?;

        if let Some(row) = rows.next().await? {
            Ok(Some(Self::row_to_record(&row)?))
        } else {
            Ok(None)
        }
    }

    fn row_to_record(row: &libsql::Row) -> Result<CharacterRecord> {
        Ok(CharacterRecord {
            id: row.get(0)?,
            character: row.get(1)?,
            locale: row.get(2)?,
            pronunciation: row.get(3)?,
            stroke: row.get(4)?,
            meaning: row.get(5)?,
            idioms: row.get(6)?,
            culture: row.get(7)?,
            practice: row.get(8)?,
            created_at: DateTime::parse_from_rfc3339(&row.get::<String>(9)?)
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_else(|_| Utc::now()),
            updated_at: DateTime::parse_from_rfc3339(&row.get::<String>(10)?)
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_else(|_| Utc::now()),
        })
    }
}
