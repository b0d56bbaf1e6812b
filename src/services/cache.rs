use std::sync::Arc;

use tracing::{debug, warn};

use crate::db::repository::CharacterRepository;
use crate::db::Database;
use crate::models::{CanonicalCharacter, CharacterRecord};

/// Cache-aside lookup against the persisted store.
///
/// A miss is a normal value, never an exception path: no row, an
/// incomplete row, and a store failure all resolve to `None`. Availability
/// of the generation fallback takes priority over surfacing storage
/// errors, so transport failures are logged here and absorbed.
pub struct CacheResolver {
    db: Arc<Database>,
}

impl CacheResolver {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub async fn lookup(
        &self,
        character: CanonicalCharacter,
        locale: &str,
    ) -> Option<CharacterRecord> {
        let record = match self.fetch(character, locale).await {
            Ok(record) => record?,
            Err(e) => {
                warn!(%character, locale, error = %e, "Store lookup failed, treating as cache miss");
                return None;
            }
        };

        if record.is_complete() {
            Some(record)
        } else {
            // A single null field discards the whole row; partial records
            // are never merged with generated content.
            debug!(%character, locale, "Cached record incomplete, treating as cache miss");
            None
        }
    }

    async fn fetch(
        &self,
        character: CanonicalCharacter,
        locale: &str,
    ) -> crate::error::Result<Option<CharacterRecord>> {
        let conn = self.db.connect()?;
        CharacterRepository::get(&conn, &character.to_string(), locale).await
    }
}
