use std::sync::Arc;

use tracing::info;

use crate::config::Config;
use crate::db::Database;
use crate::error::Result;
use crate::extract::CharacterExtractor;
use crate::llm::GenerationProvider;
use crate::models::Scenario;
use crate::ocr::OcrProvider;
use crate::prompts::PromptStore;
use crate::response::UnifiedResponse;
use crate::services::cache::CacheResolver;

/// The resolution orchestrator: normalize the input to one canonical
/// character, consult the persisted store, and fall back to generation on
/// a miss. One fallback branch, no retries, no revisited stages.
pub struct ResolverService {
    extractor: CharacterExtractor,
    cache: CacheResolver,
    generator: GenerationProvider,
}

impl ResolverService {
    pub fn new(config: &Config, db: Arc<Database>) -> Result<Self> {
        let prompts = Arc::new(PromptStore::new(&config.prompts));
        let ocr = OcrProvider::new(&config.ocr)?;

        Ok(Self {
            extractor: CharacterExtractor::new(ocr),
            cache: CacheResolver::new(db),
            generator: GenerationProvider::new(&config.llm, prompts)?,
        })
    }

    /// The single public entry point of the pipeline.
    ///
    /// `raw_input` may be a bare character, a local image path, or free
    /// text. Requests are independent; any number may run concurrently.
    pub async fn resolve(
        &self,
        raw_input: &str,
        scenario: Scenario,
        locale: &str,
        stream: bool,
    ) -> Result<UnifiedResponse> {
        let character = self.extractor.extract(raw_input).await?;

        if let Some(record) = self.cache.lookup(character, locale).await {
            info!(%character, %scenario, locale, "Explanation served from store");
            return Ok(UnifiedResponse::from_record(character, scenario, &record));
        }

        info!(%character, %scenario, locale, stream, "Cache miss, generating explanation");
        let generated = self
            .generator
            .generate(character, scenario, locale, stream)
            .await?;

        Ok(UnifiedResponse::from_generation(
            character, scenario, generated,
        ))
    }
}
