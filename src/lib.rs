//! Resolution pipeline for Chinese character explanations.
//!
//! Any supported input — a bare character, a local image path, or free
//! text — is reduced to exactly one canonical CJK character, answered from
//! the persisted explanation store when a complete row exists, and
//! otherwise generated by a chat backend (streaming or not). Both outcomes
//! are exposed through [`response::UnifiedResponse`].
//!
//! ```rust,ignore
//! let config = Config::from_env();
//! let db = Arc::new(Database::new(&config.database).await?);
//! let resolver = ResolverService::new(&config, db)?;
//!
//! let response = resolver.resolve("好", Scenario::Stroke, "en", false).await?;
//! println!("{}", response.content());
//! ```

pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod llm;
pub mod models;
pub mod ocr;
pub mod prompts;
pub mod response;
pub mod services;

pub use config::Config;
pub use db::Database;
pub use error::{ExplainError, Result};
pub use models::{CanonicalCharacter, CharacterRecord, Scenario};
pub use response::{GenerationChunk, ResponseSource, UnifiedResponse};
pub use services::ResolverService;
