use std::sync::Arc;

use tracing::debug;

use crate::config::LlmConfig;
use crate::error::Result;
use crate::models::{CanonicalCharacter, Scenario};
use crate::prompts::PromptStore;
use crate::response::GenerationResult;

use super::api::ChatApiClient;

/// Generation adapter: builds the locale/scenario prompt and invokes the
/// chat backend with the scenario's configured model, in streaming or
/// non-streaming mode.
pub struct GenerationProvider {
    client: ChatApiClient,
    prompts: Arc<PromptStore>,
}

impl GenerationProvider {
    pub fn new(config: &LlmConfig, prompts: Arc<PromptStore>) -> Result<Self> {
        Ok(Self {
            client: ChatApiClient::new(config)?,
            prompts,
        })
    }

    pub async fn generate(
        &self,
        character: CanonicalCharacter,
        scenario: Scenario,
        locale: &str,
        stream: bool,
    ) -> Result<GenerationResult> {
        let template = self.prompts.prompt(locale, scenario).await?;
        let model = self.prompts.model(scenario).await?;
        let prompt = render_prompt(&template, character);

        debug!(%character, %scenario, locale, model = %model.model, stream, "Generating explanation");

        if stream {
            let chunks = self
                .client
                .complete_stream(&model.model, &prompt, model.temperature)
                .await?;
            Ok(GenerationResult::Stream(chunks))
        } else {
            let message = self
                .client
                .complete(&model.model, &prompt, model.temperature)
                .await?;
            Ok(GenerationResult::Message(message))
        }
    }
}

/// `{character}` is the template's only substitution slot.
fn render_prompt(template: &str, character: CanonicalCharacter) -> String {
    template.replace("{character}", &character.to_string())
}
