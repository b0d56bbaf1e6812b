mod api;
mod provider;

pub use api::ChatApiClient;
pub use provider::GenerationProvider;
