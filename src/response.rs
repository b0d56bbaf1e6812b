//! The unified response abstraction.
//!
//! Callers see one type whether an explanation came from the persisted
//! store or from the generative backend, and whether the backend answered
//! in one message or as a delta stream. The origin is a closed three-case
//! variant matched explicitly in every accessor.

use std::pin::Pin;

use futures::{Stream, StreamExt};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::Result;
use crate::models::{CanonicalCharacter, CharacterRecord, Scenario};

/// A completed backend message.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationMessage {
    pub content: String,
    pub reasoning_content: Option<String>,
}

/// One incremental unit of a streamed generation. At least one of the two
/// fields is populated; chunks with neither are dropped before they reach
/// the consumer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationChunk {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning_content: Option<String>,
}

/// Lazy, finite, single-drain sequence of delta chunks.
pub type GenerationStream = Pin<Box<dyn Stream<Item = Result<GenerationChunk>> + Send>>;

/// Projection of a drained stream onto one of its two fragment kinds.
pub type FragmentStream = Pin<Box<dyn Stream<Item = Result<String>> + Send>>;

/// Backend output: either one completed message or a delta stream.
pub enum GenerationResult {
    Message(GenerationMessage),
    Stream(GenerationStream),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseSource {
    Database,
    Generated,
}

impl std::fmt::Display for ResponseSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Database => write!(f, "database"),
            Self::Generated => write!(f, "generated"),
        }
    }
}

enum Payload {
    Database {
        content: String,
    },
    Message {
        content: String,
        reasoning_content: String,
    },
    /// `inner` is taken on the first `stream()` call; afterwards the
    /// response is spent and further drains yield nothing.
    Stream {
        inner: Option<GenerationStream>,
    },
}

pub struct UnifiedResponse {
    character: CanonicalCharacter,
    scenario: Scenario,
    payload: Payload,
}

impl UnifiedResponse {
    pub fn from_record(
        character: CanonicalCharacter,
        scenario: Scenario,
        record: &CharacterRecord,
    ) -> Self {
        Self {
            character,
            scenario,
            payload: Payload::Database {
                content: record.content_for(scenario),
            },
        }
    }

    pub fn from_generation(
        character: CanonicalCharacter,
        scenario: Scenario,
        result: GenerationResult,
    ) -> Self {
        let payload = match result {
            GenerationResult::Message(message) => Payload::Message {
                content: message.content,
                reasoning_content: message.reasoning_content.unwrap_or_default(),
            },
            GenerationResult::Stream(stream) => Payload::Stream {
                inner: Some(stream),
            },
        };

        Self {
            character,
            scenario,
            payload,
        }
    }

    pub fn character(&self) -> CanonicalCharacter {
        self.character
    }

    pub fn scenario(&self) -> Scenario {
        self.scenario
    }

    pub fn source(&self) -> ResponseSource {
        match self.payload {
            Payload::Database { .. } => ResponseSource::Database,
            Payload::Message { .. } | Payload::Stream { .. } => ResponseSource::Generated,
        }
    }

    pub fn is_streaming(&self) -> bool {
        matches!(self.payload, Payload::Stream { .. })
    }

    /// Primary explanation text. Empty for a streaming response: content
    /// only exists once the caller drains `stream()`.
    pub fn content(&self) -> &str {
        match &self.payload {
            Payload::Database { content } => content,
            Payload::Message { content, .. } => content,
            Payload::Stream { .. } => "",
        }
    }

    /// Backend reasoning trace. Always empty for database-origin
    /// explanations and for undrained streams.
    pub fn reasoning_content(&self) -> &str {
        match &self.payload {
            Payload::Database { .. } => "",
            Payload::Message {
                reasoning_content, ..
            } => reasoning_content,
            Payload::Stream { .. } => "",
        }
    }

    /// Hand out the delta sequence. Consuming and single-use: the first
    /// call returns the backend stream, every later call (and any call on
    /// a non-streaming response) returns an empty sequence.
    pub fn stream(&mut self) -> GenerationStream {
        match &mut self.payload {
            Payload::Stream { inner } => inner
                .take()
                .unwrap_or_else(|| Box::pin(futures::stream::empty())),
            _ => Box::pin(futures::stream::empty()),
        }
    }

    /// Content fragments only. Reasoning fragments never appear here; the
    /// two are parallel accumulations.
    pub fn stream_content_only(&mut self) -> FragmentStream {
        Box::pin(self.stream().filter_map(|item| async move {
            match item {
                Ok(chunk) => chunk.content.map(Ok),
                Err(e) => Some(Err(e)),
            }
        }))
    }

    /// Reasoning fragments only.
    pub fn stream_reasoning_only(&mut self) -> FragmentStream {
        Box::pin(self.stream().filter_map(|item| async move {
            match item {
                Ok(chunk) => chunk.reasoning_content.map(Ok),
                Err(e) => Some(Err(e)),
            }
        }))
    }

    /// Flat projection for UI boundaries. `reasoning_content` appears only
    /// when non-empty; streaming responses carry no text here.
    pub fn to_value(&self) -> serde_json::Value {
        let mut value = json!({
            "character": self.character.to_string(),
            "scenario": self.scenario.as_str(),
            "source": self.source().to_string(),
            "content": self.content(),
            "is_streaming": self.is_streaming(),
        });

        let reasoning = self.reasoning_content();
        if !reasoning.is_empty() {
            value["reasoning_content"] = json!(reasoning);
        }

        value
    }
}

impl std::fmt::Debug for UnifiedResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnifiedResponse")
            .field("character", &self.character)
            .field("scenario", &self.scenario)
            .field("source", &self.source())
            .field("is_streaming", &self.is_streaming())
            .finish()
    }
}
