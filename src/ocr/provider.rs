use std::path::Path;
use std::time::Duration;

use tracing::info;

use crate::config::OcrConfig;
use crate::error::{ExplainError, Result};

use super::api::PaddleOcrClient;

/// OCR collaborator. The pipeline treats recognized text as an opaque
/// string to scan for CJK codepoints; retry and backoff are transport
/// concerns and do not live here.
#[derive(Clone)]
pub struct OcrProvider {
    client: PaddleOcrClient,
    timeout_secs: u64,
}

impl OcrProvider {
    pub fn new(config: &OcrConfig) -> Result<Self> {
        let client = PaddleOcrClient::new(config)?;
        info!(base_url = %config.base_url, "OCR provider initialized");

        Ok(Self {
            client,
            timeout_secs: config.timeout_secs,
        })
    }

    pub async fn recognize_file(&self, path: &Path) -> Result<String> {
        self.with_timeout(self.client.recognize_file(path)).await
    }

    pub async fn recognize_bytes(&self, image_bytes: &[u8]) -> Result<String> {
        self.with_timeout(self.client.recognize_bytes(image_bytes))
            .await
    }

    async fn with_timeout<F>(&self, fut: F) -> Result<String>
    where
        F: std::future::Future<Output = Result<String>>,
    {
        match tokio::time::timeout(Duration::from_secs(self.timeout_secs), fut).await {
            Ok(result) => result,
            Err(_) => Err(ExplainError::Ocr(format!(
                "OCR operation timed out after {} seconds",
                self.timeout_secs
            ))),
        }
    }
}
