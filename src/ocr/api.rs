use base64::{engine::general_purpose::STANDARD, Engine};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::config::OcrConfig;
use crate::error::{ExplainError, Result};

/// Client for a PaddleOCR-style HTTP service: one `POST /ocr` endpoint
/// taking a base64 file payload plus a numeric file-type tag.
#[derive(Clone, Debug)]
pub struct PaddleOcrClient {
    client: Client,
    base_url: String,
    file_type: u32,
}

#[derive(Debug, Serialize)]
struct OcrRequest {
    file: String,
    #[serde(rename = "fileType")]
    file_type: u32,
}

#[derive(Debug, Deserialize)]
struct OcrResponse {
    result: OcrResult,
}

#[derive(Debug, Deserialize)]
struct OcrResult {
    #[serde(rename = "ocrResults")]
    ocr_results: Vec<OcrPage>,
}

#[derive(Debug, Deserialize)]
struct OcrPage {
    #[serde(rename = "prunedResult")]
    pruned_result: PrunedResult,
}

#[derive(Debug, Deserialize)]
struct PrunedResult {
    rec_texts: Vec<String>,
}

impl PaddleOcrClient {
    pub fn new(config: &OcrConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ExplainError::Ocr(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            file_type: config.file_type,
        })
    }

    /// Read an image file and return the recognized text, fragments joined
    /// in service order.
    pub async fn recognize_file(&self, path: &Path) -> Result<String> {
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            ExplainError::Ocr(format!("Failed to read image {}: {e}", path.display()))
        })?;
        self.recognize_bytes(&bytes).await
    }

    pub async fn recognize_bytes(&self, image_bytes: &[u8]) -> Result<String> {
        let request = OcrRequest {
            file: STANDARD.encode(image_bytes),
            file_type: self.file_type,
        };

        let url = format!("{}/ocr", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ExplainError::Ocr(format!("OCR request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExplainError::Ocr(format!(
                "OCR service returned {status}"
            )));
        }

        let parsed: OcrResponse = response
            .json()
            .await
            .map_err(|e| ExplainError::Ocr(format!("OCR service returned invalid format: {e}")))?;

        let texts: Vec<String> = parsed
            .result
            .ocr_results
            .into_iter()
            .flat_map(|page| page.pruned_result.rec_texts)
            .collect();

        Ok(texts.join("\n"))
    }
}
