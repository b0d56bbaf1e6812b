use std::path::Path;

use tracing::debug;

use crate::error::{ExplainError, Result};
use crate::models::{is_cjk, CanonicalCharacter};
use crate::ocr::OcrProvider;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "webp"];

/// Reduces any supported input shape to exactly one canonical CJK
/// character. Policy, first match wins:
///
/// 1. a single codepoint already in the CJK range is returned unchanged;
/// 2. a path to a local image file is OCR'd and the recognized text is
///    scanned left-to-right for the first CJK codepoint;
/// 3. any other text is scanned left-to-right for the first CJK codepoint.
pub struct CharacterExtractor {
    ocr: OcrProvider,
}

impl CharacterExtractor {
    pub fn new(ocr: OcrProvider) -> Self {
        Self { ocr }
    }

    pub async fn extract(&self, raw_input: &str) -> Result<CanonicalCharacter> {
        let mut chars = raw_input.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if is_cjk(c) {
                return CanonicalCharacter::new(c);
            }
        }

        if is_image_path(raw_input) {
            let text = self.ocr.recognize_file(Path::new(raw_input)).await?;
            debug!(input = raw_input, recognized = %text, "OCR recognized text");
            return first_cjk(&text).ok_or_else(|| {
                ExplainError::Extraction(format!(
                    "No Chinese character found in OCR result: {text}"
                ))
            });
        }

        first_cjk(raw_input).ok_or_else(|| {
            ExplainError::Extraction(format!(
                "Unable to extract Chinese character from input: '{raw_input}'"
            ))
        })
    }
}

/// An existing local file with one of the supported image extensions.
fn is_image_path(input: &str) -> bool {
    let path = Path::new(input);
    if !path.is_file() {
        return false;
    }
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}

/// First CJK codepoint in scan order.
fn first_cjk(text: &str) -> Option<CanonicalCharacter> {
    text.chars()
        .find(|c| is_cjk(*c))
        .and_then(|c| CanonicalCharacter::new(c).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn extractor() -> CharacterExtractor {
        // Text-only cases never reach the OCR service.
        let ocr = OcrProvider::new(&crate::config::OcrConfig {
            base_url: "http://localhost:1".to_string(),
            file_type: 1,
            timeout_secs: 1,
        })
        .unwrap();
        CharacterExtractor::new(ocr)
    }

    #[tokio::test]
    async fn test_single_cjk_codepoint_passthrough() {
        let ch = extractor().extract("好").await.unwrap();
        assert_eq!(ch.as_char(), '好');
    }

    #[tokio::test]
    async fn test_single_non_cjk_codepoint_is_error() {
        let err = extractor().extract("A").await.unwrap_err();
        assert!(matches!(err, ExplainError::Extraction(_)));
    }

    #[tokio::test]
    async fn test_free_text_returns_first_cjk() {
        let ch = extractor().extract("say 你好 to me").await.unwrap();
        assert_eq!(ch.as_char(), '你');
    }

    #[tokio::test]
    async fn test_no_cjk_and_no_image_path_is_error() {
        let err = extractor().extract("A1!").await.unwrap_err();
        assert!(matches!(err, ExplainError::Extraction(_)));
    }

    #[test]
    fn test_first_cjk_scan_order() {
        assert_eq!(first_cjk("abc你好").unwrap().as_char(), '你');
        assert_eq!(first_cjk("好").unwrap().as_char(), '好');
        assert!(first_cjk("A1!").is_none());
        assert!(first_cjk("").is_none());
    }

    #[test]
    fn test_is_image_path_requires_existing_file() {
        assert!(!is_image_path("/nonexistent/photo.png"));
        assert!(!is_image_path("你好"));
    }

    #[test]
    fn test_is_image_path_extension_set() {
        for ext in ["jpg", "jpeg", "png", "bmp", "tiff", "webp", "PNG"] {
            let mut file = tempfile::Builder::new()
                .suffix(&format!(".{ext}"))
                .tempfile()
                .unwrap();
            file.write_all(b"fake image").unwrap();
            assert!(
                is_image_path(&file.path().to_string_lossy()),
                "extension {ext} should be accepted"
            );
        }

        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        file.write_all(b"not an image").unwrap();
        assert!(!is_image_path(&file.path().to_string_lossy()));
    }
}
