//! OCR collaborator for image inputs.
//!
//! Speaks the PaddleOCR HTTP protocol: a base64-encoded image payload plus
//! a numeric file-type tag, answered with recognized text fragments. The
//! pipeline only ever scans the result for CJK codepoints.

mod api;
mod provider;

pub use api::PaddleOcrClient;
pub use provider::OcrProvider;
