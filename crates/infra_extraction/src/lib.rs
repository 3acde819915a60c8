//! Receipt Extraction Infrastructure
//!
//! Adapter implementing `domain_claims::ReceiptExtractionPort` on top of the
//! Gemini `generateContent` REST API. The receipt image is sent inline as
//! base64 together with a prompt and a JSON response schema; the answer is
//! parsed leniently into `ExtractedReceiptData`.

pub mod config;
pub mod request;
pub mod response;
pub mod gemini;

pub use config::GeminiConfig;
pub use gemini::GeminiReceiptExtractor;
pub use response::parse_receipt_text;
