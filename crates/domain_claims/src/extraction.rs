//! Receipt extraction data
//!
//! What the extraction service managed to read off a receipt. Every field is
//! optional: a field the service could not read is simply absent, and the
//! claim form falls back to its own default for it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Partial receipt data returned by an extractor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedReceiptData {
    /// Receipt date, expected as DD.MM.YYYY
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Merchant or shop name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant: Option<String>,
    /// Total amount paid
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<Decimal>,
}

impl ExtractedReceiptData {
    /// Nothing was extracted
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.date.is_none() && self.merchant.is_none() && self.total.is_none()
    }

    /// Date with blank text treated as absent
    pub fn date_text(&self) -> Option<&str> {
        non_blank(self.date.as_deref())
    }

    /// Merchant with blank text treated as absent
    pub fn merchant_text(&self) -> Option<&str> {
        non_blank(self.merchant.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|text| !text.is_empty())
}

/// An uploaded receipt image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptImage {
    /// Raw image bytes as uploaded
    pub bytes: Vec<u8>,
    /// Declared media type, e.g. `image/jpeg`
    pub mime_type: String,
}

impl ReceiptImage {
    pub fn new(bytes: impl Into<Vec<u8>>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            mime_type: mime_type.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// True when the declared media type is an image type
    pub fn is_image(&self) -> bool {
        self.mime_type.trim().to_ascii_lowercase().starts_with("image/")
    }
}
