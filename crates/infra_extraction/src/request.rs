//! `generateContent` request body

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::Serialize;
use serde_json::{json, Value};

use domain_claims::ReceiptImage;

/// Instruction sent alongside the receipt image
pub const EXTRACTION_PROMPT: &str = "\
Analyze this receipt image and extract the following information into a JSON object:
1. date: The date of the transaction (format as DD.MM.YYYY).
2. merchant: The name of the store or company.
3. total: The total amount paid (numeric only).

If you cannot find a specific field, return null for that field.";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Part {
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
    Text {
        text: String,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_mime_type: String,
    pub response_schema: Value,
}

/// Schema of the JSON object the model is asked to return
pub fn receipt_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "date": { "type": "STRING" },
            "merchant": { "type": "STRING" },
            "total": { "type": "NUMBER" }
        }
    })
}

impl GenerateContentRequest {
    /// Image part first, then the prompt, with a JSON response schema
    pub fn for_receipt(image: &ReceiptImage) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: image.mime_type.clone(),
                            data: STANDARD.encode(&image.bytes),
                        },
                    },
                    Part::Text {
                        text: EXTRACTION_PROMPT.to_string(),
                    },
                ],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: receipt_schema(),
            },
        }
    }
}
