//! `generateContent` response parsing
//!
//! The model is asked for a JSON object but answers in free text, so parsing
//! is forgiving: markdown fences and surrounding prose are tolerated, and a
//! field of the wrong type is dropped instead of failing the whole result.

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use std::str::FromStr;
use tracing::debug;

use core_kernel::PortError;
use domain_claims::ExtractedReceiptData;

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
}

/// Error body returned with non-2xx statuses
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub message: String,
}

impl GenerateContentResponse {
    /// Text of the first candidate, parts concatenated
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

/// Parses the model's text answer into receipt data
pub fn parse_receipt_text(text: &str) -> Result<ExtractedReceiptData, PortError> {
    let object = match serde_json::from_str::<Value>(text.trim()) {
        Ok(value) => value,
        Err(first_error) => {
            let embedded = match (text.find('{'), text.rfind('}')) {
                (Some(start), Some(end)) if start < end => &text[start..=end],
                _ => {
                    return Err(PortError::transformation(format!(
                        "Response is not JSON: {first_error}"
                    )))
                }
            };
            debug!("Receipt JSON was wrapped in extra text");
            serde_json::from_str::<Value>(embedded).map_err(|e| {
                PortError::transformation(format!("Failed to parse receipt JSON: {e}"))
            })?
        }
    };

    let Value::Object(fields) = object else {
        return Err(PortError::transformation("Receipt JSON is not an object"));
    };

    Ok(ExtractedReceiptData {
        date: text_field(fields.get("date")),
        merchant: text_field(fields.get("merchant")),
        total: total_field(fields.get("total")),
    })
}

fn text_field(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
        _ => None,
    }
}

fn total_field(value: Option<&Value>) -> Option<Decimal> {
    let text = match value? {
        Value::Number(number) => number.to_string(),
        Value::String(text) => text.trim().replace(',', ""),
        _ => return None,
    };

    let total = Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()?;
    (!total.is_sign_negative()).then_some(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_complete_object() {
        let data =
            parse_receipt_text(r#"{"date": "12.10.2026", "merchant": "Tesco", "total": 45.9}"#).unwrap();
        assert_eq!(data.date.as_deref(), Some("12.10.2026"));
        assert_eq!(data.merchant.as_deref(), Some("Tesco"));
        assert_eq!(data.total, Some(dec!(45.9)));
    }

    #[test]
    fn test_parse_nulls_and_missing_fields() {
        let data = parse_receipt_text(r#"{"date": null, "total": null}"#).unwrap();
        assert!(data.is_empty());
    }

    #[test]
    fn test_parse_markdown_fenced_json() {
        let text = "```json\n{\"merchant\": \"Watsons\", \"total\": \"1,234.50\"}\n```";
        let data = parse_receipt_text(text).unwrap();
        assert_eq!(data.merchant.as_deref(), Some("Watsons"));
        assert_eq!(data.total, Some(dec!(1234.50)));
    }

    #[test]
    fn test_wrong_types_are_dropped() {
        let data = parse_receipt_text(r#"{"date": 20261012, "merchant": ["x"], "total": "n/a"}"#).unwrap();
        assert!(data.is_empty());
    }

    #[test]
    fn test_negative_total_dropped() {
        let data = parse_receipt_text(r#"{"total": -5}"#).unwrap();
        assert_eq!(data.total, None);
    }

    #[test]
    fn test_not_json() {
        let error = parse_receipt_text("I could not read this receipt").unwrap_err();
        assert!(matches!(error, PortError::Transformation { .. }));
    }

    #[test]
    fn test_candidate_text() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates": [{"content": {"parts": [{"text": "{\"total\": "}, {"text": "3}"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(response.text().as_deref(), Some("{\"total\": 3}"));

        let empty: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.text(), None);
    }
}
