//! Backend wire format
//!
//! - `POST /upload-report/`: multipart, one `file` part → `{ "extracted_parameters": {...} }`
//! - `POST /predict-report/`: JSON parameter map → `{ "prediction": 0 | 1 }`

use crate::form::FormData;
use serde::{Deserialize, Deserializer, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://thalassemia-detection.onrender.com";
pub const UPLOAD_REPORT_PATH: &str = "/upload-report/";
pub const PREDICT_REPORT_PATH: &str = "/predict-report/";

/// Name of the multipart field carrying the report
pub const REPORT_FIELD_NAME: &str = "file";

/// File types the chooser accepts (`.pdf,image/*`)
pub const ACCEPTED_FILE_TYPES: &str = ".pdf,image/*";

/// Join a base URL and an endpoint path without doubling the slash.
pub fn endpoint_url(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

/// `null` or a missing `extracted_parameters` is an empty extraction, which
/// leaves the session on the chooser.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub extracted_parameters: FormData,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<FormData, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<FormData>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Deserialize)]
pub struct PredictionResponse {
    #[serde(default)]
    pub prediction: Option<i64>,
}

impl PredictionResponse {
    pub fn prediction(&self) -> Option<Prediction> {
        self.prediction.map(Prediction::from_code)
    }
}

/// Classification returned by the prediction endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Prediction {
    /// `0`
    Normal,
    /// `1` (any non-zero code is treated the same way)
    CarrierLikely,
}

impl Prediction {
    pub fn from_code(code: i64) -> Self {
        if code == 0 {
            Prediction::Normal
        } else {
            Prediction::CarrierLikely
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            Prediction::Normal => 0,
            Prediction::CarrierLikely => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url_trailing_slash() {
        assert_eq!(
            endpoint_url("http://localhost:8000/", UPLOAD_REPORT_PATH),
            "http://localhost:8000/upload-report/"
        );
        assert_eq!(
            endpoint_url(DEFAULT_BASE_URL, PREDICT_REPORT_PATH),
            "https://thalassemia-detection.onrender.com/predict-report/"
        );
    }

    #[test]
    fn test_parse_extraction_response() {
        let json = r#"{"extracted_parameters":{"Name":"A","Quantity":250},"report_id":7}"#;
        let resp: ExtractionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.extracted_parameters.len(), 2);
        assert_eq!(resp.extracted_parameters.value("Quantity"), "250");
    }

    #[test]
    fn test_parse_extraction_response_without_parameters() {
        let resp: ExtractionResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.extracted_parameters.is_empty());
    }

    #[test]
    fn test_parse_extraction_response_null_parameters() {
        let resp: ExtractionResponse =
            serde_json::from_str(r#"{"extracted_parameters":null}"#).unwrap();
        assert!(resp.extracted_parameters.is_empty());
    }

    #[test]
    fn test_parse_prediction_codes() {
        let normal: PredictionResponse = serde_json::from_str(r#"{"prediction":0}"#).unwrap();
        assert_eq!(normal.prediction(), Some(Prediction::Normal));

        let carrier: PredictionResponse =
            serde_json::from_str(r#"{"prediction":1,"report_id":"r1"}"#).unwrap();
        assert_eq!(carrier.prediction(), Some(Prediction::CarrierLikely));

        let missing: PredictionResponse = serde_json::from_str(r#"{"prediction":null}"#).unwrap();
        assert_eq!(missing.prediction(), None);
    }
}
