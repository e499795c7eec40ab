//! Report service calls via `fetch`
//!
//! upload_report: multipart `file` → extracted parameters
//! predict_report: JSON parameters → classification

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, Request, RequestInit, RequestMode, Response};
use thalassemia_common::api::{
    endpoint_url, ExtractionResponse, PredictionResponse, DEFAULT_BASE_URL,
    PREDICT_REPORT_PATH, REPORT_FIELD_NAME, UPLOAD_REPORT_PATH,
};
use thalassemia_common::{FormData, Prediction};

/// POST and return the response body as text. Non-2xx is an error.
async fn post(url: &str, body: &JsValue, content_type: Option<&str>) -> Result<String, JsValue> {
    let mut opts = RequestInit::new();
    opts.method("POST");
    opts.mode(RequestMode::Cors);
    opts.body(Some(body));

    let request = Request::new_with_str_and_init(url, &opts)?;
    if let Some(content_type) = content_type {
        request.headers().set("Content-Type", content_type)?;
    }

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
    let resp: Response = resp_value.dyn_into()?;

    if !resp.ok() {
        return Err(JsValue::from_str(&format!("API error: {}", resp.status())));
    }

    JsFuture::from(resp.text()?)
        .await?
        .as_string()
        .ok_or_else(|| JsValue::from_str("Empty response"))
}

/// Upload the report; the browser sets the multipart boundary itself.
pub async fn upload_report(file: &File) -> Result<FormData, JsValue> {
    let form = web_sys::FormData::new()?;
    form.append_with_blob_and_filename(REPORT_FIELD_NAME, file, &file.name())?;
    let body: JsValue = form.into();

    let url = endpoint_url(DEFAULT_BASE_URL, UPLOAD_REPORT_PATH);
    let text = post(&url, &body, None).await?;

    let response: ExtractionResponse = serde_json::from_str(&text)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(response.extracted_parameters)
}

pub async fn predict_report(parameters: &FormData) -> Result<Option<Prediction>, JsValue> {
    let json = serde_json::to_string(parameters)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let url = endpoint_url(DEFAULT_BASE_URL, PREDICT_REPORT_PATH);
    let text = post(&url, &JsValue::from_str(&json), Some("application/json")).await?;

    let response: PredictionResponse = serde_json::from_str(&text)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(response.prediction())
}
