use super::ReportBackend;
use crate::error::{DetectError, Result};
use crate::report::ReportFile;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use thalassemia_common::api::{
    endpoint_url, ExtractionResponse, PredictionResponse, PREDICT_REPORT_PATH,
    REPORT_FIELD_NAME, UPLOAD_REPORT_PATH,
};
use thalassemia_common::{FormData, Prediction};
use tracing::debug;

/// reqwest client for the report service. No timeout is set, so a slow
/// extraction waits for the transport to give up.
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

async fn ensure_success(response: Response) -> Result<Response> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(DetectError::ApiCall(format!("HTTP {}: {}", status, body)))
}

#[async_trait]
impl ReportBackend for HttpBackend {
    async fn extract(&self, report: &ReportFile) -> Result<FormData> {
        let url = endpoint_url(&self.base_url, UPLOAD_REPORT_PATH);
        debug!(url = %url, file = %report.name, "uploading report");

        let part = Part::bytes(report.bytes.clone())
            .file_name(report.name.clone())
            .mime_str(report.mime)?;
        let form = Form::new().part(REPORT_FIELD_NAME, part);

        let response = self.client.post(&url).multipart(form).send().await?;
        let response = ensure_success(response).await?;

        let text = response.text().await?;
        let parsed: ExtractionResponse =
            serde_json::from_str(&text).map_err(|e| DetectError::ApiParse(e.to_string()))?;

        debug!(count = parsed.extracted_parameters.len(), "parameters extracted");
        Ok(parsed.extracted_parameters)
    }

    async fn predict(&self, parameters: &FormData) -> Result<Option<Prediction>> {
        let url = endpoint_url(&self.base_url, PREDICT_REPORT_PATH);
        debug!(url = %url, fields = parameters.len(), "requesting prediction");

        let response = self.client.post(&url).json(parameters).send().await?;
        let response = ensure_success(response).await?;

        let text = response.text().await?;
        let parsed: PredictionResponse =
            serde_json::from_str(&text).map_err(|e| DetectError::ApiParse(e.to_string()))?;

        Ok(parsed.prediction())
    }
}
