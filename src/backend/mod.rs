//! Remote extraction / prediction service

mod http;

pub use http::HttpBackend;

use crate::error::Result;
use crate::report::ReportFile;
use async_trait::async_trait;
use thalassemia_common::{FormData, Prediction};

#[async_trait]
pub trait ReportBackend: Send + Sync {
    /// Upload a report and return the parameters read from it.
    async fn extract(&self, report: &ReportFile) -> Result<FormData>;

    /// Classify reviewed parameters. `None` when the service gives no answer.
    async fn predict(&self, parameters: &FormData) -> Result<Option<Prediction>>;
}

#[async_trait]
impl<T: ReportBackend + ?Sized> ReportBackend for &T {
    async fn extract(&self, report: &ReportFile) -> Result<FormData> {
        (**self).extract(report).await
    }

    async fn predict(&self, parameters: &FormData) -> Result<Option<Prediction>> {
        (**self).predict(parameters).await
    }
}
