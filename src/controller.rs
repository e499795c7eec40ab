//! Detection flow controller
//!
//! Owns the session and runs the two backend calls one after the other:
//! choose file → upload → review/edit → predict → rollback.

use crate::backend::ReportBackend;
use crate::error::{DetectError, Result};
use crate::report::ReportFile;
use thalassemia_common::{FormData, FormValidation, PredictOutcome, UploadSession, ViewMode};
use tracing::{debug, error};

pub struct DetectionFlow<B: ReportBackend> {
    backend: B,
    session: UploadSession<ReportFile>,
}

impl<B: ReportBackend> DetectionFlow<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            session: UploadSession::new(),
        }
    }

    pub fn session(&self) -> &UploadSession<ReportFile> {
        &self.session
    }

    pub fn view_mode(&self) -> ViewMode {
        self.session.view_mode()
    }

    pub fn form(&self) -> &FormValidation {
        self.session.form()
    }

    pub fn select_file(&mut self, report: ReportFile) {
        debug!(file = %report.name, "report selected");
        let name = report.name.clone();
        self.session.select_file(report, name);
    }

    pub fn remove_file(&mut self) {
        self.session.remove_file();
    }

    /// Edit one reviewed field; the field is re-validated immediately.
    pub fn on_field_change(&mut self, field: &str, value: &str) {
        self.session.form_mut().on_field_change(field, value);
    }

    /// Whole-form check on the fixed donor field set.
    pub fn validate_form(&mut self) -> bool {
        self.session.form_mut().validate_form()
    }

    /// Upload the selected report and seed the review form.
    ///
    /// On failure the session keeps only the generic message; the transport
    /// detail is logged and returned to the caller.
    pub async fn upload(&mut self) -> Result<&FormData> {
        self.session.begin_upload()?;

        let result = match self.session.selected_file() {
            Some(report) => self.backend.extract(report).await,
            None => Err(DetectError::NoFileSelected),
        };

        match result {
            Ok(parameters) => {
                self.session.complete_upload::<DetectError>(Ok(parameters));
                Ok(self.session.form().data())
            }
            Err(err) => {
                error!(error = %err, "report extraction failed");
                self.session.complete_upload::<()>(Err(()));
                Err(err)
            }
        }
    }

    /// Submit the current values. Always ends with a full rollback.
    pub async fn predict(&mut self) -> PredictOutcome {
        let parameters = self.session.begin_predict();
        let result = self.backend.predict(&parameters).await;
        if let Err(err) = &result {
            error!(error = %err, "prediction failed");
        }
        let outcome = self.session.complete_predict(result);
        debug!(?outcome, "prediction cycle finished");
        outcome
    }

    /// Discard everything (the review form's "Cancel").
    pub fn rollback(&mut self) {
        self.session.rollback();
    }
}
