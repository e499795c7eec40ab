//! Upload → review → predict session state
//!
//! One session per screen. Network calls happen outside; callers bracket them
//! with `begin_*` / `complete_*` so the loading flag and the rollback happen
//! the same way on every front end.

use crate::api::Prediction;
use crate::error::{Error, Result};
use crate::form::FormData;
use crate::validation::FormValidation;

pub const NO_FILE_MESSAGE: &str = "Please select a file to upload.";
pub const UPLOAD_FAILED_MESSAGE: &str = "Error uploading the file or extracting parameters.";
pub const PREDICT_FAILED_MESSAGE: &str =
    "Error during prediction. Please check your input and try again.";
pub const WAIT_MESSAGE: &str = "It may take a while, please wait...";

/// Which screen to show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// File chooser, idle
    Chooser,
    /// File chooser, extraction in flight
    Uploading,
    /// Parameter review form
    Review,
    /// Review form, prediction in flight
    Predicting,
}

impl ViewMode {
    pub fn is_review(&self) -> bool {
        matches!(self, ViewMode::Review | ViewMode::Predicting)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ViewMode::Uploading | ViewMode::Predicting)
    }
}

/// End of one predict cycle. The session is already rolled back when this
/// is returned, so the result only lives as long as its dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictOutcome {
    Normal,
    CarrierLikely,
    /// Backend answered without a classification
    NoResult,
    Failed,
}

impl PredictOutcome {
    /// Dialog title and text, `None` when nothing is shown.
    pub fn dialog(&self) -> Option<(&'static str, &'static str)> {
        match self {
            PredictOutcome::Normal => Some(("Good job!", "Likely to be a normal individual")),
            PredictOutcome::CarrierLikely => {
                Some(("Oops!", "Likely to be an alpha thalassemia carrier"))
            }
            PredictOutcome::NoResult | PredictOutcome::Failed => None,
        }
    }

    /// Toast text for the failure case
    pub fn toast(&self) -> Option<&'static str> {
        match self {
            PredictOutcome::Failed => Some(PREDICT_FAILED_MESSAGE),
            _ => None,
        }
    }
}

impl From<Option<Prediction>> for PredictOutcome {
    fn from(prediction: Option<Prediction>) -> Self {
        match prediction {
            Some(Prediction::Normal) => PredictOutcome::Normal,
            Some(Prediction::CarrierLikely) => PredictOutcome::CarrierLikely,
            None => PredictOutcome::NoResult,
        }
    }
}

/// Session state, generic over the file handle (bytes on native,
/// a browser `File` on the web).
#[derive(Debug, Clone)]
pub struct UploadSession<F> {
    selected_file: Option<F>,
    selected_file_name: Option<String>,
    extracted_parameters: Option<FormData>,
    prediction: Option<Prediction>,
    loading: bool,
    error_message: Option<String>,
    form: FormValidation,
}

impl<F> Default for UploadSession<F> {
    fn default() -> Self {
        Self {
            selected_file: None,
            selected_file_name: None,
            extracted_parameters: None,
            prediction: None,
            loading: false,
            error_message: None,
            form: FormValidation::default(),
        }
    }
}

impl<F> UploadSession<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_file(&self) -> Option<&F> {
        self.selected_file.as_ref()
    }

    pub fn selected_file_name(&self) -> Option<&str> {
        self.selected_file_name.as_deref()
    }

    pub fn extracted_parameters(&self) -> Option<&FormData> {
        self.extracted_parameters.as_ref()
    }

    pub fn prediction(&self) -> Option<Prediction> {
        self.prediction
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn form(&self) -> &FormValidation {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormValidation {
        &mut self.form
    }

    /// Nothing selected, nothing extracted, not loading
    pub fn is_empty(&self) -> bool {
        self.selected_file.is_none()
            && self.selected_file_name.is_none()
            && self.extracted_parameters.is_none()
            && self.prediction.is_none()
            && !self.loading
            && self.error_message.is_none()
            && self.form.data().is_empty()
    }

    pub fn view_mode(&self) -> ViewMode {
        let reviewing = self
            .extracted_parameters
            .as_ref()
            .is_some_and(|p| !p.is_empty());
        match (reviewing, self.loading) {
            (true, true) => ViewMode::Predicting,
            (true, false) => ViewMode::Review,
            (false, true) => ViewMode::Uploading,
            (false, false) => ViewMode::Chooser,
        }
    }

    /// Picker or drop. Always lands back on the chooser.
    ///
    /// Ignored while a call is in flight, so the pending extraction can only
    /// seed the review for the file it was started with.
    pub fn select_file(&mut self, file: F, name: impl Into<String>) -> bool {
        if self.loading {
            return false;
        }
        self.selected_file = Some(file);
        self.selected_file_name = Some(name.into());
        self.extracted_parameters = None;
        self.form.reset(FormData::new());
        self.prediction = None;
        self.error_message = None;
        true
    }

    /// Drops the file only; extracted state is left alone.
    pub fn remove_file(&mut self) {
        self.selected_file = None;
        self.selected_file_name = None;
    }

    /// Fails without touching the network when no file is selected.
    pub fn begin_upload(&mut self) -> Result<()> {
        if self.selected_file.is_none() {
            self.error_message = Some(NO_FILE_MESSAGE.to_string());
            return Err(Error::NoFileSelected);
        }
        self.loading = true;
        self.error_message = None;
        Ok(())
    }

    /// Seeds the review form on success. Loading is cleared either way.
    pub fn complete_upload<E>(&mut self, result: std::result::Result<FormData, E>) -> bool {
        self.loading = false;
        match result {
            Ok(parameters) => {
                self.form.reset(parameters.clone());
                self.extracted_parameters = Some(parameters);
                true
            }
            Err(_) => {
                self.error_message = Some(UPLOAD_FAILED_MESSAGE.to_string());
                false
            }
        }
    }

    /// Returns the (possibly edited) values to submit.
    pub fn begin_predict(&mut self) -> FormData {
        self.loading = true;
        self.error_message = None;
        self.form.data().clone()
    }

    /// Records the classification, then rolls the whole session back.
    pub fn complete_predict<E>(
        &mut self,
        result: std::result::Result<Option<Prediction>, E>,
    ) -> PredictOutcome {
        let outcome = match result {
            Ok(prediction) => {
                self.prediction = prediction;
                PredictOutcome::from(prediction)
            }
            Err(_) => PredictOutcome::Failed,
        };
        self.loading = false;
        self.rollback();
        outcome
    }

    /// Back to the initial empty state. Also the review form's "Cancel".
    pub fn rollback(&mut self) {
        *self = Self::default();
    }
}
