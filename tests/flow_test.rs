//! Detection flow tests
//!
//! Drives the controller end to end against an in-memory backend

use async_trait::async_trait;
use std::sync::Mutex;
use thalassemia_common::session::{NO_FILE_MESSAGE, UPLOAD_FAILED_MESSAGE};
use thalassemia_common::{FormData, PredictOutcome, Prediction, ViewMode};
use thalassemia_detect::backend::ReportBackend;
use thalassemia_detect::controller::DetectionFlow;
use thalassemia_detect::error::{DetectError, Result};
use thalassemia_detect::report::ReportFile;

/// Records what the flow sent and replays canned answers
#[derive(Default)]
struct MockBackend {
    extraction: Option<FormData>,
    prediction: Option<Option<Prediction>>,
    uploaded: Mutex<Vec<String>>,
    submitted: Mutex<Vec<FormData>>,
}

#[async_trait]
impl ReportBackend for MockBackend {
    async fn extract(&self, report: &ReportFile) -> Result<FormData> {
        self.uploaded.lock().unwrap().push(report.name.clone());
        self.extraction
            .clone()
            .ok_or_else(|| DetectError::ApiCall("HTTP 500 Internal Server Error: boom".into()))
    }

    async fn predict(&self, parameters: &FormData) -> Result<Option<Prediction>> {
        self.submitted.lock().unwrap().push(parameters.clone());
        self.prediction
            .ok_or_else(|| DetectError::ApiCall("HTTP 422 Unprocessable Entity".into()))
    }
}

fn scenario_parameters() -> FormData {
    [
        ("Name", "A"),
        ("DOB", "2000-01-01"),
        ("Email", "a@b.com"),
        ("Phone", "1234567890"),
        ("Gender", "M"),
        ("BloodGroupName", "O+"),
        ("Address", "X"),
    ]
    .into_iter()
    .collect()
}

fn report(name: &str) -> ReportFile {
    ReportFile {
        name: name.to_string(),
        mime: "application/pdf",
        bytes: b"%PDF-1.4".to_vec(),
    }
}

fn backend(prediction: Option<Option<Prediction>>) -> MockBackend {
    MockBackend {
        extraction: Some(scenario_parameters()),
        prediction,
        ..Default::default()
    }
}

/// report.pdf → 7 fields in review → unedited submit sends the same 7 keys
#[tokio::test]
async fn test_upload_review_predict_scenario() {
    let backend = backend(Some(Some(Prediction::Normal)));
    let mut flow = DetectionFlow::new(&backend);
    flow.select_file(report("report.pdf"));

    let extracted = flow.upload().await.expect("upload failed").clone();
    assert_eq!(extracted.len(), 7);
    assert_eq!(flow.view_mode(), ViewMode::Review);

    let session_keys: Vec<&str> = flow.session().extracted_parameters().unwrap().keys().collect();
    let form_keys: Vec<&str> = flow.form().data().keys().collect();
    assert_eq!(session_keys, form_keys);

    let outcome = flow.predict().await;
    assert_eq!(outcome, PredictOutcome::Normal);
    assert!(flow.session().is_empty());

    let submitted = backend.submitted.lock().unwrap();
    assert_eq!(submitted.as_slice(), &[extracted]);
}

#[tokio::test]
async fn test_edit_then_predict_rolls_back() {
    let backend = backend(Some(Some(Prediction::CarrierLikely)));
    let mut flow = DetectionFlow::new(backend);
    flow.select_file(report("report.pdf"));
    flow.upload().await.unwrap();

    flow.on_field_change("Phone", "9876543210");
    assert!(flow.form().error("Phone").is_none());

    let outcome = flow.predict().await;
    assert_eq!(outcome, PredictOutcome::CarrierLikely);
    assert!(flow.session().is_empty());
    assert!(!flow.session().is_loading());
    assert!(flow.session().selected_file().is_none());
}

#[tokio::test]
async fn test_backend_receives_file_and_form() {
    let backend = backend(Some(Some(Prediction::Normal)));
    let mut flow = DetectionFlow::new(&backend);
    flow.select_file(report("cbc.png"));
    flow.upload().await.unwrap();
    flow.on_field_change("Name", "B");
    flow.predict().await;

    assert_eq!(*backend.uploaded.lock().unwrap(), vec!["cbc.png".to_string()]);
    let submitted = backend.submitted.lock().unwrap();
    assert_eq!(submitted.len(), 1);
    let keys: Vec<&str> = submitted[0].keys().collect();
    let expected = scenario_parameters();
    assert_eq!(keys, expected.keys().collect::<Vec<_>>());
    assert_eq!(submitted[0].value("Name"), "B");
}

#[tokio::test]
async fn test_upload_without_file_makes_no_call() {
    let backend = backend(None);
    let mut flow = DetectionFlow::new(&backend);

    let err = flow.upload().await.unwrap_err();
    assert!(matches!(err, DetectError::NoFileSelected));
    assert_eq!(flow.session().error_message(), Some(NO_FILE_MESSAGE));
    assert!(backend.uploaded.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_failed_upload_shows_generic_message() {
    let backend = MockBackend::default();
    let mut flow = DetectionFlow::new(&backend);
    flow.select_file(report("report.pdf"));

    let err = flow.upload().await.unwrap_err();
    assert!(matches!(err, DetectError::ApiCall(_)));
    assert_eq!(flow.session().error_message(), Some(UPLOAD_FAILED_MESSAGE));
    assert!(!flow.session().is_loading());
    assert_eq!(flow.view_mode(), ViewMode::Chooser);
}

#[tokio::test]
async fn test_failed_prediction_still_rolls_back() {
    let mut flow = DetectionFlow::new(backend(None));
    flow.select_file(report("report.pdf"));
    flow.upload().await.unwrap();

    let outcome = flow.predict().await;
    assert_eq!(outcome, PredictOutcome::Failed);
    assert!(outcome.toast().is_some());
    assert!(flow.session().is_empty());
    assert_eq!(flow.view_mode(), ViewMode::Chooser);
}

#[tokio::test]
async fn test_missing_prediction_shows_nothing() {
    let mut flow = DetectionFlow::new(backend(Some(None)));
    flow.select_file(report("report.pdf"));
    flow.upload().await.unwrap();

    let outcome = flow.predict().await;
    assert_eq!(outcome, PredictOutcome::NoResult);
    assert!(outcome.dialog().is_none());
    assert!(outcome.toast().is_none());
    assert!(flow.session().is_empty());
}

#[tokio::test]
async fn test_new_file_during_review_resets() {
    let mut flow = DetectionFlow::new(backend(Some(Some(Prediction::Normal))));
    flow.select_file(report("first.pdf"));
    flow.upload().await.unwrap();
    flow.on_field_change("Email", "broken");
    assert!(flow.form().has_errors());

    flow.select_file(report("second.pdf"));
    assert_eq!(flow.view_mode(), ViewMode::Chooser);
    assert!(flow.session().extracted_parameters().is_none());
    assert!(flow.form().data().is_empty());
    assert!(!flow.form().has_errors());
    assert_eq!(flow.session().selected_file_name(), Some("second.pdf"));
}

#[tokio::test]
async fn test_remove_file_keeps_review() {
    let mut flow = DetectionFlow::new(backend(Some(Some(Prediction::Normal))));
    flow.select_file(report("report.pdf"));
    flow.upload().await.unwrap();

    flow.remove_file();
    assert!(flow.session().selected_file_name().is_none());
    assert_eq!(flow.view_mode(), ViewMode::Review);
}

#[tokio::test]
async fn test_validate_form_is_not_a_submit_gate() {
    let mut params = scenario_parameters();
    params.insert("DOB", "2015-05-05");
    let backend = MockBackend {
        extraction: Some(params),
        prediction: Some(Some(Prediction::Normal)),
        ..Default::default()
    };
    let mut flow = DetectionFlow::new(&backend);
    flow.select_file(report("child.pdf"));
    flow.upload().await.unwrap();

    assert!(!flow.validate_form());
    assert_eq!(flow.predict().await, PredictOutcome::Normal);
    assert_eq!(backend.submitted.lock().unwrap().len(), 1);
}
