//! Thalassemia Detection Common Library
//!
//! Types and state shared by the CLI and the Web (WASM) front end

pub mod api;
pub mod error;
pub mod form;
pub mod session;
pub mod validation;

pub use api::{ExtractionResponse, Prediction, PredictionResponse};
pub use error::{Error, Result};
pub use form::FormData;
pub use session::{PredictOutcome, UploadSession, ViewMode};
pub use validation::{calculate_age, FieldErrors, FormValidation};
