use thiserror::Error;

#[derive(Error, Debug)]
pub enum DetectError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Unsupported report file: {0} (expected a PDF or an image)")]
    UnsupportedFile(String),

    #[error("No report file selected. Pass a PDF or image path, e.g. `thalassemia-detect detect report.pdf`")]
    NoFileSelected,

    #[error("API call failed: {0}")]
    ApiCall(String),

    #[error("Failed to parse API response: {0}")]
    ApiParse(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Prompt error: {0}")]
    Prompt(String),

    #[error("Parameters failed validation: {0}")]
    Validation(String),
}

impl From<thalassemia_common::Error> for DetectError {
    fn from(err: thalassemia_common::Error) -> Self {
        match err {
            thalassemia_common::Error::NoFileSelected => DetectError::NoFileSelected,
        }
    }
}

pub type Result<T> = std::result::Result<T, DetectError>;
