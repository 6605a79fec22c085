use super::ffi::OcrErrorCode;
use std::fmt;

#[derive(Debug)]
pub enum EngineError {
    // The shared library or one of its symbols could not be loaded.
    LoadFailed(String),
    // No engine is configured for this server.
    Unavailable,
    // The engine ran but reported a failure.
    ProcessFailed {
        code: OcrErrorCode,
        details: String,
    },
    // The engine returned something that is not a JSON array.
    InvalidOutput(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::LoadFailed(s) => write!(f, "failed to load OCR engine: {}", s),
            EngineError::Unavailable => write!(f, "no OCR engine is configured"),
            EngineError::ProcessFailed { code, details } => {
                write!(f, "OCR engine failed with {:?}: {}", code, details)
            }
            EngineError::InvalidOutput(s) => write!(f, "invalid OCR engine output: {}", s),
        }
    }
}

impl std::error::Error for EngineError {}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        EngineError::InvalidOutput(err.to_string())
    }
}
