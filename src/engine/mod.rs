// OCR engine seam.
// The actual recognition runs outside this server: either in a native
// shared library (see `native`) or, in tests, in an in-process double.

mod error;
mod ffi;
mod native;

pub use error::EngineError;
pub use native::NativeEngine;

use image::RgbImage;
use serde_json::value::RawValue;
use std::sync::Arc;

/// The JSON array an engine produced for one scan.
///
/// Entries normally look like `{"id": "S042", "absence": 3, "date": "2024-03-11"}`,
/// but their shape belongs to the engine. Only the outer array is checked;
/// the text is handed to clients exactly as the engine wrote it.
#[derive(Debug, Clone)]
pub struct ScanResult {
    json: Box<RawValue>,
    len: usize,
}

impl ScanResult {
    pub fn from_json(json: &[u8]) -> Result<Self, EngineError> {
        let text = std::str::from_utf8(json)
            .map_err(|e| EngineError::InvalidOutput(format!("not UTF-8: {}", e)))?;
        let entries: Vec<&RawValue> = serde_json::from_str(text)?;
        let len = entries.len();
        Ok(ScanResult {
            json: RawValue::from_string(text.to_owned())?,
            len,
        })
    }

    /// Number of entries in the array.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn into_raw(self) -> Box<RawValue> {
        self.json
    }
}

/// The external `process(image, week_number)` routine.
///
/// Implementations are called from the blocking thread pool and may take
/// as long as they need.
pub trait OcrEngine: Send + Sync {
    fn process(&self, image: &RgbImage, week_number: &str) -> Result<ScanResult, EngineError>;
}

pub type SharedEngine = Arc<dyn OcrEngine>;

/// Stand-in used when the server is started without an engine library.
pub struct UnavailableEngine;

impl OcrEngine for UnavailableEngine {
    fn process(&self, _image: &RgbImage, _week_number: &str) -> Result<ScanResult, EngineError> {
        Err(EngineError::Unavailable)
    }
}
