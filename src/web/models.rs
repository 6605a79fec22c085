// Response bodies owned by the web layer.
// Scan results are written straight from `engine::ScanResult`.

use serde::Serialize;

/// Body of `GET /api/status`.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct StatusResponse {
    pub status: &'static str,
}

impl StatusResponse {
    pub fn ok() -> Self {
        StatusResponse { status: "ok" }
    }
}
