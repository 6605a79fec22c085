// API handlers for the scan server

use super::{
    error::ApiError,
    extract_scan_form::{ScanForm, extract_scan_form},
    image_codec::{decode_scan_image, has_allowed_extension},
    models::StatusResponse,
};
use crate::engine::SharedEngine;
use axum::{
    Json,
    extract::{Multipart, State, multipart::MultipartRejection},
};
use serde_json::value::RawValue;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

type ProcessFailure = Box<dyn std::error::Error + Send + Sync>;

// --- GET /api/status ---
pub async fn status() -> Json<StatusResponse> {
    Json(StatusResponse::ok())
}

// --- POST /api/scan ---
// Decodes the uploaded sheet and hands it to the OCR engine with the week number.
pub async fn scan(
    State(engine): State<SharedEngine>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Box<RawValue>>, ApiError> {
    let mut form = match multipart {
        Ok(multipart) => extract_scan_form(multipart).await?,
        Err(rejection) => {
            // Not a multipart request, so there are no form fields at all.
            debug!("Scan request is not multipart/form-data: {}", rejection);
            ScanForm::default()
        }
    };

    let week_number = form.week_number.take().ok_or(ApiError::MissingWeekNumber)?;

    let upload = form
        .into_image()
        .filter(|upload| {
            upload
                .file_name
                .as_deref()
                .is_some_and(has_allowed_extension)
        })
        .ok_or(ApiError::MissingImage)?;

    let request_id = Uuid::new_v4();
    info!(
        "Scan request: week_number={:?}, file_name={:?}, size={}, request_id={}",
        week_number,
        upload.file_name,
        upload.data.len(),
        request_id
    );

    let outcome = tokio::task::spawn_blocking(move || -> Result<_, ProcessFailure> {
        let image = decode_scan_image(&upload.data)?;
        debug!(
            "Scan image decoded: {}x{}, request_id={}",
            image.width(),
            image.height(),
            request_id
        );
        Ok(engine.process(&image, &week_number)?)
    })
    .await;

    match outcome {
        Ok(Ok(result)) => {
            if result.is_empty() {
                debug!("Engine found no records, request_id={}", request_id);
            }
            info!(
                "Scan completed: {} record(s), request_id={}",
                result.len(),
                request_id
            );
            // Serializing a RawValue writes the engine's text unchanged.
            Ok(Json(result.into_raw()))
        }
        Ok(Err(err)) => {
            warn!("Scan processing failed: {}, request_id={}", err, request_id);
            Err(ApiError::ProcessError)
        }
        Err(err) => {
            error!("Scan task failed: {}, request_id={}", err, request_id);
            Err(ApiError::ProcessError)
        }
    }
}
