use axum::{body::Bytes, extract::Multipart};
use tracing::{debug, warn};

use super::error::ApiError;

// Form field carrying the week number.
pub const WEEK_NUMBER_FIELD: &str = "week_number";
// Form fields that may carry the scanned image, in order of preference.
pub const IMAGE_FIELDS: [&str; 2] = ["file", "img"];

#[derive(Debug)]
pub struct UploadedFile {
    pub file_name: Option<String>,
    pub data: Bytes,
}

// Everything the scan endpoint needs from the multipart form.
// Fields are optional here; the handler decides what is missing.
#[derive(Debug, Default)]
pub struct ScanForm {
    pub week_number: Option<String>,
    files: [Option<UploadedFile>; 2],
}

impl ScanForm {
    // The uploaded image, preferring `file` over `img` when both are present.
    pub fn into_image(self) -> Option<UploadedFile> {
        self.files.into_iter().flatten().next()
    }
}

// Reads the whole form so that validation does not depend on field order.
pub async fn extract_scan_form(mut multipart: Multipart) -> Result<ScanForm, ApiError> {
    let mut form = ScanForm::default();
    let mut ignored_fields = 0;

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or("").to_string();

        if field_name == WEEK_NUMBER_FIELD {
            if form.week_number.is_some() {
                warn!("Multiple 'week_number' fields found, keeping the first one");
                continue;
            }
            form.week_number = Some(field.text().await?);
        } else if let Some(slot) = IMAGE_FIELDS.iter().position(|name| *name == field_name) {
            if form.files[slot].is_some() {
                warn!(
                    "Multiple '{}' fields found in multipart request, keeping the first one",
                    field_name
                );
                continue;
            }

            let file_name = field.file_name().map(str::to_string);
            debug!(
                "Received '{}' upload: file_name={:?}, content_type={:?}",
                field_name,
                file_name,
                field.content_type()
            );

            let data = field.bytes().await?;
            form.files[slot] = Some(UploadedFile { file_name, data });
        } else {
            debug!("Ignoring multipart field: {:?}", field_name);
            ignored_fields += 1;
        }
    }

    if ignored_fields > 0 {
        debug!(
            "Ignored {} unrelated fields in multipart request",
            ignored_fields
        );
    }

    Ok(form)
}
