use image::{ImageResult, RgbImage};
use std::ffi::OsStr;
use std::path::Path;

// File extensions accepted for uploaded scans.
pub const ALLOWED_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

// Checks the last extension of an uploaded file name, ignoring ASCII case.
pub fn has_allowed_extension(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| {
            ALLOWED_EXTENSIONS
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(ext))
        })
}

// Decodes uploaded bytes into an 8-bit RGB image.
// The format is sniffed from the data, not taken from the file name.
pub fn decode_scan_image(file_data: &[u8]) -> ImageResult<RgbImage> {
    Ok(image::load_from_memory(file_data)?.to_rgb8())
}
