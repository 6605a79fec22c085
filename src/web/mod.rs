// HTTP layer: the status and scan endpoints plus the listener they are served on.

mod app;
mod error;
mod extract_scan_form;
mod handlers;
mod image_codec;
mod listeners;
mod models;

pub use app::create_app;
pub use listeners::create_listener;

// Default cap on request bodies, large enough for a phone photo of a sheet.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024; // 32MB
