// Rust definitions for the C ABI exported by native OCR engine libraries.

use std::os::raw::{c_char, c_int};

#[repr(C)]
#[derive(Debug)]
pub struct OcrEngineInfo {
    pub name: *const c_char,
    pub version: *const c_char,
    pub description: *const c_char,
}

// Status codes travel as plain ints; a library may return values we do not know.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum OcrErrorCode {
    Success,         // OCR_SUCCESS = 0
    InvalidArgument, // OCR_ERROR_INVALID_ARGUMENT = 1
    ProcessFailed,   // OCR_ERROR_PROCESS_FAILED = 2
    Other,           // OCR_ERROR_OTHER = 9999
    Unknown(c_int),
}

impl From<c_int> for OcrErrorCode {
    fn from(raw: c_int) -> Self {
        match raw {
            0 => OcrErrorCode::Success,
            1 => OcrErrorCode::InvalidArgument,
            2 => OcrErrorCode::ProcessFailed,
            9999 => OcrErrorCode::Other,
            other => OcrErrorCode::Unknown(other),
        }
    }
}

pub type GetInfoFn = unsafe extern "C" fn() -> *const OcrEngineInfo;
pub type InitializeFn = unsafe extern "C" fn() -> c_int;
pub type ShutdownFn = unsafe extern "C" fn() -> c_int;
pub type ProcessFn = unsafe extern "C" fn(
    data: *const u8,
    size: usize,
    width: u32,
    height: u32,
    channels: u32,
    week_number: *const c_char,
    week_number_len: usize,
    out_json: *mut *mut c_char,
    out_json_len: *mut usize,
) -> c_int;
pub type FreeResultFn = unsafe extern "C" fn(json: *mut c_char);
