// Loads an OCR engine from a native shared library and calls into it
// through the C ABI declared in `ffi`.

use super::{EngineError, OcrEngine, ScanResult, ffi};
use image::RgbImage;
use libloading::{Library, Symbol};
use std::ffi::CStr;
use std::os::raw::c_char;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

// Basic metadata reported by the engine library.
#[derive(Clone, Debug)]
pub struct EngineInfo {
    pub name: String,
    pub version: String,
    pub description: String,
}

struct EngineLibrary {
    _lib: Library,
    path: PathBuf,
    ocr_engine_shutdown: ffi::ShutdownFn,
}

impl Drop for EngineLibrary {
    fn drop(&mut self) {
        tracing::info!("Shutting down OCR engine library: {:?}", self.path);
        let code = ffi::OcrErrorCode::from(unsafe { (self.ocr_engine_shutdown)() });
        if code != ffi::OcrErrorCode::Success {
            tracing::warn!("OCR engine shutdown returned {:?}", code);
        }
    }
}

pub struct NativeEngine {
    // Function pointers below are only valid while the library stays loaded.
    library: EngineLibrary,
    info: EngineInfo,
    // Calls into the library are serialized; the ABI makes no thread-safety promise.
    process_lock: Mutex<()>,
    ocr_engine_process: ffi::ProcessFn,
    ocr_engine_free_result: ffi::FreeResultFn,
}

impl NativeEngine {
    /// Loads and initializes the engine library at `path`.
    ///
    /// # Safety
    ///
    /// The library's initializers run on load, and its exported symbols are
    /// trusted to match the signatures in `ffi`.
    pub unsafe fn load(path: &Path) -> Result<Self, EngineError> {
        let lib = unsafe { Library::new(path) }.map_err(|e| {
            EngineError::LoadFailed(format!(
                "Failed to load shared library from {:?}: {}",
                path, e
            ))
        })?;

        macro_rules! get_symbol {
            ($lib:expr, $name:expr) => {
                unsafe { $lib.get($name) }.map_err(|e| {
                    EngineError::LoadFailed(format!(
                        "Failed to load symbol '{}' from {:?}: {}",
                        String::from_utf8_lossy(&$name[..$name.len() - 1]),
                        path,
                        e
                    ))
                })
            };
        }

        let get_info_fn: Symbol<ffi::GetInfoFn> = get_symbol!(lib, b"ocr_engine_get_info\0")?;
        let initialize_fn: Symbol<ffi::InitializeFn> =
            get_symbol!(lib, b"ocr_engine_initialize\0")?;
        let shutdown_fn: Symbol<ffi::ShutdownFn> = get_symbol!(lib, b"ocr_engine_shutdown\0")?;
        let process_fn: Symbol<ffi::ProcessFn> = get_symbol!(lib, b"ocr_engine_process\0")?;
        let free_result_fn: Symbol<ffi::FreeResultFn> =
            get_symbol!(lib, b"ocr_engine_free_result\0")?;

        let get_info_fn_ptr = *get_info_fn;
        let initialize_fn_ptr = *initialize_fn;
        let shutdown_fn_ptr = *shutdown_fn;
        let process_fn_ptr = *process_fn;
        let free_result_fn_ptr = *free_result_fn;

        let init_result = ffi::OcrErrorCode::from(unsafe { initialize_fn_ptr() });
        if init_result != ffi::OcrErrorCode::Success {
            return Err(EngineError::LoadFailed(format!(
                "Engine at {:?} failed to initialize with error code: {:?}",
                path, init_result
            )));
        }

        // From here on the library is initialized, so dropping it must run shutdown.
        let library = EngineLibrary {
            _lib: lib,
            path: path.to_path_buf(),
            ocr_engine_shutdown: shutdown_fn_ptr,
        };

        let info_ptr = unsafe { get_info_fn_ptr() };
        if info_ptr.is_null() {
            return Err(EngineError::LoadFailed(format!(
                "Engine at {:?} returned NULL from ocr_engine_get_info",
                path
            )));
        }
        let c_info = unsafe { &*info_ptr };
        let info = unsafe {
            EngineInfo {
                name: c_str_to_rust_string(c_info.name)
                    .map_err(|e| EngineError::LoadFailed(format!("Invalid engine name: {}", e)))?,
                version: c_str_to_rust_string(c_info.version).map_err(|e| {
                    EngineError::LoadFailed(format!("Invalid engine version: {}", e))
                })?,
                description: c_str_to_rust_string(c_info.description).map_err(|e| {
                    EngineError::LoadFailed(format!("Invalid engine description: {}", e))
                })?,
            }
        };

        Ok(NativeEngine {
            library,
            info,
            process_lock: Mutex::new(()),
            ocr_engine_process: process_fn_ptr,
            ocr_engine_free_result: free_result_fn_ptr,
        })
    }

    pub fn info(&self) -> &EngineInfo {
        &self.info
    }

    pub fn path(&self) -> &Path {
        &self.library.path
    }

    // Copies an engine-owned buffer and hands it back to the engine for release.
    fn take_result(&self, ptr: *mut c_char, len: usize) -> Vec<u8> {
        let bytes = unsafe { std::slice::from_raw_parts(ptr as *const u8, len) }.to_vec();
        unsafe { (self.ocr_engine_free_result)(ptr) };
        bytes
    }
}

impl OcrEngine for NativeEngine {
    fn process(&self, image: &RgbImage, week_number: &str) -> Result<ScanResult, EngineError> {
        let data = image.as_raw();
        let mut out_json: *mut c_char = std::ptr::null_mut();
        let mut out_json_len: usize = 0;

        let raw_code = {
            let _guard = self.process_lock.lock().map_err(|e| EngineError::ProcessFailed {
                code: ffi::OcrErrorCode::Other,
                details: format!("Failed to acquire engine lock: {}", e),
            })?;
            unsafe {
                (self.ocr_engine_process)(
                    data.as_ptr(),
                    data.len(),
                    image.width(),
                    image.height(),
                    3,
                    week_number.as_ptr() as *const c_char,
                    week_number.len(),
                    &mut out_json,
                    &mut out_json_len,
                )
            }
        };

        let output = if out_json.is_null() {
            None
        } else {
            Some(self.take_result(out_json, out_json_len))
        };

        interpret_output(ffi::OcrErrorCode::from(raw_code), output)
    }
}

// Turns the status code and the (already copied) output buffer of one
// `ocr_engine_process` call into a result.
fn interpret_output(
    code: ffi::OcrErrorCode,
    output: Option<Vec<u8>>,
) -> Result<ScanResult, EngineError> {
    if code != ffi::OcrErrorCode::Success {
        // On failure the engine may leave a message in the output buffer.
        let details = output
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
            .unwrap_or_else(|| "no details reported".to_string());
        return Err(EngineError::ProcessFailed { code, details });
    }

    let bytes = output.ok_or_else(|| {
        EngineError::InvalidOutput("engine reported success but returned no result".into())
    })?;
    ScanResult::from_json(&bytes)
}

// Converts a NUL-terminated UTF-8 string owned by the engine into a Rust String.
unsafe fn c_str_to_rust_string(c_str_ptr: *const c_char) -> Result<String, String> {
    if c_str_ptr.is_null() {
        return Err("Encountered a null string pointer from engine".to_string());
    }
    unsafe { CStr::from_ptr(c_str_ptr) }
        .to_str()
        .map(String::from)
        .map_err(|e| format!("Invalid UTF-8 sequence in string from engine: {}", e))
}
