use crate::web::DEFAULT_MAX_UPLOAD_BYTES;
use clap::Parser;
use std::path::PathBuf;
use tracing::Level;

/// Command line arguments for attendance-scan-server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct AppConfig {
    /// Hostname/IP to bind the server to.
    /// If this option is specified without value, it will default to "*", meaning the server will listen on all interfaces.
    #[arg(long, env = "SCAN_SERVER_HOST", default_value = "localhost", num_args = 0..=1, default_missing_value = "*")]
    pub host: String,

    /// Port number to listen on.
    #[arg(short, long, env = "SCAN_SERVER_PORT", default_value_t = 5001)]
    pub port: u16,

    /// Shared library implementing the OCR engine ABI.
    /// Without it the server still answers, but every scan fails with a process error.
    #[arg(long, env = "SCAN_SERVER_ENGINE_LIBRARY")]
    pub engine_library: Option<PathBuf>,

    /// Maximum accepted request body size in bytes.
    #[arg(long, env = "SCAN_SERVER_MAX_UPLOAD_BYTES", default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    pub max_upload_bytes: usize,

    /// Maximum log level (trace, debug, info, warn, error).
    #[arg(long, env = "SCAN_SERVER_LOG_LEVEL", default_value_t = Level::INFO)]
    pub log_level: Level,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::try_parse_from(["attendance-scan-server"]).unwrap();

        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 5001);
        assert_eq!(config.engine_library, None);
        assert_eq!(config.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
        assert_eq!(config.log_level, Level::INFO);
    }

    #[test]
    fn test_host_without_value_means_all_interfaces() {
        let config = AppConfig::try_parse_from(["attendance-scan-server", "--host"]).unwrap();
        assert_eq!(config.host, "*");
    }

    #[test]
    fn test_explicit_values() {
        let config = AppConfig::try_parse_from([
            "attendance-scan-server",
            "--host",
            "0.0.0.0",
            "-p",
            "8080",
            "--engine-library",
            "/opt/ocr/libabsence_ocr.so",
            "--max-upload-bytes",
            "1048576",
            "--log-level",
            "debug",
        ])
        .unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(
            config.engine_library,
            Some(PathBuf::from("/opt/ocr/libabsence_ocr.so"))
        );
        assert_eq!(config.max_upload_bytes, 1024 * 1024);
        assert_eq!(config.log_level, Level::DEBUG);
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        assert!(AppConfig::try_parse_from(["attendance-scan-server", "--port", "70000"]).is_err());
    }
}
