use std::path::PathBuf;
use std::process::ExitStatus;
use std::time::Duration;
use thiserror::Error;

/// A specialized `Result` type for capture strategy attempts.
pub type CaptureResult<T> = Result<T, CaptureError>;

/// Why one capture strategy attempt failed. These never escape the
/// acquisition engine; `capture()` converts them into "try the next
/// strategy" and ultimately into `None`.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("failed to spawn '{command}': {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    #[error("'{command}' timed out after {duration:?}")]
    Timeout { command: String, duration: Duration },

    #[error("'{command}' exited with {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("failed to decode captured image {path:?}: {source}")]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("failed to create temporary file: {source}")]
    TempFile {
        #[from]
        source: std::io::Error,
    },

    #[error("no window matching the target title found")]
    WindowNotFound,

    #[error("screen query failed: {source}")]
    Screen {
        #[from]
        source: xcap::XCapError,
    },

    #[error("no monitors found")]
    NoMonitor,
}
