/*
 * traits.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Defines the SystemRuntime trait and supporting types for the runtime
 * abstraction layer.
 *
 * This abstraction allows the compile pipeline to run in different
 * execution environments:
 * - NativeRuntime: filesystem + network access using std and reqwest
 * - MemoryRuntime: in-memory VFS with scripted responses, for tests
 */

use std::io;
use std::path::Path;
use std::time::Duration;

/// Result type for runtime operations
pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// Errors that can occur during runtime operations
#[derive(Debug)]
pub enum RuntimeError {
    /// Standard I/O error
    Io(io::Error),

    /// Network operation failed (transport-level: DNS, connect, timeout)
    Network(String),

    /// Operation not supported on this runtime
    NotSupported(String),
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuntimeError::Io(e) => write!(f, "I/O error: {}", e),
            RuntimeError::Network(msg) => write!(f, "Network error: {}", msg),
            RuntimeError::NotSupported(msg) => write!(f, "Operation not supported: {}", msg),
        }
    }
}

impl std::error::Error for RuntimeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RuntimeError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for RuntimeError {
    fn from(e: io::Error) -> Self {
        RuntimeError::Io(e)
    }
}

/// An HTTP response as seen by the pipeline.
///
/// Non-2xx statuses are ordinary responses, not errors; only
/// transport-level failures (DNS, connect, timeout) surface as
/// `RuntimeError::Network`.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Raw response body
    pub body: String,
}

/// Trait defining the low-level capabilities the compile pipeline needs.
///
/// Implementations provide the actual system interaction, allowing for
/// different behavior based on environment (native, in-memory test
/// doubles). The trait is intentionally small: the pipeline only ever
/// reads files, probes for their existence, and performs one blocking
/// POST per compile attempt.
pub trait SystemRuntime: Send + Sync {
    /// Read entire file contents as bytes.
    fn file_read(&self, path: &Path) -> RuntimeResult<Vec<u8>>;

    /// Read file as string with UTF-8 encoding.
    ///
    /// Default implementation reads bytes and converts to string.
    fn file_read_string(&self, path: &Path) -> RuntimeResult<String> {
        let bytes = self.file_read(path)?;
        String::from_utf8(bytes).map_err(|e| {
            RuntimeError::Io(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Invalid UTF-8 in file: {}", e),
            ))
        })
    }

    /// Check whether a path exists as a regular file.
    fn path_exists(&self, path: &Path) -> bool;

    /// Perform one blocking form-encoded POST.
    ///
    /// `auth` is an optional HTTP basic-auth (user, password) pair.
    /// The call blocks until a response arrives or `timeout` elapses;
    /// expiry is reported as `RuntimeError::Network`.
    fn http_post_form(
        &self,
        url: &str,
        fields: &[(&str, &str)],
        auth: Option<(&str, &str)>,
        timeout: Duration,
    ) -> RuntimeResult<HttpResponse>;
}
