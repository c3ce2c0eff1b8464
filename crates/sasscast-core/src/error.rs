//! Error types for the compile pipeline.
//!
//! Copyright (c) 2025 Posit, PBC
//!
//! Note the deliberate asymmetry with import resolution: a missing or
//! duplicate import is never an error. Assembly is best-effort; those
//! cases degrade to ignore markers and surface only as
//! [`SkippedImport`](crate::SkippedImport) diagnostics.

use sasscast_system_runtime::RuntimeError;
use thiserror::Error;

/// Errors that can occur during a remote compile attempt.
///
/// Every failure is terminal for the current attempt; there is no
/// internal retry. `ServiceUnavailable` additionally means a cooldown
/// window may be in effect, suppressing further network calls until it
/// elapses.
#[derive(Debug, Error)]
pub enum CompileError {
    /// Cooldown active, or the transport failed/timed out
    #[error("compile service unavailable: {0}")]
    ServiceUnavailable(String),

    /// 400 - the request was malformed
    #[error("bad request: {0}")]
    BadRequest(String),

    /// 401 - no valid API key provided
    #[error("unauthorized: no valid API key provided")]
    Unauthorized,

    /// 402 - parameters were valid but the request failed
    #[error("request failed: parameters were valid but the request failed")]
    RequestFailed,

    /// 404 - the requested item doesn't exist
    #[error("not found: the requested item doesn't exist")]
    NotFound,

    /// 200 but no usable css in the response body
    #[error("compile service returned no css: {0}")]
    EmptyResponse(String),

    /// Any other status - something went wrong on the service's end
    #[error("compile service error (status {status}): {body}")]
    ServerError {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// Reading a source document failed (unreadable root, I/O error
    /// partway through expansion)
    #[error("failed to read source file: {0}")]
    Runtime(#[from] RuntimeError),
}
