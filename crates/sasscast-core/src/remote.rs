//! Remote compilation: one POST per attempt, with failure
//! classification.
//!
//! Copyright (c) 2025 Posit, PBC
//!
//! The remote service accepts a form-encoded POST with fields `data`
//! (the assembled SCSS), `output_style`, and `image_path`, and answers
//! with JSON `{ "css": ..., "message": ... }` where both fields are
//! optional. Status-code semantics:
//!
//! | status | body          | outcome                       |
//! |--------|---------------|-------------------------------|
//! | 200    | css non-empty | success                       |
//! | 200    | message       | `EmptyResponse` with message  |
//! | 200    | neither       | `EmptyResponse`, generic      |
//! | 400    | -             | `BadRequest` with message     |
//! | 401    | -             | `Unauthorized`                |
//! | 402    | -             | `RequestFailed`               |
//! | 404    | -             | `NotFound`                    |
//! | other  | -             | `ServerError` with raw body   |
//!
//! A transport-level failure (DNS, connect, timeout) activates the
//! shared [`FailureCooldown`]; while the cooldown is in effect,
//! `compile` returns `ServiceUnavailable` without touching the
//! network. There is no internal retry: retry only happens implicitly
//! when a future call observes an expired cooldown.

use std::time::Duration;

use serde::Deserialize;

use crate::config::{CompilerConfig, OutputStyle};
use crate::cooldown::FailureCooldown;
use crate::error::CompileError;
use sasscast_system_runtime::{HttpResponse, SystemRuntime};

/// How long the endpoint is left alone after a transport failure.
pub const REMOTE_FAIL_COOLDOWN: Duration = Duration::from_secs(60);

/// One compile request as submitted to the remote service.
#[derive(Debug, Clone)]
pub struct CompileRequest {
    /// Assembled, asset-rewritten SCSS text
    pub data: String,
    /// Requested style of the returned CSS
    pub output_style: OutputStyle,
    /// Base path the service uses for its own image helpers
    pub image_path: String,
}

/// JSON body of a compile response. Both fields are optional.
#[derive(Debug, Deserialize)]
struct RemoteResponse {
    css: Option<String>,
    message: Option<String>,
}

/// Submits assembled documents to the remote compile service.
pub struct RemoteCompiler<'a> {
    runtime: &'a dyn SystemRuntime,
    cooldown: &'a FailureCooldown,
    endpoint: &'a str,
    api_key: &'a str,
    timeout: Duration,
}

impl<'a> RemoteCompiler<'a> {
    /// Create a compiler for the endpoint described by `config`,
    /// sharing `cooldown` with every other compiler in the process.
    pub fn new(
        runtime: &'a dyn SystemRuntime,
        cooldown: &'a FailureCooldown,
        config: &'a CompilerConfig,
    ) -> Self {
        Self {
            runtime,
            cooldown,
            endpoint: &config.endpoint,
            api_key: &config.api_key,
            timeout: config.timeout,
        }
    }

    /// Perform one compile attempt.
    ///
    /// Returns the compiled CSS, or a classified failure that is
    /// terminal for this attempt.
    pub fn compile(&self, request: &CompileRequest) -> Result<String, CompileError> {
        if self.cooldown.is_active() {
            tracing::debug!("compile suppressed: failure cooldown active");
            return Err(CompileError::ServiceUnavailable(
                "service could not be reached recently; waiting for the cooldown to elapse"
                    .to_string(),
            ));
        }

        let style = request.output_style.as_str();
        let fields = [
            ("data", request.data.as_str()),
            ("output_style", style),
            ("image_path", request.image_path.as_str()),
        ];

        let response = match self.runtime.http_post_form(
            self.endpoint,
            &fields,
            Some((self.api_key, "")),
            self.timeout,
        ) {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    cooldown_secs = REMOTE_FAIL_COOLDOWN.as_secs(),
                    "compile request failed at the transport level, starting cooldown"
                );
                self.cooldown.activate(REMOTE_FAIL_COOLDOWN);
                return Err(CompileError::ServiceUnavailable(format!(
                    "request timed out or failed, will try again in {} seconds: {}",
                    REMOTE_FAIL_COOLDOWN.as_secs(),
                    e
                )));
            }
        };

        classify(response)
    }
}

/// Map a transport response onto the compile result.
fn classify(response: HttpResponse) -> Result<String, CompileError> {
    let parsed: Option<RemoteResponse> = serde_json::from_str(&response.body).ok();

    match response.status {
        200 => match parsed {
            Some(RemoteResponse { css: Some(css), .. }) if !css.is_empty() => Ok(css),
            Some(RemoteResponse {
                message: Some(message),
                ..
            }) => Err(CompileError::EmptyResponse(message)),
            _ => Err(CompileError::EmptyResponse(
                "no data was returned from the remote host".to_string(),
            )),
        },
        400 => {
            let message = parsed
                .and_then(|p| p.message)
                .unwrap_or_else(|| response.body.clone());
            Err(CompileError::BadRequest(message))
        }
        401 => Err(CompileError::Unauthorized),
        402 => Err(CompileError::RequestFailed),
        404 => Err(CompileError::NotFound),
        status => Err(CompileError::ServerError {
            status,
            body: response.body,
        }),
    }
}
