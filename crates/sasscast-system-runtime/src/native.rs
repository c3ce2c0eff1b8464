/*
 * native.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * NativeRuntime: full system access using std::fs and a blocking
 * reqwest client.
 */

use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::traits::{HttpResponse, RuntimeError, RuntimeResult, SystemRuntime};

/// Runtime with full filesystem and network access.
pub struct NativeRuntime {
    client: reqwest::blocking::Client,
}

impl NativeRuntime {
    /// Create a new native runtime with a default HTTP client.
    pub fn new() -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
        }
    }
}

impl Default for NativeRuntime {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemRuntime for NativeRuntime {
    fn file_read(&self, path: &Path) -> RuntimeResult<Vec<u8>> {
        Ok(fs::read(path)?)
    }

    fn path_exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn http_post_form(
        &self,
        url: &str,
        fields: &[(&str, &str)],
        auth: Option<(&str, &str)>,
        timeout: Duration,
    ) -> RuntimeResult<HttpResponse> {
        let mut request = self.client.post(url).timeout(timeout).form(&fields);
        if let Some((user, pass)) = auth {
            request = request.basic_auth(user, Some(pass));
        }

        // reqwest treats 4xx/5xx as ordinary responses; only
        // transport-level failures come back through the Err arm.
        let response = request
            .send()
            .map_err(|e| RuntimeError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| RuntimeError::Network(e.to_string()))?;

        Ok(HttpResponse { status, body })
    }
}
