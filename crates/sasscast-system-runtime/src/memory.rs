/*
 * memory.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * MemoryRuntime: an in-memory virtual filesystem with scripted HTTP
 * responses.
 *
 * This is the runtime used by the test suites of the crates that build
 * on the abstraction: source files live in a HashMap, and each POST
 * consumes the next scripted response from a queue while recording the
 * request so tests can assert on what was (or was not) sent.
 */

use std::collections::{HashMap, VecDeque};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use crate::traits::{HttpResponse, RuntimeError, RuntimeResult, SystemRuntime};

/// A POST request recorded by `MemoryRuntime`.
#[derive(Debug, Clone)]
pub struct RecordedPost {
    /// Target URL
    pub url: String,
    /// Form fields in the order they were supplied
    pub fields: Vec<(String, String)>,
    /// Basic-auth pair, if any
    pub auth: Option<(String, String)>,
}

impl RecordedPost {
    /// Look up a form field by name.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// In-memory runtime for tests.
#[derive(Default)]
pub struct MemoryRuntime {
    files: HashMap<PathBuf, String>,
    responses: Mutex<VecDeque<RuntimeResult<HttpResponse>>>,
    posts: Mutex<Vec<RecordedPost>>,
}

impl MemoryRuntime {
    /// Create an empty runtime with no files and no scripted responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style: add a file and return self.
    pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.files.insert(path.into(), content.into());
        self
    }

    /// Add a file to the virtual filesystem.
    pub fn add_file(&mut self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.files.insert(path.into(), content.into());
    }

    /// Queue a response for the next POST.
    pub fn push_response(&self, status: u16, body: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(HttpResponse {
                status,
                body: body.into(),
            }));
    }

    /// Queue a transport-level failure for the next POST.
    pub fn push_transport_failure(&self, message: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(RuntimeError::Network(message.into())));
    }

    /// Number of POSTs performed so far.
    pub fn post_calls(&self) -> usize {
        self.posts.lock().unwrap().len()
    }

    /// All POSTs recorded so far.
    pub fn posts(&self) -> Vec<RecordedPost> {
        self.posts.lock().unwrap().clone()
    }
}

impl SystemRuntime for MemoryRuntime {
    fn file_read(&self, path: &Path) -> RuntimeResult<Vec<u8>> {
        match self.files.get(path) {
            Some(content) => Ok(content.clone().into_bytes()),
            None => Err(RuntimeError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such file: {}", path.display()),
            ))),
        }
    }

    fn path_exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    fn http_post_form(
        &self,
        url: &str,
        fields: &[(&str, &str)],
        auth: Option<(&str, &str)>,
        _timeout: Duration,
    ) -> RuntimeResult<HttpResponse> {
        self.posts.lock().unwrap().push(RecordedPost {
            url: url.to_string(),
            fields: fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            auth: auth.map(|(u, p)| (u.to_string(), p.to_string())),
        });

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(RuntimeError::Network(
                    "MemoryRuntime: no scripted response queued".to_string(),
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_operations() {
        let rt = MemoryRuntime::new().with_file("/scss/main.scss", "a { b: c; }");

        assert!(rt.path_exists(Path::new("/scss/main.scss")));
        assert!(!rt.path_exists(Path::new("/scss/other.scss")));
        assert_eq!(
            rt.file_read_string(Path::new("/scss/main.scss")).unwrap(),
            "a { b: c; }"
        );

        match rt.file_read(Path::new("/scss/other.scss")) {
            Err(RuntimeError::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::NotFound),
            other => panic!("expected NotFound, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_scripted_responses_and_recording() {
        let rt = MemoryRuntime::new();
        rt.push_response(200, "{\"css\":\"x\"}");

        let response = rt
            .http_post_form(
                "http://example.test/compile",
                &[("data", "a"), ("output_style", "compressed")],
                Some(("key", "")),
                Duration::from_secs(1),
            )
            .unwrap();
        assert_eq!(response.status, 200);

        assert_eq!(rt.post_calls(), 1);
        let post = &rt.posts()[0];
        assert_eq!(post.url, "http://example.test/compile");
        assert_eq!(post.field("data"), Some("a"));
        assert_eq!(post.auth.as_ref().unwrap().0, "key");
    }

    #[test]
    fn test_exhausted_queue_is_transport_failure() {
        let rt = MemoryRuntime::new();
        let result = rt.http_post_form("http://example.test", &[], None, Duration::from_secs(1));
        assert!(matches!(result, Err(RuntimeError::Network(_))));
        // The attempt still counts as a call.
        assert_eq!(rt.post_calls(), 1);
    }
}
