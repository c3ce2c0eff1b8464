/*
 * sasscast-system-runtime
 * Copyright (c) 2025 Posit, PBC
 *
 * Runtime abstraction layer for sasscast system operations.
 *
 * This crate provides a trait-based abstraction for the system
 * capabilities the compile pipeline consumes, allowing it to run in
 * different execution environments:
 *
 * - NativeRuntime: Full system access using std + a blocking HTTP client
 * - MemoryRuntime: In-memory virtual filesystem with scripted HTTP
 *   responses, for tests and offline experimentation
 *
 * The pipeline itself never touches std::fs or the network directly;
 * everything goes through `SystemRuntime`.
 */

mod memory;
mod native;
mod traits;

// Re-export core types (API surface)
pub use traits::{HttpResponse, RuntimeError, RuntimeResult, SystemRuntime};

// Re-export runtime implementations
pub use memory::{MemoryRuntime, RecordedPost};
pub use native::NativeRuntime;

/// Create a default runtime for the current platform.
///
/// Returns a NativeRuntime with full filesystem and network access.
pub fn default_runtime() -> NativeRuntime {
    NativeRuntime::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_default_runtime_exists() {
        let rt = default_runtime();
        // Basic sanity check: a path that cannot exist
        assert!(!rt.path_exists(Path::new("/nonexistent/sasscast/path.scss")));
    }
}
