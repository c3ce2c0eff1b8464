//! High-level compile-run orchestration.
//!
//! Copyright (c) 2025 Posit, PBC
//!
//! One compile run is: pick a root document, expand its imports with a
//! fresh inclusion tracker, rewrite asset-reference calls to absolute
//! URLs, and submit the result to the remote service.
//!
//! ```rust,ignore
//! use sasscast_core::{compile_document, CompilerConfig, FailureCooldown};
//! use sasscast_system_runtime::default_runtime;
//! use std::path::Path;
//!
//! let runtime = default_runtime();
//! let cooldown = FailureCooldown::new();
//! let config = CompilerConfig::default();
//!
//! let compiled = compile_document(Path::new("main.scss"), &config, &runtime, &cooldown)?;
//! println!("{}", compiled.css);
//! ```

use std::path::Path;

use crate::assets::rewrite_asset_urls;
use crate::config::CompilerConfig;
use crate::cooldown::FailureCooldown;
use crate::error::CompileError;
use crate::remote::{CompileRequest, RemoteCompiler};
use crate::resolve::{ImportResolver, InclusionTracker, SkippedImport};
use sasscast_system_runtime::SystemRuntime;

/// The result of a successful compile run.
#[derive(Debug, Clone)]
pub struct CompiledDocument {
    /// Compiled CSS returned by the remote service
    pub css: String,
    /// Imports that were dropped during assembly, for the caller to
    /// log or surface
    pub skipped: Vec<SkippedImport>,
}

/// Run the full pipeline for one root document.
///
/// A fresh [`InclusionTracker`] is created for this run; `cooldown` is
/// the process-wide shared circuit breaker. Concurrent runs may share
/// `runtime`, `config`, and `cooldown` freely.
pub fn compile_document(
    root: &Path,
    config: &CompilerConfig,
    runtime: &dyn SystemRuntime,
    cooldown: &FailureCooldown,
) -> Result<CompiledDocument, CompileError> {
    let resolver = ImportResolver::new(runtime, &config.passthrough);
    let mut tracker = InclusionTracker::new();
    let assembled = resolver.expand(root, &mut tracker)?;

    for skip in &assembled.skipped {
        tracing::warn!(
            name = %skip.name,
            candidate = %skip.candidate.display(),
            reason = ?skip.reason,
            "import skipped during assembly"
        );
    }

    let images_base = config.images_base();
    let data = rewrite_asset_urls(&assembled.text, &images_base, &config.fonts_base());

    let request = CompileRequest {
        data,
        output_style: config.output_style,
        image_path: images_base,
    };
    let compiler = RemoteCompiler::new(runtime, cooldown, config);
    let css = compiler.compile(&request)?;

    tracing::debug!(
        root = %root.display(),
        css_bytes = css.len(),
        skipped = assembled.skipped.len(),
        "remote compile succeeded"
    );

    Ok(CompiledDocument {
        css,
        skipped: assembled.skipped,
    })
}
