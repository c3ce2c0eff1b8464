//! SCSS assembly and remote compilation pipeline for sasscast.
//!
//! Copyright (c) 2025 Posit, PBC
//!
//! This crate provides:
//! - Import resolution: recursive `@import` expansion into one
//!   self-contained document, with per-run inclusion tracking
//! - Asset URL rewriting: `image-url(...)`/`font-url(...)` calls
//!   rewritten to absolute `url(...)` calls
//! - Remote compilation: one blocking POST per attempt, with response
//!   classification and a process-wide failure cooldown so a known-down
//!   service is not hammered

mod assets;
mod compile;
mod config;
mod cooldown;
mod error;
mod remote;
mod resolve;

pub use assets::rewrite_asset_urls;
pub use compile::{compile_document, CompiledDocument};
pub use config::{CompilerConfig, OutputStyle, DEFAULT_ENDPOINT};
pub use cooldown::{Clock, FailureCooldown, SystemClock};
pub use error::CompileError;
pub use remote::{CompileRequest, RemoteCompiler, REMOTE_FAIL_COOLDOWN};
pub use resolve::{
    AssembledDocument, ImportResolver, InclusionTracker, SkipReason, SkippedImport,
};
