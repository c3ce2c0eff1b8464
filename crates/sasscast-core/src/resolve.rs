//! Import resolution: recursive `@import` expansion.
//!
//! Copyright (c) 2025 Posit, PBC
//!
//! This module assembles a tree of SCSS files connected by `@import`
//! directives into one self-contained document. Expansion is ordinary
//! depth-first recursion; each included file's content is inlined in
//! place of the directive that referenced it, preceded by a provenance
//! marker line naming its source path.
//!
//! Directive recognition is intentionally narrow, matching the
//! behavior the remote service was built around:
//!
//! ```text
//! @import "buttons";      <- recognized (column zero)
//!     @import "buttons";  <- NOT recognized (indented)
//! // @import "buttons";   <- NOT recognized (commented out)
//! ```
//!
//! Only a directive beginning at column zero of its line, with a
//! single- or double-quoted name and a terminating semicolon, is
//! expanded. Everything else is passed through verbatim for the remote
//! service to deal with.
//!
//! Assembly is best-effort: a missing import or a repeated reference
//! to an already-included file degrades to an ignore marker rather
//! than an error, and the skip is reported in the returned
//! diagnostics.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::CompileError;
use sasscast_system_runtime::SystemRuntime;

/// Import directive at column zero of a line.
///
/// Captures the import name in group 1. The quote class accepts a
/// single or double quote on either side; the closing quote is not
/// required to match the opening one, which mirrors the historical
/// matcher this replaces.
static IMPORT_DIRECTIVE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^@import ["']([^"']+)["'];"#).unwrap());

/// Tracks which resolved paths have already contributed content to the
/// current compile run.
///
/// Scoped to exactly one top-level [`ImportResolver::expand`] call:
/// create a fresh tracker per run and discard it afterwards. Sharing a
/// tracker across runs (concurrent or not) would suppress inclusions
/// that belong to the other run.
#[derive(Debug, Default)]
pub struct InclusionTracker {
    included: HashSet<PathBuf>,
}

impl InclusionTracker {
    /// Create an empty tracker for one compile run.
    pub fn new() -> Self {
        Self::default()
    }

    fn mark(&mut self, path: &Path) {
        self.included.insert(path.to_path_buf());
    }

    fn contains(&self, path: &Path) -> bool {
        self.included.contains(path)
    }
}

/// Why an import reference contributed no content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The candidate file does not exist
    Missing,
    /// The candidate file was already inlined earlier in this run
    AlreadyIncluded,
}

/// A directive that was dropped during assembly.
///
/// Skips are silent by design (assembly is best-effort), but they can
/// hide authoring mistakes, so every one is reported here for the
/// caller to log or surface.
#[derive(Debug, Clone)]
pub struct SkippedImport {
    /// The literal name written in the directive
    pub name: String,
    /// The candidate file path the name resolved to
    pub candidate: PathBuf,
    /// Why the reference was dropped
    pub reason: SkipReason,
}

/// The output of one compile run's assembly phase.
#[derive(Debug, Clone)]
pub struct AssembledDocument {
    /// The fully expanded text, one provenance marker per included file
    pub text: String,
    /// Imports that contributed no content, in encounter order
    pub skipped: Vec<SkippedImport>,
}

/// Recursively expands import directives for one compile run.
pub struct ImportResolver<'a> {
    runtime: &'a dyn SystemRuntime,
    passthrough: &'a [String],
}

impl<'a> ImportResolver<'a> {
    /// Create a resolver reading through `runtime`.
    ///
    /// `passthrough` lists import names the remote service resolves
    /// natively; a directive whose name contains any entry is left
    /// untouched in the output.
    pub fn new(runtime: &'a dyn SystemRuntime, passthrough: &'a [String]) -> Self {
        Self {
            runtime,
            passthrough,
        }
    }

    /// Expand every reachable import of `path` into inlined text.
    ///
    /// `tracker` must be fresh for this run. Each reachable, existing,
    /// non-pass-through import is inlined exactly once, in depth-first
    /// first-occurrence order; cyclic or repeated references degrade to
    /// ignore markers because a path is marked included before its own
    /// imports are scanned.
    ///
    /// The root must be readable; anything else is best-effort.
    pub fn expand(
        &self,
        path: &Path,
        tracker: &mut InclusionTracker,
    ) -> Result<AssembledDocument, CompileError> {
        let mut skipped = Vec::new();
        let text = self.expand_file(path, tracker, &mut skipped)?;
        Ok(AssembledDocument { text, skipped })
    }

    fn expand_file(
        &self,
        path: &Path,
        tracker: &mut InclusionTracker,
        skipped: &mut Vec<SkippedImport>,
    ) -> Result<String, CompileError> {
        let data = self.runtime.file_read_string(path)?;
        // Mark before scanning so a cycle back to this file degrades to
        // an ignore marker instead of recursing forever.
        tracker.mark(path);

        let mut out = String::with_capacity(data.len() + 64);
        out.push_str(&format!("// sasscast import {}\n", path.display()));

        for line in data.split_inclusive('\n') {
            let Some(captures) = IMPORT_DIRECTIVE.captures(line) else {
                out.push_str(line);
                continue;
            };

            let directive = captures.get(0).expect("group 0 always present");
            let name = captures.get(1).expect("directive has a name").as_str();
            let rest = &line[directive.end()..];

            if self.is_passthrough(name) {
                tracing::debug!(name, "leaving pass-through import for the remote service");
                out.push_str(line);
                continue;
            }

            let candidate = partial_path(path, name);
            if tracker.contains(&candidate) {
                tracing::debug!(
                    name,
                    candidate = %candidate.display(),
                    "import already included, dropping"
                );
                out.push_str(&ignore_marker(name));
                out.push_str(rest);
                skipped.push(SkippedImport {
                    name: name.to_string(),
                    candidate,
                    reason: SkipReason::AlreadyIncluded,
                });
            } else if self.runtime.path_exists(&candidate) {
                let inlined = self.expand_file(&candidate, tracker, skipped)?;
                out.push_str(&inlined);
                out.push_str(rest);
            } else {
                tracing::debug!(
                    name,
                    candidate = %candidate.display(),
                    "import target missing, dropping"
                );
                out.push_str(&ignore_marker(name));
                out.push_str(rest);
                skipped.push(SkippedImport {
                    name: name.to_string(),
                    candidate,
                    reason: SkipReason::Missing,
                });
            }
        }

        Ok(out)
    }

    fn is_passthrough(&self, name: &str) -> bool {
        self.passthrough.iter().any(|entry| name.contains(entry))
    }
}

/// Marker substituted for a directive that contributed no content.
fn ignore_marker(name: &str) -> String {
    format!("// sasscast ignore import {}", name)
}

/// Candidate file path for an import name: same directory as the
/// importing file, `.scss` extension, and the partial-file convention
/// of prefixing the final path segment with an underscore.
///
/// `@import "mixins/buttons";` from `/scss/main.scss` resolves to
/// `/scss/mixins/_buttons.scss`.
fn partial_path(importer: &Path, name: &str) -> PathBuf {
    let dir = importer.parent().unwrap_or_else(|| Path::new(""));
    let relative = format!("{}.scss", name);
    let relative = Path::new(&relative);

    let file = relative
        .file_name()
        .map(|f| format!("_{}", f.to_string_lossy()))
        .unwrap_or_default();

    match relative.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => dir.join(parent).join(file),
        _ => dir.join(file),
    }
}
