//! `sasscast assemble` - expand imports and print the result without
//! contacting the remote service. Useful for debugging what would be
//! submitted.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::warn;

use sasscast_core::{ImportResolver, InclusionTracker};
use sasscast_system_runtime::default_runtime;

pub fn execute(input: &Path, output: Option<&Path>, passthrough: Vec<String>) -> Result<()> {
    let passthrough = if passthrough.is_empty() {
        vec!["bourbon".to_string()]
    } else {
        passthrough
    };

    let runtime = default_runtime();
    let resolver = ImportResolver::new(&runtime, &passthrough);
    let mut tracker = InclusionTracker::new();

    let assembled = resolver
        .expand(input, &mut tracker)
        .with_context(|| format!("could not assemble {}", input.display()))?;

    for skip in &assembled.skipped {
        warn!(
            name = %skip.name,
            candidate = %skip.candidate.display(),
            reason = ?skip.reason,
            "import dropped during assembly"
        );
    }

    match output {
        Some(path) => fs::write(path, &assembled.text)
            .with_context(|| format!("could not write {}", path.display()))?,
        None => print!("{}", assembled.text),
    }

    Ok(())
}
