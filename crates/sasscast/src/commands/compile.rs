//! `sasscast compile` - run the full assemble/rewrite/compile pipeline.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{info, warn};

use sasscast_core::{compile_document, CompilerConfig, FailureCooldown, OutputStyle};
use sasscast_system_runtime::default_runtime;

/// Parsed arguments for the compile subcommand.
pub struct CompileArgs {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub output_style: String,
    pub api_key: Option<String>,
    pub endpoint: Option<String>,
    pub timeout: u64,
    pub images_base: Option<String>,
    pub fonts_base: Option<String>,
    pub asset_root: String,
    pub passthrough: Vec<String>,
}

pub fn execute(args: CompileArgs) -> Result<()> {
    let output_style: OutputStyle = args
        .output_style
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    let api_key = match args.api_key {
        Some(key) => key,
        None => std::env::var("SASSCAST_API_KEY").unwrap_or_default(),
    };

    let defaults = CompilerConfig::default();
    let config = CompilerConfig {
        api_key,
        endpoint: args.endpoint.unwrap_or(defaults.endpoint),
        output_style,
        timeout: Duration::from_secs(args.timeout),
        images_base: args.images_base,
        fonts_base: args.fonts_base,
        asset_root: args.asset_root,
        passthrough: if args.passthrough.is_empty() {
            defaults.passthrough
        } else {
            args.passthrough
        },
    };

    let runtime = default_runtime();
    let cooldown = FailureCooldown::new();

    let compiled = compile_document(&args.input, &config, &runtime, &cooldown)
        .with_context(|| format!("could not compile {}", args.input.display()))?;

    for skip in &compiled.skipped {
        warn!(
            name = %skip.name,
            candidate = %skip.candidate.display(),
            "import dropped during assembly"
        );
    }

    match args.output {
        Some(path) => {
            fs::write(&path, &compiled.css)
                .with_context(|| format!("could not write {}", path.display()))?;
            info!(output = %path.display(), bytes = compiled.css.len(), "wrote compiled CSS");
        }
        None => print!("{}", compiled.css),
    }

    Ok(())
}
