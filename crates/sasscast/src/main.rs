//! sasscast CLI - Main entry point

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "sasscast")]
#[command(version)]
#[command(about = "Assemble SCSS locally, compile it remotely", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assemble a SCSS tree and compile it with the remote service
    Compile {
        /// Root SCSS document
        input: PathBuf,

        /// Write CSS to FILE instead of stdout
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Style of the returned CSS (nested, expanded, compact, compressed)
        #[arg(long, default_value = "compressed")]
        output_style: String,

        /// API key for the remote service (falls back to SASSCAST_API_KEY)
        #[arg(long)]
        api_key: Option<String>,

        /// Remote compile endpoint URL
        #[arg(long)]
        endpoint: Option<String>,

        /// Request timeout in seconds
        #[arg(long, default_value_t = 30)]
        timeout: u64,

        /// Base path prepended to image-url(...) arguments
        #[arg(long)]
        images_base: Option<String>,

        /// Base path prepended to font-url(...) arguments
        #[arg(long)]
        fonts_base: Option<String>,

        /// Site asset root used when no explicit base paths are given
        #[arg(long, default_value = "")]
        asset_root: String,

        /// Import name left for the remote service to resolve (repeatable)
        #[arg(long = "passthrough")]
        passthrough: Vec<String>,
    },

    /// Assemble a SCSS tree and print the expanded document without compiling
    Assemble {
        /// Root SCSS document
        input: PathBuf,

        /// Write the assembled document to FILE instead of stdout
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Import name left unexpanded (repeatable)
        #[arg(long = "passthrough")]
        passthrough: Vec<String>,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sasscast=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Compile {
            input,
            output,
            output_style,
            api_key,
            endpoint,
            timeout,
            images_base,
            fonts_base,
            asset_root,
            passthrough,
        } => commands::compile::execute(commands::compile::CompileArgs {
            input,
            output,
            output_style,
            api_key,
            endpoint,
            timeout,
            images_base,
            fonts_base,
            asset_root,
            passthrough,
        }),
        Commands::Assemble {
            input,
            output,
            passthrough,
        } => commands::assemble::execute(&input, output.as_deref(), passthrough),
    }
}
