//! Compiler configuration.
//!
//! Copyright (c) 2025 Posit, PBC
//!
//! This module provides the configuration consumed by a compile run:
//! the remote endpoint and credential, the requested output style, the
//! asset base paths used by URL rewriting, and the pass-through
//! allow-list for imports the remote service resolves natively.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default remote compile endpoint.
pub const DEFAULT_ENDPOINT: &str = "http://api.sassquat.ch/squeeze";

/// Default request timeout for one compile POST.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Output style of the returned CSS, as understood by the remote
/// service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputStyle {
    /// Indented to mirror nesting in the source
    Nested,
    /// One property per line
    Expanded,
    /// One rule per line
    Compact,
    /// Minified
    #[default]
    Compressed,
}

impl OutputStyle {
    /// The wire representation (`output_style` form field).
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputStyle::Nested => "nested",
            OutputStyle::Expanded => "expanded",
            OutputStyle::Compact => "compact",
            OutputStyle::Compressed => "compressed",
        }
    }
}

impl fmt::Display for OutputStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nested" => Ok(OutputStyle::Nested),
            "expanded" => Ok(OutputStyle::Expanded),
            "compact" => Ok(OutputStyle::Compact),
            "compressed" => Ok(OutputStyle::Compressed),
            other => Err(format!(
                "unknown output style '{}' (expected nested, expanded, compact or compressed)",
                other
            )),
        }
    }
}

/// Configuration for one compile run.
#[derive(Debug, Clone)]
pub struct CompilerConfig {
    /// API key for the remote service, sent as the basic-auth user
    pub api_key: String,

    /// Remote compile endpoint URL
    pub endpoint: String,

    /// Style of the returned CSS
    pub output_style: OutputStyle,

    /// How long one compile POST may block before it counts as a
    /// transport failure
    pub timeout: Duration,

    /// Override for the images base path; when absent the site asset
    /// root fallback is used
    pub images_base: Option<String>,

    /// Override for the fonts base path; when absent the site asset
    /// root fallback is used
    pub fonts_base: Option<String>,

    /// Site-supplied asset root, used to build the default
    /// `<root>/assets/images` and `<root>/assets/fonts` base paths
    pub asset_root: String,

    /// Import names left for the remote service to resolve natively.
    /// Matched by substring containment against the directive's name.
    pub passthrough: Vec<String>,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            output_style: OutputStyle::default(),
            timeout: DEFAULT_TIMEOUT,
            images_base: None,
            fonts_base: None,
            asset_root: String::new(),
            passthrough: vec!["bourbon".to_string()],
        }
    }
}

impl CompilerConfig {
    /// The base path prepended to `image-url(...)` arguments.
    pub fn images_base(&self) -> String {
        match &self.images_base {
            Some(base) => base.clone(),
            None => format!("{}/assets/images", self.asset_root.trim_end_matches('/')),
        }
    }

    /// The base path prepended to `font-url(...)` arguments.
    pub fn fonts_base(&self) -> String {
        match &self.fonts_base {
            Some(base) => base.clone(),
            None => format!("{}/assets/fonts", self.asset_root.trim_end_matches('/')),
        }
    }
}
