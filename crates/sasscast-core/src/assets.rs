//! Asset URL rewriting.
//!
//! Copyright (c) 2025 Posit, PBC
//!
//! The remote compiler has no notion of base-path-aware asset
//! functions, so `image-url("logo.png")` and `font-url("body.ttf")`
//! calls are rewritten into plain `url(...)` calls with the configured
//! base path prepended before the document is submitted.
//!
//! This is pure text substitution: every occurrence is rewritten, the
//! argument is not validated, and there is no recursion. An
//! already-rewritten `url(...)` call no longer matches either pattern,
//! so applying the rewrite twice is a no-op.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// `image-url('<relative path>')` with a single- or double-quoted
/// argument. Captures the argument in group 1.
static IMAGE_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"image-url\(['"](.*?)['"]\)"#).unwrap());

/// `font-url('<relative path>')`, analogous to [`IMAGE_URL`].
static FONT_URL: Lazy<Regex> = Lazy::new(|| Regex::new(r#"font-url\(['"](.*?)['"]\)"#).unwrap());

/// Rewrite every asset-reference call in `text` to an absolute
/// `url(...)` call.
///
/// `image-url("logo.png")` becomes `url(<images_base>/logo.png)`;
/// `font-url("body.ttf")` becomes `url(<fonts_base>/body.ttf)`.
pub fn rewrite_asset_urls(text: &str, images_base: &str, fonts_base: &str) -> String {
    let text = IMAGE_URL.replace_all(text, |caps: &Captures<'_>| {
        format!("url({}/{})", images_base, &caps[1])
    });
    FONT_URL
        .replace_all(&text, |caps: &Captures<'_>| {
            format!("url({}/{})", fonts_base, &caps[1])
        })
        .into_owned()
}
