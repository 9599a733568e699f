use std::{fmt, sync::OnceLock};

use regex::Regex;
use serde::Serialize;

/// Destination family of a derived redirect.
///
/// Declaration order is priority order when one source path has several
/// destinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RedirectKind {
    Agroverse,
    Sunmint,
}

impl RedirectKind {
    pub fn label(self) -> &'static str {
        match self {
            RedirectKind::Agroverse => "agroverse",
            RedirectKind::Sunmint => "sunmint",
        }
    }
}

impl fmt::Display for RedirectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Redirect {
    pub old: String,
    pub new: String,
    pub kind: RedirectKind,
}

impl Redirect {
    pub fn new(old: impl Into<String>, new: impl Into<String>, kind: RedirectKind) -> Self {
        Self {
            old: old.into(),
            new: new.into(),
            kind,
        }
    }
}

impl fmt::Display for Redirect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {} ({})", self.old, self.new, self.kind)
    }
}

fn origin_pattern() -> &'static Regex {
    static ORIGIN: OnceLock<Regex> = OnceLock::new();
    ORIGIN.get_or_init(|| Regex::new(r"^https?://[^/]+").expect("valid origin pattern"))
}

/// Reduces a URL or path to a bare site path.
///
/// Drops any `http(s)://host` origin, leading and trailing slashes, and a
/// trailing `.html` extension: `https://example.com/a/b.html/` becomes `a/b`.
pub fn normalize_path(url: &str) -> String {
    let without_origin = origin_pattern().replace(url, "");
    let trimmed = without_origin.trim_matches('/');
    trimmed.strip_suffix(".html").unwrap_or(trimmed).to_string()
}

/// Prefixes a normalized path with a single `/`.
pub fn as_site_path(path: &str) -> String {
    format!("/{}", path.trim_start_matches('/'))
}
