//! Site-level settings for redirect identification.
//!
//! Defaults describe the live site. A YAML file passed with `--config` may
//! override any subset of keys:
//!
//! ```yaml
//! legacy_host: truesight.me
//! legacy_listing_prefix: shipments
//! agroverse_prefix: agroverse-shipments
//! sunmint_prefix: sunmint-tree-planting-pledges
//! ```

use std::{fs, path::Path};

use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::redirect::RedirectKind;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Host whose URLs in the manifest point at legacy pages.
    pub legacy_host: String,
    /// Path segment under which legacy shipment pages were listed.
    pub legacy_listing_prefix: String,
    pub agroverse_prefix: String,
    pub sunmint_prefix: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            legacy_host: "truesight.me".to_string(),
            legacy_listing_prefix: "shipments".to_string(),
            agroverse_prefix: "agroverse-shipments".to_string(),
            sunmint_prefix: "sunmint-tree-planting-pledges".to_string(),
        }
    }
}

impl SiteConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Reading site configuration {path:?}"))?;
        Self::from_yaml(&raw).with_context(|| format!("Parsing site configuration {path:?}"))
    }

    pub fn from_yaml(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: SiteConfig = serde_yaml::from_str(raw)?;
        debug!("Site configuration: {config:?}");
        Ok(config)
    }

    /// Loads `path` when given, otherwise returns the defaults.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Destination path for shipment `id` within the given family.
    pub fn destination(&self, kind: RedirectKind, id: &str) -> String {
        let prefix = match kind {
            RedirectKind::Agroverse => &self.agroverse_prefix,
            RedirectKind::Sunmint => &self.sunmint_prefix,
        };
        format!("/{}/{id}", prefix.trim_matches('/'))
    }

    pub fn legacy_listing_path(&self, id: &str) -> String {
        format!("/{}/{id}", self.legacy_listing_prefix.trim_matches('/'))
    }
}
