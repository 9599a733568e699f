//! Loading of `old_url,new_url` redirect mapping files.
//!
//! Both columns also accept the camel-case spellings `oldUrl` / `newUrl`.
//! Paths are normalized with [`normalize_path()`], so the site origin,
//! surrounding slashes and a `.html` extension never reach the plan.

use std::{fs, path::Path};

use anyhow::{Context, Result, bail};
use encoding_rs::Encoding;
use log::{debug, warn};
use serde::Serialize;
use thiserror::Error;

use crate::{
    csv_table::{self, Record},
    io_utils,
    redirect::{as_site_path, normalize_path},
};

const OLD_COLUMNS: &[&str] = &["old_url", "oldUrl"];
const NEW_COLUMNS: &[&str] = &["new_url", "newUrl"];

pub const TEMPLATE: &str = "old_url,new_url
/shipments/agl13,/agroverse-shipments/agl13
/sunmint-tree-planting-pledges/agl13,/sunmint-tree-planting-pledges/agl13";

/// A normalized mapping; both sides are stored without leading slash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RedirectMapping {
    pub old: String,
    pub new: String,
}

impl RedirectMapping {
    pub fn source(&self) -> String {
        as_site_path(&self.old)
    }

    pub fn destination(&self) -> String {
        as_site_path(&self.new)
    }
}

/// Why a mapping record was skipped. Records are numbered from 1.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingIssue {
    #[error("record {record}: missing old_url")]
    MissingOld { record: usize },
    #[error("record {record}: missing new_url")]
    MissingNew { record: usize },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingSet {
    pub mappings: Vec<RedirectMapping>,
    pub issues: Vec<MappingIssue>,
}

pub fn from_records(records: &[Record]) -> MappingSet {
    let mut set = MappingSet::default();
    for (idx, record) in records.iter().enumerate() {
        let number = idx + 1;
        let old = record.first_non_empty(OLD_COLUMNS);
        let new = record.first_non_empty(NEW_COLUMNS);
        match (old, new) {
            (Some(old), Some(new)) => set.mappings.push(RedirectMapping {
                old: normalize_path(old),
                new: normalize_path(new),
            }),
            (None, _) => set.issues.push(MappingIssue::MissingOld { record: number }),
            (Some(_), None) => set.issues.push(MappingIssue::MissingNew { record: number }),
        }
    }
    set
}

pub fn parse(content: &str) -> MappingSet {
    from_records(&csv_table::parse(content))
}

/// Reads and normalizes a mapping file, logging every skipped record.
pub fn load(path: &Path, encoding: &'static Encoding) -> Result<MappingSet> {
    if !io_utils::is_dash(path) && !path.exists() {
        bail!("Redirect mapping {path:?} not found; run `site-redirects init` to create a template");
    }
    let content = io_utils::read_text(path, encoding)?;
    let set = parse(&content);
    for issue in &set.issues {
        warn!("Skipping invalid redirect in {path:?}, {issue}");
    }
    debug!(
        "Loaded {} mapping(s) from {path:?} ({} skipped)",
        set.mappings.len(),
        set.issues.len()
    );
    Ok(set)
}

/// Writes [`TEMPLATE`] to `path` unless a file is already there.
///
/// Returns whether the template was written.
pub fn write_template(path: &Path, force: bool) -> Result<bool> {
    if path.exists() && !force {
        return Ok(false);
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Creating directory {parent:?}"))?;
    }
    fs::write(path, TEMPLATE).with_context(|| format!("Writing template {path:?}"))?;
    Ok(true)
}
