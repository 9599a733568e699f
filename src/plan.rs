//! Prints the normalized redirect plan for a mapping file.

use anyhow::{Context, Result};
use log::info;
use serde::Serialize;

use crate::{
    cli::PlanArgs,
    io_utils,
    mapping::{self, RedirectMapping},
    table,
};

#[derive(Debug, Serialize)]
struct PlanEntry {
    source: String,
    destination: String,
}

impl From<&RedirectMapping> for PlanEntry {
    fn from(mapping: &RedirectMapping) -> Self {
        Self {
            source: mapping.source(),
            destination: mapping.destination(),
        }
    }
}

pub fn execute(args: &PlanArgs) -> Result<()> {
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    let set = mapping::load(&args.input, encoding)
        .with_context(|| format!("Loading redirect mapping {:?}", args.input))?;
    let entries = set.mappings.iter().map(PlanEntry::from).collect::<Vec<_>>();

    if args.json {
        io_utils::write_json(None, &entries)?;
    } else if !entries.is_empty() {
        let headers = vec!["old".to_string(), "new".to_string()];
        let rows = entries
            .iter()
            .map(|entry| vec![entry.source.clone(), entry.destination.clone()])
            .collect::<Vec<_>>();
        table::print_table(&headers, &rows);
    }

    info!(
        "Planned {} redirect(s), skipped {} invalid record(s)",
        entries.len(),
        set.issues.len()
    );
    Ok(())
}
