//! Redirect identification from a shipment manifest.
//!
//! Every shipment contributes candidate redirects from two legacy sources: the
//! path of its legacy page URL and the legacy listing path `/shipments/<id>`.
//! Candidates are deduplicated on their `(old, new)` pair. A source path that
//! still points at more than one destination is a [`Conflict`]: the
//! highest-priority destination is kept and the rest are reported, never
//! silently dropped.

use std::{collections::HashMap, path::Path};

use anyhow::{Context, Result, anyhow};
use itertools::Itertools;
use log::{debug, info, warn};
use regex::Regex;
use serde::Serialize;

use crate::{
    cli::IdentifyArgs,
    config::SiteConfig,
    csv_table::{self, require_columns},
    io_utils,
    redirect::{Redirect, RedirectKind},
    shipments::{self, Shipment},
};

pub const MAPPING_HEADERS: [&str; 2] = ["old_url", "new_url"];

/// One source path with several destinations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conflict {
    pub old: String,
    /// Destination written to the mapping file.
    pub chosen: Redirect,
    /// Destinations the source path also needs but cannot receive.
    pub unresolved: Vec<Redirect>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Identification {
    /// Distinct `(old, new)` candidates in first-seen order.
    pub candidates: Vec<Redirect>,
    /// At most one redirect per source path.
    pub resolved: Vec<Redirect>,
    pub conflicts: Vec<Conflict>,
}

pub fn execute(args: &IdentifyArgs) -> Result<()> {
    let input = io_utils::first_existing(&args.inputs).ok_or_else(|| {
        anyhow!(
            "None of the shipment manifests exist: {}",
            args.inputs.iter().map(|p| format!("{p:?}")).join(", ")
        )
    })?;
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    let config = SiteConfig::resolve(args.config.as_deref())?;

    info!("Identifying redirects from {input:?}");
    let content = io_utils::read_text(input, encoding)?;
    let records = csv_table::parse(&content);
    require_columns(&records, &[shipments::ID_COLUMN])
        .with_context(|| format!("Validating shipment manifest {input:?}"))?;
    let shipments = records
        .iter()
        .filter_map(Shipment::from_record)
        .collect::<Vec<_>>();
    debug!(
        "{} of {} row(s) carry a contract number",
        shipments.len(),
        records.len()
    );

    let identification = identify(&shipments, &config)?;
    info!(
        "Found {} potential redirect(s)",
        identification.candidates.len()
    );
    for redirect in &identification.candidates {
        info!("  {redirect}");
    }
    report_conflicts(&identification.conflicts);

    write_mapping(&identification.resolved, args.output.as_deref())?;
    info!(
        "Wrote {} redirect mapping(s) to {}",
        identification.resolved.len(),
        describe_output(args.output.as_deref())
    );

    if let Some(path) = &args.conflicts {
        io_utils::write_json(Some(path.as_path()), &identification.conflicts)
            .with_context(|| format!("Writing conflict report {path:?}"))?;
        info!(
            "Wrote {} conflict(s) to {path:?}",
            identification.conflicts.len()
        );
    }
    Ok(())
}

/// Derives, deduplicates and resolves redirects for `shipments`.
pub fn identify(shipments: &[Shipment], config: &SiteConfig) -> Result<Identification> {
    let candidates = candidate_redirects(shipments, config)?
        .into_iter()
        .unique_by(|r| (r.old.clone(), r.new.clone()))
        .collect::<Vec<_>>();
    let (resolved, conflicts) = resolve(&candidates);
    Ok(Identification {
        candidates,
        resolved,
        conflicts,
    })
}

/// Raw candidates in manifest order, duplicates included.
pub fn candidate_redirects(shipments: &[Shipment], config: &SiteConfig) -> Result<Vec<Redirect>> {
    let legacy_url = legacy_url_pattern(&config.legacy_host)?;
    let mut redirects = Vec::new();
    for shipment in shipments {
        let kinds = destination_kinds(shipment);

        if let Some(path) = legacy_url
            .captures(&shipment.legacy_url)
            .and_then(|caps| caps.get(1))
        {
            for &kind in &kinds {
                let destination = config.destination(kind, &shipment.id);
                if path.as_str() != destination {
                    redirects.push(Redirect::new(path.as_str(), destination, kind));
                }
            }
        }

        let listing = config.legacy_listing_path(&shipment.id);
        for &kind in &kinds {
            redirects.push(Redirect::new(
                listing.clone(),
                config.destination(kind, &shipment.id),
                kind,
            ));
        }
    }
    Ok(redirects)
}

fn destination_kinds(shipment: &Shipment) -> Vec<RedirectKind> {
    let mut kinds = Vec::with_capacity(2);
    if shipment.is_cacao {
        kinds.push(RedirectKind::Agroverse);
    }
    if shipment.is_serialized {
        kinds.push(RedirectKind::Sunmint);
    }
    kinds
}

fn legacy_url_pattern(host: &str) -> Result<Regex> {
    Regex::new(&format!(r"{}(/[^?#]*)", regex::escape(host)))
        .with_context(|| format!("Building legacy URL pattern for host '{host}'"))
}

/// Splits distinct candidates into one redirect per source path plus the
/// conflicts found on the way.
///
/// Sources with a single destination keep their first-seen order and come
/// first; conflict winners follow in order of the source's first appearance.
pub fn resolve(candidates: &[Redirect]) -> (Vec<Redirect>, Vec<Conflict>) {
    let mut groups: Vec<(&str, Vec<&Redirect>)> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();
    for redirect in candidates {
        let idx = *positions.entry(redirect.old.as_str()).or_insert_with(|| {
            groups.push((redirect.old.as_str(), Vec::new()));
            groups.len() - 1
        });
        groups[idx].1.push(redirect);
    }

    let mut resolved = candidates
        .iter()
        .filter(|r| groups[positions[r.old.as_str()]].1.len() == 1)
        .cloned()
        .collect::<Vec<_>>();

    let mut conflicts = Vec::new();
    for (old, group) in groups.into_iter().filter(|(_, g)| g.len() > 1) {
        let Some(chosen) = group.iter().copied().min_by_key(|r| r.kind) else {
            continue;
        };
        let unresolved = group
            .iter()
            .copied()
            .filter(|r| !std::ptr::eq(*r, chosen))
            .cloned()
            .collect::<Vec<_>>();
        resolved.push(chosen.clone());
        conflicts.push(Conflict {
            old: old.to_string(),
            chosen: chosen.clone(),
            unresolved,
        });
    }
    (resolved, conflicts)
}

fn report_conflicts(conflicts: &[Conflict]) {
    for conflict in conflicts {
        warn!(
            "Conflict on {}: kept {} ({})",
            conflict.old, conflict.chosen.new, conflict.chosen.kind
        );
        for other in &conflict.unresolved {
            warn!(
                "  {} also needs to redirect to {} ({}); use query parameters or a separate page",
                conflict.old, other.new, other.kind
            );
        }
    }
}

/// Writes `old_url,new_url` rows with every field quoted.
pub fn write_mapping(redirects: &[Redirect], output: Option<&Path>) -> Result<()> {
    let mut writer = io_utils::open_csv_writer(output)?;
    writer.write_record(MAPPING_HEADERS)?;
    for redirect in redirects {
        writer.write_record([redirect.old.as_str(), redirect.new.as_str()])?;
    }
    writer.flush().context("Flushing redirect mapping")?;
    Ok(())
}

fn describe_output(output: Option<&Path>) -> String {
    match output {
        Some(path) if !io_utils::is_dash(path) => format!("{path:?}"),
        _ => "stdout".to_string(),
    }
}
