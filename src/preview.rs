use anyhow::Result;
use log::info;

use crate::{cli::PreviewArgs, csv_table, io_utils, table};

pub fn execute(args: &PreviewArgs) -> Result<()> {
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    let content = io_utils::read_text(&args.input, encoding)?;
    let records = csv_table::parse(&content);
    if records.is_empty() {
        info!("{:?} has no data rows", args.input);
        return Ok(());
    }

    let shown = &records[..records.len().min(args.rows)];
    print!("{}", table::render_records(shown));
    info!(
        "Displayed {} of {} record(s) from {:?}",
        shown.len(),
        records.len(),
        args.input
    );
    Ok(())
}
