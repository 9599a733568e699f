pub mod cli;
pub mod config;
pub mod csv_table;
pub mod identify;
pub mod io_utils;
pub mod mapping;
pub mod plan;
pub mod preview;
pub mod redirect;
pub mod shipments;
pub mod table;

use std::{env, sync::OnceLock};

use anyhow::Result;
use clap::Parser;
use log::{LevelFilter, info};

use crate::cli::{Cli, Commands};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("site_redirects", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Identify(args) => identify::execute(&args),
        Commands::Plan(args) => plan::execute(&args),
        Commands::Init(args) => handle_init(&args),
        Commands::Preview(args) => preview::execute(&args),
    }
}

fn handle_init(args: &cli::InitArgs) -> Result<()> {
    if mapping::write_template(&args.output, args.force)? {
        info!("Created template mapping at {:?}", args.output);
        info!("Add one old_url,new_url row per redirect");
    } else {
        info!(
            "{:?} already exists; pass --force to overwrite it",
            args.output
        );
    }
    Ok(())
}
