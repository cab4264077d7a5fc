mod jobs;
mod snpscore;
mod splits;

use anyhow::Result;
use clap::{Arg, ArgAction, Command};
use log::Level;
use simple_logger::init_with_level;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const BIN_NAME: &str = "cbptools";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .about("Helper tools for training and interpreting base-resolution chromatin accessibility models.")
        .subcommand_required(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .help("Log debug messages")
                .action(ArgAction::SetTrue),
        )
        .subcommand(splits::cli::create_splits_cli())
        .subcommand(snpscore::cli::create_snpscore_cli())
        .subcommand(jobs::cli::create_jobs_cli())
}

fn main() -> Result<()> {
    let app = build_parser();
    let matches = app.get_matches();

    let level = if matches.get_flag("verbose") {
        Level::Debug
    } else {
        Level::Info
    };
    init_with_level(level)?;

    match matches.subcommand() {
        //
        // FOLD SPLITS
        //
        Some((splits::cli::SPLITS_CMD, matches)) => {
            splits::handlers::run_splits(matches)?;
        }

        //
        // VARIANT EFFECT SCORING
        //
        Some((snpscore::cli::SNPSCORE_CMD, matches)) => {
            snpscore::handlers::run_snpscore(matches)?;
        }

        //
        // JOB RENDERING
        //
        Some((jobs::cli::JOBS_CMD, matches)) => {
            jobs::handlers::run_jobs(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}
