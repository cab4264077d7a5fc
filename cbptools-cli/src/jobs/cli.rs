use clap::{Arg, ArgAction, Command};

pub const JOBS_CMD: &str = "jobs";

/// Creates the job rendering CLI Command object
pub fn create_jobs_cli() -> Command {
    Command::new(JOBS_CMD)
        .about("Render one job manifest per parameter set from a template, and optionally submit them.")
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("TOML file naming the template, output directory, file name pattern and parameter sets")
                .required(true),
        )
        .arg(
            Arg::new("submit")
                .long("submit")
                .help("Run `kubectl create -f` on every rendered file instead of printing the commands")
                .action(ArgAction::SetTrue),
        )
}
