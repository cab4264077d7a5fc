use std::path::Path;

use anyhow::Result;
use clap::ArgMatches;

use cbptools_jobs::{JobConfig, Submitter, render_jobs};

pub fn run_jobs(matches: &ArgMatches) -> Result<()> {
    let config = matches
        .get_one::<String>("config")
        .expect("A path to a job config is required.");
    let submit = matches.get_flag("submit");

    let config = JobConfig::try_from(Path::new(config))?;
    let jobs = render_jobs(&config)?;

    if submit {
        Submitter::default().submit_all(&jobs)?;
    } else {
        for job in &jobs {
            println!("{}", job.command());
        }
    }

    Ok(())
}
