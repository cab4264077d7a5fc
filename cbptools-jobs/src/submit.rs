use std::process::Command;

use log::info;

use crate::consts::DEFAULT_PROGRAM;
use crate::errors::{JobsError, Result};
use crate::render::RenderedJob;

///
/// Runs the create command of rendered jobs, one after the other.
///
pub struct Submitter {
    program: String,
}

impl Default for Submitter {
    fn default() -> Self {
        Submitter {
            program: DEFAULT_PROGRAM.to_string(),
        }
    }
}

impl Submitter {
    pub fn new(program: &str) -> Self {
        Submitter {
            program: program.to_string(),
        }
    }

    pub fn submit(&self, job: &RenderedJob) -> Result<()> {
        let args = job.args();
        let command = format!("{} {}", self.program, args.join(" "));
        info!("{}", command);

        let status = Command::new(&self.program)
            .args(&args)
            .status()
            .map_err(|source| JobsError::Spawn {
                command: command.clone(),
                source,
            })?;

        if !status.success() {
            return Err(JobsError::SubmitFailed {
                command,
                status: status.to_string(),
            });
        }
        Ok(())
    }

    /// Stops at the first job that fails to submit.
    pub fn submit_all(&self, jobs: &[RenderedJob]) -> Result<()> {
        for job in jobs {
            self.submit(job)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::BTreeMap;
    use std::path::PathBuf;

    use rstest::*;

    #[fixture]
    fn job() -> RenderedJob {
        RenderedJob {
            file: PathBuf::from("run.yml"),
            params: BTreeMap::new(),
        }
    }

    #[rstest]
    fn test_missing_program(job: RenderedJob) {
        let submitter = Submitter::new("cbptools-no-such-program");
        assert!(matches!(
            submitter.submit(&job),
            Err(JobsError::Spawn { .. })
        ));
    }

    #[cfg(unix)]
    #[rstest]
    fn test_exit_status(job: RenderedJob) {
        assert!(Submitter::new("true").submit_all(&[job.clone()]).is_ok());
        assert!(matches!(
            Submitter::new("false").submit(&job),
            Err(JobsError::SubmitFailed { .. })
        ));
    }
}
