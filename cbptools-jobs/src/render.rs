use std::collections::BTreeMap;
use std::fs::{create_dir_all, read_to_string, write};
use std::path::PathBuf;

use log::{info, warn};

use crate::config::{JobConfig, merge_params};
use crate::consts::{CREATE_ARGS, DEFAULT_PROGRAM, PLACEHOLDER_PREFIX};
use crate::errors::{JobsError, Result};

/// A job manifest written to disk, and the command that submits it.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedJob {
    pub file: PathBuf,
    pub params: BTreeMap<String, String>,
}

impl RenderedJob {
    pub fn args(&self) -> Vec<String> {
        CREATE_ARGS
            .iter()
            .map(|a| a.to_string())
            .chain(std::iter::once(self.file.display().to_string()))
            .collect()
    }

    /// `kubectl create -f <file>`
    pub fn command(&self) -> String {
        format!("{} {}", DEFAULT_PROGRAM, self.args().join(" "))
    }
}

///
/// Replace every `$key` in `text` with its value. Longer keys are substituted first,
/// so `$fold` never eats the prefix of `$fold_name`.
///
pub fn substitute(text: &str, params: &BTreeMap<String, String>) -> String {
    let mut keys: Vec<&String> = params.keys().collect();
    keys.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

    let mut out = text.to_string();
    for key in keys {
        let placeholder = format!("{}{}", PLACEHOLDER_PREFIX, key);
        out = out.replace(&placeholder, &params[key]);
    }
    out
}

///
/// Placeholder-looking tokens (`$name`) still present in rendered text.
///
pub fn leftover_placeholders(text: &str) -> Vec<String> {
    let mut found = Vec::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c != PLACEHOLDER_PREFIX {
            continue;
        }
        let mut name = String::new();
        while let Some(&next) = chars.peek() {
            if next.is_ascii_alphanumeric() || next == '_' {
                name.push(next);
                chars.next();
            } else {
                break;
            }
        }
        if name.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_') && !found.contains(&name)
        {
            found.push(name);
        }
    }
    found
}

///
/// Render one manifest per parameter set into the config's output directory.
///
pub fn render_jobs(config: &JobConfig) -> Result<Vec<RenderedJob>> {
    if config.params.is_empty() {
        return Err(JobsError::NoParams);
    }

    let template_path = config.template_path();
    let template = read_to_string(&template_path).map_err(|source| JobsError::TemplateRead {
        path: template_path.clone(),
        source,
    })?;

    let output_dir = config.output_path();
    create_dir_all(&output_dir)?;

    let mut jobs = Vec::with_capacity(config.params.len());
    for overrides in &config.params {
        let params = merge_params(&config.defaults, overrides)?;

        let rendered = substitute(&template, &params);
        let file_name = substitute(&config.file_name, &params);
        let unresolved = leftover_placeholders(&file_name);
        if !unresolved.is_empty() {
            return Err(JobsError::UnresolvedFileName {
                file_name,
                placeholders: unresolved.join(", "),
            });
        }

        let leftovers = leftover_placeholders(&rendered);
        if !leftovers.is_empty() {
            warn!(
                "{} still contains unresolved placeholders: {}",
                file_name,
                leftovers.join(", ")
            );
        }

        let file = output_dir.join(&file_name);
        write(&file, rendered)?;
        info!("Wrote {}", file.display());

        jobs.push(RenderedJob { file, params });
    }

    Ok(jobs)
}
