use std::collections::BTreeMap;
use std::fs::read_to_string;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{JobsError, Result};

///
/// A batch of jobs: one template rendered once per parameter set.
///
/// ```toml
/// template = "training.yml"
/// output_dir = "scripts"
/// file_name = "run_$cellline_dil_$dil_fold_$fold.yml"
///
/// [defaults]
/// cellline = "HEPG2"
/// dil = 1
///
/// [[params]]
/// fold = 0
/// ```
///
#[derive(Deserialize, Serialize, Debug, PartialEq)]
pub struct JobConfig {
    pub template: PathBuf,
    pub output_dir: PathBuf,
    pub file_name: String,
    #[serde(default)]
    pub defaults: BTreeMap<String, toml::Value>,
    #[serde(default)]
    pub params: Vec<BTreeMap<String, toml::Value>>,
    /// Directory relative paths are resolved against; the config file's directory.
    #[serde(skip)]
    pub base_dir: PathBuf,
}

impl TryFrom<&Path> for JobConfig {
    type Error = JobsError;

    fn try_from(path: &Path) -> Result<Self> {
        let toml_str = read_to_string(path)?;
        let mut config: JobConfig = toml::from_str(&toml_str)?;
        config.base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Ok(config)
    }
}

impl JobConfig {
    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    pub fn template_path(&self) -> PathBuf {
        self.resolve(&self.template)
    }

    pub fn output_path(&self) -> PathBuf {
        self.resolve(&self.output_dir)
    }
}

fn value_to_string(key: &str, value: &toml::Value) -> Result<String> {
    match value {
        toml::Value::String(s) => Ok(s.clone()),
        toml::Value::Integer(i) => Ok(i.to_string()),
        toml::Value::Float(f) => Ok(f.to_string()),
        toml::Value::Boolean(b) => Ok(b.to_string()),
        _ => Err(JobsError::InvalidValue {
            key: key.to_string(),
        }),
    }
}

///
/// Merge one parameter set over the defaults, rendering every value as text.
///
pub fn merge_params(
    defaults: &BTreeMap<String, toml::Value>,
    overrides: &BTreeMap<String, toml::Value>,
) -> Result<BTreeMap<String, String>> {
    let mut merged = BTreeMap::new();
    for (key, value) in defaults.iter().chain(overrides.iter()) {
        merged.insert(key.clone(), value_to_string(key, value)?);
    }
    Ok(merged)
}
