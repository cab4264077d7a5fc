//! # Job manifest rendering
//!
//! Fills a job manifest template (e.g. a Kubernetes YAML) once per parameter set listed in a
//! TOML config, writes the results, and optionally submits them with `kubectl create -f`.
pub mod config;
pub mod consts;
pub mod errors;
pub mod render;
pub mod submit;

pub use config::{JobConfig, merge_params};
pub use errors::{JobsError, Result};
pub use render::{RenderedJob, leftover_placeholders, render_jobs, substitute};
pub use submit::Submitter;
