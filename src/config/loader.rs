//! Job file loading

use crate::domain::{MergeJob, MergeSettings, DEFAULT_INDENT, MAX_INDENT};
use crate::error::MergeError;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const SECTION: &str = "json-merge";

/// Job description as read from a TOML or YAML file.
///
/// Every field is optional so the file can hold only part of a job and the
/// command line can fill in the rest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JobConfig {
    pub inputs: Vec<PathBuf>,
    pub output: Option<PathBuf>,
    pub indent: Option<usize>,
    pub stop_on_write_error: Option<bool>,
}

impl JobConfig {
    /// Resolve relative paths against `base`, the directory of the job file.
    fn resolve_paths(mut self, base: &Path) -> Self {
        self.inputs = self.inputs.into_iter().map(|p| base.join(p)).collect();
        self.output = self.output.map(|p| base.join(p));
        self
    }

    pub fn settings(&self) -> MergeSettings {
        MergeSettings {
            indent: self.indent.unwrap_or(DEFAULT_INDENT),
            stop_on_write_error: self.stop_on_write_error.unwrap_or(false),
        }
    }

    /// Turn the resolved configuration into a runnable job.
    pub fn into_job(self) -> Result<MergeJob, MergeError> {
        let settings = self.settings();
        if settings.indent > MAX_INDENT {
            return Err(MergeError::InvalidIndent { indent: settings.indent, max: MAX_INDENT });
        }
        let output = self.output.ok_or(MergeError::MissingInput)?;
        Ok(MergeJob::new(self.inputs, output)?.with_settings(settings))
    }
}

/// Load a job file.
///
/// An explicit `config_path` must parse. Without one, well-known names are
/// looked up in `search_dir`; a broken auto-discovered file is warned about
/// and ignored.
pub fn load_config(search_dir: &Path, config_path: Option<&Path>) -> Result<JobConfig> {
    let config_path_provided = config_path.is_some();

    let discovered = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => discover_config(search_dir),
    };

    let Some(config_file) = discovered else {
        return Ok(JobConfig::default());
    };

    let parsed = match read_config_file(&config_file) {
        Ok(cfg) => cfg,
        Err(e) => {
            if config_path_provided {
                return Err(e);
            }
            tracing::warn!(
                "Ignoring auto-discovered job file {}: {:#}",
                config_file.display(),
                e
            );
            return Ok(JobConfig::default());
        }
    };

    tracing::debug!("Loaded job file {}", config_file.display());
    let base = config_file.parent().unwrap_or_else(|| Path::new(""));
    Ok(parsed.resolve_paths(base))
}

fn read_config_file(config_file: &Path) -> Result<JobConfig> {
    let content = fs::read_to_string(config_file)
        .with_context(|| format!("Failed reading job file: {}", config_file.display()))?;

    let ext = config_file.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();

    match ext.as_str() {
        "toml" => parse_toml_config(&content, config_file),
        "yaml" | "yml" => parse_yaml_config(&content, config_file),
        other => anyhow::bail!(
            "Unsupported job file extension '.{}' for file {}",
            other,
            config_file.display()
        ),
    }
}

/// Parse TOML, accepting either top-level keys or a `[json-merge]` section.
fn parse_toml_config(content: &str, config_file: &Path) -> Result<JobConfig> {
    let raw: toml::Value = toml::from_str(content)
        .with_context(|| format!("Invalid TOML syntax: {}", config_file.display()))?;

    let config_val = match raw.get(SECTION) {
        Some(nested) => nested.clone(),
        None => raw,
    };

    config_val.try_into().with_context(|| format!("Invalid TOML job: {}", config_file.display()))
}

/// Parse YAML, accepting either top-level keys or a `json-merge` mapping.
fn parse_yaml_config(content: &str, config_file: &Path) -> Result<JobConfig> {
    let raw: serde_yaml::Value = serde_yaml::from_str(content)
        .with_context(|| format!("Invalid YAML syntax: {}", config_file.display()))?;

    let config_val = match raw.get(SECTION) {
        Some(nested) => nested.clone(),
        None => raw,
    };

    serde_yaml::from_value(config_val)
        .with_context(|| format!("Invalid YAML job: {}", config_file.display()))
}

fn discover_config(search_dir: &Path) -> Option<PathBuf> {
    let candidates = ["json-merge.toml", ".json-merge.toml", "json-merge.yml", "json-merge.yaml"];

    candidates.iter().map(|candidate| search_dir.join(candidate)).find(|path| path.is_file())
}
