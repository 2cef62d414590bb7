use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

use crate::flags::{OutputFormat, SortOrder};

pub(crate) const CONFIG_ENV: &str = "ISSUE_DIFFICULTY_CONFIG";
pub(crate) const DEFAULT_CONFIG_FILE: &str = "issue-difficulty.toml";
const SUPPORTED_SCHEMA_VERSION: u32 = 1;
pub(crate) const MAX_JOBS: usize = 64;

/// Effective settings after merging the config file over built-in defaults.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Config {
    pub format: OutputFormat,
    pub breakdown: bool,
    pub sort: SortOrder,
    pub jobs: usize,
    pub source: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            breakdown: false,
            sort: SortOrder::Input,
            jobs: 1,
            source: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    schema_version: Option<u32>,
    output: Option<RawOutput>,
    batch: Option<RawBatch>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawOutput {
    format: Option<OutputFormat>,
    breakdown: Option<bool>,
    sort: Option<SortOrder>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawBatch {
    jobs: Option<usize>,
}

impl Config {
    /// Resolve the config file: explicit path, then `ISSUE_DIFFICULTY_CONFIG`,
    /// then `./issue-difficulty.toml` when present. No file means defaults.
    pub(crate) fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        if let Some(path) = env::var_os(CONFIG_ENV).filter(|v| !v.is_empty()) {
            return Self::from_file(Path::new(&path));
        }
        let local = Path::new(DEFAULT_CONFIG_FILE);
        if local.is_file() {
            return Self::from_file(local);
        }
        Ok(Self::default())
    }

    pub(crate) fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let mut cfg = Self::from_toml(&text)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        cfg.source = Some(path.to_path_buf());
        log::debug!("loaded config from {}", path.display());
        Ok(cfg)
    }

    pub(crate) fn from_toml(text: &str) -> Result<Self> {
        let raw: RawConfig = toml::from_str(text)?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawConfig) -> Result<Self> {
        if let Some(schema_version) = raw.schema_version {
            if schema_version != SUPPORTED_SCHEMA_VERSION {
                return Err(anyhow!(
                    "schema_version {schema_version} is not supported (expected {SUPPORTED_SCHEMA_VERSION})"
                ));
            }
        }

        let mut cfg = Self::default();
        let output = raw.output.unwrap_or_default();
        cfg.format = output.format.unwrap_or(cfg.format);
        cfg.breakdown = output.breakdown.unwrap_or(cfg.breakdown);
        cfg.sort = output.sort.unwrap_or(cfg.sort);
        cfg.jobs = raw.batch.unwrap_or_default().jobs.unwrap_or(cfg.jobs);

        cfg.validate()?;
        Ok(cfg)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        validate_jobs(self.jobs)
    }
}

pub(crate) fn validate_jobs(jobs: usize) -> Result<()> {
    if !(1..=MAX_JOBS).contains(&jobs) {
        return Err(anyhow!("batch.jobs must be within 1..={MAX_JOBS} (got {jobs})"));
    }
    Ok(())
}
