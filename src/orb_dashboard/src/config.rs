//! Dashboard configuration: parsing, normalization, and loading.
//!
//! The TOML file names the data source, the users allowed in, and the bucket
//! widths offered by the histogram dropdown:
//!
//! ```toml
//! bucket_widths = [0.5, 0.25, 0.1]
//! default_bucket_width = 0.5
//!
//! [data]
//! dir = "data/rdr_orb"          # or: base_url = "https://…"
//!
//! [[users]]
//! username = "analyst"
//! password = "…"
//! ```
//!
//! Entrypoints:
//! - Parse + normalize from a TOML string: [`load_config_str`]
//! - Parse + normalize from a file path: [`load_config_path`]

use std::{collections::HashSet, mem, path::PathBuf};

use anyhow::{Context, bail};
use orb_data::providers::{DatasetProvider, DirProvider, HttpProvider};
use secrecy::SecretString;
use serde::{Deserialize, Deserializer};
use toml::from_str;
use tracing::debug;

/// Widths offered when the file does not list any.
pub const DEFAULT_BUCKET_WIDTHS: [f64; 3] = [0.5, 0.25, 0.1];

/// Widths closer than this are the same option.
const WIDTH_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DashboardConfig {
    #[serde(default)]
    pub data: DataCfg,
    #[serde(default)]
    pub users: Vec<UserCfg>,
    #[serde(default = "default_bucket_widths")]
    pub bucket_widths: Vec<f64>,
    #[serde(default = "default_bucket_width")]
    pub default_bucket_width: f64,
}

fn default_bucket_widths() -> Vec<f64> {
    DEFAULT_BUCKET_WIDTHS.to_vec()
}

fn default_bucket_width() -> f64 {
    DEFAULT_BUCKET_WIDTHS[0]
}

/// Where statistics tables are read from. At most one of the two may be set;
/// with neither, the public repository (or `ORB_DATA_BASE_URL`) is used.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DataCfg {
    pub base_url: Option<String>,
    pub dir: Option<PathBuf>,
}

impl DataCfg {
    pub fn provider(&self) -> anyhow::Result<Box<dyn DatasetProvider>> {
        match (&self.base_url, &self.dir) {
            (Some(_), Some(_)) => bail!("[data] sets both base_url and dir; pick one"),
            (None, Some(dir)) => Ok(Box::new(DirProvider::new(dir.clone()))),
            (Some(url), None) => Ok(Box::new(
                HttpProvider::new(url.as_str()).context("build HTTP provider")?,
            )),
            (None, None) => Ok(Box::new(
                HttpProvider::from_env().context("build HTTP provider")?,
            )),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserCfg {
    pub username: String,
    #[serde(deserialize_with = "secret_string")]
    pub password: SecretString,
}

fn secret_string<'de, D: Deserializer<'de>>(d: D) -> Result<SecretString, D::Error> {
    String::deserialize(d).map(|s| SecretString::new(s.into()))
}

/// Summary of changes performed during normalization.
#[derive(Debug, Default)]
pub struct NormalizationReport {
    /// Usernames that changed when trimmed.
    pub usernames_trimmed: usize,
    /// Repeated bucket widths removed.
    pub bucket_widths_deduped: usize,
}

/// Normalize a config in place.
///
/// - Trim usernames; reject empty or duplicate names
/// - Validate bucket widths (finite, > 0) and de-duplicate them, keeping order
/// - Require `default_bucket_width` to be one of the offered widths
/// - Reject a `[data]` table that sets both sources
pub fn normalize_config(cfg: &mut DashboardConfig) -> anyhow::Result<NormalizationReport> {
    let mut report = NormalizationReport::default();

    let mut seen_users = HashSet::new();
    for user in &mut cfg.users {
        let trimmed = user.username.trim();
        if trimmed.is_empty() {
            bail!("username cannot be empty after trimming");
        }
        if trimmed.len() != user.username.len() {
            user.username = trimmed.to_string();
            report.usernames_trimmed += 1;
        }
        if !seen_users.insert(user.username.clone()) {
            bail!("duplicate username: {}", user.username);
        }
    }

    let before = cfg.bucket_widths.len();
    let mut widths: Vec<f64> = Vec::with_capacity(before);
    for w in mem::take(&mut cfg.bucket_widths) {
        if !(w.is_finite() && w > 0.0) {
            bail!("bucket width must be a positive number, got {w}");
        }
        if !widths.iter().any(|k| (k - w).abs() < WIDTH_TOLERANCE) {
            widths.push(w);
        }
    }
    if widths.is_empty() {
        bail!("bucket_widths cannot be empty");
    }
    report.bucket_widths_deduped = before - widths.len();
    cfg.bucket_widths = widths;

    if !cfg.offers_width(cfg.default_bucket_width) {
        bail!(
            "default_bucket_width {} is not one of bucket_widths {:?}",
            cfg.default_bucket_width,
            cfg.bucket_widths
        );
    }

    if cfg.data.base_url.is_some() && cfg.data.dir.is_some() {
        bail!("[data] sets both base_url and dir; pick one");
    }
    Ok(report)
}

impl DashboardConfig {
    /// Whether `width` is one of the configured bucket widths.
    pub fn offers_width(&self, width: f64) -> bool {
        self.bucket_widths
            .iter()
            .any(|w| (w - width).abs() < WIDTH_TOLERANCE)
    }

    pub fn user(&self, username: &str) -> Option<&UserCfg> {
        self.users.iter().find(|u| u.username == username)
    }
}

/// Parse and normalize a config from a TOML string.
pub fn load_config_str(toml_str: &str) -> anyhow::Result<DashboardConfig> {
    let mut cfg: DashboardConfig = from_str(toml_str).context("failed to parse dashboard TOML")?;
    let report = normalize_config(&mut cfg).context("normalize_config failed")?;
    debug!(?report, users = cfg.users.len(), "loaded dashboard config");
    Ok(cfg)
}

/// Read a config TOML file from disk, parse, and normalize it.
pub fn load_config_path(path: impl AsRef<std::path::Path>) -> anyhow::Result<DashboardConfig> {
    let text = std::fs::read_to_string(path.as_ref())
        .with_context(|| format!("read config file {}", path.as_ref().display()))?;
    load_config_str(&text)
}
