use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

/// Bundled template, resolved relative to this crate at build time.
const DEFAULT_TEMPLATE_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/templates/resume.tex");
const DEFAULT_COMPILE_TIMEOUT_SECS: u64 = 120;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed numbers fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub template_path: PathBuf,
    pub latex_compiler: String,
    /// Parent of per-request working directories and uploaded photos.
    pub work_root: PathBuf,
    /// `None` when `COMPILE_TIMEOUT_SECS=0`.
    pub compile_timeout: Option<Duration>,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let timeout_secs: u64 =
            parse_or(&lookup, "COMPILE_TIMEOUT_SECS", DEFAULT_COMPILE_TIMEOUT_SECS)?;

        Ok(Config {
            port: parse_or(&lookup, "PORT", 8080)?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            template_path: lookup("TEMPLATE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_TEMPLATE_PATH)),
            latex_compiler: lookup("LATEX_COMPILER").unwrap_or_else(|| "pdflatex".to_string()),
            work_root: lookup("WORK_ROOT")
                .map(PathBuf::from)
                .unwrap_or_else(std::env::temp_dir),
            compile_timeout: (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs)),
            max_upload_bytes: parse_or(&lookup, "MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
        })
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}
