use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_MANIFEST_PATH: &str = "paper_data.json";
pub const DEFAULT_PDF_DIRECTORY: &str = "./data";
pub const DEFAULT_OUTPUT_PATH: &str = "papers_with_id.json";
pub const CONFIG_FILE_NAME: &str = "papertidy.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TidyConfig {
    pub manifest_path: PathBuf,
    pub pdf_directory: PathBuf,
    pub output_path: PathBuf,
}

impl Default for TidyConfig {
    fn default() -> Self {
        Self {
            manifest_path: PathBuf::from(DEFAULT_MANIFEST_PATH),
            pdf_directory: PathBuf::from(DEFAULT_PDF_DIRECTORY),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct PartialTidyConfig {
    manifest_path: Option<PathBuf>,
    pdf_directory: Option<PathBuf>,
    output_path: Option<PathBuf>,
}

/// Values given on the command line; they win over every other layer.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub manifest_path: Option<PathBuf>,
    pub pdf_directory: Option<PathBuf>,
    pub output_path: Option<PathBuf>,
}

fn env_or_path(var: &str, fallback: PathBuf) -> PathBuf {
    match env::var(var) {
        Ok(v) if !v.trim().is_empty() => PathBuf::from(v.trim()),
        _ => fallback,
    }
}

fn validate(cfg: &TidyConfig) -> Result<()> {
    if cfg.manifest_path.as_os_str().is_empty() {
        return Err(anyhow!("invalid manifest path: cannot be empty"));
    }
    if cfg.pdf_directory.as_os_str().is_empty() {
        return Err(anyhow!("invalid pdf directory: cannot be empty"));
    }
    if cfg.output_path.as_os_str().is_empty() {
        return Err(anyhow!("invalid output path: cannot be empty"));
    }
    Ok(())
}

pub fn resolve_config_path() -> Option<PathBuf> {
    if let Ok(custom) = env::var("PAPERTIDY_CONFIG_PATH") {
        let trimmed = custom.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }

    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return Some(local);
    }

    let config_dir = dirs::config_dir()?;
    Some(config_dir.join("papertidy").join(CONFIG_FILE_NAME))
}

fn merge_file_config(base: &mut TidyConfig, path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }

    let raw = fs::read_to_string(path)
        .map_err(|err| anyhow!("failed to read papertidy config {}: {err}", path.display()))?;
    let parsed: PartialTidyConfig = toml::from_str(&raw)
        .map_err(|err| anyhow!("failed to parse papertidy config {}: {err}", path.display()))?;
    if let Some(manifest_path) = parsed.manifest_path {
        base.manifest_path = manifest_path;
    }
    if let Some(pdf_directory) = parsed.pdf_directory {
        base.pdf_directory = pdf_directory;
    }
    if let Some(output_path) = parsed.output_path {
        base.output_path = output_path;
    }
    Ok(())
}

fn apply_env(cfg: &mut TidyConfig) {
    cfg.manifest_path = env_or_path("PAPERTIDY_MANIFEST_PATH", cfg.manifest_path.clone());
    cfg.pdf_directory = env_or_path("PAPERTIDY_PDF_DIR", cfg.pdf_directory.clone());
    cfg.output_path = env_or_path("PAPERTIDY_OUTPUT_PATH", cfg.output_path.clone());
}

fn apply_overrides(cfg: &mut TidyConfig, overrides: &ConfigOverrides) {
    if let Some(path) = &overrides.manifest_path {
        cfg.manifest_path = path.clone();
    }
    if let Some(path) = &overrides.pdf_directory {
        cfg.pdf_directory = path.clone();
    }
    if let Some(path) = &overrides.output_path {
        cfg.output_path = path.clone();
    }
}

pub fn load_config(overrides: &ConfigOverrides) -> Result<TidyConfig> {
    let mut cfg = TidyConfig::default();
    if let Some(path) = resolve_config_path() {
        merge_file_config(&mut cfg, &path)?;
    }
    apply_env(&mut cfg);
    apply_overrides(&mut cfg, overrides);

    validate(&cfg)?;
    tracing::debug!(
        manifest = %cfg.manifest_path.display(),
        pdf_dir = %cfg.pdf_directory.display(),
        output = %cfg.output_path.display(),
        "configuration resolved"
    );
    Ok(cfg)
}
