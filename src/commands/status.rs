use anyhow::Result;
use std::env;
use std::path::Path;

use crate::archive::config::{ConfigOverrides, load_config, resolve_config_path};
use crate::archive::manifest::load_manifest;
use crate::commands::CommandReport;

mod generated {
    include!(concat!(env!("OUT_DIR"), "/papertidy_env_allowlist.rs"));
}

pub use generated::GENERATED_ENV_ALLOWLIST;

#[derive(Debug, Clone, Default)]
pub struct StatusOptions {
    pub overrides: ConfigOverrides,
}

fn presence(path: &Path) -> &'static str {
    if path.is_dir() {
        "dir"
    } else if path.exists() {
        "file"
    } else {
        "missing"
    }
}

pub fn set_env_vars() -> Vec<&'static str> {
    GENERATED_ENV_ALLOWLIST
        .iter()
        .copied()
        .filter(|key| env::var_os(key).is_some_and(|v| !v.is_empty()))
        .collect()
}

pub fn run(opts: &StatusOptions) -> Result<CommandReport> {
    let cfg = load_config(&opts.overrides)?;
    let mut report = CommandReport::new("status");

    match resolve_config_path() {
        Some(path) => report.detail(format!(
            "config_file={} ({})",
            path.display(),
            presence(&path)
        )),
        None => report.detail("config_file=none"),
    }
    report.detail(format!(
        "manifest={} ({})",
        cfg.manifest_path.display(),
        presence(&cfg.manifest_path)
    ));
    report.detail(format!(
        "pdf_dir={} ({})",
        cfg.pdf_directory.display(),
        presence(&cfg.pdf_directory)
    ));
    report.detail(format!(
        "output={} ({})",
        cfg.output_path.display(),
        presence(&cfg.output_path)
    ));

    let set = set_env_vars();
    if set.is_empty() {
        report.detail("env=none");
    } else {
        report.detail(format!("env={}", set.join(",")));
    }

    match load_manifest(&cfg.manifest_path) {
        Ok(manifest) => {
            report.detail(format!("manifest.records={}", manifest.len()));
            report.detail(format!("manifest.with_file_link={}", manifest.linked_count()));
            if manifest.is_empty() {
                report.issue("manifest has no records; prune-pdfs would delete every pdf");
            }
        }
        Err(err) => report.issue(format!("manifest unusable: {err}")),
    }
    if !cfg.pdf_directory.is_dir() {
        report.issue(format!(
            "pdf directory {} does not exist",
            cfg.pdf_directory.display()
        ));
    }

    Ok(report)
}
