use anyhow::{Context, Result};

use crate::archive::config::{ConfigOverrides, load_config};
use crate::archive::ids::{assign_sequential_ids, same_file, write_manifest};
use crate::archive::manifest::load_manifest;
use crate::commands::CommandReport;

#[derive(Debug, Clone, Default)]
pub struct AssignIdsOptions {
    pub overrides: ConfigOverrides,
}

pub fn run(opts: &AssignIdsOptions) -> Result<CommandReport> {
    let cfg = load_config(&opts.overrides)?;
    let mut report = CommandReport::new("assign-ids");

    if same_file(&cfg.manifest_path, &cfg.output_path) {
        anyhow::bail!(
            "output path {} is the input manifest; choose a different output",
            cfg.output_path.display()
        );
    }

    let mut manifest = load_manifest(&cfg.manifest_path)?;
    let replaced = manifest
        .records()
        .iter()
        .filter(|record| record.id().is_some())
        .count();
    assign_sequential_ids(&mut manifest);
    write_manifest(&cfg.output_path, &manifest)
        .with_context(|| format!("failed to save {}", cfg.output_path.display()))?;

    report.detail(format!(
        "assigned ids 1..={} and saved to '{}'",
        manifest.len(),
        cfg.output_path.display()
    ));
    if replaced > 0 {
        report.detail(format!("replaced_existing_ids={replaced}"));
    }

    Ok(report)
}
