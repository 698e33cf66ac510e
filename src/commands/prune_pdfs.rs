use anyhow::Result;

use crate::archive::config::{ConfigOverrides, load_config};
use crate::archive::manifest::load_manifest;
use crate::archive::reconcile::{apply_prune, expected_filenames, plan_prune};
use crate::commands::CommandReport;

#[derive(Debug, Clone, Default)]
pub struct PrunePdfsOptions {
    pub overrides: ConfigOverrides,
    pub dry_run: bool,
    /// Announce files on stdout; otherwise stdout is reserved for the report
    /// and announcements go to stderr.
    pub echo: bool,
}

pub fn run(opts: &PrunePdfsOptions) -> Result<CommandReport> {
    let cfg = load_config(&opts.overrides)?;
    let mut report = CommandReport::new("prune-pdfs");

    report.detail(format!("manifest={}", cfg.manifest_path.display()));
    report.detail(format!("pdf_dir={}", cfg.pdf_directory.display()));

    let manifest = load_manifest(&cfg.manifest_path)?;
    let expected = expected_filenames(&manifest, &cfg.manifest_path)?;
    let plan = plan_prune(&cfg.pdf_directory, &expected)?;

    report.detail(format!("expected_titles={}", expected.len()));
    report.detail(format!("kept={}", plan.kept.len()));

    if opts.dry_run {
        report.detail("dry-run: no files deleted".to_string());
        for name in &plan.doomed {
            let name = name.to_string_lossy();
            if opts.echo {
                println!("Would delete: {name}");
            } else {
                report.detail(format!("would_delete={name}"));
            }
        }
        return Ok(report);
    }

    let outcome = apply_prune(&cfg.pdf_directory, &plan, |name| {
        if opts.echo {
            println!("Deleting: {name}");
        } else {
            eprintln!("Deleting: {name}");
        }
    })?;

    report.detail(format!("deleted={}", outcome.deleted.len()));
    if !opts.echo {
        for name in &outcome.deleted {
            report.detail(format!("deleted_file={name}"));
        }
    }
    for skipped in &outcome.skipped {
        report.detail(format!("skipped: {skipped}"));
    }

    Ok(report)
}
