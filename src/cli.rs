use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use crate::archive::config::ConfigOverrides;
use crate::commands::assign_ids::{self, AssignIdsOptions};
use crate::commands::prune_pdfs::{self, PrunePdfsOptions};
use crate::commands::status::{self, StatusOptions};
use crate::commands::CommandReport;

/// Exit code when a command ran but reported issues.
pub const EXIT_ISSUES: i32 = 2;

#[derive(Parser, Debug)]
#[command(
    name = "papertidy",
    version,
    about = "Maintenance tooling for a paper archive manifest and its PDF folder"
)]
pub struct Cli {
    /// Print the command report as JSON.
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Delete PDFs whose name matches no linked title in the manifest.
    PrunePdfs(PrunePdfsArgs),
    /// Number every manifest entry from 1 and write a new manifest.
    AssignIds(AssignIdsArgs),
    /// Show resolved paths and manifest counts.
    Status(StatusArgs),
}

#[derive(Args, Debug, Clone)]
pub struct PrunePdfsArgs {
    #[arg(long = "manifest")]
    pub manifest_path: Option<PathBuf>,

    #[arg(long = "pdf-dir")]
    pub pdf_directory: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

#[derive(Args, Debug, Clone)]
pub struct AssignIdsArgs {
    #[arg(long = "manifest")]
    pub manifest_path: Option<PathBuf>,

    #[arg(long = "output")]
    pub output_path: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct StatusArgs {
    #[arg(long = "manifest")]
    pub manifest_path: Option<PathBuf>,

    #[arg(long = "pdf-dir")]
    pub pdf_directory: Option<PathBuf>,

    #[arg(long = "output")]
    pub output_path: Option<PathBuf>,
}

fn emit(report: &CommandReport, json: bool) -> Result<i32> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print!("{}", report.render_text());
    }
    Ok(if report.ok { 0 } else { EXIT_ISSUES })
}

pub fn run() -> Result<i32> {
    let cli = Cli::parse();

    let report = match cli.command {
        Commands::PrunePdfs(args) => prune_pdfs::run(&PrunePdfsOptions {
            overrides: ConfigOverrides {
                manifest_path: args.manifest_path,
                pdf_directory: args.pdf_directory,
                output_path: None,
            },
            dry_run: args.dry_run,
            echo: !cli.json,
        })?,
        Commands::AssignIds(args) => assign_ids::run(&AssignIdsOptions {
            overrides: ConfigOverrides {
                manifest_path: args.manifest_path,
                pdf_directory: None,
                output_path: args.output_path,
            },
        })?,
        Commands::Status(args) => status::run(&StatusOptions {
            overrides: ConfigOverrides {
                manifest_path: args.manifest_path,
                pdf_directory: args.pdf_directory,
                output_path: args.output_path,
            },
        })?,
    };

    emit(&report, cli.json)
}
