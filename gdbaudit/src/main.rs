//! Geodatabase null-value audit tool.
//!
//! This binary scans every feature class and table of a geodatabase and
//! writes a report listing, per element, the attribute fields that hold
//! null or blank values.
//!
//! # Guarantees
//! - Geodatabases are opened read-only
//! - The report holds counts and percentages, never record values
//! - No report file is created when the geodatabase cannot be opened

use clap::{Args, Parser, ValueEnum};
use gdbaudit_core::{AuditConfig, ReportFormat, Result, init_logging, run_audit};
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "gdbaudit")]
#[command(about = "Null-value audit report generator for geodatabases")]
#[command(version)]
#[command(long_about = "
gdbaudit - Null-value analysis for geodatabases

Scans every feature class (including those inside feature datasets) and every
standalone table, and reports for each attribute field how many records hold
a null or whitespace-only value.

Identifier and geometry fields are never audited, nor are fields named
Shape, SHAPE or OBJECTID.

SUPPORTED CONTAINERS:
- File geodatabases (.gdb directories, built with --features filegdb)
- Mobile geodatabases (.geodatabase)
- GeoPackages (.gpkg)
- Plain SQLite databases

EXAMPLES:
  gdbaudit city.gpkg nulls.txt
  gdbaudit --format json utilities.geodatabase nulls.json
  gdbaudit Parcels.gdb nulls.txt
  gdbaudit --exclude-field GlobalID --exclude-field created_user city.gpkg nulls.txt
")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    /// Geodatabase to audit
    #[arg(help = "Path to an existing geodatabase")]
    geodatabase: PathBuf,

    /// Report file path
    #[arg(help = "Report file to create (overwritten if it exists)")]
    output: PathBuf,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Additional field names to skip
    #[arg(
        long = "exclude-field",
        value_name = "NAME",
        help = "Field name to skip in every element (repeatable, case-sensitive)"
    )]
    exclude_fields: Vec<String>,
}

#[derive(Args)]
struct GlobalArgs {
    /// Increase verbosity
    #[arg(
        short,
        long,
        global = true,
        action = clap::ArgAction::Count,
        help = "Increase verbosity (-v, -vv)"
    )]
    verbose: u8,

    /// Suppress output
    #[arg(short, long, global = true, help = "Suppress all output except errors")]
    quiet: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => Self::Text,
            OutputFormat::Json => Self::Json,
        }
    }
}

impl Cli {
    fn audit_config(&self) -> AuditConfig {
        self.exclude_fields
            .iter()
            .fold(AuditConfig::new(), |config, name| {
                config.with_excluded_field(name.as_str())
            })
            .with_format(self.format.into())
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.global.verbose, cli.global.quiet)?;

    info!("Geodatabase: {}", cli.geodatabase.display());
    info!("Output: {}", cli.output.display());

    let summary = run_audit(&cli.geodatabase, &cli.output, &cli.audit_config())
        .await
        .map_err(|e| {
            error!("Audit failed: {}", e.detailed_message());
            e
        })?;

    if !cli.global.quiet {
        println!(
            "Audited {} elements ({} failed); report written to {}",
            summary.elements,
            summary.failed_elements,
            cli.output.display()
        );
    }

    Ok(())
}
