//! inspeq CLI: collect inspection records and render their reports.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, info};

use inspeq_core::{
    RecordDoc, record_from_json, render_error_list, render_module_detail, render_record_json,
    render_summary,
};
use inspeq_types::InspectionRecord;

mod interactive;

#[derive(Parser)]
#[command(name = "inspeq")]
#[command(about = "Formal inspection report generator", long_about = None)]
struct Cli {
    /// Enable verbose (info-level) logging to stderr.
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    /// Enable debug-level logging to stderr.
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Collect an inspection record interactively and write its reports.
    New(NewArgs),

    /// Render reports from a JSON record document.
    Report(ReportArgs),

    /// Validate a JSON record document.
    Validate(ValidateArgs),

    /// Print the JSON schema for the record document.
    Schema,
}

#[derive(Parser, Debug)]
struct NewArgs {
    /// Which report(s) to write once collection finishes.
    #[arg(long, value_enum, default_value_t = ReportTarget::All)]
    report_type: ReportTarget,

    /// Output directory for report files.
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,
}

#[derive(Parser, Debug)]
struct ReportArgs {
    /// Path to the JSON record document.
    record: PathBuf,

    /// Which report(s) to generate.
    #[arg(long, value_enum, default_value_t = ReportTarget::All)]
    report_type: ReportTarget,

    /// Output directory for report files.
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Path to the JSON record document.
    record: PathBuf,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ReportTarget {
    ErrorList,
    ModuleDetail,
    Summary,
    Json,
    All,
}

impl ReportTarget {
    fn includes(self, other: ReportTarget) -> bool {
        self == ReportTarget::All || self == other
    }
}

#[cfg(not(test))]
fn main() -> std::process::ExitCode {
    match run_with_args(std::env::args_os()) {
        Ok(code) => std::process::ExitCode::from(code as u8),
        Err(err) => {
            eprintln!("{err:?}");
            std::process::ExitCode::from(1)
        }
    }
}

fn run_with_args<I, T>(args: I) -> Result<i32>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = Cli::parse_from(args);

    init_logging(cli.verbose, cli.debug);

    match cli.command {
        Commands::New(args) => {
            cmd_new(args)?;
            Ok(0)
        }
        Commands::Report(args) => {
            cmd_report(args)?;
            Ok(0)
        }
        Commands::Validate(args) => cmd_validate(args),
        Commands::Schema => {
            cmd_schema()?;
            Ok(0)
        }
    }
}

/// Initialize tracing/logging based on CLI flags.
fn init_logging(verbose: bool, debug: bool) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let level = if debug {
        "debug"
    } else if verbose {
        "info"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    debug!("Logging initialized at level: {}", level);
}

fn cmd_new(args: NewArgs) -> Result<()> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let record = interactive::collect_record(&mut stdin.lock(), &mut stdout.lock())?;
    info!(findings = record.findings.len(), "record collected");
    write_reports(&record, args.report_type, &args.output_dir)
}

fn cmd_report(args: ReportArgs) -> Result<()> {
    let record = load_record(&args.record)?;
    info!(findings = record.findings.len(), "record loaded");
    write_reports(&record, args.report_type, &args.output_dir)
}

fn cmd_validate(args: ValidateArgs) -> Result<i32> {
    match load_record(&args.record) {
        Ok(record) => {
            println!(
                "OK: {} ({} findings, {} participants)",
                args.record.display(),
                record.findings.len(),
                record.participants.len()
            );
            Ok(0)
        }
        Err(err) => {
            eprintln!("{err:?}");
            Ok(1)
        }
    }
}

fn cmd_schema() -> Result<()> {
    let schema = schemars::schema_for!(RecordDoc);
    let text = serde_json::to_string_pretty(&schema).context("render schema")?;
    println!("{text}");
    Ok(())
}

fn load_record(path: &Path) -> Result<InspectionRecord> {
    debug!("Loading record from: {}", path.display());
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read record {}", path.display()))?;
    record_from_json(&text).with_context(|| format!("load record {}", path.display()))
}

/// Writes the selected report(s), one file per target, named by inspection
/// identity plus a fixed per-report suffix.
fn write_reports(record: &InspectionRecord, target: ReportTarget, output_dir: &Path) -> Result<()> {
    let base = &record.inspection_id;

    if target.includes(ReportTarget::ErrorList) {
        let path = output_dir.join(format!("{base}_error-list.txt"));
        write_text(&path, &render_error_list(record))?;
        println!("Error list written to: {}", path.display());
    }

    if target.includes(ReportTarget::ModuleDetail) {
        let path = output_dir.join(format!("{base}_module-detail.txt"));
        write_text(&path, &render_module_detail(record))?;
        println!("Module detail written to: {}", path.display());
    }

    if target.includes(ReportTarget::Summary) {
        let path = output_dir.join(format!("{base}_summary.txt"));
        write_text(&path, &render_summary(record))?;
        println!("Summary written to: {}", path.display());
    }

    if target.includes(ReportTarget::Json) {
        let json = render_record_json(record).context("serialize record")?;
        let path = output_dir.join(format!("{base}_data.json"));
        write_text(&path, &json)?;
        println!("JSON data written to: {}", path.display());
    }

    Ok(())
}

fn write_text(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create dir {}", parent.display()))?;
        }
    }

    std::fs::write(path, text).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
