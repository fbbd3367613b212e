//! Normalize command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::utils::LayoutArgs;
use crate::merge::Merger;
use crate::records::{load_records, RecordFormat};
use crate::render::{render_records, write_report};
use crate::utils::format_with_commas;

#[derive(Args)]
pub struct NormalizeArgs {
    /// Record list to read (JSON array or JSON Lines); stdin when omitted or '-'
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Write normalized records here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (defaults to the input's format)
    #[arg(short, long, value_enum)]
    pub format: Option<RecordFormat>,

    #[command(flatten)]
    pub layout: LayoutArgs,

    /// Process records on all CPU cores
    #[arg(long)]
    pub parallel: bool,

    /// Write a JSON merge report to this file
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Omit the generation timestamp from the report
    #[arg(long)]
    pub no_timestamp: bool,
}

pub fn run(args: NormalizeArgs) -> Result<()> {
    let config = args.layout.resolve(args.parallel)?;

    let (records, input_format) = load_records(args.input.as_deref())?;

    let merger =
        Merger::new(&config.layout()).normalize_separators(config.normalize_separators);
    let (kept, stats) =
        if config.parallel { merger.normalize_par(records) } else { merger.normalize(records) };

    let rendered = render_records(&kept, args.format.unwrap_or(input_format))?;
    match args.output.as_deref() {
        Some(path) if path != Path::new("-") => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed creating {}", parent.display()))?;
            }
            std::fs::write(path, rendered)
                .with_context(|| format!("Failed writing records to {}", path.display()))?;
        }
        _ => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(rendered.as_bytes()).context("Failed writing records to stdout")?;
            stdout.flush()?;
        }
    }

    if let Some(report_path) = &args.report {
        write_report(report_path, &stats, &config, !args.no_timestamp)
            .with_context(|| format!("Failed writing report to {}", report_path.display()))?;
    }

    eprintln!(
        "Normalized {} records: {} kept ({} relocated), {} dropped",
        format_with_commas(stats.total),
        format_with_commas(stats.kept()),
        format_with_commas(stats.relocated),
        format_with_commas(stats.dropped),
    );
    Ok(())
}
