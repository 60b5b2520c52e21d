use std::{
    fs,
    io::{self, Write as _},
    path::PathBuf,
    process::ExitCode,
};

use anyhow::Context;
use clap::{CommandFactory, Parser, ValueEnum};
use colscan_analysis::{analysis::TableAnalyzer, config::AnalysisConfig, ingest};
use colscan_encoding::EncodingScheme;

use crate::{
    report::Report,
    util::{self, Output},
    view,
};

/// Score every byte column of a file of encoded records
#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Input file with one encoded record per line
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// Decoder for each line: base64, asciihex, binary, url or plain [default: plain]
    #[arg(short, long)]
    decoder: Option<String>,
    /// Highest polynomial degree tried per column
    #[arg(long)]
    max_degree: Option<usize>,
    /// Analyze columns one at a time instead of in parallel
    #[arg(long)]
    sequential: bool,
    /// JSON file with analysis settings; command-line flags take precedence
    #[arg(long)]
    config: Option<PathBuf>,
    /// Report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    format: ReportFormat,
    /// Write the report to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Browse the signals as bar charts in the terminal
    #[arg(long)]
    view: bool,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    #[default]
    Text,
    Json,
}

pub fn run() -> anyhow::Result<ExitCode> {
    let args = CommandArgs::parse();
    util::init_tracing();
    run_with(&args)
}

/// Missing or unreadable input prints usage and yields a failure code; other
/// failures are errors.
fn run_with(args: &CommandArgs) -> anyhow::Result<ExitCode> {
    let Some(input) = &args.input else {
        tracing::error!("no input file given");
        print_usage();
        return Ok(ExitCode::FAILURE);
    };
    let text = match fs::read_to_string(input) {
        Ok(text) => text,
        Err(e) => {
            tracing::error!("cannot read input file {}: {e}", input.display());
            print_usage();
            return Ok(ExitCode::FAILURE);
        }
    };

    let scheme = EncodingScheme::from_name(args.decoder.as_deref())?;
    let config = resolve_config(args)?;

    let table = ingest::decode_text(&text, scheme)
        .with_context(|| format!("Failed to decode input file: {}", input.display()))?;
    if table.is_empty() {
        tracing::warn!("input file has no records: {}", input.display());
    }

    let analysis = TableAnalyzer::from_config(&config)
        .analyze(&table)
        .context("Failed to analyze input")?;
    let report = Report::new(input.display().to_string(), scheme, config, &analysis);

    if args.view {
        view::run(&report)?;
        if args.output.is_none() {
            return Ok(ExitCode::SUCCESS);
        }
    }

    let mut output = Output::from_output_path(args.output.as_deref())?;
    match args.format {
        ReportFormat::Text => {
            report
                .write_text(&mut output)
                .with_context(|| format!("Failed to write report to {}", output.display_path()))?;
            output.finish()?;
        }
        ReportFormat::Json => output.write_json(&report)?,
    }
    if let Output::File { path, .. } = &output {
        tracing::info!("report written to {}", path.display());
    }

    Ok(ExitCode::SUCCESS)
}

/// Defaults, overridden by the config file, overridden by flags
fn resolve_config(args: &CommandArgs) -> anyhow::Result<AnalysisConfig> {
    let mut config = match &args.config {
        Some(path) => util::read_config_file(path)?,
        None => AnalysisConfig::default(),
    };
    if let Some(max_degree) = args.max_degree {
        config.max_degree = max_degree;
    }
    if args.sequential {
        config.parallel = false;
    }
    Ok(config)
}

fn print_usage() {
    let mut stderr = io::stderr().lock();
    // nothing useful to do if stderr itself is broken
    let _ = CommandArgs::command().write_help(&mut stderr);
    let _ = writeln!(stderr);
}
