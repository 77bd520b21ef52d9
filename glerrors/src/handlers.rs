use anyhow::{Context, anyhow};
use clap::ArgMatches;
use colored::Colorize;
use glerrors_core::harvest::{HarvestOptions, HarvestProgressCallback, execute_harvest};
use glerrors_core::report::{Report, ReportFormat, save_report};
use glerrors_scanner::ExtractStrategy;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::level_filters::LevelFilter;
use url::Url;

/// Settings for one run, resolved from the command line
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub index_url: String,
    pub output: PathBuf,
    pub format: ReportFormat,
    pub strategy: ExtractStrategy,
    pub workers: usize,
    pub timeout_secs: u64,
    pub quiet: bool,
    pub verbosity: u8,
}

pub fn parse_run_config(matches: &ArgMatches) -> Result<RunConfig, String> {
    let index_url = matches
        .get_one::<Url>("url")
        .ok_or("Missing --url")?
        .to_string();
    let output = matches
        .get_one::<String>("output")
        .ok_or("Missing --output")?;
    let format = matches
        .get_one::<String>("format")
        .and_then(|f| ReportFormat::from_str(f))
        .ok_or("Report format must be one of: text, json")?;
    let strategy = matches
        .get_one::<String>("strategy")
        .and_then(|s| ExtractStrategy::from_str(s))
        .ok_or("Strategy must be one of: dom, legacy")?;
    let workers = *matches.get_one::<usize>("workers").unwrap_or(&4);
    if workers == 0 {
        return Err("--workers must be at least 1".to_string());
    }
    let timeout_secs = *matches.get_one::<u64>("timeout").unwrap_or(&10);

    Ok(RunConfig {
        index_url,
        output: resolve_output_path(output),
        format,
        strategy,
        workers,
        timeout_secs,
        quiet: matches.get_flag("quiet"),
        verbosity: matches.get_count("verbose"),
    })
}

/// Expand a leading `~` in the output path
pub fn resolve_output_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}

pub fn log_level(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        _ => LevelFilter::DEBUG,
    }
}

pub fn init_tracing(verbosity: u8) {
    tracing_subscriber::fmt()
        .with_max_level(log_level(verbosity))
        .with_writer(std::io::stderr)
        .init();
}

/// What a finished run wrote, for the closing summary
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub output: PathBuf,
    pub pages: usize,
    pub failed_pages: usize,
    pub entries: usize,
}

pub async fn handle_harvest(config: &RunConfig) -> anyhow::Result<RunSummary> {
    let show_progress_bars = !config.quiet && std::io::stdout().is_terminal();

    let progress_callback: Option<HarvestProgressCallback> = if config.quiet {
        None
    } else {
        Some(Arc::new(|msg: String| {
            println!("{}", msg);
        }))
    };

    let options = HarvestOptions {
        index_url: config.index_url.clone(),
        workers: config.workers,
        timeout_secs: config.timeout_secs,
        strategy: config.strategy,
        show_progress_bars,
    };

    let outcome = execute_harvest(options, progress_callback)
        .await
        .with_context(|| format!("Failed to read index {}", config.index_url))?;

    let report = Report::from_outcome(&outcome);
    save_report(&config.output, &report, config.format)
        .with_context(|| format!("Failed to write report to {}", config.output.display()))?;

    if report.pages > 0 && report.failed_pages == report.pages {
        return Err(anyhow!(
            "All {} pages failed; report at {} is empty",
            report.pages,
            config.output.display()
        ));
    }

    Ok(RunSummary {
        output: config.output.clone(),
        pages: report.pages,
        failed_pages: report.failed_pages,
        entries: report.entries.len(),
    })
}

pub fn print_summary(summary: &RunSummary) {
    println!(
        "{} {} signatures from {} pages written to {}",
        "✓".green().bold(),
        summary.entries.to_string().cyan(),
        summary.pages.to_string().cyan(),
        summary.output.display().to_string().bright_white()
    );
    if summary.failed_pages > 0 {
        println!(
            "{} {} pages skipped after errors (run with -v for details)",
            "⚠".yellow().bold(),
            summary.failed_pages.to_string().yellow()
        );
    }
}
