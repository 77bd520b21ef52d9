use glerrors::commands::command_argument_builder;
use glerrors::handlers::*;
use glerrors::{DEFAULT_INDEX_URL, DEFAULT_OUTPUT_FILE};
use glerrors_core::ReportFormat;
use glerrors_scanner::ExtractStrategy;
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

fn config_from(args: &[&str]) -> Result<RunConfig, String> {
    let mut argv = vec!["glerrors"];
    argv.extend_from_slice(args);
    let matches = command_argument_builder()
        .try_get_matches_from(argv)
        .map_err(|e| e.to_string())?;
    parse_run_config(&matches)
}

#[test]
fn test_defaults_match_hardcoded_source_and_output() {
    let config = config_from(&[]).unwrap();

    assert_eq!(config.index_url, DEFAULT_INDEX_URL);
    assert_eq!(config.output, PathBuf::from(DEFAULT_OUTPUT_FILE));
    assert_eq!(config.format, ReportFormat::Text);
    assert_eq!(config.strategy, ExtractStrategy::Dom);
    assert_eq!(config.workers, 4);
    assert_eq!(config.timeout_secs, 10);
    assert!(!config.quiet);
    assert_eq!(config.verbosity, 0);
}

#[test]
fn test_overrides() {
    let config = config_from(&[
        "--url",
        "http://docs.example.com/man/index.html",
        "-o",
        "out.json",
        "-f",
        "json",
        "-s",
        "legacy",
        "-t",
        "1",
        "--timeout",
        "3",
        "-q",
        "-vv",
    ])
    .unwrap();

    assert_eq!(config.index_url, "http://docs.example.com/man/index.html");
    assert_eq!(config.output, PathBuf::from("out.json"));
    assert_eq!(config.format, ReportFormat::Json);
    assert_eq!(config.strategy, ExtractStrategy::Legacy);
    assert_eq!(config.workers, 1);
    assert_eq!(config.timeout_secs, 3);
    assert!(config.quiet);
    assert_eq!(config.verbosity, 2);
}

#[test]
fn test_zero_workers_rejected() {
    let result = config_from(&["-t", "0"]);
    assert!(result.unwrap_err().contains("at least 1"));
}

#[test]
fn test_zero_timeout_rejected() {
    assert!(config_from(&["--timeout", "0", "-q"]).is_err());
    assert_eq!(config_from(&["--timeout", "1"]).unwrap().timeout_secs, 1);
}

#[test]
fn test_unknown_strategy_rejected_by_parser() {
    assert!(config_from(&["--strategy", "regex"]).is_err());
}

#[test]
fn test_invalid_url_rejected_by_parser() {
    assert!(config_from(&["--url", "not a url"]).is_err());
}

#[test]
fn test_resolve_output_path_plain() {
    assert_eq!(resolve_output_path("GLerrors.txt"), PathBuf::from("GLerrors.txt"));
}

#[test]
fn test_resolve_output_path_expands_tilde() {
    let resolved = resolve_output_path("~/GLerrors.txt");
    assert!(!resolved.to_string_lossy().starts_with('~'));
    assert!(resolved.ends_with("GLerrors.txt"));
}

#[test]
fn test_log_level() {
    assert_eq!(log_level(0), LevelFilter::WARN);
    assert_eq!(log_level(1), LevelFilter::INFO);
    assert_eq!(log_level(5), LevelFilter::DEBUG);
}

#[tokio::test]
async fn test_handle_harvest_writes_report_file() -> Result<(), Box<dyn std::error::Error>> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/man/index.html"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<table><tr><td><a target="pagedisp" href="glFlush.xml">glFlush</a></td></tr></table>"#,
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/man/glFlush.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<div class="funcsynopsis"><table><tr><td>void glFlush(void);</td></tr></table></div>
<div class="refsect1"><h2>Errors</h2><p>None.</p></div>"#,
        ))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir()?;
    let output = dir.path().join("GLerrors.txt");
    let config = RunConfig {
        index_url: format!("{}/man/index.html", server.uri()),
        output: output.clone(),
        format: ReportFormat::Text,
        strategy: ExtractStrategy::Dom,
        workers: 1,
        timeout_secs: 5,
        quiet: true,
        verbosity: 0,
    };

    let summary = handle_harvest(&config).await?;

    assert_eq!(summary.pages, 1);
    assert_eq!(summary.entries, 1);
    assert_eq!(std::fs::read_to_string(&output)?, "void glFlush(void);\nNone.\n\n");
    Ok(())
}

#[tokio::test]
async fn test_handle_harvest_all_pages_failed_is_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/man/index.html"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<table><tr><td><a target="pagedisp" href="glGone.xml">glGone</a></td></tr></table>"#,
        ))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = RunConfig {
        index_url: format!("{}/man/index.html", server.uri()),
        output: dir.path().join("GLerrors.txt"),
        format: ReportFormat::Text,
        strategy: ExtractStrategy::Dom,
        workers: 1,
        timeout_secs: 5,
        quiet: true,
        verbosity: 0,
    };

    let err = handle_harvest(&config).await.unwrap_err();
    assert!(err.to_string().contains("All 1 pages failed"));
}
