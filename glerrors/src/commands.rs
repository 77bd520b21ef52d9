use crate::CLAP_STYLING;
use clap::arg;
use glerrors_core::harvest::{DEFAULT_INDEX_URL, DEFAULT_OUTPUT_FILE};
use url::Url;

pub fn command_argument_builder() -> clap::Command {
    clap::Command::new("glerrors")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("glerrors")
        .about(
            "Collects every OpenGL function signature and the errors it can raise from the \
            reference pages into a single text file.",
        )
        .styles(CLAP_STYLING)
        .arg(
            arg!(-u --"url" <URL>)
                .required(false)
                .help("Documentation index page listing the function pages")
                .value_parser(clap::value_parser!(Url))
                .default_value(DEFAULT_INDEX_URL),
        )
        .arg(
            arg!(-o --"output" <PATH>)
                .required(false)
                .help("File the report is written to")
                .default_value(DEFAULT_OUTPUT_FILE),
        )
        .arg(
            arg!(-f --"format" <FORMAT>)
                .required(false)
                .help("Report format: text, json")
                .value_parser(["text", "json"])
                .default_value("text"),
        )
        .arg(
            arg!(-s --"strategy" <STRATEGY>)
                .required(false)
                .help(
                    "Page extractor: dom (parsed tree) or legacy (raw markup scanner, splits on \
                    every ';', lines trimmed of edge spaces)",
                )
                .value_parser(["dom", "legacy"])
                .default_value("dom"),
        )
        .arg(
            arg!(-t --"workers" <NUM_WORKERS>)
                .required(false)
                .help("Number of pages fetched concurrently")
                .value_parser(clap::value_parser!(usize))
                .default_value("4"),
        )
        .arg(
            arg!(--"timeout" <SECONDS>)
                .required(false)
                .help("Request timeout in seconds (at least 1)")
                .value_parser(clap::value_parser!(u64).range(1..))
                .default_value("10"),
        )
        .arg(arg!(-q --"quiet" "Suppress progress output").required(false))
        .arg(
            arg!(-v --"verbose" ... "Increase log verbosity (-v info, -vv debug)")
                .required(false),
        )
}
