pub mod commands;
pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use handlers::{RunConfig, handle_harvest, parse_run_config, resolve_output_path};

// Re-export harvest functionality from glerrors-core
pub use glerrors_core::harvest::{
    DEFAULT_INDEX_URL, DEFAULT_OUTPUT_FILE, HarvestOptions, HarvestOutcome, execute_harvest,
};

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);
