use glerrors::commands::command_argument_builder;
use glerrors::handlers::{handle_harvest, init_tracing, parse_run_config, print_summary};

#[tokio::main]
async fn main() {
    let matches = command_argument_builder().get_matches();

    let config = match parse_run_config(&matches) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("✗ {}", e);
            std::process::exit(2);
        }
    };

    init_tracing(config.verbosity);

    match handle_harvest(&config).await {
        Ok(summary) => {
            if !config.quiet {
                print_summary(&summary);
            }
        }
        Err(e) => {
            eprintln!("✗ {:#}", e);
            std::process::exit(1);
        }
    }
}
