use clap::Parser;
use invite_tools::utils::logger::{self, LogFormat};
use invite_tools::{flatten_json, FlattenCliConfig};

fn main() {
    let cli = FlattenCliConfig::parse();
    logger::init_logger(cli.verbose, LogFormat::Compact);

    tracing::debug!("Flattening {}", cli.array);

    match flatten_json(&cli.array) {
        Ok(flat) => println!("flat array : {:?}", flat),
        Err(e) => {
            tracing::error!("Flatten failed: {} (Category: {:?})", e, e.category());
            eprintln!("{}", e.user_friendly_message());
            eprintln!("Suggestion: {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }
}
