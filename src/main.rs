use clap::Parser;
use invite_tools::utils::logger::{self, LogFormat};
use invite_tools::utils::validation::Validate;
use invite_tools::{CliConfig, InviteRun};

fn main() {
    let cli = CliConfig::parse();

    logger::init_logger(cli.verbose, LogFormat::from_json_flag(cli.json_logs));

    tracing::debug!("CLI config: {:?}", cli);

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            eprintln!("{}", e.user_friendly_message());
            eprintln!("Suggestion: {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    };

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("{}", e.user_friendly_message());
        eprintln!("Suggestion: {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }

    match InviteRun::new(config).run() {
        Ok(summary) => {
            tracing::info!("Invited {} customers ({})", summary.invited, summary.output);
        }
        Err(e) => {
            tracing::error!(
                "Invite run failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("{}", e.user_friendly_message());
            eprintln!("Suggestion: {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }
}
