mod cli;
mod commands;
mod settings;

use std::path::PathBuf;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

fn init_logging(directive: &str) {
    let directive = directive
        .parse()
        .unwrap_or_else(|_| "nexus=info".parse().expect("static directive parses"));
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive))
        .with_writer(std::io::stderr)
        .init();
}

/// A missing `.env` is normal; anything else is worth telling the user.
fn dotenv_warning(result: Result<PathBuf, dotenvy::Error>) -> Option<String> {
    match result {
        Ok(_) => None,
        Err(e) if e.not_found() => None,
        Err(e) => Some(format!("warning: .env not loaded: {e}")),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Real environment variables win over .env.
    if let Some(warning) = dotenv_warning(dotenvy::dotenv()) {
        eprintln!("{warning}");
    }

    let args = cli::parse();

    let config = match nexus_config::load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    init_logging(args.log_level.as_deref().unwrap_or(&config.logging.level));
    tracing::debug!("nexus v{} starting", env!("CARGO_PKG_VERSION"));

    match commands::run(args.command, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!("command failed: {e:?}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
