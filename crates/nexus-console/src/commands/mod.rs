//! Subcommand handlers.

mod admin;
mod chat;

use std::sync::Arc;

use nexus_client::{AdminClient, HttpTransport, Session};
use nexus_common::NexusError;
use nexus_config::NexusConfig;

use crate::cli::Command;
use crate::settings;

pub async fn run(command: Command, config: &NexusConfig) -> Result<(), NexusError> {
    let mut stdout = std::io::stdout();
    match command {
        Command::Config => {
            println!("{}", nexus_config::config_to_json(config));
            Ok(())
        }
        Command::Chat { mode } => {
            let options = settings::session_options(&config.chat, mode.as_deref());
            let session = Session::with_options(Arc::new(transport(config)?), options);
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            chat::run_repl(&session, stdin, &mut stdout).await
        }
        Command::Ask { prompt, mode } => {
            let options = settings::session_options(&config.chat, mode.as_deref());
            chat::ask(&transport(config)?, &prompt, &options.mode, &mut stdout).await
        }
        Command::Users(cmd) => admin::users(&admin_client(config)?, cmd, &mut stdout).await,
        Command::Keys(cmd) => admin::keys(&admin_client(config)?, cmd, &mut stdout).await,
    }
}

fn transport(config: &NexusConfig) -> Result<HttpTransport, NexusError> {
    Ok(HttpTransport::new(settings::endpoint_config(config)?)?)
}

fn admin_client(config: &NexusConfig) -> Result<AdminClient, NexusError> {
    Ok(AdminClient::from_transport(transport(config)?))
}
