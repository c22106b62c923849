use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// NexusAI console: chat with NEXUS and manage users and API keys.
#[derive(Parser, Debug)]
#[command(name = "nexus", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level override (tracing filter, e.g. `nexus=debug`).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Interactive chat over one conversation.
    Chat {
        /// NEXUS mode tag (chat, code, reasoning, search_rag, ...).
        #[arg(short, long)]
        mode: Option<String>,
    },
    /// Send a single prompt and print the reply.
    Ask {
        prompt: String,
        #[arg(short, long)]
        mode: Option<String>,
    },
    /// Users and roles.
    #[command(subcommand)]
    Users(UsersCommand),
    /// API keys.
    #[command(subcommand)]
    Keys(KeysCommand),
    /// Print the effective configuration.
    Config,
}

#[derive(Subcommand, Debug)]
pub enum UsersCommand {
    List,
    Invite {
        #[arg(long)]
        email: String,
        #[arg(long)]
        name: String,
        /// viewer, analyst, developer or admin.
        #[arg(long, default_value = "viewer")]
        role: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum KeysCommand {
    List,
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, default_value_t = nexus_client::admin::DEFAULT_RATE_LIMIT_RPM)]
        rate_limit_rpm: u32,
        /// Expire the key after this many days.
        #[arg(long)]
        expires_in_days: Option<u32>,
    },
    Revoke {
        id: String,
    },
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_chat_with_mode() {
        let args = Args::try_parse_from(["nexus", "chat", "--mode", "code"]).unwrap();
        assert!(matches!(args.command, Command::Chat { mode: Some(ref m) } if m == "code"));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let args =
            Args::try_parse_from(["nexus", "users", "list", "--log-level", "nexus=debug"]).unwrap();
        assert_eq!(args.log_level.as_deref(), Some("nexus=debug"));
        assert!(matches!(args.command, Command::Users(UsersCommand::List)));
    }

    #[test]
    fn invite_defaults_to_viewer() {
        let args = Args::try_parse_from([
            "nexus", "users", "invite", "--email", "a@b.co", "--name", "A",
        ])
        .unwrap();
        match args.command {
            Command::Users(UsersCommand::Invite { role, .. }) => assert_eq!(role, "viewer"),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn key_create_defaults_rate_limit() {
        let args = Args::try_parse_from(["nexus", "keys", "create", "--name", "ci"]).unwrap();
        match args.command {
            Command::Keys(KeysCommand::Create {
                rate_limit_rpm,
                expires_in_days,
                ..
            }) => {
                assert_eq!(rate_limit_rpm, 60);
                assert_eq!(expires_in_days, None);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn ask_requires_prompt() {
        assert!(Args::try_parse_from(["nexus", "ask"]).is_err());
    }
}
