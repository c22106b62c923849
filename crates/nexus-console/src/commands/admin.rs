//! Users and API-key commands. Output is pretty-printed JSON.

use std::io::Write;

use nexus_client::admin::{CreateApiKey, InviteUser, UserRole};
use nexus_client::AdminClient;
use nexus_common::NexusError;
use serde::Serialize;

use crate::cli::{KeysCommand, UsersCommand};

pub async fn users<W: Write>(
    client: &AdminClient,
    command: UsersCommand,
    out: &mut W,
) -> Result<(), NexusError> {
    match command {
        UsersCommand::List => print_json(out, &client.list_users().await?),
        UsersCommand::Invite { email, name, role } => {
            let role: UserRole = role.parse()?;
            let invite = InviteUser::new(email, name).with_role(role);
            print_json(out, &client.invite_user(&invite).await?)
        }
    }
}

pub async fn keys<W: Write>(
    client: &AdminClient,
    command: KeysCommand,
    out: &mut W,
) -> Result<(), NexusError> {
    match command {
        KeysCommand::List => print_json(out, &client.list_api_keys().await?),
        KeysCommand::Create {
            name,
            rate_limit_rpm,
            expires_in_days,
        } => {
            let mut request = CreateApiKey::new(name).with_rate_limit_rpm(rate_limit_rpm);
            if let Some(days) = expires_in_days {
                request = request.with_expiry_days(days);
            }
            print_json(out, &client.create_api_key(&request).await?)
        }
        KeysCommand::Revoke { id } => {
            client.revoke_api_key(&id).await?;
            writeln!(out, "revoked {id}")?;
            Ok(())
        }
    }
}

fn print_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> Result<(), NexusError> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
