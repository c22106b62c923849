//! Interactive chat and one-shot prompts.

use std::io::Write;

use nexus_client::{ChatMode, ChatTransport, Role, Session, SubmitError};
use nexus_common::NexusError;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::info;

const HELP: &str = "commands: /history, /usage, /usage reset, /help, /quit";

/// Read prompts line by line and submit each as a turn.
///
/// A failed request is reported and the loop continues; the user turn
/// stays in the history so `/history` shows what went unanswered.
pub async fn run_repl<R, W>(session: &Session, input: R, out: &mut W) -> Result<(), NexusError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    info!(session = %session.id(), mode = %session.options().mode, "chat started");
    writeln!(out, "NEXUS chat ({}). {HELP}", session.options().mode)?;

    let mut lines = input.lines();
    loop {
        write!(out, "you> ")?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        match line {
            "" => continue,
            "/quit" | "/exit" => break,
            "/help" => writeln!(out, "{HELP}")?,
            "/history" => print_history(session, out)?,
            "/usage" => print_usage(session, out)?,
            "/usage reset" => {
                session.reset_usage();
                writeln!(out, "usage reset")?;
            }
            prompt => match session.submit_turn(prompt).await {
                Ok(reply) if reply.substituted => {
                    writeln!(out, "nexus> (no response text returned)")?;
                }
                Ok(reply) => writeln!(out, "nexus> {}", reply.content)?,
                Err(SubmitError::EmptyContent) => {}
                Err(e) => writeln!(out, "error: {e}")?,
            },
        }
    }

    info!(session = %session.id(), turns = session.turn_count(), "chat ended");
    Ok(())
}

fn print_history<W: Write>(session: &Session, out: &mut W) -> std::io::Result<()> {
    session.with_turns(|turns| {
        for turn in turns {
            let who = match turn.role {
                Role::User => "you",
                Role::Assistant => "nexus",
            };
            writeln!(
                out,
                "[{}] {who}> {}",
                turn.created_at.format("%H:%M:%S"),
                turn.content
            )?;
        }
        Ok(())
    })
}

fn print_usage<W: Write>(session: &Session, out: &mut W) -> std::io::Result<()> {
    let usage = session.usage();
    writeln!(
        out,
        "{} replies, {} tokens, ${:.4}",
        usage.reply_count(),
        usage.total_tokens(),
        usage.total_cost_usd()
    )?;
    for (model, totals) in usage.models() {
        writeln!(
            out,
            "  {model}: {} calls, {} tokens, ${:.4}",
            totals.calls, totals.tokens, totals.cost_usd
        )?;
    }
    Ok(())
}

/// Send one prompt outside any session and print the reply text.
pub async fn ask<W: Write>(
    transport: &dyn ChatTransport,
    prompt: &str,
    mode: &ChatMode,
    out: &mut W,
) -> Result<(), NexusError> {
    let reply = transport.send(prompt, mode).await?;
    writeln!(out, "{}", reply.content)?;
    Ok(())
}
