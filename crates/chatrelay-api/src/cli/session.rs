//! Session CLI commands: history, reset, sessions.

use anyhow::Result;
use chrono::{DateTime, Utc};
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use chatrelay_types::message::{Message, MessageRole, SessionId};

use crate::state::AppState;

/// Longest content preview shown in tables.
const PREVIEW_CHARS: usize = 60;

/// Print a session's messages in order.
///
/// # Examples
///
/// ```bash
/// chatrelay history 0196a1f2-...
/// chatrelay history 0196a1f2-... --json
/// ```
pub async fn show_history(state: &AppState, session_id: &str, json: bool) -> Result<()> {
    let session_id = SessionId::new(session_id);
    let history = state.store().get_history(&session_id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&history)?);
        return Ok(());
    }

    if history.is_empty() {
        println!();
        println!(
            "  {} No messages in session '{}'.",
            style("i").blue().bold(),
            style(&session_id).cyan(),
        );
        println!();
        return Ok(());
    }

    println!();
    println!(
        "  Session '{}' ({} messages)",
        style(&session_id).cyan(),
        history.len(),
    );
    println!();

    for message in &history {
        let role = match message.role {
            MessageRole::User => style("you").green().bold(),
            MessageRole::Assistant => style("assistant").magenta().bold(),
            MessageRole::System => style("system").dim(),
        };
        println!(
            "  {} {}",
            role,
            style(format_timestamp(message.timestamp)).dim()
        );
        for line in message.content.lines() {
            println!("    {line}");
        }
        println!();
    }

    Ok(())
}

/// Delete a session. Succeeds whether or not it existed.
pub async fn reset_session(state: &AppState, session_id: &str, json: bool, quiet: bool) -> Result<()> {
    let session_id = SessionId::new(session_id);
    state.store().delete_session(&session_id).await?;

    if json {
        let result = serde_json::json!({
            "ok": true,
            "sessionId": session_id,
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if !quiet {
        println!();
        println!(
            "  {} Reset session '{}'",
            style("ok").green(),
            style(&session_id).cyan(),
        );
        println!();
    }

    Ok(())
}

/// List stored sessions with message count, last activity, and a preview.
pub async fn list_sessions(state: &AppState, json: bool) -> Result<()> {
    let store = state.store();
    let ids = store.list_sessions().await?;

    let mut rows = Vec::with_capacity(ids.len());
    for id in ids {
        let history = store.get_history(&id).await?;
        rows.push((id, history));
    }

    if json {
        let sessions: Vec<_> = rows
            .iter()
            .map(|(id, history)| {
                serde_json::json!({
                    "sessionId": id,
                    "messages": history.len(),
                    "lastActivity": history.last().map(|m| m.timestamp),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&sessions)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!();
        println!(
            "  {} No sessions stored. Start the relay with: {}",
            style("i").blue().bold(),
            style("chatrelay serve").yellow()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Session").fg(Color::White),
        Cell::new("Messages").fg(Color::White),
        Cell::new("Last Activity").fg(Color::White),
        Cell::new("Last Message").fg(Color::White),
    ]);

    for (id, history) in &rows {
        let (last_activity, preview) = match history.last() {
            Some(message) => (format_timestamp(message.timestamp), preview(message)),
            None => ("-".to_string(), String::new()),
        };

        table.add_row(vec![
            Cell::new(id).fg(Color::Cyan),
            Cell::new(history.len()),
            Cell::new(last_activity),
            Cell::new(preview).fg(Color::DarkGrey),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!("  {} sessions", rows.len());
    println!();

    Ok(())
}

fn format_timestamp(millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// First line of a message, cut to [`PREVIEW_CHARS`] characters.
fn preview(message: &Message) -> String {
    let line = message.content.lines().next().unwrap_or_default();
    if line.chars().count() > PREVIEW_CHARS {
        let cut: String = line.chars().take(PREVIEW_CHARS - 3).collect();
        format!("{cut}...")
    } else {
        line.to_string()
    }
}
