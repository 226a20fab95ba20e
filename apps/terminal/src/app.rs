//! Turns parsed commands into controller calls and panel text.

use client_core::{CancellationToken, SessionController, SessionEvent};

use crate::{
    commands::{resolve_ban_target, resolve_unban_target, Command, Target, HELP},
    render,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    Continue(String),
    Quit,
}

pub async fn handle_command(
    controller: &SessionController,
    command: Command,
    cancel: &CancellationToken,
) -> Flow {
    let output = match command {
        Command::Discover => {
            let status = match controller.discover_with_cancel(cancel).await {
                Ok(_) => None,
                Err(error) => Some(render::discovery_failure_status(&error)),
            };
            let snapshot = controller.snapshot().await;
            let panel = render::render_discovery(snapshot.current_dog.as_ref(), snapshot.loading);
            match status {
                Some(status) => format!("{status}\n{panel}"),
                None => panel,
            }
        }
        Command::Ban(target) => {
            let current = controller.current_dog().await;
            match resolve_ban_target(&target, current.as_ref()) {
                Some(value) => {
                    let line = if controller.ban_attribute(&value).await {
                        format!("Banned '{value}'.")
                    } else {
                        format!("'{value}' is already banned.")
                    };
                    format!("{line}\n{}", render::render_ban_list(&controller.banned().await))
                }
                None => missing_chip(&target),
            }
        }
        Command::Unban(target) => {
            let banned = controller.banned().await;
            match resolve_unban_target(&target, &banned) {
                Some(value) => {
                    let line = if controller.unban_attribute(&value).await {
                        format!("Unbanned '{value}'.")
                    } else {
                        format!("'{value}' was not banned.")
                    };
                    format!("{line}\n{}", render::render_ban_list(&controller.banned().await))
                }
                None => missing_chip(&target),
            }
        }
        Command::Show => render::render_session(&controller.snapshot().await),
        Command::History => render::render_gallery(&controller.history().await),
        Command::Bans => render::render_ban_list(&controller.banned().await),
        Command::Help => HELP.to_string(),
        Command::Quit => return Flow::Quit,
    };
    Flow::Continue(output)
}

fn missing_chip(target: &Target) -> String {
    match target {
        Target::Index(index) => format!("Nothing at position {index}."),
        Target::Value(value) => format!("Nothing matches '{value}'."),
    }
}

/// Progress lines printed while a discovery is running.
pub fn describe_event(event: &SessionEvent) -> Option<String> {
    match event {
        SessionEvent::CandidateRejected {
            attempt,
            banned_value,
        } => Some(format!(
            "  skipped dog #{attempt}: '{banned_value}' is banned"
        )),
        SessionEvent::LoadingChanged(true) => Some("  Loading...".to_string()),
        _ => None,
    }
}

#[cfg(test)]
#[path = "tests/app_tests.rs"]
mod tests;
