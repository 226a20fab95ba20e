//! Text rendering of the gallery, discovery and ban-list panels.

use std::fmt::Write as _;

use client_core::SessionSnapshot;
use shared::{
    domain::Dog,
    error::{DiscoveryError, ProviderError},
};

pub fn render_gallery(history: &[Dog]) -> String {
    let mut out = String::from("== Who have we seen so far? ==\n");
    if history.is_empty() {
        out.push_str("  (nobody yet)\n");
        return out;
    }
    for (i, dog) in history.iter().enumerate() {
        let _ = writeln!(out, "  {:>3}. {}", i + 1, dog.summary());
        let _ = writeln!(out, "       {}", dog.image_url());
    }
    out
}

pub fn render_discovery(current: Option<&Dog>, loading: bool) -> String {
    let mut out = String::from("== Discover Random Dogs ==\n");
    if loading {
        out.push_str("  Loading...\n");
    }
    let Some(dog) = current else {
        out.push_str("  No dog yet. Press enter to discover one.\n");
        return out;
    };

    let _ = writeln!(out, "  {}", dog.breed());
    let _ = writeln!(out, "  {}", dog.image_url());
    let chips: Vec<String> = dog
        .attributes()
        .iter()
        .enumerate()
        .map(|(i, attribute)| format!("[{}] {}: {}", i + 1, attribute.kind, attribute.value))
        .collect();
    let _ = writeln!(out, "  {}", chips.join("  "));
    out
}

pub fn render_ban_list(banned: &[String]) -> String {
    let mut out = String::from("== Ban List ==\n");
    if banned.is_empty() {
        out.push_str("  No banned properties yet.\n");
        return out;
    }
    for (i, value) in banned.iter().enumerate() {
        let _ = writeln!(out, "  [{}] {}", i + 1, value);
    }
    out
}

pub fn render_session(snapshot: &SessionSnapshot) -> String {
    [
        render_gallery(&snapshot.history),
        render_discovery(snapshot.current_dog.as_ref(), snapshot.loading),
        render_ban_list(&snapshot.banned),
    ]
    .join("\n")
}

/// One-line status shown after a failed discovery; the previous dog stays on screen.
pub fn discovery_failure_status(error: &DiscoveryError) -> String {
    match error {
        DiscoveryError::Provider(ProviderError::Timeout | ProviderError::Request(_)) => {
            "Dog API unreachable; still showing the previous dog.".to_string()
        }
        DiscoveryError::Provider(ProviderError::Status { status }) => {
            format!("Dog API answered with HTTP {status}; still showing the previous dog.")
        }
        DiscoveryError::Provider(other) => {
            format!("Dog API sent something unexpected ({other}); still showing the previous dog.")
        }
        DiscoveryError::Exhausted { attempts } => format!(
            "No dog cleared the ban list in {attempts} tries; consider unbanning something."
        ),
        DiscoveryError::Timeout { .. } => {
            "Discovery took too long and was stopped.".to_string()
        }
        DiscoveryError::Cancelled => "Discovery cancelled.".to_string(),
        DiscoveryError::AlreadyInProgress => "Already discovering, hang on.".to_string(),
    }
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
