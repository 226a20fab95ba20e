use std::{
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use clap::Parser;
use client_core::{DiscoverySettings, DEFAULT_MAX_ATTEMPTS};
use serde::Deserialize;
use shared::protocol::DEFAULT_RANDOM_IMAGE_URL;

pub const DEFAULT_CONFIG_PATH: &str = "dog-discovery.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_url: String,
    pub request_timeout_ms: u64,
    pub max_attempts: u32,
    pub discovery_timeout_ms: Option<u64>,
    pub seed: Option<u64>,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_RANDOM_IMAGE_URL.into(),
            request_timeout_ms: 10_000,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            discovery_timeout_ms: None,
            seed: None,
            log_level: "info".into(),
        }
    }
}

impl Settings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn discovery_settings(&self) -> DiscoverySettings {
        DiscoverySettings {
            max_attempts: self.max_attempts.max(1),
            timeout: self.discovery_timeout_ms.map(Duration::from_millis),
        }
    }
}

/// Command-line layer; every flag given here wins over file and environment.
#[derive(Parser, Debug)]
#[command(about = "Discover random dogs and ban the traits you are tired of")]
pub struct Args {
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,
    #[arg(long)]
    pub api_url: Option<String>,
    #[arg(long)]
    pub max_attempts: Option<u32>,
    #[arg(long)]
    pub request_timeout_ms: Option<u64>,
    #[arg(long)]
    pub discovery_timeout_ms: Option<u64>,
    /// Seed for size/origin/lifespan sampling.
    #[arg(long)]
    pub seed: Option<u64>,
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Args {
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(v) = &self.api_url {
            settings.api_url = v.clone();
        }
        if let Some(v) = self.max_attempts {
            settings.max_attempts = v;
        }
        if let Some(v) = self.request_timeout_ms {
            settings.request_timeout_ms = v;
        }
        if let Some(v) = self.discovery_timeout_ms {
            settings.discovery_timeout_ms = Some(v);
        }
        if let Some(v) = self.seed {
            settings.seed = Some(v);
        }
        if let Some(v) = &self.log_level {
            settings.log_level = v.clone();
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    api_url: Option<String>,
    request_timeout_ms: Option<u64>,
    max_attempts: Option<u32>,
    discovery_timeout_ms: Option<u64>,
    seed: Option<u64>,
    log_level: Option<String>,
}

/// Defaults, then the toml file at `path` if present, then environment.
pub fn load_settings(path: &Path) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    match fs::read_to_string(path) {
        Ok(raw) => apply_file(&mut settings, &raw)
            .with_context(|| format!("invalid config file '{}'", path.display()))?,
        Err(error) if error.kind() == io::ErrorKind::NotFound => {}
        Err(error) => {
            return Err(error)
                .with_context(|| format!("failed to read config file '{}'", path.display()))
        }
    }

    apply_env(&mut settings, |key| std::env::var(key).ok());
    Ok(settings)
}

fn apply_file(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file_cfg: FileSettings = toml::from_str(raw)?;

    if let Some(v) = file_cfg.api_url {
        settings.api_url = v;
    }
    if let Some(v) = file_cfg.request_timeout_ms {
        settings.request_timeout_ms = v;
    }
    if let Some(v) = file_cfg.max_attempts {
        settings.max_attempts = v;
    }
    if let Some(v) = file_cfg.discovery_timeout_ms {
        settings.discovery_timeout_ms = Some(v);
    }
    if let Some(v) = file_cfg.seed {
        settings.seed = Some(v);
    }
    if let Some(v) = file_cfg.log_level {
        settings.log_level = v;
    }
    Ok(())
}

/// Each key is looked up as `DOG_DISCOVERY__<KEY>` and then `APP__<KEY>`; the
/// latter wins. Unparseable numbers are ignored.
fn apply_env(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    let var = |key: &str| {
        lookup(&format!("APP__{key}")).or_else(|| lookup(&format!("DOG_DISCOVERY__{key}")))
    };

    if let Some(v) = var("API_URL") {
        settings.api_url = v;
    }
    if let Some(v) = var("REQUEST_TIMEOUT_MS").and_then(|v| v.parse().ok()) {
        settings.request_timeout_ms = v;
    }
    if let Some(v) = var("MAX_ATTEMPTS").and_then(|v| v.parse().ok()) {
        settings.max_attempts = v;
    }
    if let Some(v) = var("DISCOVERY_TIMEOUT_MS").and_then(|v| v.parse().ok()) {
        settings.discovery_timeout_ms = Some(v);
    }
    if let Some(v) = var("SEED").and_then(|v| v.parse().ok()) {
        settings.seed = Some(v);
    }
    if let Some(v) = var("LOG_LEVEL") {
        settings.log_level = v;
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
