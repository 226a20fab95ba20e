use std::{io::Write as _, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{
    AttributeSampler, CancellationToken, HttpDogProvider, RandomSampler, SessionController,
};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::broadcast::error::RecvError,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod app;
mod commands;
mod config;
mod render;

use app::Flow;
use config::{load_settings, Args};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut settings = load_settings(&args.config)?;
    args.apply(&mut settings);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let sampler: Arc<dyn AttributeSampler> = match settings.seed {
        Some(seed) => Arc::new(RandomSampler::seeded(seed)),
        None => Arc::new(RandomSampler::from_os_rng()),
    };
    let provider = HttpDogProvider::new(&settings.api_url, settings.request_timeout(), sampler)
        .context("failed to build dog api client")?;
    info!(
        api_url = provider.api_url(),
        max_attempts = settings.max_attempts,
        "starting dog discovery"
    );

    println!("{}\n", commands::HELP);
    // Ctrl-C during the first discovery only abandons that discovery.
    let cancel = CancellationToken::new();
    let starting = SessionController::start_with_cancel(
        Arc::new(provider),
        settings.discovery_settings(),
        &cancel,
    );
    tokio::pin!(starting);
    let controller = tokio::select! {
        controller = &mut starting => controller,
        _ = tokio::signal::ctrl_c() => {
            cancel.cancel();
            starting.await
        }
    };
    spawn_progress_feed(&controller);
    println!("{}", render::render_session(&controller.snapshot().await));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush().context("failed to flush stdout")?;

        let line = tokio::select! {
            line = lines.next_line() => line.context("failed to read input")?,
            _ = tokio::signal::ctrl_c() => None,
        };
        let Some(line) = line else {
            break;
        };

        let command = match commands::parse_command(&line) {
            Ok(command) => command,
            Err(error) => {
                println!("{error}");
                continue;
            }
        };

        // Ctrl-C during a command cancels the discovery instead of the process.
        let cancel = CancellationToken::new();
        let handled = app::handle_command(&controller, command, &cancel);
        tokio::pin!(handled);
        let flow = tokio::select! {
            flow = &mut handled => flow,
            _ = tokio::signal::ctrl_c() => {
                cancel.cancel();
                handled.await
            }
        };

        match flow {
            Flow::Continue(output) => println!("{output}"),
            Flow::Quit => break,
        }
    }

    let snapshot = controller.snapshot().await;
    info!(
        seen = snapshot.history.len(),
        banned = snapshot.banned.len(),
        "leaving dog discovery"
    );
    Ok(())
}

fn spawn_progress_feed(controller: &SessionController) {
    let mut events = controller.subscribe_events();
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => {
                    if let Some(line) = app::describe_event(&event) {
                        println!("{line}");
                    }
                }
                Err(RecvError::Lagged(_)) => continue,
                Err(RecvError::Closed) => break,
            }
        }
    });
}
