use super::*;
use async_trait::async_trait;
use client_core::{DiscoverySettings, DogProvider};
use shared::{
    domain::{Dog, Lifespan, Origin, Size},
    error::ProviderError,
};
use std::{collections::VecDeque, sync::Arc};

struct QueueProvider(std::sync::Mutex<VecDeque<Result<Dog, ProviderError>>>);

#[async_trait]
impl DogProvider for QueueProvider {
    async fn fetch_candidate(&self) -> Result<Dog, ProviderError> {
        self.0
            .lock()
            .expect("queue lock")
            .pop_front()
            .unwrap_or(Err(ProviderError::Timeout))
    }
}

fn boxer() -> Dog {
    Dog::new(
        "https://images.dog.ceo/breeds/boxer/n02108089_1.jpg",
        "boxer",
        Size::Large,
        Origin::Japan,
        Lifespan::TenToTwelve,
    )
}

fn controller(results: Vec<Result<Dog, ProviderError>>) -> Arc<SessionController> {
    SessionController::new(
        Arc::new(QueueProvider(std::sync::Mutex::new(results.into()))),
        DiscoverySettings::default(),
    )
}

fn text(flow: Flow) -> String {
    match flow {
        Flow::Continue(text) => text,
        Flow::Quit => panic!("unexpected quit"),
    }
}

#[tokio::test]
async fn discover_then_ban_chip_by_number() {
    let controller = controller(vec![Ok(boxer())]);
    let cancel = CancellationToken::new();

    let out = text(handle_command(&controller, Command::Discover, &cancel).await);
    assert!(out.contains("[1] breed: boxer"));

    let out = text(handle_command(&controller, Command::Ban(Target::Index(2)), &cancel).await);
    assert!(out.contains("Banned 'Large'."));
    assert!(out.contains("[1] Large"));

    let ban_again = Command::Ban(Target::Value("large".into()));
    let out = text(handle_command(&controller, ban_again, &cancel).await);
    assert!(out.contains("'Large' is already banned."));
}

#[tokio::test]
async fn failed_discovery_keeps_previous_dog_on_screen() {
    let controller = controller(vec![Ok(boxer()), Err(ProviderError::Status { status: 502 })]);
    let cancel = CancellationToken::new();
    handle_command(&controller, Command::Discover, &cancel).await;

    let out = text(handle_command(&controller, Command::Discover, &cancel).await);
    assert!(out.contains("HTTP 502"));
    assert!(out.contains("[1] breed: boxer"));
}

#[tokio::test]
async fn unban_by_position_and_unknown_position() {
    let controller = controller(Vec::new());
    let cancel = CancellationToken::new();
    controller.ban_attribute("Japan").await;

    let out = text(handle_command(&controller, Command::Unban(Target::Index(4)), &cancel).await);
    assert_eq!(out, "Nothing at position 4.");

    let out = text(handle_command(&controller, Command::Unban(Target::Index(1)), &cancel).await);
    assert!(out.contains("Unbanned 'Japan'."));
    assert!(out.contains("No banned properties yet."));
}

#[tokio::test]
async fn banning_a_chip_without_a_dog_reports_nothing_there() {
    let controller = controller(Vec::new());
    let out = text(
        handle_command(
            &controller,
            Command::Ban(Target::Index(1)),
            &CancellationToken::new(),
        )
        .await,
    );
    assert_eq!(out, "Nothing at position 1.");
}

#[tokio::test]
async fn quit_ends_the_loop() {
    let controller = controller(Vec::new());
    assert_eq!(
        handle_command(&controller, Command::Quit, &CancellationToken::new()).await,
        Flow::Quit
    );
}

#[test]
fn describes_rejections_for_the_progress_feed() {
    let line = describe_event(&SessionEvent::CandidateRejected {
        attempt: 2,
        banned_value: "Japan".into(),
    })
    .expect("rejection is shown");
    assert!(line.contains("skipped dog #2"));
    assert!(describe_event(&SessionEvent::LoadingChanged(false)).is_none());
}
