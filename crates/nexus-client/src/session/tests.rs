//! Session behaviour with in-process transports.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{Notify, Semaphore};

use super::*;
use crate::{ChatMode, ChatReply, ChatTransport, ModelUsage, Role, TransportError};

/// Replies from a script, in order, and records every prompt it receives.
#[derive(Default)]
struct ScriptedTransport {
    script: Mutex<VecDeque<Result<ChatReply, TransportError>>>,
    prompts: Mutex<Vec<(String, ChatMode)>>,
}

impl ScriptedTransport {
    fn new(script: Vec<Result<ChatReply, TransportError>>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
            prompts: Mutex::default(),
        })
    }

    fn prompts(&self) -> Vec<(String, ChatMode)> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatTransport for ScriptedTransport {
    async fn send(&self, prompt: &str, mode: &ChatMode) -> Result<ChatReply, TransportError> {
        self.prompts
            .lock()
            .unwrap()
            .push((prompt.to_string(), mode.clone()));
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(ChatReply::text(format!("echo: {prompt}"))))
    }
}

/// Blocks every call until the test releases it.
struct GatedTransport {
    started: Notify,
    release: Semaphore,
}

impl GatedTransport {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            started: Notify::new(),
            release: Semaphore::new(0),
        })
    }
}

#[async_trait]
impl ChatTransport for GatedTransport {
    async fn send(&self, prompt: &str, _mode: &ChatMode) -> Result<ChatReply, TransportError> {
        self.started.notify_one();
        self.release.acquire().await.unwrap().forget();
        Ok(ChatReply::text(format!("re: {prompt}")))
    }
}

fn status(code: u16) -> TransportError {
    TransportError::Status {
        status: code,
        body: "server error".into(),
    }
}

fn history(session: &Session) -> Vec<(Role, String)> {
    session.with_turns(|turns| {
        turns
            .iter()
            .map(|t| (t.role, t.content.clone()))
            .collect()
    })
}

#[tokio::test]
async fn hello_scenario_appends_user_then_assistant() {
    let transport = ScriptedTransport::new(vec![Ok(ChatReply::text("Hi there"))]);
    let session = Session::new(transport.clone());

    let reply = session.submit_turn("Hello").await.unwrap();

    assert_eq!(reply.content, "Hi there");
    assert_eq!(
        history(&session),
        vec![
            (Role::User, "Hello".to_string()),
            (Role::Assistant, "Hi there".to_string()),
        ]
    );
    assert_eq!(transport.prompts(), vec![("Hello".to_string(), ChatMode::Chat)]);
}

#[tokio::test]
async fn failed_request_keeps_only_the_user_turn() {
    let transport = ScriptedTransport::new(vec![Err(status(500))]);
    let session = Session::new(transport);

    let err = session.submit_turn("Ping").await.unwrap_err();

    assert_eq!(err.transport().and_then(TransportError::status), Some(500));
    assert_eq!(history(&session), vec![(Role::User, "Ping".to_string())]);
}

#[tokio::test]
async fn missing_response_field_still_succeeds_with_empty_turn() {
    let transport = ScriptedTransport::new(vec![Ok(ChatReply {
        substituted: true,
        ..ChatReply::default()
    })]);
    let session = Session::new(transport);

    let reply = session.submit_turn("Hello").await.unwrap();

    assert!(reply.substituted);
    assert_eq!(
        history(&session),
        vec![
            (Role::User, "Hello".to_string()),
            (Role::Assistant, String::new()),
        ]
    );
}

#[tokio::test]
async fn sequential_submissions_interleave_in_call_order() {
    let transport = ScriptedTransport::new(vec![]);
    let session = Session::new(transport);

    for prompt in ["one", "two", "three"] {
        session.submit_turn(prompt).await.unwrap();
    }

    let expected: Vec<_> = ["one", "two", "three"]
        .iter()
        .flat_map(|p| {
            [
                (Role::User, p.to_string()),
                (Role::Assistant, format!("echo: {p}")),
            ]
        })
        .collect();
    assert_eq!(history(&session), expected);
}

#[tokio::test]
async fn failure_on_kth_call_adds_exactly_one_turn() {
    let transport = ScriptedTransport::new(vec![
        Ok(ChatReply::text("a")),
        Err(TransportError::Timeout),
        Ok(ChatReply::text("c")),
    ]);
    let session = Session::new(transport);

    session.submit_turn("first").await.unwrap();
    let before = session.turn_count();
    assert!(session.submit_turn("second").await.is_err());
    assert_eq!(session.turn_count(), before + 1);
    session.submit_turn("third").await.unwrap();

    let roles: Vec<_> = history(&session).into_iter().map(|(r, _)| r).collect();
    assert_eq!(
        roles,
        vec![
            Role::User,
            Role::Assistant,
            Role::User,
            Role::User,
            Role::Assistant,
        ]
    );
}

#[tokio::test]
async fn empty_or_blank_content_fails_fast_without_a_request() {
    let transport = ScriptedTransport::new(vec![]);
    let session = Session::new(transport.clone());

    assert!(matches!(
        session.submit_turn("").await,
        Err(SubmitError::EmptyContent)
    ));
    assert!(matches!(
        session.submit_turn("  \n\t").await,
        Err(SubmitError::EmptyContent)
    ));
    assert!(session.is_empty());
    assert!(transport.prompts().is_empty());
}

#[tokio::test]
async fn identical_content_yields_independent_pairs_by_default() {
    let transport = ScriptedTransport::new(vec![]);
    let session = Session::new(transport.clone());

    session.submit_turn("same").await.unwrap();
    session.submit_turn("same").await.unwrap();

    assert_eq!(session.turn_count(), 4);
    assert_eq!(transport.prompts().len(), 2);
}

#[tokio::test]
async fn duplicate_policy_rejects_recent_repeat() {
    let transport = ScriptedTransport::new(vec![]);
    let options = SessionOptions::default()
        .with_duplicates(DuplicatePolicy::RejectWithin(Duration::from_secs(60)));
    let session = Session::with_options(transport.clone(), options);

    session.submit_turn("same").await.unwrap();
    let err = session.submit_turn("same").await.unwrap_err();

    assert!(matches!(err, SubmitError::Duplicate { .. }));
    assert_eq!(session.turn_count(), 2);
    assert_eq!(transport.prompts().len(), 1);

    session.submit_turn("different").await.unwrap();
    assert_eq!(session.turn_count(), 4);
}

#[tokio::test]
async fn duplicate_policy_allows_repeat_after_window() {
    let transport = ScriptedTransport::new(vec![]);
    let options = SessionOptions::default()
        .with_duplicates(DuplicatePolicy::RejectWithin(Duration::from_millis(20)));
    let session = Session::with_options(transport, options);

    session.submit_turn("same").await.unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;
    session.submit_turn("same").await.unwrap();

    assert_eq!(session.turn_count(), 4);
}

#[tokio::test]
async fn configured_mode_is_sent_with_every_turn() {
    let transport = ScriptedTransport::new(vec![]);
    let options = SessionOptions::default().with_mode(ChatMode::Reasoning);
    let session = Session::with_options(transport.clone(), options);

    session.submit_turn("why?").await.unwrap();

    assert_eq!(transport.prompts()[0].1, ChatMode::Reasoning);
}

#[tokio::test]
async fn user_turn_is_visible_while_request_is_in_flight() {
    let transport = GatedTransport::new();
    let session = Arc::new(Session::new(transport.clone()));

    let task = tokio::spawn({
        let session = session.clone();
        async move { session.submit_turn("Hello").await }
    });
    transport.started.notified().await;

    assert_eq!(history(&session), vec![(Role::User, "Hello".to_string())]);
    assert!(session.is_busy());

    transport.release.add_permits(1);
    task.await.unwrap().unwrap();

    assert_eq!(session.turn_count(), 2);
    assert!(!session.is_busy());
}

#[tokio::test]
async fn concurrent_submission_is_rejected_when_busy() {
    let transport = GatedTransport::new();
    let session = Arc::new(Session::new(transport.clone()));

    let first = tokio::spawn({
        let session = session.clone();
        async move { session.submit_turn("first").await }
    });
    transport.started.notified().await;

    let err = session.submit_turn("second").await.unwrap_err();
    assert!(matches!(err, SubmitError::Busy));
    assert_eq!(history(&session), vec![(Role::User, "first".to_string())]);

    transport.release.add_permits(1);
    first.await.unwrap().unwrap();
    assert_eq!(
        history(&session),
        vec![
            (Role::User, "first".to_string()),
            (Role::Assistant, "re: first".to_string()),
        ]
    );
}

#[tokio::test]
async fn queued_submission_waits_for_the_first_to_finish() {
    let transport = GatedTransport::new();
    let options = SessionOptions::default().with_concurrency(ConcurrencyPolicy::Queue);
    let session = Arc::new(Session::with_options(transport.clone(), options));

    let first = tokio::spawn({
        let session = session.clone();
        async move { session.submit_turn("first").await }
    });
    transport.started.notified().await;

    let second = tokio::spawn({
        let session = session.clone();
        async move { session.submit_turn("second").await }
    });
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
    assert_eq!(history(&session), vec![(Role::User, "first".to_string())]);

    transport.release.add_permits(2);
    first.await.unwrap().unwrap();
    second.await.unwrap().unwrap();

    assert_eq!(
        history(&session),
        vec![
            (Role::User, "first".to_string()),
            (Role::Assistant, "re: first".to_string()),
            (Role::User, "second".to_string()),
            (Role::Assistant, "re: second".to_string()),
        ]
    );
}

#[tokio::test]
async fn cancelled_submission_frees_the_slot() {
    let transport = GatedTransport::new();
    let session = Arc::new(Session::new(transport.clone()));

    let task = tokio::spawn({
        let session = session.clone();
        async move { session.submit_turn("abandoned").await }
    });
    transport.started.notified().await;
    task.abort();
    assert!(task.await.unwrap_err().is_cancelled());

    assert!(!session.is_busy());
    transport.release.add_permits(1);
    session.submit_turn("next").await.unwrap();

    assert_eq!(
        history(&session),
        vec![
            (Role::User, "abandoned".to_string()),
            (Role::User, "next".to_string()),
            (Role::Assistant, "re: next".to_string()),
        ]
    );
}

#[tokio::test]
async fn subscribers_are_notified_of_each_append() {
    let transport = ScriptedTransport::new(vec![Ok(ChatReply::text("pong"))]);
    let session = Session::new(transport);
    let mut rx = session.subscribe();

    session.submit_turn("ping").await.unwrap();

    assert!(rx.has_changed().unwrap());
    assert_eq!(rx.borrow_and_update().len(), 2);
    assert!(!rx.has_changed().unwrap());
}

#[tokio::test]
async fn usage_is_recorded_from_successful_replies() {
    let transport = ScriptedTransport::new(vec![
        Ok(ChatReply {
            models_used: vec![ModelUsage {
                model_id: "gpt-4o".into(),
                tokens: 30,
                cost_usd: 0.01,
                ..ModelUsage::default()
            }],
            ..ChatReply::text("a")
        }),
        Err(status(502)),
    ]);
    let session = Session::new(transport);

    session.submit_turn("one").await.unwrap();
    let _ = session.submit_turn("two").await;

    let usage = session.usage();
    assert_eq!(usage.reply_count(), 1);
    assert_eq!(usage.total_tokens(), 30);
    assert_eq!(usage.for_model("gpt-4o").unwrap().calls, 1);
}

#[tokio::test]
async fn reset_usage_keeps_history() {
    let transport = ScriptedTransport::new(vec![Ok(ChatReply {
        models_used: vec![ModelUsage {
            model_id: "m".into(),
            tokens: 5,
            ..ModelUsage::default()
        }],
        ..ChatReply::text("a")
    })]);
    let session = Session::new(transport);
    session.submit_turn("one").await.unwrap();

    session.reset_usage();

    assert_eq!(session.usage().reply_count(), 0);
    assert_eq!(session.usage().total_tokens(), 0);
    assert_eq!(session.turn_count(), 2);
}

#[test]
fn sessions_have_distinct_ids() {
    let transport = ScriptedTransport::new(vec![]);
    let a = Session::new(transport.clone());
    let b = Session::new(transport);
    assert_ne!(a.id(), b.id());
}

#[test]
fn submit_error_reports_cause() {
    let err = SubmitError::from(status(503));
    assert_eq!(err.to_string(), "chat request failed: HTTP 503: server error");
    assert!(SubmitError::Busy.transport().is_none());
}
