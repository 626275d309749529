//! Tests for interaction dispatch and failure isolation.

mod test_utils;

use herald_commands::{
    DiagnosticCode, Dispatcher, EXECUTION_ERROR_REPLY, Provenance, Registry, Reply, dispatch,
};
use herald_commands::{CommandData, Severity};
use std::sync::Arc;
use test_utils::{Failure, FailingHandler, MockInteraction, Sent, StaticReply, definition};

async fn registry_with(name: &str, handler: Arc<dyn herald_commands::CommandHandler>) -> Registry {
    let (registry, diagnostics) = Registry::builder()
        .register_parts(
            CommandData::Static(definition(name, "test command")),
            handler,
            Provenance::Builtin(name.to_string()),
        )
        .build()
        .await;
    assert!(diagnostics.is_empty());
    registry
}

#[tokio::test]
async fn test_ping_replies_pong() {
    let registry = registry_with("ping", Arc::new(StaticReply("Pong!"))).await;
    let mut interaction = MockInteraction::new("ping");

    let diagnostic = dispatch(&registry, &mut interaction).await;

    assert_eq!(*diagnostic.code(), DiagnosticCode::CommandExecuted);
    assert_eq!(diagnostic.severity(), Severity::Info);
    assert_eq!(diagnostic.command().as_deref(), Some("ping"));
    assert_eq!(diagnostic.caller().as_deref(), Some("42"));
    assert_eq!(interaction.sent, vec![Sent::Reply(Reply::public("Pong!"))]);
}

#[tokio::test]
async fn test_unknown_command_sends_nothing() {
    let registry = registry_with("ping", Arc::new(StaticReply("Pong!"))).await;
    let mut interaction = MockInteraction::new("pong");

    let diagnostic = dispatch(&registry, &mut interaction).await;

    assert_eq!(*diagnostic.code(), DiagnosticCode::CommandNotFound);
    assert_eq!(interaction.responses(), 0);
}

#[tokio::test]
async fn test_empty_registry_sends_nothing() {
    let registry = Registry::default();
    let mut interaction = MockInteraction::new("anything");

    let diagnostic = dispatch(&registry, &mut interaction).await;

    assert_eq!(*diagnostic.code(), DiagnosticCode::CommandNotFound);
    assert_eq!(interaction.responses(), 0);
}

#[tokio::test]
async fn test_failure_on_fresh_interaction_replies() {
    let registry = registry_with("boom", Arc::new(FailingHandler(Failure::Immediately))).await;
    let mut interaction = MockInteraction::new("boom");

    let diagnostic = dispatch(&registry, &mut interaction).await;

    assert_eq!(*diagnostic.code(), DiagnosticCode::CommandExecutionError);
    assert!(
        diagnostic
            .detail()
            .as_deref()
            .is_some_and(|d| d.contains("boom"))
    );
    assert_eq!(
        interaction.sent,
        vec![Sent::Reply(Reply::ephemeral(EXECUTION_ERROR_REPLY))]
    );
}

#[tokio::test]
async fn test_failure_after_reply_follows_up() {
    let registry = registry_with("boom", Arc::new(FailingHandler(Failure::AfterReply))).await;
    let mut interaction = MockInteraction::new("boom");

    let diagnostic = dispatch(&registry, &mut interaction).await;

    assert_eq!(*diagnostic.code(), DiagnosticCode::CommandExecutionError);
    assert_eq!(
        interaction.sent,
        vec![
            Sent::Reply(Reply::public("working...")),
            Sent::FollowUp(Reply::ephemeral(EXECUTION_ERROR_REPLY)),
        ]
    );
}

#[tokio::test]
async fn test_failure_after_defer_follows_up() {
    let registry = registry_with("boom", Arc::new(FailingHandler(Failure::AfterDefer))).await;
    let mut interaction = MockInteraction::new("boom");

    dispatch(&registry, &mut interaction).await;

    assert_eq!(
        interaction.sent,
        vec![
            Sent::Defer,
            Sent::FollowUp(Reply::ephemeral(EXECUTION_ERROR_REPLY)),
        ]
    );
}

#[tokio::test]
async fn test_panicking_handler_is_isolated() {
    let registry = registry_with("boom", Arc::new(FailingHandler(Failure::Panic))).await;
    let mut interaction = MockInteraction::new("boom");

    let diagnostic = dispatch(&registry, &mut interaction).await;

    assert_eq!(*diagnostic.code(), DiagnosticCode::CommandExecutionError);
    assert!(
        diagnostic
            .detail()
            .as_deref()
            .is_some_and(|d| d.contains("handler exploded"))
    );
    assert_eq!(
        interaction.sent,
        vec![Sent::Reply(Reply::ephemeral(EXECUTION_ERROR_REPLY))]
    );
}

#[tokio::test]
async fn test_dispatcher_handles_concurrent_interactions() {
    let registry = registry_with("ping", Arc::new(StaticReply("Pong!"))).await;
    let dispatcher = Dispatcher::new(registry);

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let dispatcher = dispatcher.clone();
            tokio::spawn(async move {
                let name = if i % 2 == 0 { "ping" } else { "missing" };
                let mut interaction = MockInteraction::new(name);
                let diagnostic = dispatcher.dispatch(&mut interaction).await;
                (*diagnostic.code(), interaction.responses())
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let (code, responses) = handle.await.unwrap();
        if i % 2 == 0 {
            assert_eq!(code, DiagnosticCode::CommandExecuted);
            assert_eq!(responses, 1);
        } else {
            assert_eq!(code, DiagnosticCode::CommandNotFound);
            assert_eq!(responses, 0);
        }
    }
}
