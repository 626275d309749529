//! Tests for full-replace command deployment.

mod test_utils;

use herald_commands::{CommandData, DeployTarget, Provenance, Registry, Synchronizer};
use herald_error::DeployErrorKind;
use std::sync::Arc;
use test_utils::{MockPublisher, PublishBehavior, StaticReply, definition};

async fn registry_of(names: &[&str]) -> Registry {
    let mut builder = Registry::builder();
    for name in names {
        builder = builder.register_parts(
            CommandData::Static(definition(name, "deployable")),
            Arc::new(StaticReply("ok")),
            Provenance::Builtin((*name).to_string()),
        );
    }
    builder.build().await.0
}

fn target() -> DeployTarget {
    DeployTarget::new(123456789, "token")
}

#[tokio::test]
async fn test_publish_sends_every_command_in_one_call() -> anyhow::Result<()> {
    let registry = registry_of(&["user", "ping", "server"]).await;
    let sync = Synchronizer::new(MockPublisher::new(PublishBehavior::EchoAll));

    let report = sync.publish(&registry, &target()).await?;

    assert_eq!(sync.publisher().call_count(), 1);
    let sent: Vec<_> = sync
        .publisher()
        .last_call()
        .into_iter()
        .map(|s| s.name)
        .collect();
    assert_eq!(sent, vec!["ping", "server", "user"]);
    assert_eq!(report.count(), 3);
    assert!(report.is_consistent());
    assert_eq!(report.published()[0].application_id(), "123456789");
    Ok(())
}

#[tokio::test]
async fn test_publish_empty_registry_clears_commands() -> anyhow::Result<()> {
    let registry = Registry::default();
    let sync = Synchronizer::new(MockPublisher::new(PublishBehavior::EchoAll));

    let report = sync.publish(&registry, &target()).await?;

    assert_eq!(sync.publisher().call_count(), 1);
    assert!(sync.publisher().last_call().is_empty());
    assert_eq!(report.count(), 0);
    Ok(())
}

#[tokio::test]
async fn test_publish_reports_divergence() -> anyhow::Result<()> {
    let registry = registry_of(&["ping", "user"]).await;
    let sync = Synchronizer::new(MockPublisher::new(PublishBehavior::Drop("user")));

    let report = sync.publish(&registry, &target()).await?;

    assert_eq!(report.count(), 1);
    assert!(!report.is_consistent());
    assert_eq!(report.missing(), &vec!["user".to_string()]);
    assert!(report.unexpected().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_publish_failure_is_returned_without_retry() {
    let registry = registry_of(&["ping"]).await;
    let sync = Synchronizer::new(MockPublisher::new(PublishBehavior::Fail(
        DeployErrorKind::Unauthorized("401: Unauthorized".into()),
    )));

    let err = sync.publish(&registry, &target()).await.unwrap_err();

    assert!(matches!(err.kind(), DeployErrorKind::Unauthorized(_)));
    assert_eq!(sync.publisher().call_count(), 1);
}

#[test]
fn test_target_debug_redacts_token() {
    let rendered = format!("{:?}", DeployTarget::new(1, "super-secret"));
    assert!(!rendered.contains("super-secret"));
    assert!(rendered.contains("redacted"));
}
