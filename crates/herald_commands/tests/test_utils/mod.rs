//! Test utilities for herald_commands tests.
//!
//! Mock interactions, handlers, producers and publishers that record what
//! happened to them.

#![allow(dead_code)]

use async_trait::async_trait;
use herald_commands::{
    Caller, Command, CommandData, CommandDefinition, CommandDefinitionBuilder, CommandHandler,
    CommandPublisher, CommandSchema, DefinitionProducer, DeployTarget, GuildRef, HandlerCatalog,
    Interaction, PublishedCommand, Reply,
};
use herald_error::{
    CommandError, CommandErrorKind, CommandResult, DefinitionError, DefinitionErrorKind,
    DeployError, DeployErrorKind, InteractionError, InteractionErrorKind, InteractionResult,
};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// What a mock interaction was asked to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Reply(Reply),
    Defer,
    FollowUp(Reply),
}

/// In-memory interaction that enforces reply-once semantics.
#[derive(Debug)]
pub struct MockInteraction {
    command: String,
    caller: Caller,
    guild: Option<GuildRef>,
    options: HashMap<String, String>,
    replied: bool,
    deferred: bool,
    pub sent: Vec<Sent>,
}

impl MockInteraction {
    pub fn new(command: &str) -> Self {
        Self {
            command: command.to_string(),
            caller: Caller::new("42", "tester"),
            guild: Some(GuildRef::new("1000").with_name("Test Guild").with_member_count(7)),
            options: HashMap::new(),
            replied: false,
            deferred: false,
            sent: Vec::new(),
        }
    }

    pub fn in_dm(mut self) -> Self {
        self.guild = None;
        self
    }

    pub fn with_option(mut self, name: &str, value: &str) -> Self {
        self.options.insert(name.to_string(), value.to_string());
        self
    }

    /// Number of reply-capability invocations (reply, defer, follow-up).
    pub fn responses(&self) -> usize {
        self.sent.len()
    }
}

#[async_trait]
impl Interaction for MockInteraction {
    fn command_name(&self) -> &str {
        &self.command
    }

    fn caller(&self) -> &Caller {
        &self.caller
    }

    fn channel_id(&self) -> &str {
        "2000"
    }

    fn guild(&self) -> Option<&GuildRef> {
        self.guild.as_ref()
    }

    fn option(&self, name: &str) -> Option<&str> {
        self.options.get(name).map(String::as_str)
    }

    fn is_replied(&self) -> bool {
        self.replied
    }

    fn is_deferred(&self) -> bool {
        self.deferred
    }

    async fn reply(&mut self, reply: Reply) -> InteractionResult<()> {
        if self.is_acknowledged() {
            return Err(InteractionError::new(InteractionErrorKind::AlreadyAcknowledged));
        }
        self.replied = true;
        self.sent.push(Sent::Reply(reply));
        Ok(())
    }

    async fn defer(&mut self, _ephemeral: bool) -> InteractionResult<()> {
        if self.is_acknowledged() {
            return Err(InteractionError::new(InteractionErrorKind::AlreadyAcknowledged));
        }
        self.deferred = true;
        self.sent.push(Sent::Defer);
        Ok(())
    }

    async fn follow_up(&mut self, reply: Reply) -> InteractionResult<()> {
        if !self.is_acknowledged() {
            return Err(InteractionError::new(InteractionErrorKind::NotAcknowledged));
        }
        self.sent.push(Sent::FollowUp(reply));
        Ok(())
    }
}

pub fn definition(name: &str, description: &str) -> CommandDefinition {
    CommandDefinitionBuilder::default()
        .name(name)
        .description(description)
        .build()
        .expect("test definition builds")
}

/// Replies with a fixed message.
pub struct StaticReply(pub &'static str);

#[async_trait]
impl CommandHandler for StaticReply {
    async fn execute(&self, interaction: &mut dyn Interaction) -> CommandResult<()> {
        interaction.reply(Reply::public(self.0)).await?;
        Ok(())
    }
}

/// How a failing handler misbehaves.
pub enum Failure {
    /// Return an error without replying
    Immediately,
    /// Reply, then return an error
    AfterReply,
    /// Defer, then return an error
    AfterDefer,
    /// Panic
    Panic,
}

pub struct FailingHandler(pub Failure);

#[async_trait]
impl CommandHandler for FailingHandler {
    async fn execute(&self, interaction: &mut dyn Interaction) -> CommandResult<()> {
        match self.0 {
            Failure::Immediately => {}
            Failure::AfterReply => interaction.reply(Reply::public("working...")).await?,
            Failure::AfterDefer => interaction.defer(false).await?,
            Failure::Panic => panic!("handler exploded"),
        }
        Err(CommandError::new(CommandErrorKind::Failed {
            command: interaction.command_name().to_string(),
            reason: "boom".to_string(),
        }))
    }
}

/// Code-registered command used for builder tests.
pub struct Builtin {
    pub name: &'static str,
    pub reply: &'static str,
}

#[async_trait]
impl CommandHandler for Builtin {
    async fn execute(&self, interaction: &mut dyn Interaction) -> CommandResult<()> {
        interaction.reply(Reply::public(self.reply)).await?;
        Ok(())
    }
}

impl Command for Builtin {
    fn id(&self) -> &str {
        self.name
    }

    fn data(&self) -> CommandData {
        CommandData::Static(definition(self.name, "A builtin command"))
    }
}

/// Producer that counts its invocations.
pub struct CountingProducer {
    pub id: &'static str,
    pub name: &'static str,
    pub calls: Arc<AtomicUsize>,
}

impl CountingProducer {
    pub fn new(id: &'static str, name: &'static str) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                id,
                name,
                calls: Arc::clone(&calls),
            },
            calls,
        )
    }
}

#[async_trait]
impl DefinitionProducer for CountingProducer {
    fn id(&self) -> &str {
        self.id
    }

    async fn produce(&self) -> Result<CommandDefinition, DefinitionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        Ok(definition(self.name, "Computed at load time"))
    }
}

/// Producer that always fails.
pub struct BrokenProducer;

#[async_trait]
impl DefinitionProducer for BrokenProducer {
    fn id(&self) -> &str {
        "broken"
    }

    async fn produce(&self) -> Result<CommandDefinition, DefinitionError> {
        Err(DefinitionError::new(DefinitionErrorKind::ProducerFailed {
            producer: "broken".to_string(),
            reason: "upstream unavailable".to_string(),
        }))
    }
}

/// Producer that panics instead of returning.
pub struct PanickingProducer;

#[async_trait]
impl DefinitionProducer for PanickingProducer {
    fn id(&self) -> &str {
        "explodes"
    }

    async fn produce(&self) -> Result<CommandDefinition, DefinitionError> {
        tokio::task::yield_now().await;
        panic!("producer exploded");
    }
}

/// Catalog with the handlers the fixture manifests reference.
pub fn catalog() -> HandlerCatalog {
    HandlerCatalog::new()
        .with_handler("ping", StaticReply("Pong!"))
        .with_handler("echo", StaticReply("echo"))
        .with_handler("first", StaticReply("first"))
        .with_handler("second", StaticReply("second"))
        .with_handler("fails", FailingHandler(Failure::Immediately))
        .with_producer(BrokenProducer)
        .with_producer(PanickingProducer)
}

/// Write an inline manifest for `name` handled by `handler`.
pub fn write_manifest(dir: &Path, file: &str, name: &str, handler: &str) {
    std::fs::create_dir_all(dir).expect("create manifest dir");
    let text = format!(
        "execute = \"{handler}\"\n\n[data]\nname = \"{name}\"\ndescription = \"The {name} command\"\n"
    );
    std::fs::write(dir.join(file), text).expect("write manifest");
}

/// Write raw manifest text.
pub fn write_raw(dir: &Path, file: &str, text: &str) {
    std::fs::create_dir_all(dir).expect("create manifest dir");
    std::fs::write(dir.join(file), text).expect("write manifest");
}

/// How the mock publisher answers.
pub enum PublishBehavior {
    /// Confirm every command sent
    EchoAll,
    /// Confirm all but the named command
    Drop(&'static str),
    /// Fail with the given error kind
    Fail(DeployErrorKind),
}

/// Publisher that records every call.
pub struct MockPublisher {
    behavior: PublishBehavior,
    pub calls: Mutex<Vec<Vec<CommandSchema>>>,
}

impl MockPublisher {
    pub fn new(behavior: PublishBehavior) -> Self {
        Self {
            behavior,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("calls lock").len()
    }

    pub fn last_call(&self) -> Vec<CommandSchema> {
        self.calls
            .lock()
            .expect("calls lock")
            .last()
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl CommandPublisher for MockPublisher {
    async fn overwrite_global_commands(
        &self,
        target: &DeployTarget,
        commands: &[CommandSchema],
    ) -> Result<Vec<PublishedCommand>, DeployError> {
        self.calls
            .lock()
            .expect("calls lock")
            .push(commands.to_vec());

        let confirm = |schema: &CommandSchema, index: usize| {
            PublishedCommand::new(
                format!("{}", 9000 + index),
                schema.name.clone(),
                schema.description.clone(),
                target.application_id().to_string(),
            )
        };

        match &self.behavior {
            PublishBehavior::EchoAll => Ok(commands
                .iter()
                .enumerate()
                .map(|(i, s)| confirm(s, i))
                .collect()),
            PublishBehavior::Drop(name) => Ok(commands
                .iter()
                .enumerate()
                .filter(|(_, s)| s.name != *name)
                .map(|(i, s)| confirm(s, i))
                .collect()),
            PublishBehavior::Fail(kind) => Err(DeployError::new(kind.clone())),
        }
    }
}
