//! Test utilities for herald tests.

#![allow(dead_code)]

use async_trait::async_trait;
use herald_commands::{Caller, GuildRef, Interaction, Reply};
use herald_error::{InteractionError, InteractionErrorKind, InteractionResult};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

/// Path to the manifests shipped with the repository.
pub fn shipped_commands_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("commands")
}

/// What a recording interaction was asked to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Reply(Reply),
    Defer,
    FollowUp(Reply),
}

/// Interaction that records responses and enforces reply-once.
#[derive(Debug)]
pub struct RecordingInteraction {
    command: String,
    caller: Caller,
    guild: Option<GuildRef>,
    details: Option<GuildRef>,
    options: HashMap<String, String>,
    replied: bool,
    deferred: bool,
    /// Acknowledgement state at each guild lookup.
    lookups: Mutex<Vec<bool>>,
    pub sent: Vec<Sent>,
}

impl RecordingInteraction {
    pub fn new(command: &str) -> Self {
        Self {
            command: command.to_string(),
            caller: Caller::new("314", "ada"),
            guild: None,
            details: None,
            options: HashMap::new(),
            replied: false,
            deferred: false,
            lookups: Mutex::new(Vec::new()),
            sent: Vec::new(),
        }
    }

    pub fn with_caller(mut self, caller: Caller) -> Self {
        self.caller = caller;
        self
    }

    /// Place the interaction in a guild. Only the id is visible up front;
    /// the name and member count come from `guild_details`.
    pub fn in_guild(mut self, guild: GuildRef) -> Self {
        self.guild = Some(GuildRef::new(guild.id().clone()));
        self.details = Some(guild);
        self
    }

    pub fn with_option(mut self, name: &str, value: &str) -> Self {
        self.options.insert(name.to_string(), value.to_string());
        self
    }

    /// Whether the interaction was acknowledged at each guild lookup.
    pub fn lookups(&self) -> Vec<bool> {
        self.lookups.lock().expect("lookups lock").clone()
    }

    /// Text of every message sent, in order.
    pub fn texts(&self) -> Vec<String> {
        self.sent
            .iter()
            .filter_map(|sent| match sent {
                Sent::Reply(reply) | Sent::FollowUp(reply) => Some(reply.content().clone()),
                Sent::Defer => None,
            })
            .collect()
    }
}

#[async_trait]
impl Interaction for RecordingInteraction {
    fn command_name(&self) -> &str {
        &self.command
    }

    fn caller(&self) -> &Caller {
        &self.caller
    }

    fn channel_id(&self) -> &str {
        "555"
    }

    fn guild(&self) -> Option<&GuildRef> {
        self.guild.as_ref()
    }

    async fn guild_details(&self) -> Option<GuildRef> {
        self.lookups
            .lock()
            .expect("lookups lock")
            .push(self.is_acknowledged());
        self.details.clone()
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
