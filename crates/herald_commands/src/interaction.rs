//! The inbound interaction seam.
//!
//! [`Interaction`] is what handlers and the dispatcher see of one user
//! invocation. The platform adapter implements it and owns the
//! replied/deferred state; this crate only reads that state.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use derive_getters::Getters;
use herald_error::InteractionResult;

/// Who invoked the command.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Caller {
    id: String,
    name: String,
    joined_at: Option<DateTime<Utc>>,
}

impl Caller {
    /// Create a caller identity.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            joined_at: None,
        }
    }

    /// Record when the caller joined the guild the command came from.
    pub fn with_joined_at(mut self, joined_at: DateTime<Utc>) -> Self {
        self.joined_at = Some(joined_at);
        self
    }
}

/// The guild an interaction originated in.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct GuildRef {
    id: String,
    name: Option<String>,
    member_count: Option<u64>,
}

impl GuildRef {
    /// Create a guild reference.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            member_count: None,
        }
    }

    /// Attach the guild name, when the platform cached it.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Attach the member count, when the platform cached it.
    pub fn with_member_count(mut self, count: u64) -> Self {
        self.member_count = Some(count);
        self
    }
}

/// A message sent back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Reply {
    content: String,
    #[getter(rename = "is_ephemeral")]
    ephemeral: bool,
}

impl Reply {
    /// A reply visible to everyone in the channel.
    pub fn public(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ephemeral: false,
        }
    }

    /// A reply visible only to the caller.
    pub fn ephemeral(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ephemeral: true,
        }
    }
}

/// One inbound command invocation.
///
/// At most one initial [`reply`](Interaction::reply) or
/// [`defer`](Interaction::defer) is allowed; any number of
/// [`follow_up`](Interaction::follow_up)s may follow it.
#[async_trait]
pub trait Interaction: Send + Sync {
    /// Requested command name.
    fn command_name(&self) -> &str;

    /// Invoking user.
    fn caller(&self) -> &Caller;

    /// Channel the command was used in.
    fn channel_id(&self) -> &str;

    /// Guild the command was used in, `None` in direct messages.
    ///
    /// Only the id is guaranteed to be present. Use
    /// [`guild_details`](Interaction::guild_details) for the name and member
    /// count.
    fn guild(&self) -> Option<&GuildRef>;

    /// Guild reference with whatever details the platform can look up.
    ///
    /// Adapters may go to the network here, so handlers should acknowledge
    /// the interaction before calling it. Lookup failures fall back to
    /// [`guild`](Interaction::guild).
    async fn guild_details(&self) -> Option<GuildRef> {
        self.guild().cloned()
    }

    /// Option value rendered as a string.
    fn option(&self, name: &str) -> Option<&str>;

    /// Whether an initial reply has been sent.
    fn is_replied(&self) -> bool;

    /// Whether the interaction has been deferred.
    fn is_deferred(&self) -> bool;

    /// Send the initial reply.
    async fn reply(&mut self, reply: Reply) -> InteractionResult<()>;

    /// Acknowledge now and answer later with follow-ups.
    async fn defer(&mut self, ephemeral: bool) -> InteractionResult<()>;

    /// Send a follow-up after a reply or deferral.
    async fn follow_up(&mut self, reply: Reply) -> InteractionResult<()>;

    /// Whether the interaction has been acknowledged in either way.
    fn is_acknowledged(&self) -> bool {
        self.is_replied() || self.is_deferred()
    }
}
