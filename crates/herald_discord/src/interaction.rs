//! [`Interaction`] over a serenity [`CommandInteraction`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use herald_commands::{Caller, GuildRef, Interaction, Reply};
use herald_error::{InteractionError, InteractionErrorKind, InteractionResult};
use serenity::all::{
    CommandDataOption, CommandDataOptionValue, CommandInteraction, CreateInteractionResponse,
    CreateInteractionResponseFollowup, CreateInteractionResponseMessage, Http, Timestamp,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, instrument};

/// A slash-command invocation received from the gateway.
///
/// Tracks whether the interaction was answered so the dispatcher can choose
/// between an initial response and a follow-up.
pub struct SerenityInteraction {
    command: CommandInteraction,
    http: Arc<Http>,
    caller: Caller,
    guild: Option<GuildRef>,
    channel_id: String,
    options: HashMap<String, String>,
    replied: bool,
    deferred: bool,
}

impl SerenityInteraction {
    /// Wrap a command interaction.
    ///
    /// Does not touch the network. The guild is known by id only until
    /// [`guild_details`](Interaction::guild_details) is called.
    pub fn new(command: CommandInteraction, http: Arc<Http>) -> Self {
        let mut caller = Caller::new(command.user.id.to_string(), command.user.name.clone());
        if let Some(joined_at) = command
            .member
            .as_ref()
            .and_then(|member| member.joined_at)
            .and_then(to_utc)
        {
            caller = caller.with_joined_at(joined_at);
        }

        let guild = command.guild_id.map(|id| GuildRef::new(id.to_string()));
        let channel_id = command.channel_id.to_string();

        let mut options = HashMap::new();
        collect_options(&command.data.options, &mut options);

        Self {
            command,
            http,
            caller,
            guild,
            channel_id,
            options,
            replied: false,
            deferred: false,
        }
    }

    /// The underlying serenity interaction.
    pub fn inner(&self) -> &CommandInteraction {
        &self.command
    }
}

#[async_trait]
impl Interaction for SerenityInteraction {
    fn command_name(&self) -> &str {
        &self.command.data.name
    }

    fn caller(&self) -> &Caller {
        &self.caller
    }

    fn channel_id(&self) -> &str {
        &self.channel_id
    }

    fn guild(&self) -> Option<&GuildRef> {
        self.guild.as_ref()
    }

    /// Looks up the guild name and approximate member count over REST.
    #[instrument(skip(self), fields(command = %self.command.data.name))]
    async fn guild_details(&self) -> Option<GuildRef> {
        let guild_id = self.command.guild_id?;
        match guild_id.to_partial_guild_with_counts(&self.http).await {
            Ok(partial) => {
                let guild = GuildRef::new(guild_id.to_string()).with_name(partial.name);
                Some(match partial.approximate_member_count {
                    Some(count) => guild.with_member_count(count),
                    None => guild,
                })
            }
            Err(e) => {
                debug!(guild_id = %guild_id, error = %e, "Guild lookup failed");
                self.guild.clone()
            }
        }
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
            return Err(InteractionError::new(
                InteractionErrorKind::AlreadyAcknowledged,
            ));
        }
        let message = CreateInteractionResponseMessage::new()
            .content(reply.content())
            .ephemeral(*reply.is_ephemeral());
        self.command
            .create_response(&self.http, CreateInteractionResponse::Message(message))
            .await
            .map_err(|e| InteractionError::new(InteractionErrorKind::ReplyFailed(e.to_string())))?;
        self.replied = true;
        Ok(())
    }

    async fn defer(&mut self, ephemeral: bool) -> InteractionResult<()> {
        if self.is_acknowledged() {
            return Err(InteractionError::new(
                InteractionErrorKind::AlreadyAcknowledged,
            ));
        }
        let sent = if ephemeral {
            self.command.defer_ephemeral(&self.http).await
        } else {
            self.command.defer(&self.http).await
        };
        sent.map_err(|e| InteractionError::new(InteractionErrorKind::DeferFailed(e.to_string())))?;
        self.deferred = true;
        Ok(())
    }

    async fn follow_up(&mut self, reply: Reply) -> InteractionResult<()> {
        if !self.is_acknowledged() {
            return Err(InteractionError::new(InteractionErrorKind::NotAcknowledged));
        }
        let message = CreateInteractionResponseFollowup::new()
            .content(reply.content())
            .ephemeral(*reply.is_ephemeral());
        self.command
            .create_followup(&self.http, message)
            .await
            .map_err(|e| {
                InteractionError::new(InteractionErrorKind::FollowUpFailed(e.to_string()))
            })?;
        Ok(())
    }
}

fn to_utc(timestamp: Timestamp) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(timestamp.unix_timestamp(), 0)
}

/// Flatten option values into a name-keyed map, descending into subcommands.
fn collect_options(options: &[CommandDataOption], out: &mut HashMap<String, String>) {
    for option in options {
        match &option.value {
            CommandDataOptionValue::SubCommand(nested)
            | CommandDataOptionValue::SubCommandGroup(nested) => collect_options(nested, out),
            value => {
                if let Some(rendered) = render_value(value) {
                    out.insert(option.name.clone(), rendered);
                }
            }
        }
    }
}

/// Render a leaf option value as the string handlers see.
pub(crate) fn render_value(value: &CommandDataOptionValue) -> Option<String> {
    match value {
        CommandDataOptionValue::String(s) => Some(s.clone()),
        CommandDataOptionValue::Integer(i) => Some(i.to_string()),
        CommandDataOptionValue::Number(n) => Some(n.to_string()),
        CommandDataOptionValue::Boolean(b) => Some(b.to_string()),
        CommandDataOptionValue::User(id) => Some(id.to_string()),
        CommandDataOptionValue::Channel(id) => Some(id.to_string()),
        CommandDataOptionValue::Role(id) => Some(id.to_string()),
        CommandDataOptionValue::Mentionable(id) => Some(id.to_string()),
        CommandDataOptionValue::Attachment(id) => Some(id.to_string()),
        CommandDataOptionValue::Autocomplete { value, .. } => Some(value.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serenity::all::{ChannelId, RoleId, UserId};

    #[test]
    fn test_render_scalar_values() {
        assert_eq!(
            render_value(&CommandDataOptionValue::String("hi".into())).as_deref(),
            Some("hi")
        );
        assert_eq!(
            render_value(&CommandDataOptionValue::Integer(-3)).as_deref(),
            Some("-3")
        );
        assert_eq!(
            render_value(&CommandDataOptionValue::Boolean(true)).as_deref(),
            Some("true")
        );
    }

    #[test]
    fn test_render_snowflakes_as_ids() {
        assert_eq!(
            render_value(&CommandDataOptionValue::User(UserId::new(42))).as_deref(),
            Some("42")
        );
        assert_eq!(
            render_value(&CommandDataOptionValue::Channel(ChannelId::new(7))).as_deref(),
            Some("7")
        );
        assert_eq!(
            render_value(&CommandDataOptionValue::Role(RoleId::new(9))).as_deref(),
            Some("9")
        );
    }

    #[test]
    fn test_subcommand_has_no_leaf_rendering() {
        assert!(render_value(&CommandDataOptionValue::SubCommand(Vec::new())).is_none());
    }

    #[test]
    fn test_timestamp_conversion() {
        let ts = Timestamp::from_unix_timestamp(1_700_000_000).unwrap();
        assert_eq!(to_utc(ts).unwrap().timestamp(), 1_700_000_000);
    }
}
