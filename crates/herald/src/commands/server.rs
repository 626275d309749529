use async_trait::async_trait;
use herald_commands::{CommandHandler, GuildRef, Interaction, Reply};
use herald_error::CommandResult;

/// Describes the guild the command was used in.
///
/// Defers before looking the guild up, since that can take a network call.
#[derive(Debug, Clone, Copy, Default)]
pub struct ServerInfo;

#[async_trait]
impl CommandHandler for ServerInfo {
    async fn execute(&self, interaction: &mut dyn Interaction) -> CommandResult<()> {
        if interaction.guild().is_none() {
            interaction
                .reply(Reply::public(
                    "This command was run in a direct message, not a server.",
                ))
                .await?;
            return Ok(());
        }

        // Guild details may need a round-trip, so acknowledge first.
        interaction.defer(false).await?;
        let content = match interaction.guild_details().await {
            Some(guild) => describe(&guild),
            None => "This server could not be found.".to_string(),
        };
        interaction.follow_up(Reply::public(content)).await?;
        Ok(())
    }
}

fn describe(guild: &GuildRef) -> String {
    let name = guild.name().as_deref().unwrap_or(guild.id().as_str());
    match guild.member_count() {
        Some(count) => format!("This server is {name} and has {count} members."),
        None => format!("This server is {name}."),
    }
}
