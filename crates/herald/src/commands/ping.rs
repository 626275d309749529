use async_trait::async_trait;
use herald_commands::{CommandHandler, Interaction, Reply};
use herald_error::CommandResult;

/// Replies with "Pong!".
#[derive(Debug, Clone, Copy, Default)]
pub struct Ping;

#[async_trait]
impl CommandHandler for Ping {
    async fn execute(&self, interaction: &mut dyn Interaction) -> CommandResult<()> {
        interaction.reply(Reply::public("Pong!")).await?;
        Ok(())
    }
}
