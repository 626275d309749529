use async_trait::async_trait;
use herald_commands::{CommandHandler, Interaction, Reply};
use herald_error::CommandResult;

/// Describes the invoking user.
#[derive(Debug, Clone, Copy, Default)]
pub struct UserInfo;

#[async_trait]
impl CommandHandler for UserInfo {
    async fn execute(&self, interaction: &mut dyn Interaction) -> CommandResult<()> {
        let caller = interaction.caller();
        let content = match caller.joined_at() {
            Some(joined) => format!(
                "This command was run by {}, who joined on {}.",
                caller.name(),
                joined.format("%Y-%m-%d")
            ),
            None => format!("This command was run by {}.", caller.name()),
        };
        interaction.reply(Reply::public(content)).await?;
        Ok(())
    }
}
