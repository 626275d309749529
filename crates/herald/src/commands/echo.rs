use async_trait::async_trait;
use herald_commands::{CommandHandler, Interaction, Reply};
use herald_error::{CommandError, CommandErrorKind, CommandResult};

/// Option carrying the text to repeat.
pub const MESSAGE_OPTION: &str = "message";

/// Repeats the caller's `message` option back to the channel.
#[derive(Debug, Clone, Copy, Default)]
pub struct Echo;

#[async_trait]
impl CommandHandler for Echo {
    async fn execute(&self, interaction: &mut dyn Interaction) -> CommandResult<()> {
        let message = interaction
            .option(MESSAGE_OPTION)
            .filter(|text| !text.trim().is_empty())
            .map(str::to_string)
            .ok_or_else(|| {
                CommandError::new(CommandErrorKind::MissingOption {
                    command: interaction.command_name().to_string(),
                    option: MESSAGE_OPTION.to_string(),
                })
            })?;
        interaction.reply(Reply::public(message)).await?;
        Ok(())
    }
}
