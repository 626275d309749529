use async_trait::async_trait;
use herald_commands::{
    CommandDefinition, CommandDefinitionBuilder, CommandHandler, DefinitionProducer, Interaction,
    Reply,
};
use herald_error::{CommandResult, DefinitionError, DefinitionErrorKind};

/// Crate version reported by `/about`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Defers, then reports the running version in a follow-up.
#[derive(Debug, Clone, Copy, Default)]
pub struct About;

#[async_trait]
impl CommandHandler for About {
    async fn execute(&self, interaction: &mut dyn Interaction) -> CommandResult<()> {
        interaction.defer(false).await?;
        interaction
            .follow_up(Reply::public(format!("Herald v{VERSION}")))
            .await?;
        Ok(())
    }
}

/// Builds the `/about` definition when the registry loads.
#[derive(Debug, Clone, Copy, Default)]
pub struct AboutProducer;

#[async_trait]
impl DefinitionProducer for AboutProducer {
    fn id(&self) -> &str {
        "about"
    }

    async fn produce(&self) -> Result<CommandDefinition, DefinitionError> {
        CommandDefinitionBuilder::default()
            .name("about")
            .description(format!("Shows which Herald version is running (v{VERSION})"))
            .dm_permission(Some(true))
            .build()
            .map_err(|e| DefinitionError::new(DefinitionErrorKind::Incomplete(e.to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_produced_definition_is_valid() {
        let definition = AboutProducer.produce().await.unwrap();
        assert_eq!(definition.name(), "about");
        assert!(definition.description().contains(VERSION));
        definition.validate().unwrap();
    }
}
