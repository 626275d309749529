//! Discord bot client setup and lifecycle management.

use crate::HeraldHandler;
use herald_commands::Dispatcher;
use herald_error::{DiscordError, DiscordErrorKind, DiscordResult};
use serenity::Client;
use serenity::all::ApplicationId;
use tracing::{error, info, instrument};

/// Gateway client that dispatches slash commands.
///
/// # Example
/// ```no_run
/// use herald_commands::{Dispatcher, Registry};
/// use herald_discord::HeraldBot;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let token = std::env::var("DISCORD_TOKEN")?;
///     let dispatcher = Dispatcher::new(Registry::default());
///
///     let mut bot = HeraldBot::new(&token, 1234, dispatcher).await?;
///     bot.start().await?;
///     Ok(())
/// }
/// ```
pub struct HeraldBot {
    client: Client,
}

impl HeraldBot {
    /// Build the serenity client.
    ///
    /// # Errors
    /// Returns an error if the token is empty or the client fails to build.
    #[instrument(skip(token, dispatcher), fields(token_len = token.len()))]
    pub async fn new(
        token: &str,
        application_id: u64,
        dispatcher: Dispatcher,
    ) -> DiscordResult<Self> {
        if token.trim().is_empty() {
            return Err(DiscordError::new(DiscordErrorKind::InvalidToken));
        }

        info!("Initializing Herald Discord bot");
        let intents = HeraldHandler::intents();
        let mut builder = Client::builder(token, intents).event_handler(HeraldHandler::new(dispatcher));
        if application_id != 0 {
            builder = builder.application_id(ApplicationId::new(application_id));
        }

        let client = builder.await.map_err(|e| {
            DiscordError::new(DiscordErrorKind::ConnectionFailed(format!(
                "Failed to build client: {}",
                e
            )))
        })?;
        info!("Serenity client built successfully");

        Ok(Self { client })
    }

    /// Connect and process events until the gateway closes.
    ///
    /// # Errors
    /// Returns an error if the client fails to start or hits a fatal error.
    #[instrument(skip(self))]
    pub async fn start(&mut self) -> DiscordResult<()> {
        info!("Starting Discord bot");
        self.client.start().await.map_err(|e| {
            DiscordError::new(DiscordErrorKind::ConnectionFailed(format!(
                "Client error: {}",
                e
            )))
        })
    }

    /// Like [`start`](Self::start), but shuts all shards down on Ctrl+C.
    ///
    /// # Errors
    /// Returns an error if the client fails to start or hits a fatal error.
    pub async fn start_until_interrupted(&mut self) -> DiscordResult<()> {
        let shard_manager = self.client.shard_manager.clone();
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    info!("Interrupt received, shutting down");
                    shard_manager.shutdown_all().await;
                }
                Err(e) => error!(error = %e, "Failed to listen for interrupt"),
            }
        });
        self.start().await
    }
}
