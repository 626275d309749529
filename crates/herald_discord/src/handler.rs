//! Serenity event handler that forwards slash commands to the dispatcher.

use crate::SerenityInteraction;
use herald_commands::Dispatcher;
use serenity::all::{Context, EventHandler, GatewayIntents, Ready};
use serenity::all::Interaction as GatewayInteraction;
use serenity::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

/// Event handler for the Herald bot.
pub struct HeraldHandler {
    dispatcher: Dispatcher,
}

impl HeraldHandler {
    /// Create a handler over a dispatcher.
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Gateway intents the bot needs.
    ///
    /// Slash commands arrive without privileged intents; `GUILDS` keeps guild
    /// availability events flowing.
    pub fn intents() -> GatewayIntents {
        GatewayIntents::GUILDS
    }
}

#[async_trait]
impl EventHandler for HeraldHandler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!(
            bot_user = %ready.user.name,
            bot_id = %ready.user.id,
            guilds = ready.guilds.len(),
            commands = self.dispatcher.registry().len(),
            "Ready! Logged in as {}",
            ready.user.name
        );
    }

    async fn interaction_create(&self, ctx: Context, interaction: GatewayInteraction) {
        let GatewayInteraction::Command(command) = interaction else {
            debug!("Ignoring non-command interaction");
            return;
        };

        let mut interaction = SerenityInteraction::new(command, Arc::clone(&ctx.http));
        self.dispatcher.dispatch(&mut interaction).await;
    }
}
