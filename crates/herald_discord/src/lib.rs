//! Discord adapter for Herald.
//!
//! Implements the `herald_commands` platform seams with serenity:
//! - [`SerenityInteraction`] answers slash commands
//! - [`SerenityPublisher`] performs the bulk-overwrite deploy
//! - [`HeraldHandler`] and [`HeraldBot`] connect to the gateway and feed
//!   interactions to a [`Dispatcher`](herald_commands::Dispatcher)

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod handler;
mod interaction;
mod publisher;

pub use client::HeraldBot;
pub use handler::HeraldHandler;
pub use interaction::SerenityInteraction;
pub use publisher::SerenityPublisher;
