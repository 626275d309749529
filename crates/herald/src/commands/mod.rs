//! Built-in command handlers.
//!
//! Manifests under `commands/` reference these by id:
//!
//! | id       | handler        | definition          |
//! |----------|----------------|---------------------|
//! | `ping`   | [`Ping`]       | inline              |
//! | `echo`   | [`Echo`]       | inline              |
//! | `user`   | [`UserInfo`]   | inline              |
//! | `server` | [`ServerInfo`] | inline              |
//! | `about`  | [`About`]      | [`AboutProducer`]   |

mod about;
mod echo;
mod ping;
mod server;
mod user;

pub use about::{About, AboutProducer, VERSION};
pub use echo::{Echo, MESSAGE_OPTION};
pub use ping::Ping;
pub use server::ServerInfo;
pub use user::UserInfo;

use herald_commands::HandlerCatalog;

/// Catalog of every built-in handler and producer.
pub fn catalog() -> HandlerCatalog {
    HandlerCatalog::new()
        .with_handler("ping", Ping)
        .with_handler("echo", Echo)
        .with_handler("user", UserInfo)
        .with_handler("server", ServerInfo)
        .with_handler("about", About)
        .with_producer(AboutProducer)
}
