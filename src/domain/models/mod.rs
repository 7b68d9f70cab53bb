mod action;
mod chat;
mod event;
mod loading;
mod message;
mod settings;
mod slash_commands;
mod store;
mod suggestion_action;
mod textarea;
mod theme;
mod toast;
mod transport;

pub use action::*;
pub use chat::*;
pub use event::*;
pub use loading::*;
pub use message::*;
pub use settings::*;
pub use slash_commands::*;
pub use store::*;
pub use suggestion_action::*;
pub use textarea::*;
pub use theme::*;
pub use toast::*;
pub use transport::*;
