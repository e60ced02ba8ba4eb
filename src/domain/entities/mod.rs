//! Domain entities - Core business objects with no platform dependencies

pub mod user;
pub mod message;
pub mod command;
pub mod interaction;
pub mod reply;

pub use user::User;
pub use message::{IncomingMessage, Content};
pub use command::{CommandDescriptor, CommandCatalog};
pub use interaction::{Interaction, ReplyAction, ReplyState};
pub use reply::{Embed, EmbedField, Reply, ReplyBody};
