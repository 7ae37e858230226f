mod chat;
mod connection;
mod inventory;
mod level;
mod player;

pub use chat::*;
pub use connection::*;
pub use inventory::*;
pub use level::*;
pub use player::*;
