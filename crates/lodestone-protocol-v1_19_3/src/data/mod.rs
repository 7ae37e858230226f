mod handshake;
mod inventory;
mod player;
mod sound;
mod status;

pub use handshake::*;
pub use inventory::*;
pub use player::*;
pub use sound::*;
pub use status::*;
