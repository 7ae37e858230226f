//! Minecraft Java Edition 1.19.3 (protocol 761).

pub mod codec;
pub mod data;
pub mod packets;
pub mod registries;
pub mod transition;

pub use codec::{codec, codec_with_context, MINECRAFT_VERSION, PROTOCOL_VERSION};
pub use transition::next_state;
