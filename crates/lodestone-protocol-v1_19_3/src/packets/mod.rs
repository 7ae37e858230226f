//! Packet definitions for protocol 761, grouped by connection state.

pub mod game;
pub mod handshake;
pub mod login;
pub mod status;
