use lodestone_protocol_core::*;

use crate::packets::game::*;
use crate::packets::handshake::*;
use crate::packets::login::*;
use crate::packets::status::*;
use crate::registries;

pub const PROTOCOL_VERSION: i32 = 761;
pub const MINECRAFT_VERSION: &str = "1.19.3";

// === Packet ID constants ===

// Handshake serverbound
const HANDSHAKE: i32 = 0x00;

// Status clientbound
const STATUS_RESPONSE: i32 = 0x00;
const PONG_RESPONSE: i32 = 0x01;

// Status serverbound
const STATUS_REQUEST: i32 = 0x00;
const PING_REQUEST: i32 = 0x01;

// Login clientbound
const LOGIN_DISCONNECT: i32 = 0x00;
const ENCRYPTION_REQUEST: i32 = 0x01;
const LOGIN_SUCCESS: i32 = 0x02;
const SET_COMPRESSION: i32 = 0x03;
const LOGIN_PLUGIN_REQUEST: i32 = 0x04;

// Login serverbound
const LOGIN_START: i32 = 0x00;
const ENCRYPTION_RESPONSE: i32 = 0x01;
const LOGIN_PLUGIN_RESPONSE: i32 = 0x02;

// Game clientbound
const GAME_CONTAINER_CLOSE: i32 = 0x0F;
const GAME_SET_CONTAINER_SLOT: i32 = 0x12;
const GAME_DISCONNECT: i32 = 0x17;
const GAME_KEEP_ALIVE: i32 = 0x1F;
const GAME_LEVEL_EVENT: i32 = 0x21;
const GAME_PING: i32 = 0x2E;
const GAME_SET_HELD_ITEM: i32 = 0x49;
const GAME_SOUND: i32 = 0x5E;
const GAME_STOP_SOUND: i32 = 0x5F;
const GAME_SYSTEM_CHAT: i32 = 0x60;

// Game serverbound
const GAME_CONTAINER_BUTTON_CLICK_SB: i32 = 0x09;
const GAME_CONTAINER_CLICK_SB: i32 = 0x0A;
const GAME_CONTAINER_CLOSE_SB: i32 = 0x0B;
const GAME_KEEP_ALIVE_SB: i32 = 0x11;
const GAME_PONG_SB: i32 = 0x1F;
const GAME_SET_HELD_ITEM_SB: i32 = 0x28;
const GAME_SET_CREATIVE_MODE_SLOT_SB: i32 = 0x2B;
const GAME_SWING_SB: i32 = 0x2F;

/// The protocol 761 codec with the embedded lookup tables.
pub fn codec() -> Result<PacketCodec, RegistryError> {
    codec_with_context(registries::codec_context())
}

/// The protocol 761 codec using caller-supplied lookup tables, e.g. a full
/// sound registry loaded from disk.
pub fn codec_with_context(context: CodecContext) -> Result<PacketCodec, RegistryError> {
    PacketCodec::builder()
        .protocol_version(PROTOCOL_VERSION)
        .minecraft_version(MINECRAFT_VERSION)
        .context(context)
        .state(ProtocolState::Handshake, handshake_packets())
        .state(ProtocolState::Status, status_packets())
        .state(ProtocolState::Login, login_packets())
        .state(ProtocolState::Game, game_packets())
        .build()
}

fn handshake_packets() -> PacketStateCodecBuilder {
    PacketStateCodec::builder().register_serverbound::<Handshake>(HANDSHAKE)
}

fn status_packets() -> PacketStateCodecBuilder {
    PacketStateCodec::builder()
        .register_clientbound::<StatusResponse>(STATUS_RESPONSE)
        .register_clientbound::<PongResponse>(PONG_RESPONSE)
        .register_serverbound::<StatusRequest>(STATUS_REQUEST)
        .register_serverbound::<PingRequest>(PING_REQUEST)
}

fn login_packets() -> PacketStateCodecBuilder {
    PacketStateCodec::builder()
        .register_clientbound::<LoginDisconnect>(LOGIN_DISCONNECT)
        .register_clientbound::<EncryptionRequest>(ENCRYPTION_REQUEST)
        .register_clientbound::<LoginSuccess>(LOGIN_SUCCESS)
        .register_clientbound::<SetCompression>(SET_COMPRESSION)
        .register_clientbound::<LoginPluginRequest>(LOGIN_PLUGIN_REQUEST)
        .register_serverbound::<LoginStart>(LOGIN_START)
        .register_serverbound::<EncryptionResponse>(ENCRYPTION_RESPONSE)
        .register_serverbound::<LoginPluginResponse>(LOGIN_PLUGIN_RESPONSE)
}

fn game_packets() -> PacketStateCodecBuilder {
    PacketStateCodec::builder()
        .register_clientbound::<ContainerCloseClientbound>(GAME_CONTAINER_CLOSE)
        .register_clientbound::<SetContainerSlot>(GAME_SET_CONTAINER_SLOT)
        .register_clientbound::<Disconnect>(GAME_DISCONNECT)
        .register_clientbound::<KeepAliveClientbound>(GAME_KEEP_ALIVE)
        .register_clientbound::<LevelEvent>(GAME_LEVEL_EVENT)
        .register_clientbound::<Ping>(GAME_PING)
        .register_clientbound::<SetHeldItemClientbound>(GAME_SET_HELD_ITEM)
        .register_clientbound::<SoundEffect>(GAME_SOUND)
        .register_clientbound::<StopSound>(GAME_STOP_SOUND)
        .register_clientbound::<SystemChatMessage>(GAME_SYSTEM_CHAT)
        .register_serverbound::<ContainerButtonClick>(GAME_CONTAINER_BUTTON_CLICK_SB)
        .register_serverbound::<ContainerClick>(GAME_CONTAINER_CLICK_SB)
        .register_serverbound::<ContainerCloseServerbound>(GAME_CONTAINER_CLOSE_SB)
        .register_serverbound::<KeepAliveServerbound>(GAME_KEEP_ALIVE_SB)
        .register_serverbound::<Pong>(GAME_PONG_SB)
        .register_serverbound::<SetHeldItemServerbound>(GAME_SET_HELD_ITEM_SB)
        .register_serverbound::<SetCreativeModeSlot>(GAME_SET_CREATIVE_MODE_SLOT_SB)
        .register_serverbound::<SwingArm>(GAME_SWING_SB)
}
