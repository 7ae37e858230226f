use bytes::{BufMut, BytesMut};
use lodestone_protocol_core::*;
use lodestone_types::{GameProfile, Identifier, ProfileProperty, TextComponent};
use uuid::Uuid;

const MAX_USERNAME_LEN: usize = 16;
const MAX_SERVER_ID_LEN: usize = 20;

// === Clientbound ===

#[derive(Debug, Clone, PartialEq)]
pub struct LoginDisconnect {
    pub reason: TextComponent,
}

impl Packet for LoginDisconnect {
    fn encode(&self, buf: &mut BytesMut, _ctx: &CodecContext) -> CodecResult<()> {
        write_component(buf, &self.reason);
        Ok(())
    }
}

impl PacketDecode for LoginDisconnect {
    fn decode(buf: &mut BytesMut, _ctx: &CodecContext) -> CodecResult<Self> {
        Ok(Self {
            reason: read_component(buf)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptionRequest {
    pub server_id: String,
    /// DER encoded public key.
    pub public_key: Vec<u8>,
    pub verify_token: Vec<u8>,
}

impl Packet for EncryptionRequest {
    fn encode(&self, buf: &mut BytesMut, _ctx: &CodecContext) -> CodecResult<()> {
        write_string(buf, &self.server_id);
        write_byte_array(buf, &self.public_key);
        write_byte_array(buf, &self.verify_token);
        Ok(())
    }
}

impl PacketDecode for EncryptionRequest {
    fn decode(buf: &mut BytesMut, _ctx: &CodecContext) -> CodecResult<Self> {
        Ok(Self {
            server_id: read_string(buf, MAX_SERVER_ID_LEN)?,
            public_key: read_byte_array(buf)?,
            verify_token: read_byte_array(buf)?,
        })
    }
}

/// Login success. Receiving or sending it moves both ends into the game state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginSuccess {
    pub profile: GameProfile,
}

impl Packet for LoginSuccess {
    fn encode(&self, buf: &mut BytesMut, _ctx: &CodecContext) -> CodecResult<()> {
        write_uuid(buf, &self.profile.uuid);
        write_string(buf, &self.profile.name);
        write_varint(buf, self.profile.properties.len() as i32);
        for prop in &self.profile.properties {
            write_string(buf, &prop.name);
            write_string(buf, &prop.value);
            match &prop.signature {
                Some(sig) => {
                    buf.put_u8(1);
                    write_string(buf, sig);
                }
                None => buf.put_u8(0),
            }
        }
        Ok(())
    }
}

impl PacketDecode for LoginSuccess {
    fn decode(buf: &mut BytesMut, _ctx: &CodecContext) -> CodecResult<Self> {
        let uuid = read_uuid(buf)?;
        let name = read_string(buf, MAX_USERNAME_LEN)?;
        let count = read_count(buf)?;
        let mut properties = Vec::new();
        for _ in 0..count {
            let name = read_string(buf, DEFAULT_MAX_STRING_LEN)?;
            let value = read_string(buf, DEFAULT_MAX_STRING_LEN)?;
            let signature = if read_bool(buf)? {
                Some(read_string(buf, DEFAULT_MAX_STRING_LEN)?)
            } else {
                None
            };
            properties.push(ProfileProperty {
                name,
                value,
                signature,
            });
        }
        Ok(Self {
            profile: GameProfile {
                uuid,
                name,
                properties,
            },
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetCompression {
    pub threshold: i32,
}

impl Packet for SetCompression {
    fn encode(&self, buf: &mut BytesMut, _ctx: &CodecContext) -> CodecResult<()> {
        write_varint(buf, self.threshold);
        Ok(())
    }
}

impl PacketDecode for SetCompression {
    fn decode(buf: &mut BytesMut, _ctx: &CodecContext) -> CodecResult<Self> {
        Ok(Self {
            threshold: read_varint(buf)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginPluginRequest {
    pub message_id: i32,
    pub channel: Identifier,
    pub data: Vec<u8>,
}

impl Packet for LoginPluginRequest {
    fn encode(&self, buf: &mut BytesMut, _ctx: &CodecContext) -> CodecResult<()> {
        write_varint(buf, self.message_id);
        write_string(buf, &self.channel.to_string());
        buf.put_slice(&self.data);
        Ok(())
    }
}

impl PacketDecode for LoginPluginRequest {
    fn decode(buf: &mut BytesMut, _ctx: &CodecContext) -> CodecResult<Self> {
        Ok(Self {
            message_id: read_varint(buf)?,
            channel: read_string(buf, DEFAULT_MAX_STRING_LEN)?
                .parse()
                .map_err(CodecError::Malformed)?,
            data: read_remaining(buf),
        })
    }
}

// === Serverbound ===

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginStart {
    pub name: String,
    pub uuid: Option<Uuid>,
}

impl Packet for LoginStart {
    fn encode(&self, buf: &mut BytesMut, _ctx: &CodecContext) -> CodecResult<()> {
        write_string(buf, &self.name);
        match &self.uuid {
            Some(uuid) => {
                buf.put_u8(1);
                write_uuid(buf, uuid);
            }
            None => buf.put_u8(0),
        }
        Ok(())
    }
}

impl PacketDecode for LoginStart {
    fn decode(buf: &mut BytesMut, _ctx: &CodecContext) -> CodecResult<Self> {
        let name = read_string(buf, MAX_USERNAME_LEN)?;
        let uuid = if read_bool(buf)? {
            Some(read_uuid(buf)?)
        } else {
            None
        };
        Ok(Self { name, uuid })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptionResponse {
    pub shared_secret: Vec<u8>,
    pub verify_token: Vec<u8>,
}

impl Packet for EncryptionResponse {
    fn encode(&self, buf: &mut BytesMut, _ctx: &CodecContext) -> CodecResult<()> {
        write_byte_array(buf, &self.shared_secret);
        write_byte_array(buf, &self.verify_token);
        Ok(())
    }
}

impl PacketDecode for EncryptionResponse {
    fn decode(buf: &mut BytesMut, _ctx: &CodecContext) -> CodecResult<Self> {
        Ok(Self {
            shared_secret: read_byte_array(buf)?,
            verify_token: read_byte_array(buf)?,
        })
    }
}

/// Answer to a [`LoginPluginRequest`]. `data` is `None` when the client
/// didn't understand the channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginPluginResponse {
    pub message_id: i32,
    pub data: Option<Vec<u8>>,
}

impl Packet for LoginPluginResponse {
    fn encode(&self, buf: &mut BytesMut, _ctx: &CodecContext) -> CodecResult<()> {
        write_varint(buf, self.message_id);
        match &self.data {
            Some(data) => {
                buf.put_u8(1);
                buf.put_slice(data);
            }
            None => buf.put_u8(0),
        }
        Ok(())
    }
}

impl PacketDecode for LoginPluginResponse {
    fn decode(buf: &mut BytesMut, _ctx: &CodecContext) -> CodecResult<Self> {
        let message_id = read_varint(buf)?;
        let data = if read_bool(buf)? {
            Some(read_remaining(buf))
        } else {
            None
        };
        Ok(Self { message_id, data })
    }
}
