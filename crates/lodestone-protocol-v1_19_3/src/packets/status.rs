use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use bytes::{BufMut, BytesMut};
use lodestone_protocol_core::*;
use lodestone_types::{GameProfile, TextComponent};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::data::{PlayerInfo, ServerStatusInfo, VersionInfo};

const FAVICON_PREFIX: &str = "data:image/png;base64,";

/// Server list ping request. Empty body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusRequest;

impl Packet for StatusRequest {
    fn encode(&self, _buf: &mut BytesMut, _ctx: &CodecContext) -> CodecResult<()> {
        Ok(())
    }
}

impl PacketDecode for StatusRequest {
    fn decode(_buf: &mut BytesMut, _ctx: &CodecContext) -> CodecResult<Self> {
        Ok(StatusRequest)
    }
}

/// Server list status, carried as a JSON document in a single string.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusResponse {
    pub info: ServerStatusInfo,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatusJson {
    version: VersionJson,
    players: PlayersJson,
    description: TextComponent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    favicon: Option<String>,
    enforces_secure_chat: bool,
}

#[derive(Serialize, Deserialize)]
struct VersionJson {
    name: String,
    protocol: i32,
}

#[derive(Serialize, Deserialize)]
struct PlayersJson {
    max: i32,
    online: i32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    sample: Vec<SampleJson>,
}

#[derive(Serialize, Deserialize)]
struct SampleJson {
    name: String,
    id: Uuid,
}

impl StatusResponse {
    pub fn new(info: ServerStatusInfo) -> Self {
        Self { info }
    }

    fn to_json(&self) -> CodecResult<String> {
        let info = &self.info;
        let doc = StatusJson {
            version: VersionJson {
                name: info.version.name.clone(),
                protocol: info.version.protocol,
            },
            players: PlayersJson {
                max: info.players.max,
                online: info.players.online,
                sample: info
                    .players
                    .sample
                    .iter()
                    .map(|profile| SampleJson {
                        name: profile.name.clone(),
                        id: profile.uuid,
                    })
                    .collect(),
            },
            description: info.description.clone(),
            favicon: info
                .icon_png
                .as_ref()
                .map(|png| format!("{}{}", FAVICON_PREFIX, STANDARD.encode(png))),
            enforces_secure_chat: info.enforces_secure_chat,
        };
        Ok(serde_json::to_string(&doc)?)
    }

    fn from_json(json: &str) -> CodecResult<Self> {
        let doc: StatusJson = serde_json::from_str(json)?;
        let icon_png = match doc.favicon {
            Some(favicon) => {
                let data = favicon.strip_prefix(FAVICON_PREFIX).unwrap_or(&favicon);
                let png = STANDARD
                    .decode(data)
                    .map_err(|e| CodecError::Malformed(format!("invalid favicon: {e}")))?;
                Some(png)
            }
            None => None,
        };
        Ok(Self {
            info: ServerStatusInfo {
                version: VersionInfo::new(doc.version.name, doc.version.protocol),
                players: PlayerInfo {
                    max: doc.players.max,
                    online: doc.players.online,
                    sample: doc
                        .players
                        .sample
                        .into_iter()
                        .map(|entry| GameProfile::new(entry.id, entry.name))
                        .collect(),
                },
                description: doc.description,
                icon_png,
                enforces_secure_chat: doc.enforces_secure_chat,
            },
        })
    }
}

impl Packet for StatusResponse {
    fn encode(&self, buf: &mut BytesMut, _ctx: &CodecContext) -> CodecResult<()> {
        write_string(buf, &self.to_json()?);
        Ok(())
    }

    fn is_high_priority(&self) -> bool {
        false
    }
}

impl PacketDecode for StatusResponse {
    fn decode(buf: &mut BytesMut, _ctx: &CodecContext) -> CodecResult<Self> {
        let json = read_string(buf, DEFAULT_MAX_STRING_LEN)?;
        Self::from_json(&json)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PingRequest {
    pub payload: i64,
}

impl Packet for PingRequest {
    fn encode(&self, buf: &mut BytesMut, _ctx: &CodecContext) -> CodecResult<()> {
        buf.put_i64(self.payload);
        Ok(())
    }
}

impl PacketDecode for PingRequest {
    fn decode(buf: &mut BytesMut, _ctx: &CodecContext) -> CodecResult<Self> {
        Ok(Self {
            payload: read_i64(buf)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PongResponse {
    pub payload: i64,
}

impl Packet for PongResponse {
    fn encode(&self, buf: &mut BytesMut, _ctx: &CodecContext) -> CodecResult<()> {
        buf.put_i64(self.payload);
        Ok(())
    }
}

impl PacketDecode for PongResponse {
    fn decode(buf: &mut BytesMut, _ctx: &CodecContext) -> CodecResult<Self> {
        Ok(Self {
            payload: read_i64(buf)?,
        })
    }
}
