use std::collections::BTreeMap;
use std::sync::Arc;

use lodestone_protocol_core::*;
use lodestone_protocol_v1_19_3::next_state;
use tracing::{debug, info, warn};

use crate::capture::Record;

/// Replays a capture through a client and a server session so that each
/// frame is decoded in the state the real connection was in.
pub struct Inspector {
    client: ProtocolSession,
    server: ProtocolSession,
    stats: Stats,
}

#[derive(Debug, Default)]
pub struct Stats {
    pub decoded: usize,
    pub failed: usize,
    /// Packets whose re-encoding differs from the captured body.
    pub mismatched: usize,
    pub by_name: BTreeMap<&'static str, usize>,
}

impl Inspector {
    pub fn new(codec: Arc<PacketCodec>) -> Self {
        Self {
            client: ProtocolSession::new(codec.clone(), Side::Client),
            server: ProtocolSession::new(codec, Side::Server),
            stats: Stats::default(),
        }
    }

    pub fn state(&self) -> ProtocolState {
        self.server.state()
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Move both sessions along a transition path, for captures that don't
    /// start at the handshake.
    pub fn skip_to(&mut self, path: &[ProtocolState]) -> CodecResult<()> {
        for &state in path {
            self.client.transition(state)?;
            self.server.transition(state)?;
        }
        Ok(())
    }

    /// Decode one record, check it re-encodes to the same bytes and apply any
    /// state change it triggers.
    pub fn feed(&mut self, record: Record) -> CodecResult<Box<dyn Packet>> {
        let receiver = match record.direction {
            PacketDirection::Serverbound => &self.server,
            PacketDirection::Clientbound => &self.client,
        };
        let captured = record.body.clone();
        let mut body = record.body;
        let packet = match receiver.decode(record.id, &mut body) {
            Ok(packet) => packet,
            Err(e) => {
                self.stats.failed += 1;
                return Err(e);
            }
        };
        self.reencode(record.direction, record.id, &captured, packet.as_ref())?;

        info!(
            "[{}] {} 0x{:02X} {:?}",
            self.state(),
            record.direction,
            record.id,
            packet
        );
        self.stats.decoded += 1;
        *self.stats.by_name.entry(packet.packet_name()).or_default() += 1;

        if let Some(next) = next_state(packet.as_ref()) {
            debug!("{} switches to {}", packet.packet_name(), next);
            self.client.transition(next)?;
            self.server.transition(next)?;
        }
        Ok(packet)
    }

    /// Encode `packet` on the side that sent it and compare with the captured
    /// body. A packet that can't be encoded again counts as failed.
    fn reencode(
        &mut self,
        direction: PacketDirection,
        id: i32,
        captured: &[u8],
        packet: &dyn Packet,
    ) -> CodecResult<()> {
        let sender = match direction {
            PacketDirection::Serverbound => &self.client,
            PacketDirection::Clientbound => &self.server,
        };
        let (encoded_id, encoded) = match sender.encode(packet) {
            Ok(encoded) => encoded,
            Err(e) => {
                warn!("{} can't be re-encoded: {}", packet.packet_name(), e);
                self.stats.failed += 1;
                return Err(e);
            }
        };
        if encoded_id != id || encoded[..] != *captured {
            warn!(
                "{} re-encodes differently ({} bytes captured, {} encoded)",
                packet.packet_name(),
                captured.len(),
                encoded.len()
            );
            self.stats.mismatched += 1;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;
    use lodestone_protocol_v1_19_3::data::HandshakeIntent;
    use lodestone_protocol_v1_19_3::packets::game::KeepAliveClientbound;
    use lodestone_protocol_v1_19_3::packets::handshake::Handshake;
    use lodestone_protocol_v1_19_3::packets::login::LoginSuccess;
    use lodestone_types::GameProfile;

    fn record(direction: PacketDirection, id: i32, packet: &dyn Packet) -> Record {
        let mut body = BytesMut::new();
        packet.encode(&mut body, &CodecContext::default()).unwrap();
        Record {
            direction,
            id,
            body,
        }
    }

    fn inspector() -> Inspector {
        Inspector::new(Arc::new(lodestone_protocol_v1_19_3::codec().unwrap()))
    }

    #[test]
    fn test_follows_login() {
        let mut inspector = inspector();
        let handshake = Handshake {
            protocol_version: 761,
            server_address: "localhost".into(),
            server_port: 25565,
            intent: HandshakeIntent::Login,
        };
        inspector
            .feed(record(PacketDirection::Serverbound, 0x00, &handshake))
            .unwrap();
        assert_eq!(inspector.state(), ProtocolState::Login);

        let success = LoginSuccess {
            profile: GameProfile::new(uuid::Uuid::from_u128(1), "Alex"),
        };
        inspector
            .feed(record(PacketDirection::Clientbound, 0x02, &success))
            .unwrap();
        assert_eq!(inspector.state(), ProtocolState::Game);

        let packet = inspector
            .feed(record(
                PacketDirection::Clientbound,
                0x1F,
                &KeepAliveClientbound { id: 8 },
            ))
            .unwrap();
        assert!(packet.is::<KeepAliveClientbound>());
        assert_eq!(inspector.stats().decoded, 3);
        assert_eq!(inspector.stats().mismatched, 0);
        assert_eq!(inspector.stats().by_name["LoginSuccess"], 1);
    }

    #[test]
    fn test_reencode_failure_counts_as_failed() {
        let mut inspector = inspector();
        // Nothing is clientbound in the handshake state
        let err = inspector
            .reencode(
                PacketDirection::Clientbound,
                0x1F,
                &[0; 8],
                &KeepAliveClientbound { id: 0 },
            )
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Usage);
        assert_eq!(inspector.stats().failed, 1);
        assert_eq!(inspector.stats().decoded, 0);
        assert_eq!(inspector.stats().mismatched, 0);
    }

    #[test]
    fn test_skip_to_game() {
        let mut inspector = inspector();
        inspector
            .skip_to(&[ProtocolState::Login, ProtocolState::Game])
            .unwrap();
        let err = inspector
            .feed(Record {
                direction: PacketDirection::Clientbound,
                id: 0x7E,
                body: BytesMut::new(),
            })
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownOpcode);
        assert_eq!(inspector.stats().failed, 1);
    }
}
