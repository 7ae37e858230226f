use bytes::{BufMut, BytesMut};
use lodestone_protocol_core::*;

use crate::data::HandshakeIntent;

/// First packet of every connection. Its intent picks the next state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handshake {
    pub protocol_version: i32,
    pub server_address: String,
    pub server_port: u16,
    pub intent: HandshakeIntent,
}

impl Packet for Handshake {
    fn encode(&self, buf: &mut BytesMut, _ctx: &CodecContext) -> CodecResult<()> {
        write_varint(buf, self.protocol_version);
        write_string(buf, &self.server_address);
        buf.put_u16(self.server_port);
        write_magic_varint(buf, self.intent);
        Ok(())
    }
}

impl PacketDecode for Handshake {
    fn decode(buf: &mut BytesMut, _ctx: &CodecContext) -> CodecResult<Self> {
        Ok(Self {
            protocol_version: read_varint(buf)?,
            server_address: read_string(buf, 255)?,
            server_port: read_u16(buf)?,
            intent: read_magic_varint(buf)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_layout() {
        let packet = Handshake {
            protocol_version: 761,
            server_address: "localhost".into(),
            server_port: 25565,
            intent: HandshakeIntent::Login,
        };
        let mut buf = BytesMut::new();
        packet.encode(&mut buf, &CodecContext::default()).unwrap();
        // 761 = 0xF9 0x05
        assert_eq!(&buf[..2], &[0xF9, 0x05]);
        assert_eq!(buf[2], 9);
        assert_eq!(&buf[12..], &[0x63, 0xDD, 0x02]);
        assert_eq!(Handshake::decode(&mut buf, &CodecContext::default()).unwrap(), packet);
    }

    #[test]
    fn test_unknown_intent() {
        let mut buf = BytesMut::new();
        write_varint(&mut buf, 761);
        write_string(&mut buf, "");
        buf.put_u16(0);
        write_varint(&mut buf, 3);
        let err = Handshake::decode(&mut buf, &CodecContext::default()).unwrap_err();
        assert!(matches!(
            err,
            CodecError::UnknownCode {
                domain: "handshake intent",
                code: 3
            }
        ));
    }
}
