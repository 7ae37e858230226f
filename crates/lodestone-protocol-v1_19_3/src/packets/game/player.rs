use bytes::{BufMut, BytesMut};
use lodestone_protocol_core::*;

use crate::data::Hand;

/// Selects a hotbar slot on the client (0-8).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetHeldItemClientbound {
    pub slot: i8,
}

impl Packet for SetHeldItemClientbound {
    fn encode(&self, buf: &mut BytesMut, _ctx: &CodecContext) -> CodecResult<()> {
        buf.put_i8(self.slot);
        Ok(())
    }
}

impl PacketDecode for SetHeldItemClientbound {
    fn decode(buf: &mut BytesMut, _ctx: &CodecContext) -> CodecResult<Self> {
        Ok(Self {
            slot: read_i8(buf)?,
        })
    }
}

/// The client changed its selected hotbar slot. Wider than the clientbound
/// form on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetHeldItemServerbound {
    pub slot: i16,
}

impl Packet for SetHeldItemServerbound {
    fn encode(&self, buf: &mut BytesMut, _ctx: &CodecContext) -> CodecResult<()> {
        buf.put_i16(self.slot);
        Ok(())
    }
}

impl PacketDecode for SetHeldItemServerbound {
    fn decode(buf: &mut BytesMut, _ctx: &CodecContext) -> CodecResult<Self> {
        Ok(Self {
            slot: read_i16(buf)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwingArm {
    pub hand: Hand,
}

impl Packet for SwingArm {
    fn encode(&self, buf: &mut BytesMut, _ctx: &CodecContext) -> CodecResult<()> {
        write_magic_varint(buf, self.hand);
        Ok(())
    }
}

impl PacketDecode for SwingArm {
    fn decode(buf: &mut BytesMut, _ctx: &CodecContext) -> CodecResult<Self> {
        Ok(Self {
            hand: read_magic_varint(buf)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swing_hand() {
        let ctx = CodecContext::default();
        let mut buf = BytesMut::new();
        SwingArm { hand: Hand::OffHand }.encode(&mut buf, &ctx).unwrap();
        assert_eq!(&buf[..], &[1]);
        assert_eq!(SwingArm::decode(&mut buf, &ctx).unwrap().hand, Hand::OffHand);

        let mut buf = BytesMut::from(&[2u8][..]);
        let err = SwingArm::decode(&mut buf, &ctx).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownCode);
    }
}
