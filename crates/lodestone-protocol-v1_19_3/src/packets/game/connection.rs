use bytes::{BufMut, BytesMut};
use lodestone_protocol_core::*;
use lodestone_types::TextComponent;

#[derive(Debug, Clone, PartialEq)]
pub struct Disconnect {
    pub reason: TextComponent,
}

impl Packet for Disconnect {
    fn encode(&self, buf: &mut BytesMut, _ctx: &CodecContext) -> CodecResult<()> {
        write_component(buf, &self.reason);
        Ok(())
    }
}

impl PacketDecode for Disconnect {
    fn decode(buf: &mut BytesMut, _ctx: &CodecContext) -> CodecResult<Self> {
        Ok(Self {
            reason: read_component(buf)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeepAliveClientbound {
    pub id: i64,
}

impl Packet for KeepAliveClientbound {
    fn encode(&self, buf: &mut BytesMut, _ctx: &CodecContext) -> CodecResult<()> {
        buf.put_i64(self.id);
        Ok(())
    }
}

impl PacketDecode for KeepAliveClientbound {
    fn decode(buf: &mut BytesMut, _ctx: &CodecContext) -> CodecResult<Self> {
        Ok(Self { id: read_i64(buf)? })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeepAliveServerbound {
    pub id: i64,
}

impl Packet for KeepAliveServerbound {
    fn encode(&self, buf: &mut BytesMut, _ctx: &CodecContext) -> CodecResult<()> {
        buf.put_i64(self.id);
        Ok(())
    }
}

impl PacketDecode for KeepAliveServerbound {
    fn decode(buf: &mut BytesMut, _ctx: &CodecContext) -> CodecResult<Self> {
        Ok(Self { id: read_i64(buf)? })
    }
}

/// Game-state ping, answered with [`Pong`]. Unrelated to the status ping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ping {
    pub id: i32,
}

impl Packet for Ping {
    fn encode(&self, buf: &mut BytesMut, _ctx: &CodecContext) -> CodecResult<()> {
        buf.put_i32(self.id);
        Ok(())
    }
}

impl PacketDecode for Ping {
    fn decode(buf: &mut BytesMut, _ctx: &CodecContext) -> CodecResult<Self> {
        Ok(Self { id: read_i32(buf)? })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pong {
    pub id: i32,
}

impl Packet for Pong {
    fn encode(&self, buf: &mut BytesMut, _ctx: &CodecContext) -> CodecResult<()> {
        buf.put_i32(self.id);
        Ok(())
    }
}

impl PacketDecode for Pong {
    fn decode(buf: &mut BytesMut, _ctx: &CodecContext) -> CodecResult<Self> {
        Ok(Self { id: read_i32(buf)? })
    }
}
