use bytes::{BufMut, BytesMut};
use lodestone_protocol_core::*;
use lodestone_types::TextComponent;

/// Unsigned server message. `overlay` shows it above the hotbar instead of
/// in the chat box.
#[derive(Debug, Clone, PartialEq)]
pub struct SystemChatMessage {
    pub content: TextComponent,
    pub overlay: bool,
}

impl Packet for SystemChatMessage {
    fn encode(&self, buf: &mut BytesMut, _ctx: &CodecContext) -> CodecResult<()> {
        write_component(buf, &self.content);
        buf.put_u8(self.overlay as u8);
        Ok(())
    }
}

impl PacketDecode for SystemChatMessage {
    fn decode(buf: &mut BytesMut, _ctx: &CodecContext) -> CodecResult<Self> {
        Ok(Self {
            content: read_component(buf)?,
            overlay: read_bool(buf)?,
        })
    }
}
