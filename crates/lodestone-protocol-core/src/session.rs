use std::sync::Arc;

use bytes::BytesMut;
use tracing::debug;

use crate::codec::{CodecError, CodecResult};
use crate::packet::Packet;
use crate::registry::PacketCodec;
use crate::state::{ProtocolState, Side};

/// Codec state for a single connection.
///
/// The packet tables are shared; only the current state belongs to the
/// session. A server-side session decodes serverbound packets and encodes
/// clientbound ones, a client-side session does the reverse.
#[derive(Debug, Clone)]
pub struct ProtocolSession {
    codec: Arc<PacketCodec>,
    side: Side,
    state: ProtocolState,
}

impl ProtocolSession {
    pub fn new(codec: Arc<PacketCodec>, side: Side) -> Self {
        Self {
            codec,
            side,
            state: ProtocolState::Handshake,
        }
    }

    pub fn codec(&self) -> &Arc<PacketCodec> {
        &self.codec
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn state(&self) -> ProtocolState {
        self.state
    }

    /// Decode an inbound packet body in the current state.
    pub fn decode(&self, id: i32, buf: &mut BytesMut) -> CodecResult<Box<dyn Packet>> {
        self.codec.decode(self.state, self.side.inbound(), id, buf)
    }

    /// Encode an outbound packet in the current state.
    pub fn encode(&self, packet: &dyn Packet) -> CodecResult<(i32, BytesMut)> {
        self.codec.encode(self.state, self.side.outbound(), packet)
    }

    /// Switch the active tables. Only the edges allowed by
    /// [`ProtocolState::can_transition_to`] are accepted.
    pub fn transition(&mut self, next: ProtocolState) -> CodecResult<()> {
        if !self.state.can_transition_to(next) {
            return Err(CodecError::InvalidTransition {
                from: self.state,
                to: next,
            });
        }
        debug!("{:?} session: {} -> {}", self.side, self.state, next);
        self.state = next;
        Ok(())
    }
}
