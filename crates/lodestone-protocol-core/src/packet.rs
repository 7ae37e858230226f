use std::any::{Any, TypeId};
use std::fmt::Debug;

use bytes::BytesMut;

use crate::codec::CodecResult;
use crate::context::CodecContext;

/// Upcast helper so `dyn Packet` can be downcast back to its concrete type.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A single wire message. Implementations hold exactly the fields of the
/// message and write them in wire order.
pub trait Packet: AsAny + Debug + Send + Sync {
    /// Write the packet body (without the packet id).
    fn encode(&self, buf: &mut BytesMut, ctx: &CodecContext) -> CodecResult<()>;

    /// Hint for the transport: low priority packets may be deferred or batched.
    fn is_high_priority(&self) -> bool {
        true
    }

    /// Short type name, for logs and errors.
    fn packet_name(&self) -> &'static str {
        let full = std::any::type_name::<Self>();
        full.rsplit("::").next().unwrap_or(full)
    }
}

/// A packet that can be built from a packet body.
pub trait PacketDecode: Packet + Sized {
    fn decode(buf: &mut BytesMut, ctx: &CodecContext) -> CodecResult<Self>;
}

impl dyn Packet {
    /// Runtime type of the concrete packet, used for the encode-side lookup.
    pub fn packet_type_id(&self) -> TypeId {
        self.as_any().type_id()
    }

    pub fn is<P: Packet>(&self) -> bool {
        self.packet_type_id() == TypeId::of::<P>()
    }

    pub fn downcast_ref<P: Packet>(&self) -> Option<&P> {
        self.as_any().downcast_ref::<P>()
    }
}
