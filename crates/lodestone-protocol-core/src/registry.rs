//! Per-state, per-direction packet tables.
//!
//! Decoding goes by packet id, encoding goes by the runtime type of the packet
//! value, so each direction keeps two maps filled from the same registration
//! list. Everything here is built once and only read afterwards; a built
//! [`PacketCodec`] is meant to be wrapped in an `Arc` and shared by every
//! connection speaking that protocol version.

use std::any::{type_name, TypeId};
use std::collections::HashMap;

use bytes::{Buf, BytesMut};
use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::codec::{CodecError, CodecResult};
use crate::context::CodecContext;
use crate::packet::{Packet, PacketDecode};
use crate::state::{PacketDirection, ProtocolState};

/// Builds a boxed packet from a packet body.
pub type DecodeFn = fn(&mut BytesMut, &CodecContext) -> CodecResult<Box<dyn Packet>>;

fn decode_boxed<P: PacketDecode>(
    buf: &mut BytesMut,
    ctx: &CodecContext,
) -> CodecResult<Box<dyn Packet>> {
    Ok(Box::new(P::decode(buf, ctx)?))
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("{state} {direction}: packet id 0x{id:02X} registered for both {first} and {second}")]
    DuplicateOpcode {
        state: ProtocolState,
        direction: PacketDirection,
        id: i32,
        first: &'static str,
        second: &'static str,
    },
    #[error("{state} {direction}: {name} registered under both 0x{first:02X} and 0x{second:02X}")]
    DuplicateType {
        state: ProtocolState,
        direction: PacketDirection,
        name: &'static str,
        first: i32,
        second: i32,
    },
    #[error("{state} {direction}: negative packet id {id} for {name}")]
    NegativeOpcode {
        state: ProtocolState,
        direction: PacketDirection,
        id: i32,
        name: &'static str,
    },
    #[error("state {0} configured twice")]
    DuplicateState(ProtocolState),
}

/// One registered packet type.
#[derive(Debug, Clone, Copy)]
pub struct PacketEntry {
    pub id: i32,
    pub name: &'static str,
    type_id: TypeId,
    decode: DecodeFn,
}

impl PacketEntry {
    fn new<P: PacketDecode>(id: i32) -> Self {
        Self {
            id,
            name: short_type_name(type_name::<P>()),
            type_id: TypeId::of::<P>(),
            decode: decode_boxed::<P>,
        }
    }

    pub fn decode(&self, buf: &mut BytesMut, ctx: &CodecContext) -> CodecResult<Box<dyn Packet>> {
        (self.decode)(buf, ctx)
    }
}

fn short_type_name(full: &'static str) -> &'static str {
    full.rsplit("::").next().unwrap_or(full)
}

/// The packets of one (state, direction) pair.
#[derive(Debug, Default)]
pub struct PacketTable {
    by_id: HashMap<i32, PacketEntry>,
    by_type: HashMap<TypeId, i32>,
}

impl PacketTable {
    fn build(
        state: ProtocolState,
        direction: PacketDirection,
        entries: &[PacketEntry],
    ) -> Result<Self, RegistryError> {
        let mut table = PacketTable::default();
        for entry in entries {
            if entry.id < 0 {
                return Err(RegistryError::NegativeOpcode {
                    state,
                    direction,
                    id: entry.id,
                    name: entry.name,
                });
            }
            if let Some(existing) = table.by_id.get(&entry.id) {
                return Err(RegistryError::DuplicateOpcode {
                    state,
                    direction,
                    id: entry.id,
                    first: existing.name,
                    second: entry.name,
                });
            }
            if let Some(&first) = table.by_type.get(&entry.type_id) {
                return Err(RegistryError::DuplicateType {
                    state,
                    direction,
                    name: entry.name,
                    first,
                    second: entry.id,
                });
            }
            table.by_id.insert(entry.id, *entry);
            table.by_type.insert(entry.type_id, entry.id);
        }
        Ok(table)
    }

    pub fn get(&self, id: i32) -> Option<&PacketEntry> {
        self.by_id.get(&id)
    }

    /// Id registered for the runtime type of `packet`.
    pub fn id_of(&self, packet: &dyn Packet) -> Option<i32> {
        self.by_type.get(&packet.packet_type_id()).copied()
    }

    pub fn id_for<P: Packet>(&self) -> Option<i32> {
        self.by_type.get(&TypeId::of::<P>()).copied()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// All entries, ordered by packet id.
    pub fn entries(&self) -> Vec<&PacketEntry> {
        let mut entries: Vec<_> = self.by_id.values().collect();
        entries.sort_by_key(|entry| entry.id);
        entries
    }
}

/// Both directions of one protocol state.
#[derive(Debug)]
pub struct PacketStateCodec {
    state: ProtocolState,
    serverbound: PacketTable,
    clientbound: PacketTable,
}

impl PacketStateCodec {
    pub fn builder() -> PacketStateCodecBuilder {
        PacketStateCodecBuilder::default()
    }

    pub fn state(&self) -> ProtocolState {
        self.state
    }

    pub fn table(&self, direction: PacketDirection) -> &PacketTable {
        match direction {
            PacketDirection::Serverbound => &self.serverbound,
            PacketDirection::Clientbound => &self.clientbound,
        }
    }
}

#[derive(Debug, Default)]
pub struct PacketStateCodecBuilder {
    serverbound: Vec<PacketEntry>,
    clientbound: Vec<PacketEntry>,
}

impl PacketStateCodecBuilder {
    pub fn register_serverbound<P: PacketDecode>(mut self, id: i32) -> Self {
        self.serverbound.push(PacketEntry::new::<P>(id));
        self
    }

    pub fn register_clientbound<P: PacketDecode>(mut self, id: i32) -> Self {
        self.clientbound.push(PacketEntry::new::<P>(id));
        self
    }

    pub fn register<P: PacketDecode>(self, direction: PacketDirection, id: i32) -> Self {
        match direction {
            PacketDirection::Serverbound => self.register_serverbound::<P>(id),
            PacketDirection::Clientbound => self.register_clientbound::<P>(id),
        }
    }

    /// Validate the registrations and build the tables. Any id or type used
    /// twice in the same direction fails here rather than at first use.
    pub fn build(self, state: ProtocolState) -> Result<PacketStateCodec, RegistryError> {
        let serverbound =
            PacketTable::build(state, PacketDirection::Serverbound, &self.serverbound)?;
        let clientbound =
            PacketTable::build(state, PacketDirection::Clientbound, &self.clientbound)?;
        Ok(PacketStateCodec {
            state,
            serverbound,
            clientbound,
        })
    }
}

/// Every packet table of one protocol version, plus the lookup tables its
/// packets need.
#[derive(Debug)]
pub struct PacketCodec {
    protocol_version: i32,
    minecraft_version: String,
    context: CodecContext,
    states: HashMap<ProtocolState, PacketStateCodec>,
}

impl PacketCodec {
    pub fn builder() -> PacketCodecBuilder {
        PacketCodecBuilder::default()
    }

    pub fn protocol_version(&self) -> i32 {
        self.protocol_version
    }

    pub fn minecraft_version(&self) -> &str {
        &self.minecraft_version
    }

    pub fn context(&self) -> &CodecContext {
        &self.context
    }

    pub fn state_codec(&self, state: ProtocolState) -> &PacketStateCodec {
        // build() fills every state
        &self.states[&state]
    }

    pub fn table(&self, state: ProtocolState, direction: PacketDirection) -> &PacketTable {
        self.state_codec(state).table(direction)
    }

    /// Decode one packet body. The body must be consumed exactly.
    pub fn decode(
        &self,
        state: ProtocolState,
        direction: PacketDirection,
        id: i32,
        buf: &mut BytesMut,
    ) -> CodecResult<Box<dyn Packet>> {
        let Some(entry) = self.table(state, direction).get(id) else {
            warn!("Unknown packet id=0x{:02X} in {} {}", id, state, direction);
            return Err(CodecError::UnknownOpcode {
                state,
                direction,
                id,
            });
        };
        let len = buf.len();
        let packet = entry.decode(buf, &self.context)?;
        if buf.has_remaining() {
            return Err(CodecError::TrailingBytes(buf.remaining()));
        }
        trace!(
            "Decoded {} id=0x{:02X} len={} ({} {})",
            entry.name,
            id,
            len,
            state,
            direction
        );
        Ok(packet)
    }

    /// Encode a packet body, returning the id it is registered under.
    pub fn encode(
        &self,
        state: ProtocolState,
        direction: PacketDirection,
        packet: &dyn Packet,
    ) -> CodecResult<(i32, BytesMut)> {
        let table = self.table(state, direction);
        let Some(id) = table.id_of(packet) else {
            return Err(CodecError::UnregisteredPacket {
                name: packet.packet_name(),
                state,
                direction,
            });
        };
        let mut buf = BytesMut::new();
        packet.encode(&mut buf, &self.context)?;
        trace!(
            "Encoded id=0x{:02X} len={} ({} {})",
            id,
            buf.len(),
            state,
            direction
        );
        Ok((id, buf))
    }
}

#[derive(Debug, Default)]
pub struct PacketCodecBuilder {
    protocol_version: i32,
    minecraft_version: String,
    context: CodecContext,
    states: Vec<(ProtocolState, PacketStateCodecBuilder)>,
}

impl PacketCodecBuilder {
    pub fn protocol_version(mut self, version: i32) -> Self {
        self.protocol_version = version;
        self
    }

    pub fn minecraft_version(mut self, version: impl Into<String>) -> Self {
        self.minecraft_version = version.into();
        self
    }

    pub fn context(mut self, context: CodecContext) -> Self {
        self.context = context;
        self
    }

    pub fn state(mut self, state: ProtocolState, codec: PacketStateCodecBuilder) -> Self {
        self.states.push((state, codec));
        self
    }

    /// Build every state's tables. States that were never configured get
    /// empty tables.
    pub fn build(self) -> Result<PacketCodec, RegistryError> {
        let mut states = HashMap::new();
        for (state, builder) in self.states {
            if states.contains_key(&state) {
                return Err(RegistryError::DuplicateState(state));
            }
            let codec = builder.build(state)?;
            debug!(
                "{} tables: {} serverbound, {} clientbound",
                state,
                codec.serverbound.len(),
                codec.clientbound.len()
            );
            states.insert(state, codec);
        }
        for state in ProtocolState::ALL {
            if !states.contains_key(&state) {
                states.insert(state, PacketStateCodecBuilder::default().build(state)?);
            }
        }
        Ok(PacketCodec {
            protocol_version: self.protocol_version,
            minecraft_version: self.minecraft_version,
            context: self.context,
            states,
        })
    }
}
