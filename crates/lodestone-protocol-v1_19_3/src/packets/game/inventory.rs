use std::collections::BTreeMap;

use bytes::{BufMut, BytesMut};
use lodestone_protocol_core::*;
use lodestone_types::ItemStack;
use tracing::debug;

use crate::data::{ContainerAction, ContainerActionType};

/// Slot number the client sends for a click outside the window.
pub const CLICK_OUTSIDE_NOT_HOLDING_SLOT: i16 = -999;

/// Upper bound on the changed-slot map a client may send.
const MAX_CHANGED_SLOTS: usize = 128;

/// A click inside an open container window.
///
/// The button byte is interpreted through the table of the click mode, and
/// for drops it is additionally shifted: the wire only carries `code % 2`,
/// and whether the real code is 0/1 or 2/3 follows from the slot being the
/// outside sentinel or not. The constructor keeps the slot and the drop
/// variant consistent so that shift is always reversible.
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerClick {
    container_id: i8,
    state_id: i32,
    slot: i16,
    action: ContainerAction,
    changed_slots: BTreeMap<i16, Option<ItemStack>>,
    carried_item: Option<ItemStack>,
}

impl ContainerClick {
    pub fn new(
        container_id: i8,
        state_id: i32,
        slot: i16,
        action: ContainerAction,
        changed_slots: BTreeMap<i16, Option<ItemStack>>,
        carried_item: Option<ItemStack>,
    ) -> CodecResult<Self> {
        if let ContainerAction::Drop(drop) = action {
            let outside = slot == CLICK_OUTSIDE_NOT_HOLDING_SLOT;
            if drop.is_outside_not_holding() != outside {
                return Err(CodecError::InvalidArgument(format!(
                    "{drop:?} is not valid for slot {slot}"
                )));
            }
        }
        Ok(Self {
            container_id,
            state_id,
            slot,
            action,
            changed_slots,
            carried_item,
        })
    }

    pub fn container_id(&self) -> i8 {
        self.container_id
    }

    pub fn state_id(&self) -> i32 {
        self.state_id
    }

    pub fn slot(&self) -> i16 {
        self.slot
    }

    pub fn action(&self) -> ContainerAction {
        self.action
    }

    pub fn action_type(&self) -> ContainerActionType {
        self.action.action_type()
    }

    pub fn changed_slots(&self) -> &BTreeMap<i16, Option<ItemStack>> {
        &self.changed_slots
    }

    pub fn carried_item(&self) -> Option<&ItemStack> {
        self.carried_item.as_ref()
    }
}

impl Packet for ContainerClick {
    fn encode(&self, buf: &mut BytesMut, _ctx: &CodecContext) -> CodecResult<()> {
        buf.put_i8(self.container_id);
        write_varint(buf, self.state_id);
        buf.put_i16(self.slot);
        let param = match self.action {
            ContainerAction::Drop(_) => self.action.param_code() % 2,
            _ => self.action.param_code(),
        };
        buf.put_u8(param as u8);
        write_magic_u8(buf, self.action.action_type());
        write_varint(buf, self.changed_slots.len() as i32);
        for (slot, item) in &self.changed_slots {
            buf.put_i16(*slot);
            write_item_stack(buf, item);
        }
        write_item_stack(buf, &self.carried_item);
        Ok(())
    }
}

impl PacketDecode for ContainerClick {
    fn decode(buf: &mut BytesMut, _ctx: &CodecContext) -> CodecResult<Self> {
        let container_id = read_i8(buf)?;
        let state_id = read_varint(buf)?;
        let slot = read_i16(buf)?;
        // The button can only be read once the mode is known
        let mut param = read_u8(buf)? as i32;
        let action_type: ContainerActionType = read_magic_u8(buf)?;
        if action_type == ContainerActionType::DropItem && slot != CLICK_OUTSIDE_NOT_HOLDING_SLOT {
            param += 2;
        }
        let action = ContainerAction::from_param(action_type, param)?;

        let count = read_count(buf)?;
        if count > MAX_CHANGED_SLOTS {
            return Err(CodecError::Malformed(format!(
                "too many changed slots: {count} > {MAX_CHANGED_SLOTS}"
            )));
        }
        let mut changed_slots = BTreeMap::new();
        for _ in 0..count {
            let slot = read_i16(buf)?;
            let item = read_item_stack(buf)?;
            if changed_slots.insert(slot, item).is_some() {
                debug!("Container click lists slot {} twice, keeping the last", slot);
            }
        }
        let carried_item = read_item_stack(buf)?;

        Self::new(
            container_id,
            state_id,
            slot,
            action,
            changed_slots,
            carried_item,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerButtonClick {
    pub container_id: i8,
    pub button_id: i8,
}

impl Packet for ContainerButtonClick {
    fn encode(&self, buf: &mut BytesMut, _ctx: &CodecContext) -> CodecResult<()> {
        buf.put_i8(self.container_id);
        buf.put_i8(self.button_id);
        Ok(())
    }
}

impl PacketDecode for ContainerButtonClick {
    fn decode(buf: &mut BytesMut, _ctx: &CodecContext) -> CodecResult<Self> {
        Ok(Self {
            container_id: read_i8(buf)?,
            button_id: read_i8(buf)?,
        })
    }
}

/// Sent by the client when it closes a window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerCloseServerbound {
    pub container_id: u8,
}

impl Packet for ContainerCloseServerbound {
    fn encode(&self, buf: &mut BytesMut, _ctx: &CodecContext) -> CodecResult<()> {
        buf.put_u8(self.container_id);
        Ok(())
    }
}

impl PacketDecode for ContainerCloseServerbound {
    fn decode(buf: &mut BytesMut, _ctx: &CodecContext) -> CodecResult<Self> {
        Ok(Self {
            container_id: read_u8(buf)?,
        })
    }
}

/// Forces the client to close a window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerCloseClientbound {
    pub container_id: u8,
}

impl Packet for ContainerCloseClientbound {
    fn encode(&self, buf: &mut BytesMut, _ctx: &CodecContext) -> CodecResult<()> {
        buf.put_u8(self.container_id);
        Ok(())
    }
}

impl PacketDecode for ContainerCloseClientbound {
    fn decode(buf: &mut BytesMut, _ctx: &CodecContext) -> CodecResult<Self> {
        Ok(Self {
            container_id: read_u8(buf)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SetContainerSlot {
    pub container_id: i8,
    pub state_id: i32,
    pub slot: i16,
    pub item: Option<ItemStack>,
}

impl Packet for SetContainerSlot {
    fn encode(&self, buf: &mut BytesMut, _ctx: &CodecContext) -> CodecResult<()> {
        buf.put_i8(self.container_id);
        write_varint(buf, self.state_id);
        buf.put_i16(self.slot);
        write_item_stack(buf, &self.item);
        Ok(())
    }
}

impl PacketDecode for SetContainerSlot {
    fn decode(buf: &mut BytesMut, _ctx: &CodecContext) -> CodecResult<Self> {
        Ok(Self {
            container_id: read_i8(buf)?,
            state_id: read_varint(buf)?,
            slot: read_i16(buf)?,
            item: read_item_stack(buf)?,
        })
    }
}

/// Creative inventory action: the client puts an arbitrary item in a slot.
#[derive(Debug, Clone, PartialEq)]
pub struct SetCreativeModeSlot {
    pub slot: i16,
    pub item: Option<ItemStack>,
}

impl Packet for SetCreativeModeSlot {
    fn encode(&self, buf: &mut BytesMut, _ctx: &CodecContext) -> CodecResult<()> {
        buf.put_i16(self.slot);
        write_item_stack(buf, &self.item);
        Ok(())
    }
}

impl PacketDecode for SetCreativeModeSlot {
    fn decode(buf: &mut BytesMut, _ctx: &CodecContext) -> CodecResult<Self> {
        Ok(Self {
            slot: read_i16(buf)?,
            item: read_item_stack(buf)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{ClickItemAction, DropItemAction, SpreadItemAction};
    use lodestone_nbt::{nbt_compound, NbtValue};

    fn click(slot: i16, action: ContainerAction) -> CodecResult<ContainerClick> {
        ContainerClick::new(0, 1, slot, action, BTreeMap::new(), None)
    }

    fn encode(packet: &ContainerClick) -> BytesMut {
        let mut buf = BytesMut::new();
        packet.encode(&mut buf, &CodecContext::default()).unwrap();
        buf
    }

    /// Wire bytes of a click with no changed slots and an empty cursor.
    fn wire(slot: i16, param: u8, action_type: u8) -> BytesMut {
        let mut buf = BytesMut::new();
        buf.put_i8(0);
        write_varint(&mut buf, 1);
        buf.put_i16(slot);
        buf.put_u8(param);
        buf.put_u8(action_type);
        write_varint(&mut buf, 0);
        buf.put_u8(0);
        buf
    }

    fn decode(mut buf: BytesMut) -> CodecResult<ContainerClick> {
        let packet = ContainerClick::decode(&mut buf, &CodecContext::default());
        assert!(packet.is_err() || buf.is_empty());
        packet
    }

    #[test]
    fn test_drop_from_slot_is_offset() {
        let packet = decode(wire(36, 0, 4)).unwrap();
        assert_eq!(packet.action(), ContainerAction::Drop(DropItemAction::DropFromSelected));
        let packet = decode(wire(36, 1, 4)).unwrap();
        assert_eq!(packet.action(), ContainerAction::Drop(DropItemAction::DropSelectedStack));

        let bytes = encode(&click(36, ContainerAction::Drop(DropItemAction::DropSelectedStack)).unwrap());
        assert_eq!(&bytes[..], &wire(36, 1, 4)[..]);
    }

    #[test]
    fn test_drop_outside_is_not_offset() {
        let packet = decode(wire(-999, 1, 4)).unwrap();
        assert_eq!(
            packet.action(),
            ContainerAction::Drop(DropItemAction::RightClickOutsideNotHolding)
        );
        let bytes = encode(&packet);
        assert_eq!(&bytes[..], &wire(-999, 1, 4)[..]);
    }

    #[test]
    fn test_outside_variant_requires_sentinel() {
        let err = click(5, ContainerAction::Drop(DropItemAction::LeftClickOutsideNotHolding))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        let err = click(-999, ContainerAction::Drop(DropItemAction::DropFromSelected)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(click(-999, ContainerAction::Drop(DropItemAction::LeftClickOutsideNotHolding)).is_ok());
        // The sentinel only matters for drops
        assert!(click(-999, ContainerAction::Click(ClickItemAction::LeftClick)).is_ok());
    }

    #[test]
    fn test_offset_only_applies_to_drops() {
        let packet = decode(wire(3, 2, 5)).unwrap();
        assert_eq!(
            packet.action(),
            ContainerAction::Spread(SpreadItemAction::LeftMouseEndDrag)
        );
        // Raw 2 with a drop on a real slot becomes code 4, which doesn't exist
        let err = decode(wire(3, 2, 4)).unwrap_err();
        assert!(matches!(
            err,
            CodecError::UnknownCode {
                domain: "drop item action",
                code: 4
            }
        ));
    }

    #[test]
    fn test_unknown_mode() {
        let err = decode(wire(3, 0, 255)).unwrap_err();
        assert!(matches!(
            err,
            CodecError::UnknownCode {
                domain: "container action type",
                code: 255
            }
        ));
    }

    #[test]
    fn test_changed_slots_sorted_on_wire() {
        let mut changed = BTreeMap::new();
        changed.insert(9, None);
        changed.insert(
            2,
            Some(ItemStack::new(1, 64).with_nbt(nbt_compound! { "Damage" => NbtValue::Int(1) })),
        );
        let packet = ContainerClick::new(
            1,
            7,
            2,
            ContainerAction::Click(ClickItemAction::RightClick),
            changed,
            Some(ItemStack::new(5, 1)),
        )
        .unwrap();
        let mut bytes = encode(&packet);
        // container, state id, slot, param, mode, count, first changed slot
        assert_eq!(&bytes[..9], &[1, 7, 0, 2, 1, 0, 2, 0, 2]);
        let decoded = ContainerClick::decode(&mut bytes, &CodecContext::default()).unwrap();
        assert_eq!(decoded, packet);
        assert_eq!(decoded.carried_item(), Some(&ItemStack::new(5, 1)));
    }

    #[test]
    fn test_changed_slot_limit() {
        let mut buf = BytesMut::new();
        buf.put_i8(0);
        write_varint(&mut buf, 0);
        buf.put_i16(0);
        buf.put_u8(0);
        buf.put_u8(0);
        write_varint(&mut buf, 129);
        let err = ContainerClick::decode(&mut buf, &CodecContext::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
    }
}
