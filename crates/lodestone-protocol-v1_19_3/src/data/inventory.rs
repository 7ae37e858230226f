use lodestone_protocol_core::{magic_values, CodecResult, MagicValue};

magic_values! {
    /// Mode of a container click.
    pub enum ContainerActionType: "container action type" {
        ClickItem = 0,
        ShiftClickItem = 1,
        MoveToHotbarSlot = 2,
        CreativeGrabMaxStack = 3,
        DropItem = 4,
        SpreadItem = 5,
        FillStack = 6,
    }
}

magic_values! {
    pub enum ClickItemAction: "click item action" {
        LeftClick = 0,
        RightClick = 1,
    }
}

magic_values! {
    pub enum ShiftClickItemAction: "shift click item action" {
        LeftClick = 0,
        RightClick = 1,
    }
}

magic_values! {
    pub enum MoveToHotbarAction: "move to hotbar action" {
        Slot1 = 0,
        Slot2 = 1,
        Slot3 = 2,
        Slot4 = 3,
        Slot5 = 4,
        Slot6 = 5,
        Slot7 = 6,
        Slot8 = 7,
        Slot9 = 8,
        OffHand = 40,
    }
}

magic_values! {
    pub enum CreativeGrabAction: "creative grab action" {
        Grab = 2,
    }
}

magic_values! {
    /// Drop codes 0 and 1 only happen outside any slot with nothing held;
    /// 2 and 3 share the same wire bytes but target a real slot.
    pub enum DropItemAction: "drop item action" {
        LeftClickOutsideNotHolding = 0,
        RightClickOutsideNotHolding = 1,
        DropFromSelected = 2,
        DropSelectedStack = 3,
    }
}

magic_values! {
    pub enum SpreadItemAction: "spread item action" {
        LeftMouseBeginDrag = 0,
        LeftMouseAddSlot = 1,
        LeftMouseEndDrag = 2,
        RightMouseBeginDrag = 4,
        RightMouseAddSlot = 5,
        RightMouseEndDrag = 6,
        MiddleMouseBeginDrag = 8,
        MiddleMouseAddSlot = 9,
        MiddleMouseEndDrag = 10,
    }
}

magic_values! {
    pub enum FillStackAction: "fill stack action" {
        Fill = 0,
    }
}

impl DropItemAction {
    pub fn is_outside_not_holding(self) -> bool {
        matches!(
            self,
            DropItemAction::LeftClickOutsideNotHolding | DropItemAction::RightClickOutsideNotHolding
        )
    }
}

/// The click mode together with its mode-specific button.
///
/// The button byte on the wire has no meaning of its own; which table
/// interprets it depends on the mode, so each mode carries its own type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerAction {
    Click(ClickItemAction),
    ShiftClick(ShiftClickItemAction),
    MoveToHotbar(MoveToHotbarAction),
    CreativeGrab(CreativeGrabAction),
    Drop(DropItemAction),
    Spread(SpreadItemAction),
    FillStack(FillStackAction),
}

impl ContainerAction {
    pub fn action_type(self) -> ContainerActionType {
        match self {
            ContainerAction::Click(_) => ContainerActionType::ClickItem,
            ContainerAction::ShiftClick(_) => ContainerActionType::ShiftClickItem,
            ContainerAction::MoveToHotbar(_) => ContainerActionType::MoveToHotbarSlot,
            ContainerAction::CreativeGrab(_) => ContainerActionType::CreativeGrabMaxStack,
            ContainerAction::Drop(_) => ContainerActionType::DropItem,
            ContainerAction::Spread(_) => ContainerActionType::SpreadItem,
            ContainerAction::FillStack(_) => ContainerActionType::FillStack,
        }
    }

    /// Code of the button within its own domain (before any wire adjustment).
    pub fn param_code(self) -> i32 {
        match self {
            ContainerAction::Click(action) => action.code(),
            ContainerAction::ShiftClick(action) => action.code(),
            ContainerAction::MoveToHotbar(action) => action.code(),
            ContainerAction::CreativeGrab(action) => action.code(),
            ContainerAction::Drop(action) => action.code(),
            ContainerAction::Spread(action) => action.code(),
            ContainerAction::FillStack(action) => action.code(),
        }
    }

    /// Interpret a button code in the domain selected by `action_type`.
    pub fn from_param(action_type: ContainerActionType, param: i32) -> CodecResult<Self> {
        Ok(match action_type {
            ContainerActionType::ClickItem => {
                ContainerAction::Click(ClickItemAction::from_code(param)?)
            }
            ContainerActionType::ShiftClickItem => {
                ContainerAction::ShiftClick(ShiftClickItemAction::from_code(param)?)
            }
            ContainerActionType::MoveToHotbarSlot => {
                ContainerAction::MoveToHotbar(MoveToHotbarAction::from_code(param)?)
            }
            ContainerActionType::CreativeGrabMaxStack => {
                ContainerAction::CreativeGrab(CreativeGrabAction::from_code(param)?)
            }
            ContainerActionType::DropItem => {
                ContainerAction::Drop(DropItemAction::from_code(param)?)
            }
            ContainerActionType::SpreadItem => {
                ContainerAction::Spread(SpreadItemAction::from_code(param)?)
            }
            ContainerActionType::FillStack => {
                ContainerAction::FillStack(FillStackAction::from_code(param)?)
            }
        })
    }

    /// Every action in every domain.
    pub fn all() -> Vec<ContainerAction> {
        let mut all = Vec::new();
        all.extend(ClickItemAction::ALL.iter().copied().map(ContainerAction::Click));
        all.extend(
            ShiftClickItemAction::ALL
                .iter()
                .copied()
                .map(ContainerAction::ShiftClick),
        );
        all.extend(
            MoveToHotbarAction::ALL
                .iter()
                .copied()
                .map(ContainerAction::MoveToHotbar),
        );
        all.extend(
            CreativeGrabAction::ALL
                .iter()
                .copied()
                .map(ContainerAction::CreativeGrab),
        );
        all.extend(DropItemAction::ALL.iter().copied().map(ContainerAction::Drop));
        all.extend(SpreadItemAction::ALL.iter().copied().map(ContainerAction::Spread));
        all.extend(FillStackAction::ALL.iter().copied().map(ContainerAction::FillStack));
        all
    }
}
