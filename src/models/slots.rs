use super::request::{Button, button_id};

/// Number of button positions a presentation surface exposes
pub const MAX_SLOTS: usize = 3;

/// Positional role of a slot, in list order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotRole {
    Primary,
    Secondary,
    Tertiary,
}

impl SlotRole {
    pub fn index(self) -> usize {
        match self {
            SlotRole::Primary => 0,
            SlotRole::Secondary => 1,
            SlotRole::Tertiary => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(SlotRole::Primary),
            1 => Some(SlotRole::Secondary),
            2 => Some(SlotRole::Tertiary),
            _ => None,
        }
    }
}

/// Which button the platform reports as pressed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotSignal {
    Primary,
    Secondary,
    Tertiary,
    /// A platform code that does not correspond to any slot
    Unmapped(i32),
}

impl From<SlotRole> for SlotSignal {
    fn from(role: SlotRole) -> Self {
        match role {
            SlotRole::Primary => SlotSignal::Primary,
            SlotRole::Secondary => SlotSignal::Secondary,
            SlotRole::Tertiary => SlotSignal::Tertiary,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub role: SlotRole,
    pub label: String,
    pub button_id: i64,
}

/// Ordered table of at most [`MAX_SLOTS`] buttons.
///
/// Built from a request's button list in order; anything past the third
/// button is not representable and never enters the table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotTable {
    slots: Vec<Slot>,
}

impl SlotTable {
    pub fn from_buttons(buttons: &[Button]) -> Self {
        let slots = buttons
            .iter()
            .take(MAX_SLOTS)
            .enumerate()
            .filter_map(|(index, button)| {
                SlotRole::from_index(index).map(|role| Slot {
                    role,
                    label: button.label.clone(),
                    button_id: button.id,
                })
            })
            .collect();

        Self { slots }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Slot> {
        self.slots.iter()
    }

    pub fn get(&self, role: SlotRole) -> Option<&Slot> {
        self.slots.get(role.index())
    }

    /// Map a platform signal to a slot index.
    ///
    /// Secondary and tertiary signals past the supplied count clamp to the last
    /// slot. Returns `None` ("no selection") for unmapped signals or an empty table.
    pub fn map_signal(&self, signal: SlotSignal) -> Option<usize> {
        let count = self.slots.len();
        if count == 0 {
            return None;
        }

        match signal {
            SlotSignal::Primary => Some(0),
            SlotSignal::Secondary => Some(if count > 1 { 1 } else { 0 }),
            SlotSignal::Tertiary => Some(if count > 2 { 2 } else { count - 1 }),
            SlotSignal::Unmapped(_) => None,
        }
    }

    /// Button id at `index`, or [`button_id::NONE`] when out of range
    pub fn resolve_id(&self, index: usize) -> i64 {
        self.slots
            .get(index)
            .map(|slot| slot.button_id)
            .unwrap_or(button_id::NONE)
    }
}
