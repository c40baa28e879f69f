//! Hardware display patterns (names and values on text displays and LCDs)

use crate::event::{EventType, Function, MidiEvent};
use crate::midi::SenderPattern;

/// Capacity of a text display in characters
const STRING_CAPACITY: i32 = 16;
/// Capacity of a color LCD in characters
const LCD_CAPACITY: i32 = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Display {
    NameString,
    NameLcd,
    ValueString,
    ValueLcd,
}

impl Display {
    fn function(self) -> Function {
        match self {
            Display::NameString | Display::NameLcd => Function::Name,
            Display::ValueString | Display::ValueLcd => Function::Value,
        }
    }

    fn is_lcd(self) -> bool {
        matches!(self, Display::NameLcd | Display::ValueLcd)
    }
}

/// Element id in `number`, addressed characters in `low..=high`, capacity in
/// `max` and the LCD color in `min`
pub(super) fn event(pattern: &SenderPattern, display: Display) -> MidiEvent {
    let event = MidiEvent::send(
        pattern.device_id,
        pattern.channel,
        display.function(),
        EventType::LcdSysex,
    )
    .with_number(pattern.key)
    .with_range(pattern.start, pattern.start.saturating_add(pattern.length - 1));

    if display.is_lcd() {
        event.with_bounds(pattern.low_value, LCD_CAPACITY)
    } else {
        event.with_max(STRING_CAPACITY)
    }
}
