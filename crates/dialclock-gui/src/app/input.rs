//! Translation of toolkit input events into widget input.

use dialclock_core::clock::{KeyInput, TouchInput, TouchPoint};
use iced::{
    Point,
    keyboard::{Key, Modifiers, key::Named},
    touch,
};

pub(super) fn key_input(key: Key, modifiers: Modifiers) -> Option<KeyInput> {
    match key.as_ref() {
        Key::Named(Named::Tab) => Some(KeyInput::Tab {
            shift: modifiers.shift(),
        }),
        Key::Named(Named::Enter | Named::Space) => Some(KeyInput::Activate),
        Key::Character(_) if modifiers.control() || modifiers.alt() || modifiers.logo() => None,
        Key::Character(chars) => chars.chars().next().map(KeyInput::Character),
        _ => None,
    }
}

pub(super) fn touch_input(event: touch::Event) -> TouchInput {
    match event {
        touch::Event::FingerPressed { id, position } => TouchInput::Pressed {
            finger:   id.0,
            position: touch_point(position),
        },
        touch::Event::FingerMoved { id, position } => TouchInput::Moved {
            finger:   id.0,
            position: touch_point(position),
        },
        touch::Event::FingerLifted { id, .. } => TouchInput::Lifted { finger: id.0 },
        touch::Event::FingerLost { id, .. } => TouchInput::Lost { finger: id.0 },
    }
}

fn touch_point(position: Point) -> TouchPoint {
    TouchPoint {
        x: position.x,
        y: position.y,
    }
}
