use dialclock_core::clock::{DigitalFace, Message};
use iced::{
    Alignment, Element, Theme,
    widget::{button, column, text},
};

use super::{Colors, faded, focus_ring};

/// Digital face: time, date and the 12/24-hour toggle.
pub fn face<'a>(face: DigitalFace, colors: &Colors, region_opacity: f32) -> Element<'a, Message> {
    let opacity = face.opacity * region_opacity;
    let toggle = face.format_toggle;

    let style: fn(&Theme, button::Status) -> button::Style = if toggle.pressed {
        button::primary
    } else {
        button::secondary
    };

    let format_toggle = focus_ring(
        button(text(toggle.label).size(14))
            .on_press(Message::ToggleTimeFormat)
            .style(style),
        toggle.focused,
        colors.accent,
    );

    column![
        text(face.time).size(56).color(faded(colors.text, opacity)),
        text(face.date).size(18).color(faded(colors.text, opacity * 0.8)),
        format_toggle,
    ]
    .spacing(12)
    .align_x(Alignment::Center)
    .into()
}
