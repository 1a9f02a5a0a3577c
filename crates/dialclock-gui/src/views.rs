//! Clock view layer: turns a [`Presentation`] into iced widgets.

use dialclock_core::clock::{Message, Presentation};
use dialclock_proto::config::Appearance;
use iced::{
    Alignment, Background, Border, Color, Element, Length, Theme,
    widget::{Space, checkbox, column, container},
};

pub mod analog;
pub mod digital;

/// Colors resolved from the appearance configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Colors {
    pub background:  Color,
    pub face:        Color,
    pub face_text:   Color,
    pub text:        Color,
    pub accent:      Color,
    pub hand:        Color,
    pub second_hand: Color,
}

impl From<&Appearance> for Colors {
    fn from(appearance: &Appearance) -> Self {
        let text = appearance.text_color.get_base();

        Self {
            background:  appearance.background_color.get_base(),
            face:        appearance.face_color.get_base(),
            face_text:   appearance.face_color.get_text().unwrap_or(text),
            text,
            accent:      appearance.accent_color.get_base(),
            hand:        appearance.hand_color.get_base(),
            second_hand: appearance.second_hand_color.get_base(),
        }
    }
}

pub fn faded(color: Color, opacity: f32) -> Color {
    Color {
        a: color.a * opacity.clamp(0.0, 1.0),
        ..color
    }
}

/// Wraps `content` in a border that lights up while it has keyboard focus.
pub fn focus_ring<'a>(
    content: impl Into<Element<'a, Message>>,
    focused: bool,
    accent: Color,
) -> Element<'a, Message> {
    let border_color = if focused { accent } else { Color::TRANSPARENT };

    container(content)
        .padding(4)
        .style(move |_: &Theme| container::Style {
            border: Border {
                color:  border_color,
                width:  2.0,
                radius: 6.0.into(),
            },
            ..container::Style::default()
        })
        .into()
}

/// Renders the whole clock region.
pub fn clock<'a>(presentation: Presentation, appearance: &Appearance) -> Element<'a, Message> {
    let colors = Colors::from(appearance);
    let toggle = presentation.mode_toggle;

    let mode_toggle = focus_ring(
        checkbox(toggle.label, toggle.checked).on_toggle(|_| Message::ToggleMode),
        toggle.focused,
        colors.accent,
    );

    let face: Element<'a, Message> = match (presentation.digital, presentation.analog) {
        (Some(face), _) => digital::face(face, &colors, presentation.opacity),
        (None, Some(face)) => analog::face(face, &colors, presentation.opacity),
        (None, None) => Space::new(Length::Fill, Length::Fill).into(),
    };

    let background = colors.background;

    container(
        column![face, mode_toggle]
            .spacing(16)
            .align_x(Alignment::Center),
    )
    .center_x(Length::Fill)
    .center_y(Length::Fill)
    .padding(16)
    .style(move |_: &Theme| container::Style {
        background: Some(Background::Color(background)),
        ..container::Style::default()
    })
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fading_scales_alpha_only() {
        let color = Color::from_rgba(0.2, 0.4, 0.6, 0.8);
        let faded = faded(color, 0.5);

        assert_eq!(faded.r, color.r);
        assert!((faded.a - 0.4).abs() < 1e-6);
        assert_eq!(super::faded(color, 3.0).a, color.a);
    }

    #[test]
    fn face_text_defaults_to_text_color() {
        let appearance = Appearance::default();
        let colors = Colors::from(&appearance);

        assert_eq!(colors.face_text, appearance.face_color.get_text().unwrap_or(colors.text));
        assert_eq!(colors.accent, appearance.accent_color.get_base());
    }
}
