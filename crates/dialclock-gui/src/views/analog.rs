use dialclock_core::clock::{AnalogFace, Control, Message};
use iced::{
    Degrees, Element, Length, Pixels, Point, Rectangle, Renderer, Theme, Vector,
    alignment::{Horizontal, Vertical},
    event, mouse,
    widget::canvas::{self, Canvas, Frame, Geometry, LineCap, Path, Stroke, Text},
};

use super::{Colors, faded};

/// Analog face drawn on a canvas sized to the dial.
pub fn face<'a>(face: AnalogFace, colors: &Colors, region_opacity: f32) -> Element<'a, Message> {
    let size = face.layout.size;
    let opacity = face.opacity * region_opacity;

    Canvas::new(Dial {
        face,
        colors: *colors,
        opacity,
    })
    .width(Length::Fixed(size))
    .height(Length::Fixed(size))
    .into()
}

#[derive(Debug)]
struct Dial {
    face:    AnalogFace,
    colors:  Colors,
    opacity: f32,
}

impl Dial {
    fn color(&self, color: iced::Color) -> iced::Color {
        faded(color, self.opacity)
    }
}

impl canvas::Program<Message> for Dial {
    type State = ();

    fn update(
        &self,
        _state: &mut Self::State,
        event: canvas::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> (event::Status, Option<Message>) {
        match event {
            canvas::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left))
                if cursor.is_over(bounds) =>
            {
                (event::Status::Captured, Some(Message::Focus(Control::Dial)))
            }
            _ => (event::Status::Ignored, None),
        }
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        let center = frame.center();
        let radius = self.face.layout.radius;

        frame.fill(&Path::circle(center, radius), self.color(self.colors.face));

        if self.face.focused {
            frame.stroke(
                &Path::circle(center, (radius - 1.0).max(0.0)),
                Stroke::default()
                    .with_width(2.0)
                    .with_color(self.color(self.colors.accent)),
            );
        }

        for numeral in &self.face.layout.numerals {
            frame.fill_text(Text {
                content: numeral.value.to_string(),
                position: Point::new(center.x + numeral.x, center.y + numeral.y),
                color: self.color(self.colors.face_text),
                size: Pixels((radius * 0.14).max(8.0)),
                horizontal_alignment: Horizontal::Center,
                vertical_alignment: Vertical::Center,
                ..Text::default()
            });
        }

        frame.translate(Vector::new(center.x, center.y));

        let hands = self.face.hands;
        let hand = self.color(self.colors.hand);
        draw_hand(&mut frame, hands.hour, radius * 0.5, hand_stroke(radius / 20.0, hand));
        draw_hand(&mut frame, hands.minute, radius * 0.75, hand_stroke(radius / 30.0, hand));
        draw_hand(
            &mut frame,
            hands.second,
            radius * 0.85,
            hand_stroke(radius / 80.0, self.color(self.colors.second_hand)),
        );

        frame.fill(
            &Path::circle(Point::ORIGIN, (radius / 25.0).max(2.0)),
            self.color(self.colors.second_hand),
        );

        vec![frame.into_geometry()]
    }
}

fn hand_stroke<'a>(width: f32, color: iced::Color) -> Stroke<'a> {
    Stroke::default()
        .with_width(width.max(1.0))
        .with_color(color)
        .with_line_cap(LineCap::Round)
}

/// Draws a hand `angle` degrees clockwise from three o'clock.
fn draw_hand(frame: &mut Frame, angle: f32, length: f32, stroke: Stroke<'_>) {
    frame.with_save(|frame| {
        frame.rotate(Degrees(angle));
        frame.stroke(&Path::line(Point::ORIGIN, Point::new(length, 0.0)), stroke);
    });
}
