use std::time::Instant;

use dialclock_core::clock::render;
use iced::{
    Element, Length, Theme,
    widget::{container, text},
};

use super::state::{App, Message};
use crate::views;

impl App {
    pub fn title(&self) -> String {
        String::from("Dialclock")
    }

    pub fn theme(&self) -> Theme {
        self.theme.clone()
    }

    pub fn scale_factor(&self) -> f64 {
        self.config.appearance.scale_factor
    }

    pub fn view(&self) -> Element<'_, Message> {
        let presentation = self
            .clock
            .as_ref()
            .and_then(|host| host.widget())
            .and_then(|widget| render(widget, Instant::now()));

        match presentation {
            Some(presentation) => {
                views::clock(presentation, &self.config.appearance).map(Message::Clock)
            }
            None => container(text("Clock unavailable"))
                .center_x(Length::Fill)
                .center_y(Length::Fill)
                .into(),
        }
    }
}
