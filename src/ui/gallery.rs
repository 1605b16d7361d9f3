use std::collections::HashMap;

use iced::alignment::{Horizontal, Vertical};
use iced::keyboard::{self, key::Named, Key};
use iced::widget::image::Handle;
use iced::widget::{
    button, column, container, horizontal_space, image, mouse_area, opaque, row, scrollable,
    text, Image, Space, Stack,
};
use iced::{ContentFit, Element, Length, Padding, Subscription};

use crate::state::catalog::Catalog;
use crate::state::data::Shoot;
use crate::state::viewer::{ViewerEvent, ViewerState};
use crate::ui::style;
use crate::Message;

/// Everything needed to draw one frame of the portfolio
pub struct Gallery<'a> {
    pub catalog: &'a Catalog,
    pub viewer: &'a ViewerState,
    /// Images already read into memory, by address
    pub warmed: &'a HashMap<String, Handle>,
    pub menu_width: f32,
    pub loading: bool,
    /// Reason shown on the empty screen (e.g., a scan error)
    pub notice: Option<&'a str>,
}

impl<'a> Gallery<'a> {
    pub fn view(self) -> Element<'a, Message> {
        if self.catalog.is_empty() {
            return self.no_content();
        }

        let mut layers: Vec<Element<'a, Message>> = vec![container(Space::new(
            Length::Fill,
            Length::Fill,
        ))
        .style(style::backdrop)
        .into()];

        let shoot = self.viewer.active_shoot(self.catalog);
        if self.shows_navigation() {
            if let Some(photo) = self.photo() {
                layers.push(photo);
                layers.push(nav_controls());
            }
        }
        if let Some(shoot) = shoot.filter(|shoot| !shoot.is_empty()) {
            layers.push(counter(self.viewer.current_index(), shoot.len()));
        }
        if let Some(shoot) = shoot {
            layers.push(caption(shoot));
        }
        if self.viewer.is_menu_open() {
            layers.push(self.menu());
        }
        layers.push(menu_toggle());

        Stack::with_children(layers)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    /// Photo, arrows and click-to-advance only exist while an image is on screen
    pub fn shows_navigation(&self) -> bool {
        self.viewer.current_image(self.catalog).is_some()
    }

    /// The current photo; clicking it advances
    fn photo(&self) -> Option<Element<'a, Message>> {
        let record = self.viewer.current_image(self.catalog)?;
        let handle = self
            .warmed
            .get(&record.url)
            .cloned()
            .unwrap_or_else(|| Handle::from_path(&record.url));

        Some(
            container(mouse_area(picture(handle)).on_press(Message::Viewer(ViewerEvent::Next)))
                .width(Length::Fill)
                .height(Length::Fill)
                .padding(40)
                .center(Length::Fill)
                .into(),
        )
    }

    /// Left-side panel listing every shoot
    fn menu(&self) -> Element<'a, Message> {
        let active = self.viewer.active_shoot_name();
        let entries = self.catalog.shoots().iter().map(|shoot| -> Element<'a, Message> {
            let is_active = active == Some(shoot.name());
            let entry = button(text(shoot.display_name()).size(18))
                .width(Length::Fill)
                .padding([15, 0])
                .on_press(Message::Viewer(ViewerEvent::SelectShoot(
                    shoot.name().to_string(),
                )))
                .style(style::menu_item(is_active));

            let divider = container(Space::with_height(1))
                .width(Length::Fill)
                .height(1)
                .style(style::divider);

            column![entry, divider].into()
        });

        // The panel swallows clicks so they never reach the photo underneath
        opaque(
            container(scrollable(column(entries)))
                .width(self.menu_width)
                .height(Length::Fill)
                .padding(Padding {
                    top: 80.0,
                    right: 20.0,
                    bottom: 20.0,
                    left: 20.0,
                })
                .style(style::menu_panel),
        )
    }

    fn no_content(&self) -> Element<'a, Message> {
        let headline = if self.loading {
            "Loading photos..."
        } else {
            "No photos found"
        };

        let mut content = column![text(headline).size(24)]
            .spacing(20)
            .align_x(Horizontal::Center);
        if let Some(notice) = self.notice {
            content = content.push(text(notice).size(14));
        }
        if !self.loading {
            content = content.push(
                button("Choose Folder")
                    .on_press(Message::PickFolder)
                    .padding(10)
                    .style(style::plain),
            );
        }

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .center(Length::Fill)
            .style(style::backdrop)
            .into()
    }
}

/// Fitted to the window but sized to its own content, so only clicks on the
/// picture itself (not the letterbox) land on it
fn picture(handle: Handle) -> Image<Handle> {
    image(handle).content_fit(ContentFit::Contain)
}

fn nav_controls<'a>() -> Element<'a, Message> {
    let arrow = |label: &'static str, event: ViewerEvent| {
        button(text(label).size(24))
            .padding(20)
            .on_press(Message::Viewer(event))
            .style(style::nav_arrow)
    };

    container(
        row![
            arrow("‹", ViewerEvent::Previous),
            horizontal_space(),
            arrow("›", ViewerEvent::Next),
        ]
        .align_y(Vertical::Center),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .padding([0, 20])
    .align_y(Vertical::Center)
    .into()
}

fn menu_toggle<'a>() -> Element<'a, Message> {
    container(
        button(text("☰ SHOOTS").size(18))
            .padding(15)
            .on_press(Message::Viewer(ViewerEvent::ToggleMenu))
            .style(style::menu_toggle),
    )
    .padding(20)
    .into()
}

/// Bottom-centered shoot name
fn caption<'a>(shoot: &Shoot) -> Element<'a, Message> {
    container(
        container(text(shoot.display_name()).size(24))
            .padding([10, 20])
            .style(style::badge),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .padding(30)
    .align_x(Horizontal::Center)
    .align_y(Vertical::Bottom)
    .into()
}

/// Top-right "position / total"
fn counter<'a>(index: usize, total: usize) -> Element<'a, Message> {
    container(
        container(text(counter_label(index, total)).size(16))
            .padding([10, 15])
            .style(style::badge),
    )
    .width(Length::Fill)
    .padding(20)
    .align_x(Horizontal::Right)
    .into()
}

pub fn counter_label(index: usize, total: usize) -> String {
    format!("{} / {}", index + 1, total)
}

/// Arrow keys page through the active shoot
pub fn key_event(key: &Key) -> Option<ViewerEvent> {
    match key {
        Key::Named(Named::ArrowRight) => Some(ViewerEvent::Next),
        Key::Named(Named::ArrowLeft) => Some(ViewerEvent::Previous),
        _ => None,
    }
}

/// Keyboard listener; only subscribed while there is something to browse
pub fn keyboard_navigation() -> Subscription<Message> {
    keyboard::on_key_press(|key, _modifiers| key_event(&key).map(Message::Viewer))
}
