//! Dark theme styling
//!
//! Everything sits on black; overlays use translucent black so the photo
//! stays visible behind them.

use iced::widget::{button, container};
use iced::{Background, Border, Color, Theme};

const OVERLAY: Color = Color::from_rgba(0.0, 0.0, 0.0, 0.7);
const MENU_BACKGROUND: Color = Color::from_rgba(0.0, 0.0, 0.0, 0.95);
const DIVIDER: Color = Color::from_rgb(0.2, 0.2, 0.2);
const ACTIVE_TEXT: Color = Color::from_rgb(0.8, 0.8, 0.8);
const HIGHLIGHT: Color = Color::from_rgba(1.0, 1.0, 1.0, 0.1);

fn translucent(alpha: f32) -> Option<Background> {
    Some(Background::Color(Color::from_rgba(0.0, 0.0, 0.0, alpha)))
}

/// Full-window black backdrop
pub fn backdrop(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color::BLACK)),
        text_color: Some(Color::WHITE),
        ..container::Style::default()
    }
}

/// Sliding shoot panel
pub fn menu_panel(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(MENU_BACKGROUND)),
        text_color: Some(Color::WHITE),
        ..container::Style::default()
    }
}

/// Caption and counter badges
pub fn badge(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(OVERLAY)),
        text_color: Some(Color::WHITE),
        border: Border {
            radius: 5.0.into(),
            ..Border::default()
        },
        ..container::Style::default()
    }
}

/// The "☰ SHOOTS" toggle
pub fn menu_toggle(_theme: &Theme, status: button::Status) -> button::Style {
    let alpha = match status {
        button::Status::Hovered | button::Status::Pressed => 0.9,
        _ => 0.8,
    };
    button::Style {
        background: translucent(alpha),
        text_color: Color::WHITE,
        border: Border {
            radius: 5.0.into(),
            ..Border::default()
        },
        ..button::Style::default()
    }
}

/// Previous / next arrows over the photo
pub fn nav_arrow(_theme: &Theme, status: button::Status) -> button::Style {
    let alpha = match status {
        button::Status::Hovered | button::Status::Pressed => 0.8,
        _ => 0.5,
    };
    button::Style {
        background: translucent(alpha),
        text_color: Color::WHITE,
        ..button::Style::default()
    }
}

/// One entry of the shoot list; the active shoot is dimmed and highlighted
pub fn menu_item(active: bool) -> impl Fn(&Theme, button::Status) -> button::Style {
    move |_theme: &Theme, status: button::Status| {
        let highlighted = active || matches!(status, button::Status::Hovered);
        button::Style {
            background: highlighted.then_some(Background::Color(HIGHLIGHT)),
            text_color: if active { ACTIVE_TEXT } else { Color::WHITE },
            ..button::Style::default()
        }
    }
}

/// Thin line between menu entries
pub fn divider(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(DIVIDER)),
        ..container::Style::default()
    }
}

/// Plain button used on the empty screen
pub fn plain(_theme: &Theme, status: button::Status) -> button::Style {
    let background = match status {
        button::Status::Hovered | button::Status::Pressed => HIGHLIGHT,
        _ => Color::TRANSPARENT,
    };
    button::Style {
        background: Some(Background::Color(background)),
        text_color: Color::WHITE,
        border: Border {
            color: Color::WHITE,
            width: 1.0,
            radius: 5.0.into(),
        },
        ..button::Style::default()
    }
}
