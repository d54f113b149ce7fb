//! Button styling for the cadence editor chrome
//!
//! Mode selectors are toggle buttons: the active mode sits "pressed in"
//! until another mode is chosen. Transport buttons are momentary.

use iced::widget::button::{Status, Style};
use iced::{Background, Border, Color, Shadow, Vector};

/// Default button background color
pub const DEFAULT_BG: Color = Color::from_rgb(0.22, 0.22, 0.25);

/// Active/selected button color
pub const ACTIVE_BG: Color = Color::from_rgb(0.3, 0.6, 0.9);

/// Lighten a color by a factor (0.0-1.0)
fn lighten(color: Color, factor: f32) -> Color {
    Color::from_rgb(
        (color.r + factor).min(1.0),
        (color.g + factor).min(1.0),
        (color.b + factor).min(1.0),
    )
}

/// Darken a color by a factor (0.0-1.0)
fn darken(color: Color, factor: f32) -> Color {
    Color::from_rgb(
        (color.r * (1.0 - factor)).max(0.0),
        (color.g * (1.0 - factor)).max(0.0),
        (color.b * (1.0 - factor)).max(0.0),
    )
}

fn raised_style(base_color: Color) -> Style {
    Style {
        background: Some(Background::Color(base_color)),
        text_color: Color::WHITE,
        border: Border {
            color: lighten(base_color, 0.1),
            width: 1.0,
            radius: 4.0.into(),
        },
        shadow: Shadow {
            color: Color::from_rgba(0.0, 0.0, 0.0, 0.4),
            offset: Vector::new(1.5, 1.5),
            blur_radius: 2.5,
        },
        snap: false,
    }
}

fn pressed_style(base_color: Color) -> Style {
    Style {
        background: Some(Background::Color(darken(base_color, 0.15))),
        text_color: Color::WHITE,
        border: Border {
            color: darken(base_color, 0.2),
            width: 1.0,
            radius: 4.0.into(),
        },
        shadow: Shadow {
            color: Color::from_rgba(0.0, 0.0, 0.0, 0.2),
            offset: Vector::new(0.5, 0.5),
            blur_radius: 1.0,
        },
        snap: false,
    }
}

fn disabled_style() -> Style {
    Style {
        background: Some(Background::Color(Color::from_rgb(0.2, 0.2, 0.2))),
        text_color: Color::from_rgb(0.5, 0.5, 0.5),
        border: Border {
            color: Color::TRANSPARENT,
            width: 0.0,
            radius: 4.0.into(),
        },
        shadow: Shadow::default(),
        snap: false,
    }
}

/// Style function for momentary buttons (transport, export)
///
/// Use with `.style(|_theme, status| press_release_style(status, base_color))`
pub fn press_release_style(status: Status, base_color: Color) -> Style {
    match status {
        Status::Active => raised_style(base_color),
        Status::Hovered => raised_style(lighten(base_color, 0.08)),
        Status::Pressed => pressed_style(base_color),
        Status::Disabled => disabled_style(),
    }
}

/// Style function for toggle buttons (the mode selector)
///
/// Use with `.style(|_theme, status| toggle_style(status, is_active))`
pub fn toggle_style(status: Status, is_active: bool) -> Style {
    if is_active {
        match status {
            Status::Active => pressed_style(ACTIVE_BG),
            Status::Hovered => pressed_style(lighten(ACTIVE_BG, 0.08)),
            Status::Pressed => pressed_style(darken(ACTIVE_BG, 0.1)),
            Status::Disabled => disabled_style(),
        }
    } else {
        match status {
            Status::Active => raised_style(DEFAULT_BG),
            Status::Hovered => raised_style(lighten(DEFAULT_BG, 0.08)),
            Status::Pressed => pressed_style(DEFAULT_BG),
            Status::Disabled => disabled_style(),
        }
    }
}
