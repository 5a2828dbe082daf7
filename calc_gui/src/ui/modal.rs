//! Settings overlay
//!
//! A dimmed backdrop plus a centered box listing the dark theme variants.

use iced::widget::{button, column, container, text, Space};
use iced::{Element, Length, Padding};

use calc_core::theme::{ThemeMode, ThemeVariant};

use crate::app::Message;

/// Semi-transparent overlay; clicking it closes the settings box.
pub fn view_backdrop() -> Element<'static, Message> {
    button(Space::new())
        .on_press(Message::ToggleSettings)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(|_, _| {
            iced::widget::button::Style::default()
                .with_background(iced::Color::from_rgba(0.0, 0.0, 0.0, 0.5))
        })
        .into()
}

pub fn view_settings(mode: ThemeMode, selected: ThemeVariant) -> Element<'static, Message> {
    let note = match mode {
        ThemeMode::Dark => "Applies immediately.",
        ThemeMode::Light => "Takes effect in dark mode.",
    };

    let mut variants = column![].spacing(4);
    for variant in ThemeVariant::ALL {
        let label = if variant == selected {
            format!("✓ {}", variant.label())
        } else {
            variant.label().to_string()
        };
        variants = variants.push(
            button(text(label).size(12))
                .on_press(Message::SelectVariant(variant))
                .padding(Padding::from([6, 12]))
                .width(Length::Fill)
                .style(if variant == selected { button::primary } else { button::secondary }),
        );
    }

    let content = column![
        text("Dark Theme").size(18),
        Space::new().height(4),
        text(note).size(11),
        Space::new().height(12),
        variants,
        Space::new().height(16),
        container(
            button(text("Close").size(11))
                .on_press(Message::ToggleSettings)
                .padding(Padding::from([6, 16]))
                .style(button::secondary)
        )
        .align_x(iced::alignment::Horizontal::Right)
        .width(Length::Fill),
    ]
    .width(Length::Fixed(280.0));

    let modal_box = container(content).padding(20).style(container::bordered_box);

    container(modal_box)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(iced::alignment::Horizontal::Center)
        .align_y(iced::alignment::Vertical::Center)
        .into()
}
