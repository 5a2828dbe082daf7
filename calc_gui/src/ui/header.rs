//! Header bar

use iced::widget::{button, row, text, Space};
use iced::{Alignment, Element, Length, Padding};

use calc_core::app::APP_TITLE;
use calc_core::theme::ThemeMode;

use crate::app::Message;

/// Title on the left, theme toggle and settings button on the right.
pub fn view_header(mode: ThemeMode, settings_open: bool) -> Element<'static, Message> {
    // Shows the mode a press switches to.
    let theme_label = match mode {
        ThemeMode::Light => "🌙 Dark",
        ThemeMode::Dark => "☀️ Light",
    };
    let theme_button = button(text(theme_label).size(11))
        .on_press(Message::ToggleTheme)
        .padding(Padding::from([4, 8]))
        .style(button::secondary);

    let settings_label = if settings_open { "Settings ▲" } else { "Settings ▼" };
    let settings_button = button(text(settings_label).size(11))
        .on_press(Message::ToggleSettings)
        .padding(Padding::from([4, 8]))
        .style(if settings_open { button::primary } else { button::secondary });

    row![
        text(APP_TITLE).size(24),
        Space::new().width(Length::Fill),
        theme_button,
        Space::new().width(4),
        settings_button,
    ]
    .padding(Padding::from([4, 0]))
    .align_y(Alignment::Center)
    .into()
}
