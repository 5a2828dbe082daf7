//! Status Bar (Bottom)
//!
//! Displays:
//! - Mounted calculator and its category
//! - Time it was mounted
//! - Status messages

use iced::widget::{row, text, Space};
use iced::{Element, Length, Padding};

use calc_core::loader::MountSession;

use crate::app::Message;

pub fn view_status_bar<'a>(current: Option<&MountSession>, status: &'a str) -> Element<'a, Message> {
    let mounted = match current {
        Some(session) => format!(
            "{} › {} (opened {})",
            session.category.label(),
            session.calculator_id,
            session.mounted_at.format("%H:%M:%S")
        ),
        None => "No calculator open".to_string(),
    };

    row![
        text(mounted).size(10),
        Space::new().width(Length::Fill),
        text(status).size(10),
    ]
    .padding(Padding::from([4, 0]))
    .into()
}
