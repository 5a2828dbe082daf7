//! Sidebar (Left)
//!
//! Search box on top, then one section per category mirroring the
//! `#sidebar-nav` subtree. Categories and items the search filter hid in
//! the document are left out here as well.

use iced::widget::{button, column, container, rule, scrollable, text, text_input, Column};
use iced::{Element, Length, Padding};

use calc_core::dom::{Document, NodeId};
use calc_core::sidebar::{NAV_CATEGORY_CLASS, NAV_ITEM_CLASS};

use crate::app::Message;

const HEADER_CLASS: &str = "nav-category-header";

pub fn view_sidebar(doc: &Document, nav: Option<NodeId>, query: String, width: f32) -> Element<'_, Message> {
    let search = text_input("Search calculators...", &query)
        .on_input(Message::SearchChanged)
        .size(12)
        .padding(6);

    let mut sections: Column<'_, Message> = column![].spacing(2);
    if let Some(nav) = nav {
        for category in doc.query_class(nav, NAV_CATEGORY_CLASS) {
            if doc.is_hidden(category) {
                continue;
            }
            sections = sections.push(view_category(doc, category));
            sections = sections.push(rule::horizontal(1));
        }
    }

    container(column![search, scrollable(sections).height(Length::Fill)].spacing(8))
        .width(Length::Fixed(width))
        .height(Length::Fill)
        .padding(5)
        .style(container::bordered_box)
        .into()
}

fn view_category(doc: &Document, category: NodeId) -> Element<'_, Message> {
    let header = doc
        .query_class(category, HEADER_CLASS)
        .first()
        .map(|h| doc.text_content(*h).trim().to_string())
        .unwrap_or_default();

    let mut items: Column<'_, Message> = column![text(header).size(12)].spacing(2);
    for item in doc.query_class(category, NAV_ITEM_CLASS) {
        if doc.is_hidden(item) {
            continue;
        }
        let style = if doc.has_class(item, "active") {
            button::primary
        } else {
            button::text
        };
        items = items.push(
            button(text(doc.text_content(item)).size(11))
                .on_press(Message::Click(item))
                .padding(Padding::from([4, 16]))
                .style(style)
                .width(Length::Fill),
        );
    }
    items.padding(Padding::from([4, 0])).into()
}
