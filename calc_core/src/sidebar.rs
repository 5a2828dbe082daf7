//! # Sidebar & Search Index
//!
//! Renders the registry into the navigation root and filters it by a
//! case-insensitive substring query. The filter only flips visibility;
//! nothing is re-rendered.
//!
//! The search index caches each category node together with its entries'
//! lowercase labels. It is built on the first search after a render and
//! dropped by every render, so it never outlives the nodes it points at.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dom::{el, Document, EventKind, Markup, NodeId};
use crate::effects::Effect;
use crate::errors::CalcResult;
use crate::registry::{Category, Registry};

pub const NAV_CATEGORY_CLASS: &str = "nav-category";
pub const NAV_ITEM_CLASS: &str = "nav-item";
pub const CALC_ID_ATTR: &str = "data-calc-id";

#[derive(Debug, Clone)]
struct IndexedItem {
    node: NodeId,
    text: String,
}

#[derive(Debug, Clone)]
struct IndexedCategory {
    node: NodeId,
    items: Vec<IndexedItem>,
}

/// Cached view of the rendered sidebar.
#[derive(Debug, Clone, Default)]
pub struct SearchIndex {
    categories: Vec<IndexedCategory>,
}

impl SearchIndex {
    /// Scan the rendered sidebar under `nav`.
    pub fn build(doc: &Document, nav: NodeId) -> Self {
        let categories = doc
            .query_class(nav, NAV_CATEGORY_CLASS)
            .into_iter()
            .map(|cat| IndexedCategory {
                node: cat,
                items: doc
                    .query_class(cat, NAV_ITEM_CLASS)
                    .into_iter()
                    .map(|item| IndexedItem {
                        node: item,
                        text: doc.text_content(item).trim().to_lowercase(),
                    })
                    .collect(),
            })
            .collect();
        SearchIndex { categories }
    }

    /// True if every cached node is still in the document.
    pub fn is_live(&self, doc: &Document) -> bool {
        self.categories
            .iter()
            .all(|c| doc.contains(c.node) && c.items.iter().all(|i| doc.contains(i.node)))
    }

    pub fn item_count(&self) -> usize {
        self.categories.iter().map(|c| c.items.len()).sum()
    }
}

/// Visibility after a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchReport {
    pub visible_items: usize,
    pub visible_categories: usize,
}

/// Sidebar controller bound to a navigation root id.
#[derive(Debug)]
pub struct Sidebar {
    nav_id: String,
    index: Option<SearchIndex>,
}

impl Sidebar {
    pub fn new(nav_id: impl Into<String>) -> Self {
        Sidebar {
            nav_id: nav_id.into(),
            index: None,
        }
    }

    /// Whether a search index is currently cached.
    pub fn is_indexed(&self) -> bool {
        self.index.is_some()
    }

    /// Rebuild the sidebar from the registry and drop the search index.
    ///
    /// Each entry's click queues [`Effect::Navigate`] with its location.
    pub fn render(&mut self, doc: &mut Document, registry: &Registry) -> CalcResult<()> {
        let nav = doc.require(&self.nav_id)?;
        doc.clear_children(nav)?;
        self.index = None;

        for category in registry.categories() {
            let entries: Vec<_> = registry.entries_in(category).collect();
            let cat_node = doc.append(nav, category_markup(category, &entries))?;
            let buttons = doc.query_class(cat_node, NAV_ITEM_CLASS);

            for (button, entry) in buttons.into_iter().zip(entries.iter()) {
                let category = entry.category;
                let subcategory = entry.subcategory;
                let id = entry.calculator.meta().id.clone();
                doc.add_listener(button, EventKind::Click, move |doc, _| {
                    doc.queue_effect(Effect::Navigate {
                        category,
                        subcategory,
                        id: id.clone(),
                    });
                    Ok(())
                })?;
            }
        }
        debug!(entries = registry.len(), "sidebar rendered");
        Ok(())
    }

    /// Filter entries by `query` (case-insensitive substring).
    ///
    /// An empty query shows everything. Categories with no visible entry
    /// are hidden.
    pub fn search(&mut self, doc: &mut Document, query: &str) -> CalcResult<SearchReport> {
        let nav = doc.require(&self.nav_id)?;
        let stale = match &self.index {
            Some(index) => !index.is_live(doc),
            None => true,
        };
        if stale {
            self.index = Some(SearchIndex::build(doc, nav));
        }
        let Some(index) = &self.index else {
            return Ok(SearchReport { visible_items: 0, visible_categories: 0 });
        };

        let query = query.trim().to_lowercase();
        let mut report = SearchReport { visible_items: 0, visible_categories: 0 };
        for category in &index.categories {
            let mut any_visible = false;
            for item in &category.items {
                let visible = query.is_empty() || item.text.contains(&query);
                doc.set_hidden(item.node, !visible);
                if visible {
                    any_visible = true;
                    report.visible_items += 1;
                }
            }
            let show_category = query.is_empty() || any_visible;
            doc.set_hidden(category.node, !show_category);
            if show_category {
                report.visible_categories += 1;
            }
        }
        debug!(query = %query, visible = report.visible_items, "sidebar filtered");
        Ok(report)
    }
}

fn category_markup(category: Category, entries: &[crate::registry::Entry<'_>]) -> Markup {
    let header = el("div")
        .class("nav-category-header")
        .child(el("span").class("icon").attr("data-icon", category.icon()))
        .text(category.label());

    el("div")
        .class(NAV_CATEGORY_CLASS)
        .attr("data-category", category.key())
        .child(header)
        .children(entries.iter().map(|entry| {
            let meta = entry.calculator.meta();
            el("button")
                .class(NAV_ITEM_CLASS)
                .attr(CALC_ID_ATTR, meta.id.clone())
                .text(meta.name.clone())
        }))
        .into()
}
