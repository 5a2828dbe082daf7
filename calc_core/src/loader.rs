//! # Loader / Router
//!
//! Mounts one calculator at a time into the display target. Selecting a
//! new calculator disposes the previous mount's listeners, replaces the
//! display subtree, focuses the new title and binds the new calculator
//! exactly once.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::dom::{el, Document, EventKind, ListenerId, NodeId};
use crate::errors::CalcResult;
use crate::registry::{Category, Registry, Subcategory};
use crate::sidebar::{CALC_ID_ATTR, NAV_ITEM_CLASS};

/// Suffix appended to the calculator name in the document title.
pub const TITLE_SUFFIX: &str = " - Universal Calculator";

/// Identifies one mount. Async work started during a mount carries it so
/// late results can be dropped once the user navigates away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        SessionId(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The currently mounted calculator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MountSession {
    pub session: SessionId,
    pub category: Category,
    pub subcategory: Subcategory,
    pub calculator_id: String,
    pub mounted_at: DateTime<Utc>,
}

/// Records the listeners a calculator registers while binding.
#[derive(Debug, Default)]
pub struct MountScope {
    listeners: Vec<(NodeId, ListenerId)>,
}

impl MountScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener on `node` and remember it for disposal.
    pub fn on<F>(&mut self, doc: &mut Document, node: NodeId, kind: EventKind, callback: F) -> CalcResult<()>
    where
        F: Fn(&mut Document, NodeId) -> CalcResult<()> + 'static,
    {
        let listener = doc.add_listener(node, kind, callback)?;
        self.listeners.push((node, listener));
        Ok(())
    }

    /// Register a listener on the element with `id`.
    pub fn on_id<F>(&mut self, doc: &mut Document, id: &str, kind: EventKind, callback: F) -> CalcResult<()>
    where
        F: Fn(&mut Document, NodeId) -> CalcResult<()> + 'static,
    {
        let node = doc.require(id)?;
        self.on(doc, node, kind, callback)
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Remove every recorded listener still attached. Returns how many were
    /// removed.
    fn dispose(self, doc: &mut Document) -> usize {
        self.listeners
            .into_iter()
            .filter(|(node, listener)| doc.remove_listener(*node, *listener))
            .count()
    }
}

struct MountHandle {
    session: MountSession,
    scope: MountScope,
}

/// Routes (category, subcategory, id) selections into the display target.
pub struct Loader {
    display_id: String,
    nav_id: String,
    current: Option<MountHandle>,
}

impl Loader {
    pub fn new(display_id: impl Into<String>, nav_id: impl Into<String>) -> Self {
        Loader {
            display_id: display_id.into(),
            nav_id: nav_id.into(),
            current: None,
        }
    }

    pub fn current(&self) -> Option<&MountSession> {
        self.current.as_ref().map(|h| &h.session)
    }

    /// Listeners registered by the current mount.
    pub fn bound_listeners(&self) -> usize {
        self.current.as_ref().map(|h| h.scope.len()).unwrap_or(0)
    }

    /// Mount the calculator at (category, subcategory, id).
    ///
    /// An unknown triple is a no-op returning `Ok(None)`. A failing `bind`
    /// is logged and reported in the display; the mount still counts.
    pub fn select(
        &mut self,
        doc: &mut Document,
        registry: &Registry,
        category: Category,
        subcategory: Subcategory,
        id: &str,
    ) -> CalcResult<Option<SessionId>> {
        let Some(calc) = registry.find(category, subcategory, id) else {
            debug!(%category, %subcategory, id, "selection did not resolve");
            return Ok(None);
        };
        let display = doc.require(&self.display_id)?;

        if let Some(nav) = doc.get_element_by_id(&self.nav_id) {
            let items = doc.query_class(nav, NAV_ITEM_CLASS);
            for item in &items {
                doc.remove_class(*item, "active");
            }
            if let Some(active) = items.into_iter().find(|n| doc.attr(*n, CALC_ID_ATTR) == Some(id)) {
                doc.add_class(active, "active");
            }
        }

        if let Some(previous) = self.current.take() {
            let removed = previous.scope.dispose(doc);
            debug!(calculator = %previous.session.calculator_id, removed, "unmounted calculator");
        }
        doc.set_children(display, [calc.render()])?;

        let title = doc
            .query_class(display, "calculator-title")
            .into_iter()
            .find(|n| doc.element(*n).is_some_and(|e| e.tag == "h2"));
        if let Some(title) = title {
            doc.focus(title);
        }

        let mut scope = MountScope::new();
        if let Err(err) = calc.bind(doc, &mut scope) {
            error!(calculator = id, code = err.error_code(), "bind failed: {err}");
            doc.append(
                display,
                el("div").class("error-message").text(format!("This calculator failed to load: {err}")),
            )?;
        }

        let meta = calc.meta();
        doc.set_title(format!("{}{}", meta.name, TITLE_SUFFIX));

        let session = MountSession {
            session: SessionId::new(),
            category,
            subcategory,
            calculator_id: meta.id.clone(),
            mounted_at: Utc::now(),
        };
        let session_id = session.session;
        info!(calculator = %meta.id, session = %session_id, listeners = scope.len(), "mounted calculator");
        self.current = Some(MountHandle { session, scope });
        Ok(Some(session_id))
    }

    /// Drop the current mount, if any, and clear the display.
    pub fn unmount(&mut self, doc: &mut Document) -> CalcResult<()> {
        if let Some(previous) = self.current.take() {
            previous.scope.dispose(doc);
        }
        let display = doc.require(&self.display_id)?;
        doc.clear_children(display)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Markup;
    use crate::errors::CalcError;
    use crate::registry::{Calculator, CalculatorMeta};
    use crate::sidebar::Sidebar;
    use std::cell::Cell;
    use std::rc::Rc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct Counting {
        meta: CalculatorMeta,
        binds: Arc<AtomicUsize>,
        fail: bool,
    }

    impl Calculator for Counting {
        fn meta(&self) -> &CalculatorMeta {
            &self.meta
        }

        fn render(&self) -> Markup {
            el("div")
                .child(el("h2").class("calculator-title").attr("tabindex", "-1").text(self.meta.name.clone()))
                .child(el("input").id("field"))
                .child(el("div").id("out"))
                .into()
        }

        fn bind(&self, doc: &mut Document, scope: &mut MountScope) -> CalcResult<()> {
            self.binds.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(CalcError::element_not_found("#missing"));
            }
            scope.on_id(doc, "field", EventKind::Input, |doc, node| {
                let v = doc.value(node).unwrap_or_default().to_string();
                doc.set_text(doc.require("out")?, v)
            })
        }
    }

    fn setup(fail_second: bool) -> (Document, Registry, Arc<AtomicUsize>, Loader) {
        let binds = Arc::new(AtomicUsize::new(0));
        let registry = Registry::builder()
            .subcategory(Subcategory::Percentage)
            .add(
                Subcategory::Percentage,
                Counting {
                    meta: CalculatorMeta::new("one", "First", ""),
                    binds: Arc::clone(&binds),
                    fail: false,
                },
            )
            .unwrap()
            .add(
                Subcategory::Percentage,
                Counting {
                    meta: CalculatorMeta::new("two", "Second", ""),
                    binds: Arc::clone(&binds),
                    fail: fail_second,
                },
            )
            .unwrap()
            .build();
        let mut doc = Document::new();
        let root = doc.root();
        doc.set_children(root, [el("nav").id("sidebar-nav"), el("main").id("calculator-display")])
            .unwrap();
        Sidebar::new("sidebar-nav").render(&mut doc, &registry).unwrap();
        (doc, registry, binds, Loader::new("calculator-display", "sidebar-nav"))
    }

    #[test]
    fn test_select_mounts_and_binds_once() {
        let (mut doc, registry, binds, mut loader) = setup(false);
        let session = loader
            .select(&mut doc, &registry, Category::Math, Subcategory::Percentage, "one")
            .unwrap();
        assert!(session.is_some());
        assert_eq!(binds.load(Ordering::SeqCst), 1);
        assert_eq!(doc.title(), "First - Universal Calculator");
        assert_eq!(loader.current().unwrap().calculator_id, "one");

        let focused = doc.focused().unwrap();
        assert!(doc.has_class(focused, "calculator-title"));

        let nav = doc.require("sidebar-nav").unwrap();
        let one = doc.query_attr(nav, CALC_ID_ATTR, "one").unwrap();
        assert!(doc.has_class(one, "active"));
    }

    #[test]
    fn test_unresolved_selection_is_noop() {
        let (mut doc, registry, binds, mut loader) = setup(false);
        loader
            .select(&mut doc, &registry, Category::Math, Subcategory::Percentage, "one")
            .unwrap();
        let result = loader
            .select(&mut doc, &registry, Category::Physics, Subcategory::Percentage, "one")
            .unwrap();
        assert!(result.is_none());
        assert_eq!(binds.load(Ordering::SeqCst), 1);
        assert_eq!(doc.title(), "First - Universal Calculator");
        assert!(doc.get_element_by_id("field").is_some());
    }

    #[test]
    fn test_remount_disposes_previous_listeners() {
        let (mut doc, registry, binds, mut loader) = setup(false);
        loader
            .select(&mut doc, &registry, Category::Math, Subcategory::Percentage, "one")
            .unwrap();
        let old_field = doc.require("field").unwrap();
        assert_eq!(doc.listener_count(old_field), 1);

        loader
            .select(&mut doc, &registry, Category::Math, Subcategory::Percentage, "two")
            .unwrap();
        assert_eq!(binds.load(Ordering::SeqCst), 2);
        assert!(!doc.contains(old_field));
        let new_field = doc.require("field").unwrap();
        assert_eq!(doc.listener_count(new_field), 1);
        assert_eq!(doc.input(old_field, "x"), 0);

        doc.input(new_field, "42");
        assert_eq!(doc.text_content(doc.require("out").unwrap()), "42");

        let nav = doc.require("sidebar-nav").unwrap();
        let one = doc.query_attr(nav, CALC_ID_ATTR, "one").unwrap();
        let two = doc.query_attr(nav, CALC_ID_ATTR, "two").unwrap();
        assert!(!doc.has_class(one, "active"));
        assert!(doc.has_class(two, "active"));
    }

    #[test]
    fn test_bind_failure_is_contained() {
        let (mut doc, registry, _, mut loader) = setup(true);
        let session = loader
            .select(&mut doc, &registry, Category::Math, Subcategory::Percentage, "two")
            .unwrap();
        assert!(session.is_some());
        let display = doc.require("calculator-display").unwrap();
        assert_eq!(doc.query_class(display, "error-message").len(), 1);
        assert_eq!(loader.bound_listeners(), 0);
    }

    #[test]
    fn test_listener_fires_once_per_event_after_many_mounts() {
        let (mut doc, registry, _, mut loader) = setup(false);
        for _ in 0..3 {
            loader
                .select(&mut doc, &registry, Category::Math, Subcategory::Percentage, "one")
                .unwrap();
        }
        let hits = Rc::new(Cell::new(0));
        let field = doc.require("field").unwrap();
        let counter = Rc::clone(&hits);
        doc.add_listener(field, EventKind::Input, move |_, _| {
            counter.set(counter.get() + 1);
            Ok(())
        })
        .unwrap();
        assert_eq!(doc.input(field, "1"), 2);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_unmount_clears_display() {
        let (mut doc, registry, _, mut loader) = setup(false);
        loader
            .select(&mut doc, &registry, Category::Math, Subcategory::Percentage, "one")
            .unwrap();
        loader.unmount(&mut doc).unwrap();
        assert!(loader.current().is_none());
        assert!(doc.get_element_by_id("field").is_none());
    }
}
