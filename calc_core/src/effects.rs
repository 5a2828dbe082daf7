//! Side effects requested by listeners.
//!
//! Listeners only see the [`Document`], so anything that touches the wider
//! UI state (navigation, the clipboard) or needs to wait (reveals, network)
//! is queued on the document and drained by [`UiState`](crate::app::UiState).

use std::fmt;
use std::rc::Rc;

use crate::currency::RatesOutcome;
use crate::dom::{Document, NodeId};
use crate::errors::CalcResult;
use crate::registry::{Category, Subcategory};

/// Callback that writes a rate lookup outcome into the mounted calculator.
pub type RatesCallback = Rc<dyn Fn(&mut Document, &RatesOutcome) -> CalcResult<()>>;

pub enum Effect {
    /// Sidebar entry activated.
    Navigate {
        category: Category,
        subcategory: Subcategory,
        id: String,
    },
    /// Progressive reveal of an educational blob into `container`.
    Reveal {
        content: &'static str,
        container: NodeId,
    },
    /// Exchange rate lookup whose result goes to `on_complete`.
    FetchRates { on_complete: RatesCallback },
    /// Text the user asked to copy.
    Clipboard { text: String },
}

impl fmt::Debug for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Effect::Navigate { category, subcategory, id } => f
                .debug_struct("Navigate")
                .field("category", category)
                .field("subcategory", subcategory)
                .field("id", id)
                .finish(),
            Effect::Reveal { container, content } => f
                .debug_struct("Reveal")
                .field("container", container)
                .field("content_len", &content.len())
                .finish(),
            Effect::FetchRates { .. } => f.write_str("FetchRates"),
            Effect::Clipboard { text } => f.debug_struct("Clipboard").field("len", &text.len()).finish(),
        }
    }
}
