//! Document surface the controller renders into.
//!
//! The controller never reaches for a global page. It is handed a [`Document`] which
//! resolves identifiers, toggles classes and swaps children. [`MemoryDocument`] backs
//! headless use and tests; on wasm32 `WebDocument` wraps the live page.

pub mod html;
mod memory;
mod node;
#[cfg(target_arch = "wasm32")]
pub(crate) mod web;

pub use memory::{MemoryDocument, NodeId};
pub use node::{Element, Node};
#[cfg(target_arch = "wasm32")]
pub use web::WebDocument;

/// Identifiers and classes the host page must provide.
pub mod ids {
    pub const SINGLE_TEXT: &str = "single-text";
    pub const BATCH_TEXTS: &str = "batch-texts";
    pub const SINGLE_SUBMIT: &str = "single-submit";
    pub const BATCH_SUBMIT: &str = "batch-submit";
    pub const SINGLE_RESULT: &str = "single-result";
    pub const BATCH_RESULT: &str = "batch-result";
    pub const SINGLE_SENTIMENT_DISPLAY: &str = "single-sentiment-display";
    pub const SINGLE_SCORES: &str = "single-scores";
    pub const BATCH_SUMMARY: &str = "batch-summary";
    pub const BATCH_DETAILS: &str = "batch-details";

    pub const TAB_BUTTON_CLASS: &str = "tab-btn";
    pub const TAB_CONTENT_CLASS: &str = "tab-content";
    /// Attribute on a tab button naming the tab it opens.
    pub const TAB_TARGET_ATTR: &str = "data-tab";
    pub const ACTIVE_CLASS: &str = "active";
    pub const HIDDEN_CLASS: &str = "hidden";

    /// Id of the content container for `tab_name`.
    pub fn tab_content_id(tab_name: &str) -> String {
        format!("{tab_name}-tab")
    }
}

/// DOM-like surface injected into the controller.
///
/// Element handles are cheap clones. Lookups by id only see nodes attached to the page.
pub trait Document {
    type Element: Clone;

    fn element_by_id(&self, id: &str) -> Option<Self::Element>;

    /// All attached elements carrying `class`, in document order.
    fn elements_by_class(&self, class: &str) -> Vec<Self::Element>;

    fn add_class(&mut self, element: &Self::Element, class: &str);

    fn remove_class(&mut self, element: &Self::Element, class: &str);

    fn attribute(&self, element: &Self::Element, name: &str) -> Option<String>;

    /// Current value of an input or textarea; empty for other elements.
    fn input_value(&self, element: &Self::Element) -> String;

    fn set_placeholder(&mut self, element: &Self::Element, text: &str);

    /// Drop every child of `element` and insert `nodes` in their place.
    fn replace_children(&mut self, element: &Self::Element, nodes: &[Node]);

    /// Show a blocking user notification (an alert in the browser).
    fn notify(&mut self, message: &str);
}
