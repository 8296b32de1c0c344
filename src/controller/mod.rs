//! Page controller: tabs, input guards and the per-mode request state machine.
//!
//! Submissions are split in two. `begin_*` validates input, flips the panel into its
//! loading state and hands back a request tagged with a [`Ticket`]. The caller runs the
//! request however its platform allows and reports back through `finish_*`. Only the
//! most recently issued ticket of a mode may touch that mode's panel.

mod batch;
pub mod input;
mod single;
mod tabs;

#[cfg(not(target_arch = "wasm32"))]
mod jobs;
#[cfg(not(target_arch = "wasm32"))]
mod session;

pub use input::{InputError, KeyChord, Platform};
#[cfg(not(target_arch = "wasm32"))]
pub use session::HeadlessSession;

use crate::api::{AnalyzeRequest, BatchAnalyzeRequest};
use crate::config::ClientConfig;
use crate::dom::{Document, ids};

/// One of the two page workflows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    Single,
    Batch,
}

impl Mode {
    pub fn input_id(self) -> &'static str {
        match self {
            Self::Single => ids::SINGLE_TEXT,
            Self::Batch => ids::BATCH_TEXTS,
        }
    }

    pub fn result_panel_id(self) -> &'static str {
        match self {
            Self::Single => ids::SINGLE_RESULT,
            Self::Batch => ids::BATCH_RESULT,
        }
    }

    pub fn submit_id(self) -> &'static str {
        match self {
            Self::Single => ids::SINGLE_SUBMIT,
            Self::Batch => ids::BATCH_SUBMIT,
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Self::Single => input::SINGLE_PLACEHOLDER,
            Self::Batch => input::BATCH_PLACEHOLDER,
        }
    }
}

/// Lifecycle of one mode's result panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelState {
    Idle,
    Loading,
    Success,
    Error,
}

/// Identity of an issued request: its mode and generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket {
    mode: Mode,
    generation: u64,
}

impl Ticket {
    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SingleSubmission {
    pub ticket: Ticket,
    pub request: AnalyzeRequest,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchSubmission {
    pub ticket: Ticket,
    pub request: BatchAnalyzeRequest,
}

/// A request the caller must now send.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Submission {
    Single(SingleSubmission),
    Batch(BatchSubmission),
}

/// What happened to a finished request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Completion {
    /// The panel now shows this result.
    Applied,
    /// A newer submission of the same mode was issued; the result was dropped.
    Superseded,
}

#[derive(Debug)]
struct PanelTracker {
    mode: Mode,
    state: PanelState,
    issued: u64,
}

impl PanelTracker {
    fn new(mode: Mode) -> Self {
        Self {
            mode,
            state: PanelState::Idle,
            issued: 0,
        }
    }

    fn issue(&mut self) -> Ticket {
        self.issued = self.issued.wrapping_add(1);
        self.state = PanelState::Loading;
        Ticket {
            mode: self.mode,
            generation: self.issued,
        }
    }

    fn is_current(&self, ticket: Ticket) -> bool {
        ticket.mode == self.mode && ticket.generation == self.issued
    }
}

/// Controller for one page, generic over the document it renders into.
pub struct SentimentController<D: Document> {
    document: D,
    platform: Platform,
    max_batch_items: usize,
    single: PanelTracker,
    batch: PanelTracker,
}

impl<D: Document> SentimentController<D> {
    pub fn new(document: D, config: &ClientConfig) -> Self {
        Self {
            document,
            platform: Platform::current(),
            max_batch_items: config.max_batch_items,
            single: PanelTracker::new(Mode::Single),
            batch: PanelTracker::new(Mode::Batch),
        }
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut D {
        &mut self.document
    }

    pub fn into_document(self) -> D {
        self.document
    }

    pub fn state(&self, mode: Mode) -> PanelState {
        self.tracker(mode).state
    }

    /// Validate and start a submission in `mode`.
    pub fn submit(&mut self, mode: Mode) -> Option<Submission> {
        match mode {
            Mode::Single => self.begin_single().map(Submission::Single),
            Mode::Batch => self.begin_batch().map(Submission::Batch),
        }
    }

    /// Keydown inside a mode's input; submits on primary-modifier + Enter.
    pub fn handle_keydown(&mut self, mode: Mode, chord: &KeyChord) -> Option<Submission> {
        if !chord.is_submit(self.platform) {
            return None;
        }
        self.submit(mode)
    }

    /// Focus on a mode's input; an empty input gets its guidance placeholder.
    pub fn handle_focus(&mut self, mode: Mode) {
        let Some(input) = self.document.element_by_id(mode.input_id()) else {
            return;
        };
        if self.document.input_value(&input).is_empty() {
            self.document.set_placeholder(&input, mode.placeholder());
        }
    }

    fn tracker(&self, mode: Mode) -> &PanelTracker {
        match mode {
            Mode::Single => &self.single,
            Mode::Batch => &self.batch,
        }
    }

    fn reveal_panel(&mut self, mode: Mode) -> Option<D::Element> {
        let panel = self.document.element_by_id(mode.result_panel_id())?;
        self.document.remove_class(&panel, ids::HIDDEN_CLASS);
        Some(panel)
    }

    fn replace_by_id(&mut self, id: &str, nodes: &[crate::dom::Node]) {
        match self.document.element_by_id(id) {
            Some(element) => self.document.replace_children(&element, nodes),
            None => tracing::debug!("#{id} not present; skipping update"),
        }
    }

    fn read_input(&self, mode: Mode) -> String {
        self.document
            .element_by_id(mode.input_id())
            .map(|input| self.document.input_value(&input))
            .unwrap_or_default()
    }

    fn reject(&mut self, mode: Mode, err: InputError) {
        tracing::debug!("{mode:?} submission rejected: {err}");
        self.document.notify(&err.to_string());
    }
}
