use super::*;
use crate::api::{RequestError, SingleAnalysis};
use crate::render;

const LOADING_TEXT: &str = "Analyzing sentiment...";

impl<D: Document> SentimentController<D> {
    /// Validate the single-text input and enter the loading state.
    ///
    /// Returns `None` when the input is rejected; the user has been notified and the
    /// panel is untouched.
    pub fn begin_single(&mut self) -> Option<SingleSubmission> {
        let text = match input::validate_single(&self.read_input(Mode::Single)) {
            Ok(text) => text,
            Err(err) => {
                self.reject(Mode::Single, err);
                return None;
            }
        };
        self.reveal_panel(Mode::Single);
        self.replace_by_id(
            ids::SINGLE_SENTIMENT_DISPLAY,
            &[render::loading_marker(LOADING_TEXT)],
        );
        self.replace_by_id(ids::SINGLE_SCORES, &[]);
        let ticket = self.single.issue();
        tracing::debug!("Single analysis #{} issued ({} chars)", ticket.generation, text.len());
        Some(SingleSubmission {
            ticket,
            request: AnalyzeRequest { text },
        })
    }

    /// Apply the outcome of a single analysis, unless a newer one was issued since.
    pub fn finish_single(
        &mut self,
        ticket: Ticket,
        outcome: Result<SingleAnalysis, RequestError>,
    ) -> Completion {
        if !self.single.is_current(ticket) {
            tracing::debug!(
                "Dropping single analysis #{}; #{} is newer",
                ticket.generation,
                self.single.issued
            );
            return Completion::Superseded;
        }
        match outcome {
            Ok(analysis) => {
                let fragments = render::render_single(&analysis);
                self.replace_by_id(ids::SINGLE_SENTIMENT_DISPLAY, &fragments.display);
                self.replace_by_id(ids::SINGLE_SCORES, &fragments.scores);
                self.single.state = PanelState::Success;
            }
            Err(err) => {
                tracing::warn!("Single analysis failed: {err}");
                self.replace_by_id(
                    ids::SINGLE_SENTIMENT_DISPLAY,
                    &[render::error_marker(&err.to_string())],
                );
                self.single.state = PanelState::Error;
            }
        }
        Completion::Applied
    }
}
