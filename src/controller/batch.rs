use super::*;
use crate::api::{BatchAnalysis, RequestError};
use crate::render;

const LOADING_TEXT: &str = "Analyzing batch...";

impl<D: Document> SentimentController<D> {
    /// Split and validate the batch input, then replace the whole panel with a loading
    /// marker. The renderer rebuilds the summary and details containers on success.
    pub fn begin_batch(&mut self) -> Option<BatchSubmission> {
        let texts = match input::validate_batch(&self.read_input(Mode::Batch), self.max_batch_items)
        {
            Ok(texts) => texts,
            Err(err) => {
                self.reject(Mode::Batch, err);
                return None;
            }
        };
        if let Some(panel) = self.reveal_panel(Mode::Batch) {
            self.document
                .replace_children(&panel, &[render::loading_marker(LOADING_TEXT)]);
        }
        let ticket = self.batch.issue();
        tracing::debug!("Batch analysis #{} issued ({} texts)", ticket.generation, texts.len());
        Some(BatchSubmission {
            ticket,
            request: BatchAnalyzeRequest { texts },
        })
    }

    /// Apply the outcome of a batch analysis, unless a newer one was issued since.
    pub fn finish_batch(
        &mut self,
        ticket: Ticket,
        outcome: Result<BatchAnalysis, RequestError>,
    ) -> Completion {
        if !self.batch.is_current(ticket) {
            tracing::debug!(
                "Dropping batch analysis #{}; #{} is newer",
                ticket.generation,
                self.batch.issued
            );
            return Completion::Superseded;
        }
        let nodes = match outcome {
            Ok(analysis) => {
                self.batch.state = PanelState::Success;
                render::render_batch(&analysis)
            }
            Err(err) => {
                tracing::warn!("Batch analysis failed: {err}");
                self.batch.state = PanelState::Error;
                vec![render::error_marker(&err.to_string())]
            }
        };
        self.replace_by_id(ids::BATCH_RESULT, &nodes);
        Completion::Applied
    }
}
