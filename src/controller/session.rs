//! Native driver pairing a controller with background request jobs.

use std::sync::Arc;
use std::sync::mpsc::{RecvTimeoutError, TryRecvError};
use std::time::{Duration, Instant};

use super::jobs::{JobMessage, RequestJobs};
use super::{Completion, KeyChord, Mode, SentimentController};
use crate::api::SentimentBackend;
use crate::dom::Document;

/// Runs a [`SentimentController`] the way a UI frame loop would: submissions start
/// worker threads, and [`HeadlessSession::poll_background_jobs`] applies whatever has
/// finished.
pub struct HeadlessSession<D: Document> {
    controller: SentimentController<D>,
    jobs: RequestJobs,
}

impl<D: Document> HeadlessSession<D> {
    pub fn new(controller: SentimentController<D>, backend: Arc<dyn SentimentBackend>) -> Self {
        Self {
            controller,
            jobs: RequestJobs::new(backend),
        }
    }

    pub fn controller(&self) -> &SentimentController<D> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut SentimentController<D> {
        &mut self.controller
    }

    pub fn document(&self) -> &D {
        self.controller.document()
    }

    pub fn document_mut(&mut self) -> &mut D {
        self.controller.document_mut()
    }

    /// Requests started but not yet applied or dropped.
    pub fn in_flight(&self) -> usize {
        self.jobs.in_flight()
    }

    /// Submit `mode`. Returns `true` when a request was started.
    pub fn submit(&mut self, mode: Mode) -> bool {
        match self.controller.submit(mode) {
            Some(submission) => {
                self.jobs.dispatch(submission);
                true
            }
            None => false,
        }
    }

    /// Forward a keydown in `mode`'s input. Returns `true` when a request was started.
    pub fn handle_keydown(&mut self, mode: Mode, chord: &KeyChord) -> bool {
        match self.controller.handle_keydown(mode, chord) {
            Some(submission) => {
                self.jobs.dispatch(submission);
                true
            }
            None => false,
        }
    }

    /// Apply every finished request without blocking. Returns how many were applied
    /// (superseded results are not counted).
    pub fn poll_background_jobs(&mut self) -> usize {
        let mut applied = 0;
        loop {
            let message = match self.jobs.try_recv_message() {
                Ok(message) => message,
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            };
            if self.apply(message) == Completion::Applied {
                applied += 1;
            }
        }
        applied
    }

    /// Block until no request is in flight or `timeout` elapses.
    ///
    /// Returns `true` when everything settled in time.
    pub fn wait_until_settled(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.jobs.in_flight() > 0 {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return false;
            }
            match self.jobs.recv_message_timeout(remaining) {
                Ok(message) => {
                    self.apply(message);
                }
                Err(RecvTimeoutError::Timeout) => return false,
                Err(RecvTimeoutError::Disconnected) => return true,
            }
        }
        true
    }

    fn apply(&mut self, message: JobMessage) -> Completion {
        match message {
            JobMessage::SingleAnalyzed { ticket, result } => {
                self.controller.finish_single(ticket, result)
            }
            JobMessage::BatchAnalyzed { ticket, result } => {
                self.controller.finish_batch(ticket, result)
            }
        }
    }
}
