//! Worker threads that run backend calls off the controller's thread.

use std::sync::Arc;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread;
use std::time::Duration;

use super::{BatchSubmission, SingleSubmission, Submission, Ticket};
use crate::api::{BatchAnalysis, RequestError, SentimentBackend, SingleAnalysis};

pub(crate) enum JobMessage {
    SingleAnalyzed {
        ticket: Ticket,
        result: Result<SingleAnalysis, RequestError>,
    },
    BatchAnalyzed {
        ticket: Ticket,
        result: Result<BatchAnalysis, RequestError>,
    },
}

pub(crate) struct RequestJobs {
    backend: Arc<dyn SentimentBackend>,
    message_tx: Sender<JobMessage>,
    message_rx: Receiver<JobMessage>,
    in_flight: usize,
}

impl RequestJobs {
    pub(crate) fn new(backend: Arc<dyn SentimentBackend>) -> Self {
        let (message_tx, message_rx) = std::sync::mpsc::channel::<JobMessage>();
        Self {
            backend,
            message_tx,
            message_rx,
            in_flight: 0,
        }
    }

    pub(crate) fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub(crate) fn dispatch(&mut self, submission: Submission) {
        match submission {
            Submission::Single(job) => self.begin_single(job),
            Submission::Batch(job) => self.begin_batch(job),
        }
    }

    fn begin_single(&mut self, job: SingleSubmission) {
        self.in_flight += 1;
        let tx = self.message_tx.clone();
        let backend = Arc::clone(&self.backend);
        thread::spawn(move || {
            let result = backend.analyze(&job.request);
            let _ = tx.send(JobMessage::SingleAnalyzed {
                ticket: job.ticket,
                result,
            });
        });
    }

    fn begin_batch(&mut self, job: BatchSubmission) {
        self.in_flight += 1;
        let tx = self.message_tx.clone();
        let backend = Arc::clone(&self.backend);
        thread::spawn(move || {
            let result = backend.batch_analyze(&job.request);
            let _ = tx.send(JobMessage::BatchAnalyzed {
                ticket: job.ticket,
                result,
            });
        });
    }

    pub(crate) fn try_recv_message(&mut self) -> Result<JobMessage, TryRecvError> {
        let message = self.message_rx.try_recv()?;
        self.in_flight = self.in_flight.saturating_sub(1);
        Ok(message)
    }

    pub(crate) fn recv_message_timeout(
        &mut self,
        timeout: Duration,
    ) -> Result<JobMessage, RecvTimeoutError> {
        let message = self.message_rx.recv_timeout(timeout)?;
        self.in_flight = self.in_flight.saturating_sub(1);
        Ok(message)
    }
}
