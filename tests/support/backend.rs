use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::mpsc::{Receiver, Sender, channel};

use sentipanel::api::{
    AnalyzeRequest, BatchAnalysis, BatchAnalyzeRequest, RequestError, SentimentBackend,
    SingleAnalysis,
};

struct Reply<T> {
    outcome: Result<T, RequestError>,
    gate: Option<Receiver<()>>,
}

impl<T> Reply<T> {
    fn deliver(self) -> Result<T, RequestError> {
        if let Some(gate) = self.gate {
            let _ = gate.recv();
        }
        self.outcome
    }
}

/// Backend answering from a script keyed by request text, recording every request.
///
/// A gated reply blocks its worker until the returned sender fires (or is dropped).
#[derive(Default)]
pub struct ScriptedBackend {
    single: Mutex<HashMap<String, Reply<SingleAnalysis>>>,
    batch: Mutex<HashMap<Vec<String>, Reply<BatchAnalysis>>>,
    single_requests: Mutex<Vec<String>>,
    batch_requests: Mutex<Vec<Vec<String>>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_single(&self, text: &str, outcome: Result<SingleAnalysis, RequestError>) {
        self.single.lock().unwrap().insert(
            text.to_string(),
            Reply {
                outcome,
                gate: None,
            },
        );
    }

    pub fn on_single_gated(
        &self,
        text: &str,
        outcome: Result<SingleAnalysis, RequestError>,
    ) -> Sender<()> {
        let (release, gate) = channel();
        self.single.lock().unwrap().insert(
            text.to_string(),
            Reply {
                outcome,
                gate: Some(gate),
            },
        );
        release
    }

    pub fn on_batch(&self, texts: &[&str], outcome: Result<BatchAnalysis, RequestError>) {
        let key = texts.iter().map(|text| text.to_string()).collect();
        self.batch.lock().unwrap().insert(
            key,
            Reply {
                outcome,
                gate: None,
            },
        );
    }

    pub fn single_requests(&self) -> Vec<String> {
        self.single_requests.lock().unwrap().clone()
    }

    pub fn batch_requests(&self) -> Vec<Vec<String>> {
        self.batch_requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.single_requests().len() + self.batch_requests().len()
    }
}

impl SentimentBackend for ScriptedBackend {
    fn analyze(&self, request: &AnalyzeRequest) -> Result<SingleAnalysis, RequestError> {
        self.single_requests
            .lock()
            .unwrap()
            .push(request.text.clone());
        let reply = self.single.lock().unwrap().remove(&request.text);
        match reply {
            Some(reply) => reply.deliver(),
            None => Err(RequestError::Transport(format!(
                "no scripted reply for {:?}",
                request.text
            ))),
        }
    }

    fn batch_analyze(&self, request: &BatchAnalyzeRequest) -> Result<BatchAnalysis, RequestError> {
        self.batch_requests
            .lock()
            .unwrap()
            .push(request.texts.clone());
        let reply = self.batch.lock().unwrap().remove(&request.texts);
        match reply {
            Some(reply) => reply.deliver(),
            None => Err(RequestError::Transport("no scripted batch reply".to_string())),
        }
    }
}

pub fn single_from_json(body: &str) -> SingleAnalysis {
    serde_json::from_str(body).expect("single fixture parses")
}

pub fn batch_from_json(body: &str) -> BatchAnalysis {
    serde_json::from_str(body).expect("batch fixture parses")
}
