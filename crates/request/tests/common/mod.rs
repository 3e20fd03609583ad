//! Shared test transport.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use beacon_request::{Method, Transport, TransportError, TransportResponse};
use parking_lot::Mutex;
use serde_json::Value;

/// One scripted reply.
#[derive(Debug, Clone)]
pub struct Step {
    pub delay: Duration,
    pub outcome: Result<TransportResponse, TransportError>,
}

impl Step {
    pub fn ok(data: Value) -> Self {
        Self {
            delay: Duration::ZERO,
            outcome: Ok(TransportResponse::ok(data)),
        }
    }

    pub fn fail(err: TransportError) -> Self {
        Self {
            delay: Duration::ZERO,
            outcome: Err(err),
        }
    }

    pub fn reply(outcome: Result<TransportResponse, TransportError>) -> Self {
        Self {
            delay: Duration::ZERO,
            outcome,
        }
    }

    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// A request as seen by the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

/// Replays scripted steps in order, then repeats `fallback`.
pub struct MockTransport {
    script: Mutex<VecDeque<Step>>,
    fallback: Step,
    calls: AtomicUsize,
    completed: AtomicUsize,
    requests: Mutex<Vec<Recorded>>,
}

impl MockTransport {
    pub fn new(fallback: Step) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback,
            calls: AtomicUsize::new(0),
            completed: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(data: Value) -> Self {
        Self::new(Step::ok(data))
    }

    pub fn then(self, step: Step) -> Self {
        self.script.lock().push_back(step);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn dispatch(
        &self,
        method: &Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<TransportResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().push(Recorded {
            method: method.clone(),
            path: path.to_string(),
            body: body.cloned(),
        });

        let step = self
            .script
            .lock()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());

        if !step.delay.is_zero() {
            tokio::time::sleep(step.delay).await;
        }
        self.completed.fetch_add(1, Ordering::SeqCst);
        step.outcome
    }
}

pub fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}
