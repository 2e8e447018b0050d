use crate::error::TransportError;
use crate::providers::{UpstreamRequest, UpstreamResponse};
use crate::transport::Transport;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// In-memory transport that replays a canned answer and remembers every
/// request it was asked to send.
#[derive(Debug, Clone)]
pub struct ScriptedTransport {
    reply: Result<UpstreamResponse, TransportError>,
    requests: Arc<Mutex<Vec<UpstreamRequest>>>,
}

impl ScriptedTransport {
    pub fn replying(response: UpstreamResponse) -> Self {
        Self {
            reply: Ok(response),
            requests: Arc::default(),
        }
    }

    pub fn failing(error: TransportError) -> Self {
        Self {
            reply: Err(error),
            requests: Arc::default(),
        }
    }

    pub fn requests(&self) -> Vec<UpstreamRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.requests().len()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn fetch(&self, request: &UpstreamRequest) -> Result<UpstreamResponse, TransportError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }
        self.reply.clone()
    }
}

/// Transport whose every call panics with the given message.
#[derive(Debug, Clone)]
pub struct PanickingTransport {
    message: String,
}

impl PanickingTransport {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

#[async_trait]
impl Transport for PanickingTransport {
    async fn fetch(&self, _request: &UpstreamRequest) -> Result<UpstreamResponse, TransportError> {
        panic!("{}", self.message);
    }
}
