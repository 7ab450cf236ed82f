//! In-crate test support: a transport that records calls and replays canned
//! responses, so unit tests can assert on exact request traffic without a
//! socket.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::client::GatewayClient;
use crate::error::Result;
use crate::transport::{Method, Response, Transport};

pub struct State {
    pub calls: Vec<(Method, String, Option<Value>)>,
    pub responses: VecDeque<Response>,
}

impl State {
    pub fn with_responses(responses: Vec<(u16, Value)>) -> Self {
        Self {
            calls: Vec::new(),
            responses: responses
                .into_iter()
                .map(|(status, body)| Response { status, body })
                .collect(),
        }
    }
}

pub struct FakeTransport {
    state: Arc<Mutex<State>>,
}

impl FakeTransport {
    pub fn new(state: Arc<Mutex<State>>) -> Self {
        Self { state }
    }
}

impl Transport for FakeTransport {
    fn send(
        &self,
        method: Method,
        url: &str,
        query: &[(String, String)],
        body: Option<&Value>,
    ) -> Result<Response> {
        let mut state = self.state.lock().unwrap();
        let mut url = url.to_string();
        if !query.is_empty() {
            let qs: Vec<String> = query.iter().map(|(k, v)| format!("{k}={v}")).collect();
            url = format!("{url}?{}", qs.join("&"));
        }
        state.calls.push((method, url, body.cloned()));
        let response = state
            .responses
            .pop_front()
            .unwrap_or_else(|| panic!("no canned response left for {method} request"));
        Ok(response)
    }
}

/// A client wired to a `FakeTransport` preloaded with `responses`, plus the
/// shared state for asserting on recorded calls.
pub fn canned(responses: Vec<(u16, Value)>) -> (GatewayClient, Arc<Mutex<State>>) {
    let state = Arc::new(Mutex::new(State::with_responses(responses)));
    let client =
        GatewayClient::with_transport("https://gw.test/api", Box::new(FakeTransport::new(state.clone())));
    (client, state)
}
