//! JSON rendering of results and poller state

use beacon_request::{PollingState, RequestError, RequestResult};
use serde_json::{Map, Value, json};

/// `{ "data": ..., "error": ... }`
pub fn result_json(result: &RequestResult) -> Value {
    json!({
        "data": result.data,
        "error": result.error.as_ref().map(error_json),
    })
}

/// One poller snapshot
pub fn state_json(state: &PollingState) -> Value {
    json!({
        "loading": state.loading,
        "data": state.data,
        "error": state.error.as_ref().map(error_json),
        "is_initial_request": state.is_initial_request,
        "interval": state
            .current_interval
            .map(|d| humantime_serde::re::humantime::format_duration(d).to_string()),
    })
}

fn error_json(error: &RequestError) -> Value {
    let mut out = Map::new();
    out.insert("message".into(), Value::String(error.to_string()));
    if let Some(response) = error.response() {
        out.insert("status".into(), response.status.into());
        out.insert("status_text".into(), response.status_text.clone().into());
        if let Some(body) = &response.body {
            out.insert("body".into(), body.clone());
        }
    }
    Value::Object(out)
}
