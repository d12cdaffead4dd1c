use std::collections::{HashMap, VecDeque};

use parking_lot::Mutex;
use serde::Serialize;

use crate::{
    config::RoutingClientParams,
    error::RoutingError,
    geocoder::Geocoder,
    transport::{HttpResponse, HttpTransport},
    waypoint::LatLng,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl RecordedRequest {
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Transport answering with canned responses, in order, and recording every
/// request it receives.
#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<HttpResponse>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedTransport {
    pub fn new(responses: Vec<HttpResponse>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(vec![]),
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }

    pub fn remaining(&self) -> usize {
        self.responses.lock().len()
    }

    fn respond(
        &self,
        method: Method,
        url: &str,
        query: &[(&str, &str)],
        body: Option<serde_json::Value>,
    ) -> Result<HttpResponse, RoutingError> {
        self.requests.lock().push(RecordedRequest {
            method,
            url: url.to_string(),
            query: query
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            body,
        });

        self.responses
            .lock()
            .pop_front()
            .ok_or_else(|| RoutingError::generic("scripted transport exhausted"))
    }
}

impl HttpTransport for ScriptedTransport {
    async fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<HttpResponse, RoutingError> {
        self.respond(Method::Get, url, query, None)
    }

    async fn post_json<B: Serialize + Sync>(
        &self,
        url: &str,
        query: &[(&str, &str)],
        body: &B,
    ) -> Result<HttpResponse, RoutingError> {
        let body = serde_json::to_value(body)?;
        self.respond(Method::Post, url, query, Some(body))
    }
}

pub struct MapGeocoder {
    places: HashMap<String, LatLng>,
}

impl MapGeocoder {
    pub fn new(places: &[(&str, LatLng)]) -> Self {
        Self {
            places: places
                .iter()
                .map(|(name, position)| (name.to_string(), *position))
                .collect(),
        }
    }
}

impl Geocoder for MapGeocoder {
    async fn resolve(&self, name: &str) -> Result<LatLng, String> {
        self.places
            .get(name)
            .copied()
            .ok_or_else(|| format!("no results for \"{}\"", name))
    }
}

pub fn test_params() -> RoutingClientParams {
    RoutingClientParams {
        poll_interval: std::time::Duration::ZERO,
        ..RoutingClientParams::new("test-key")
    }
}

pub fn json_response(status: u16, body: serde_json::Value) -> HttpResponse {
    HttpResponse::new(status, body.to_string())
}
