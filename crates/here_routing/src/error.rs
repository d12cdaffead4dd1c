use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RoutingError {
    /// The api key was invalid or no contract could be found for it.
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// Wrong parameter syntax or invalid parameter combinations.
    #[error("Invalid input data: {0}")]
    InvalidInputData(String),

    /// A waypoint could not be found in the routing network, or a place name
    /// could not be geocoded.
    #[error("Waypoint not found: {0}")]
    WaypointNotFound(String),

    #[error("No route found: {0}")]
    NoRouteFound(String),

    /// A link id passed as input could not be found in the map data.
    #[error("Link id not found: {0}")]
    LinkIdNotFound(String),

    /// The route id could not be decoded, the route must be calculated again.
    #[error("Route not reconstructed: {0}")]
    RouteNotReconstructed(String),

    /// The request was rejected on the client before anything was sent.
    #[error("Invalid request: {0}")]
    ClientPreconditionViolation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Matrix job failed: {0}")]
    MatrixJobFailed(String),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Polling timeout after {0} attempts")]
    Timeout(u32),

    #[error("Error occurred on {operation}")]
    Generic { operation: String },

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),
}

impl RoutingError {
    pub(crate) fn generic(operation: &str) -> Self {
        RoutingError::Generic {
            operation: operation.to_string(),
        }
    }
}

/// Error body returned by the routing service, either the authentication
/// shape (`error` / `error_description`) or the routing shape
/// (`subtype` / `details`).
#[derive(Deserialize, Debug, Default)]
struct ProviderErrorPayload {
    error: Option<String>,
    error_description: Option<String>,
    subtype: Option<String>,
    details: Option<String>,
}

const UNAUTHORIZED: &str = "Unauthorized";

const SUBTYPE_ERRORS: &[(&str, fn(String) -> RoutingError)] = &[
    ("InvalidInputData", RoutingError::InvalidInputData),
    ("WaypointNotFound", RoutingError::WaypointNotFound),
    ("NoRouteFound", RoutingError::NoRouteFound),
    ("LinkIdNotFound", RoutingError::LinkIdNotFound),
    ("RouteNotReconstructed", RoutingError::RouteNotReconstructed),
];

fn classify_payload(payload: ProviderErrorPayload, operation: &str) -> RoutingError {
    if payload.error.as_deref() == Some(UNAUTHORIZED) {
        return RoutingError::InvalidCredentials(payload.error_description.unwrap_or_default());
    }

    let Some(subtype) = payload.subtype.as_deref() else {
        return RoutingError::generic(operation);
    };

    SUBTYPE_ERRORS
        .iter()
        .find(|(candidate, _)| *candidate == subtype)
        .map(|(_, make_error)| make_error(payload.details.unwrap_or_default()))
        .unwrap_or_else(|| RoutingError::generic(operation))
}

/// Maps an error body from the routing service to a [`RoutingError`].
///
/// `operation` names the client operation and only shows up in the
/// [`RoutingError::Generic`] fallback.
pub fn classify_error(value: &serde_json::Value, operation: &str) -> RoutingError {
    match ProviderErrorPayload::deserialize(value) {
        Ok(payload) => classify_payload(payload, operation),
        Err(_) => RoutingError::generic(operation),
    }
}

/// Same as [`classify_error`] for a raw body that may not even be JSON.
pub fn classify_error_body(body: &str, operation: &str) -> RoutingError {
    match serde_json::from_str::<ProviderErrorPayload>(body) {
        Ok(payload) => classify_payload(payload, operation),
        Err(_) => RoutingError::generic(operation),
    }
}
