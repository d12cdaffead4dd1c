use std::fmt::Display;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Tokens of the `mode` parameter of the route calculation endpoint. A request
/// usually combines a routing type (`fastest`, ...) with a transport mode.
#[derive(Deserialize, Serialize, JsonSchema, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum RouteMode {
    #[serde(rename = "fastest")]
    Fastest,
    #[serde(rename = "shortest")]
    Shortest,
    #[serde(rename = "balanced")]
    Balanced,
    #[serde(rename = "car")]
    Car,
    #[serde(rename = "truck")]
    Truck,
    #[serde(rename = "pedestrian")]
    Pedestrian,
    #[serde(rename = "bicycle")]
    Bicycle,
    #[serde(rename = "publicTransport")]
    PublicTransport,
    #[serde(rename = "publicTransportTimeTable")]
    PublicTransportTimeTable,
    #[serde(rename = "carHOV")]
    CarHov,
    #[serde(rename = "traffic:enabled")]
    TrafficEnabled,
    #[serde(rename = "traffic:disabled")]
    TrafficDisabled,
    #[serde(rename = "traffic:default")]
    TrafficDefault,
}

impl RouteMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteMode::Fastest => "fastest",
            RouteMode::Shortest => "shortest",
            RouteMode::Balanced => "balanced",
            RouteMode::Car => "car",
            RouteMode::Truck => "truck",
            RouteMode::Pedestrian => "pedestrian",
            RouteMode::Bicycle => "bicycle",
            RouteMode::PublicTransport => "publicTransport",
            RouteMode::PublicTransportTimeTable => "publicTransportTimeTable",
            RouteMode::CarHov => "carHOV",
            RouteMode::TrafficEnabled => "traffic:enabled",
            RouteMode::TrafficDisabled => "traffic:disabled",
            RouteMode::TrafficDefault => "traffic:default",
        }
    }

    /// Joins modes into the `mode` query value, e.g. `car;fastest`.
    pub fn join(modes: &[RouteMode]) -> String {
        modes
            .iter()
            .map(RouteMode::as_str)
            .collect::<Vec<_>>()
            .join(";")
    }
}

impl Display for RouteMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Departure or arrival time of a route.
#[derive(Debug, Clone, PartialEq)]
pub enum TravelTime {
    Now,
    /// Local time at the waypoint, sent without offset.
    Local(jiff::civil::DateTime),
    Instant(jiff::Timestamp),
}

impl Display for TravelTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TravelTime::Now => write!(f, "now"),
            TravelTime::Local(datetime) => write!(f, "{}", datetime.strftime("%Y-%m-%dT%H:%M:%S")),
            TravelTime::Instant(timestamp) => {
                write!(f, "{}", timestamp.strftime("%Y-%m-%dT%H:%M:%SZ"))
            }
        }
    }
}

impl From<jiff::civil::DateTime> for TravelTime {
    fn from(value: jiff::civil::DateTime) -> Self {
        TravelTime::Local(value)
    }
}

impl From<jiff::Timestamp> for TravelTime {
    fn from(value: jiff::Timestamp) -> Self {
        TravelTime::Instant(value)
    }
}

/// Profiles of the matrix endpoint, they allow routes of arbitrary length.
#[derive(Deserialize, Serialize, JsonSchema, Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum MatrixRoutingProfile {
    CarFast,
    CarShort,
    TruckFast,
    Pedestrian,
    Bicycle,
}

#[derive(Deserialize, Serialize, JsonSchema, Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum MatrixRoutingMode {
    Fast,
    Short,
}

#[derive(Deserialize, Serialize, JsonSchema, Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum MatrixRoutingTransportMode {
    Car,
    Truck,
    Pedestrian,
    Bicycle,
    Scooter,
    Taxi,
    Bus,
    PrivateBus,
}

#[derive(Deserialize, Serialize, JsonSchema, Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum MatrixSummaryAttribute {
    TravelTimes,
    Distances,
}
