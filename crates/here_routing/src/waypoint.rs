use std::fmt::Display;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A position in degrees. Serializes as `{"lat": .., "lng": ..}`, the shape
/// the matrix endpoint expects.
#[derive(Deserialize, Serialize, JsonSchema, Debug, Copy, Clone, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Encoding used by the route calculation endpoint.
    pub fn to_geo_waypoint(&self) -> String {
        format!("geo!{},{}", self.lat, self.lng)
    }
}

impl From<geo_types::Point> for LatLng {
    fn from(point: geo_types::Point) -> Self {
        Self {
            lat: point.y(),
            lng: point.x(),
        }
    }
}

impl From<&geo_types::Point> for LatLng {
    fn from(point: &geo_types::Point) -> Self {
        (*point).into()
    }
}

impl From<LatLng> for geo_types::Point {
    fn from(value: LatLng) -> Self {
        geo_types::Point::new(value.lng, value.lat)
    }
}

/// `[lat, lng]`, in that order.
impl From<[f64; 2]> for LatLng {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

/// A routing endpoint, either already positioned or a place name that still
/// has to go through a [`Geocoder`](crate::geocoder::Geocoder).
#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Waypoint {
    Coordinate(LatLng),
    Name(String),
}

impl Waypoint {
    pub fn coordinate(lat: f64, lng: f64) -> Self {
        Waypoint::Coordinate(LatLng::new(lat, lng))
    }

    pub fn name(name: impl Into<String>) -> Self {
        Waypoint::Name(name.into())
    }
}

impl Display for Waypoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Waypoint::Coordinate(coordinate) => write!(f, "{},{}", coordinate.lat, coordinate.lng),
            Waypoint::Name(name) => write!(f, "{}", name),
        }
    }
}

impl From<LatLng> for Waypoint {
    fn from(value: LatLng) -> Self {
        Waypoint::Coordinate(value)
    }
}

impl From<[f64; 2]> for Waypoint {
    fn from(value: [f64; 2]) -> Self {
        Waypoint::Coordinate(value.into())
    }
}

impl From<geo_types::Point> for Waypoint {
    fn from(value: geo_types::Point) -> Self {
        Waypoint::Coordinate(value.into())
    }
}

impl From<&str> for Waypoint {
    fn from(value: &str) -> Self {
        Waypoint::Name(value.to_string())
    }
}

impl From<String> for Waypoint {
    fn from(value: String) -> Self {
        Waypoint::Name(value)
    }
}
