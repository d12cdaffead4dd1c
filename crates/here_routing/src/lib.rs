pub mod client;
pub mod config;
pub mod error;
pub mod geocoder;
pub mod matrix;
pub mod matrix_job;
pub mod modes;
pub mod route;
pub mod summary;
pub mod transport;
pub mod waypoint;

#[cfg(test)]
mod test_utils;

pub use client::HereRoutingClient;
pub use config::RoutingClientParams;
pub use error::RoutingError;
pub use geocoder::Geocoder;
pub use matrix::{MatrixRequest, MatrixResponse, RegionDefinition};
pub use matrix_job::{MatrixJob, MatrixJobStatus};
pub use modes::{RouteMode, TravelTime};
pub use route::{RouteRequest, RoutingResponse};
pub use waypoint::{LatLng, Waypoint};
