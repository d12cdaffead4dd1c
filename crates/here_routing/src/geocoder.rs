use std::future::Future;

use crate::{error::RoutingError, waypoint::LatLng, waypoint::Waypoint};

/// Resolves free-text place names. The routing client only consumes it.
pub trait Geocoder: Send + Sync {
    /// The error message ends up in [`RoutingError::WaypointNotFound`].
    fn resolve(&self, name: &str) -> impl Future<Output = Result<LatLng, String>> + Send;
}

/// Geocoder for clients that only ever route between coordinates.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoGeocoder;

impl Geocoder for NoGeocoder {
    async fn resolve(&self, name: &str) -> Result<LatLng, String> {
        Err(format!("no geocoder configured to resolve \"{}\"", name))
    }
}

/// Turns a waypoint into a position, going through the geocoder for names.
pub async fn resolve_waypoint<G: Geocoder>(
    geocoder: &G,
    waypoint: &Waypoint,
) -> Result<LatLng, RoutingError> {
    match waypoint {
        Waypoint::Coordinate(coordinate) => Ok(*coordinate),
        Waypoint::Name(name) => geocoder
            .resolve(name)
            .await
            .map_err(RoutingError::WaypointNotFound),
    }
}

pub async fn resolve_waypoints<G: Geocoder>(
    geocoder: &G,
    waypoints: &[Waypoint],
) -> Result<Vec<LatLng>, RoutingError> {
    let mut resolved = Vec::with_capacity(waypoints.len());
    for waypoint in waypoints {
        resolved.push(resolve_waypoint(geocoder, waypoint).await?);
    }
    Ok(resolved)
}
