use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    client::HereRoutingClient,
    error::{RoutingError, classify_error},
    geocoder::{Geocoder, resolve_waypoint},
    modes::{RouteMode, TravelTime},
    summary::{
        Maneuver, PublicTransportLine, summarize_non_vehicle_maneuvers,
        summarize_public_transport_lines, summarize_vehicle_maneuvers,
    },
    transport::HttpTransport,
    waypoint::Waypoint,
};

const OPERATION: &str = "calculate_route";

#[derive(Debug, Clone, PartialEq)]
pub struct RouteRequest {
    pub origin: Waypoint,
    /// Point the route has to pass through between origin and destination.
    pub via: Option<Waypoint>,
    pub destination: Waypoint,
    pub modes: Vec<RouteMode>,
    pub departure: Option<TravelTime>,
    pub arrival: Option<TravelTime>,
    /// Adds a change maneuver whenever the public transport line changes.
    pub combine_change: bool,
}

impl RouteRequest {
    pub fn new(
        origin: impl Into<Waypoint>,
        destination: impl Into<Waypoint>,
        modes: Vec<RouteMode>,
    ) -> Self {
        Self {
            origin: origin.into(),
            via: None,
            destination: destination.into(),
            modes,
            departure: None,
            arrival: None,
            combine_change: false,
        }
    }

    fn preset(
        origin: impl Into<Waypoint>,
        destination: impl Into<Waypoint>,
        mode: RouteMode,
    ) -> Self {
        Self::new(origin, destination, vec![mode, RouteMode::Fastest]).departure(TravelTime::Now)
    }

    pub fn car(origin: impl Into<Waypoint>, destination: impl Into<Waypoint>) -> Self {
        Self::preset(origin, destination, RouteMode::Car)
    }

    pub fn truck(origin: impl Into<Waypoint>, destination: impl Into<Waypoint>) -> Self {
        Self::preset(origin, destination, RouteMode::Truck)
    }

    pub fn bicycle(origin: impl Into<Waypoint>, destination: impl Into<Waypoint>) -> Self {
        Self::preset(origin, destination, RouteMode::Bicycle)
    }

    pub fn pedestrian(origin: impl Into<Waypoint>, destination: impl Into<Waypoint>) -> Self {
        Self::preset(origin, destination, RouteMode::Pedestrian)
    }

    /// Fastest car route from `origin` to `destination` through `via`.
    pub fn intermediate(
        origin: impl Into<Waypoint>,
        via: impl Into<Waypoint>,
        destination: impl Into<Waypoint>,
    ) -> Self {
        Self::car(origin, destination).via(via)
    }

    /// Fastest car route, meant for locations close to a motorway.
    pub fn location_near_motorway(
        origin: impl Into<Waypoint>,
        destination: impl Into<Waypoint>,
    ) -> Self {
        Self::car(origin, destination)
    }

    pub fn public_transport(
        origin: impl Into<Waypoint>,
        destination: impl Into<Waypoint>,
        combine_change: bool,
    ) -> Self {
        Self {
            combine_change,
            ..Self::preset(origin, destination, RouteMode::PublicTransport)
        }
    }

    /// Public transport route based on timetables. Has no default departure,
    /// set one of departure or arrival.
    pub fn public_transport_timetable(
        origin: impl Into<Waypoint>,
        destination: impl Into<Waypoint>,
        combine_change: bool,
    ) -> Self {
        Self {
            combine_change,
            ..Self::new(
                origin,
                destination,
                vec![RouteMode::PublicTransportTimeTable, RouteMode::Fastest],
            )
        }
    }

    pub fn via(mut self, via: impl Into<Waypoint>) -> Self {
        self.via = Some(via.into());
        self
    }

    pub fn modes(mut self, modes: Vec<RouteMode>) -> Self {
        self.modes = modes;
        self
    }

    pub fn departure(mut self, departure: impl Into<TravelTime>) -> Self {
        self.departure = Some(departure.into());
        self
    }

    pub fn arrival(mut self, arrival: impl Into<TravelTime>) -> Self {
        self.arrival = Some(arrival.into());
        self
    }

    /// Arrival replaces any departure set so far, presets included.
    pub fn arrive_at(mut self, arrival: impl Into<TravelTime>) -> Self {
        self.departure = None;
        self.arrival = Some(arrival.into());
        self
    }

    pub fn validate(&self) -> Result<(), RoutingError> {
        if self.departure.is_some() && self.arrival.is_some() {
            return Err(RoutingError::ClientPreconditionViolation(
                "Specify either departure or arrival, not both.".to_string(),
            ));
        }
        Ok(())
    }

    fn has_any_mode(&self, modes: &[RouteMode]) -> bool {
        self.modes.iter().any(|mode| modes.contains(mode))
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct RouteLeg {
    #[serde(default)]
    pub maneuver: Vec<Maneuver>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    #[serde(default)]
    pub leg: Vec<RouteLeg>,
    #[serde(default)]
    pub public_transport_line: Vec<PublicTransportLine>,
}

#[derive(Deserialize, Debug)]
struct CalculateRouteBody {
    #[serde(default)]
    route: Vec<Route>,
}

#[derive(Debug, Clone)]
pub struct RoutingResponse {
    /// The untouched `response` object of the provider.
    pub response: serde_json::Value,
    pub routes: Vec<Route>,
    /// Short description of the first route, e.g. `"A100 - Dreieck Funkturm; A115"`.
    pub route_short: String,
}

impl RoutingResponse {
    fn decode(body: serde_json::Value, request: &RouteRequest) -> Result<Self, RoutingError> {
        let response = match body {
            serde_json::Value::Object(mut object) => match object.remove("response") {
                Some(response) if !response.is_null() => response,
                _ => return Err(classify_error(&serde_json::Value::Object(object), OPERATION)),
            },
            other => return Err(classify_error(&other, OPERATION)),
        };

        let routes = CalculateRouteBody::deserialize(&response)?.route;
        let route_short = summarize_route(&routes, request)?;

        Ok(Self {
            response,
            routes,
            route_short,
        })
    }
}

fn summarize_route(routes: &[Route], request: &RouteRequest) -> Result<String, RoutingError> {
    let route = routes.first().ok_or_else(|| RoutingError::generic(OPERATION))?;
    let maneuvers = || {
        route
            .leg
            .first()
            .map(|leg| leg.maneuver.as_slice())
            .ok_or_else(|| RoutingError::generic(OPERATION))
    };

    if request.has_any_mode(&[RouteMode::Car, RouteMode::Truck]) {
        Ok(summarize_vehicle_maneuvers(maneuvers()?))
    } else if request.has_any_mode(&[
        RouteMode::PublicTransport,
        RouteMode::PublicTransportTimeTable,
    ]) {
        Ok(summarize_public_transport_lines(&route.public_transport_line))
    } else if request.has_any_mode(&[RouteMode::Pedestrian, RouteMode::Bicycle]) {
        Ok(summarize_non_vehicle_maneuvers(maneuvers()?))
    } else {
        Ok(String::new())
    }
}

impl<T, G> HereRoutingClient<T, G>
where
    T: HttpTransport,
    G: Geocoder,
{
    /// Calculates a route and summarizes it according to the travel modes.
    pub async fn calculate_route(
        &self,
        request: &RouteRequest,
    ) -> Result<RoutingResponse, RoutingError> {
        request.validate()?;

        let mut waypoints = vec![resolve_waypoint(&self.geocoder, &request.origin).await?];
        if let Some(via) = &request.via {
            waypoints.push(resolve_waypoint(&self.geocoder, via).await?);
        }
        waypoints.push(resolve_waypoint(&self.geocoder, &request.destination).await?);

        let waypoint_keys: Vec<String> = (0..waypoints.len())
            .map(|index| format!("waypoint{}", index))
            .collect();
        let waypoint_values: Vec<String> = waypoints
            .iter()
            .map(|waypoint| waypoint.to_geo_waypoint())
            .collect();
        let mode = RouteMode::join(&request.modes);
        let departure = request.departure.as_ref().map(ToString::to_string);
        let arrival = request.arrival.as_ref().map(ToString::to_string);

        let mut query: Vec<(&str, &str)> = waypoint_keys
            .iter()
            .zip(&waypoint_values)
            .map(|(key, value)| (key.as_str(), value.as_str()))
            .collect();
        query.push(("mode", mode.as_str()));
        query.push(("apikey", self.params.api_key.as_str()));
        if let Some(departure) = &departure {
            query.push(("departure", departure.as_str()));
        }
        if let Some(arrival) = &arrival {
            query.push(("arrival", arrival.as_str()));
        }
        if request.combine_change {
            query.push(("combineChange", "true"));
        }

        debug!("HereApi: Calculating route with mode {}", mode);
        let response = self.transport.get(&self.params.route_url, &query).await?;
        let body: serde_json::Value = response.json().unwrap_or(serde_json::Value::Null);

        RoutingResponse::decode(body, request).inspect_err(|error| {
            warn!(
                "HereApi: Route calculation failed with status {}: {}",
                response.status, error
            )
        })
    }
}
