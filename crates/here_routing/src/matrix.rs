use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    client::HereRoutingClient,
    error::{RoutingError, classify_error_body},
    geocoder::{Geocoder, resolve_waypoints},
    modes::{
        MatrixRoutingMode, MatrixRoutingProfile, MatrixRoutingTransportMode,
        MatrixSummaryAttribute, TravelTime,
    },
    transport::HttpTransport,
    waypoint::{LatLng, Waypoint},
};

/// Area in which the matrix is calculated.
#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RegionDefinition {
    /// `radius` in meters.
    Circle { center: LatLng, radius: u32 },
    BoundingBox {
        north: f64,
        south: f64,
        west: f64,
        east: f64,
    },
    /// Circle around origins and destinations, `margin` in meters.
    AutoCircle {
        #[serde(skip_serializing_if = "Option::is_none")]
        margin: Option<u32>,
    },
    World,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatrixRequest {
    pub region: RegionDefinition,
    pub origins: Vec<Waypoint>,
    pub destinations: Vec<Waypoint>,
    pub profile: Option<MatrixRoutingProfile>,
    pub departure_time: Option<TravelTime>,
    pub routing_mode: Option<MatrixRoutingMode>,
    pub transport_mode: Option<MatrixRoutingTransportMode>,
    pub matrix_attributes: Vec<MatrixSummaryAttribute>,
}

impl MatrixRequest {
    pub fn new(region: RegionDefinition, origins: Vec<Waypoint>, destinations: Vec<Waypoint>) -> Self {
        Self {
            region,
            origins,
            destinations,
            profile: None,
            departure_time: None,
            routing_mode: None,
            transport_mode: None,
            matrix_attributes: vec![],
        }
    }

    pub fn profile(mut self, profile: MatrixRoutingProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    pub fn departure_time(mut self, departure_time: impl Into<TravelTime>) -> Self {
        self.departure_time = Some(departure_time.into());
        self
    }

    pub fn routing_mode(mut self, routing_mode: MatrixRoutingMode) -> Self {
        self.routing_mode = Some(routing_mode);
        self
    }

    pub fn transport_mode(mut self, transport_mode: MatrixRoutingTransportMode) -> Self {
        self.transport_mode = Some(transport_mode);
        self
    }

    pub fn matrix_attributes(mut self, matrix_attributes: Vec<MatrixSummaryAttribute>) -> Self {
        self.matrix_attributes = matrix_attributes;
        self
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatrixRequestBody {
    pub region_definition: RegionDefinition,
    pub origins: Vec<LatLng>,
    pub destinations: Vec<LatLng>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<MatrixRoutingProfile>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub departure_time: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub routing_mode: Option<MatrixRoutingMode>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub transport_mode: Option<MatrixRoutingTransportMode>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub matrix_attributes: Vec<MatrixSummaryAttribute>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct Matrix {
    pub num_origins: usize,
    pub num_destinations: usize,

    /// Travel times in seconds, row major by origin
    #[serde(default)]
    pub travel_times: Option<Vec<f64>>,

    /// Distances in meters, row major by origin
    #[serde(default)]
    pub distances: Option<Vec<f64>>,

    #[serde(default)]
    pub error_codes: Option<Vec<i64>>,
}

impl Matrix {
    fn index(&self, origin: usize, destination: usize) -> Option<usize> {
        (origin < self.num_origins && destination < self.num_destinations)
            .then_some(origin * self.num_destinations + destination)
    }

    pub fn travel_time(&self, origin: usize, destination: usize) -> Option<f64> {
        let index = self.index(origin, destination)?;
        self.travel_times.as_ref()?.get(index).copied()
    }

    pub fn distance(&self, origin: usize, destination: usize) -> Option<f64> {
        let index = self.index(origin, destination)?;
        self.distances.as_ref()?.get(index).copied()
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MatrixResponse {
    #[serde(default)]
    pub matrix_id: Option<String>,
    pub matrix: Matrix,
    #[serde(default)]
    pub region_definition: Option<serde_json::Value>,
}

impl<T, G> HereRoutingClient<T, G>
where
    T: HttpTransport,
    G: Geocoder,
{
    pub(crate) async fn matrix_request_body(
        &self,
        request: &MatrixRequest,
    ) -> Result<MatrixRequestBody, RoutingError> {
        Ok(MatrixRequestBody {
            region_definition: request.region.clone(),
            origins: resolve_waypoints(&self.geocoder, &request.origins).await?,
            destinations: resolve_waypoints(&self.geocoder, &request.destinations).await?,
            profile: request.profile,
            departure_time: request.departure_time.as_ref().map(ToString::to_string),
            routing_mode: request.routing_mode,
            transport_mode: request.transport_mode,
            matrix_attributes: request.matrix_attributes.clone(),
        })
    }

    /// Calculates the matrix within a single request.
    pub async fn sync_matrix(&self, request: &MatrixRequest) -> Result<MatrixResponse, RoutingError> {
        const OPERATION: &str = "sync_matrix";

        let body = self.matrix_request_body(request).await?;
        debug!(
            "HereApi: Requesting {}x{} matrix",
            body.origins.len(),
            body.destinations.len()
        );

        let response = self
            .transport
            .post_json(
                &self.params.matrix_url,
                &[("apiKey", self.params.api_key.as_str()), ("async", "false")],
                &body,
            )
            .await?;

        let json: serde_json::Value = match response.json() {
            Ok(json) => json,
            Err(_) => return Err(classify_error_body(&response.body, OPERATION)),
        };

        if json.get("matrix").is_some_and(|matrix| !matrix.is_null()) {
            Ok(serde_json::from_value(json)?)
        } else {
            warn!(
                "HereApi: Matrix request failed with status {}",
                response.status
            );
            Err(classify_error_body(&response.body, OPERATION))
        }
    }
}
