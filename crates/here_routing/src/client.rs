use crate::{
    config::RoutingClientParams,
    error::RoutingError,
    geocoder::{Geocoder, NoGeocoder},
    transport::{HttpTransport, ReqwestTransport},
};

/// Client for the HERE routing and matrix routing APIs.
///
/// Route calculation lives in [`crate::route`], matrix requests in
/// [`crate::matrix`] and the asynchronous matrix job in [`crate::matrix_job`].
pub struct HereRoutingClient<T = ReqwestTransport, G = NoGeocoder> {
    pub(crate) params: RoutingClientParams,
    pub(crate) transport: T,
    pub(crate) geocoder: G,
}

impl HereRoutingClient {
    pub fn new(params: RoutingClientParams) -> Result<Self, RoutingError> {
        let transport = ReqwestTransport::new(params.timeout)?;
        Ok(Self {
            params,
            transport,
            geocoder: NoGeocoder,
        })
    }

    pub fn from_env() -> Result<Self, RoutingError> {
        Self::new(RoutingClientParams::from_env()?)
    }
}

impl<T, G> HereRoutingClient<T, G>
where
    T: HttpTransport,
    G: Geocoder,
{
    pub fn with_transport(params: RoutingClientParams, transport: T, geocoder: G) -> Self {
        Self {
            params,
            transport,
            geocoder,
        }
    }

    /// Resolves place names in requests with `geocoder` from now on.
    pub fn with_geocoder<G2: Geocoder>(self, geocoder: G2) -> HereRoutingClient<T, G2> {
        HereRoutingClient {
            params: self.params,
            transport: self.transport,
            geocoder,
        }
    }

    pub fn params(&self) -> &RoutingClientParams {
        &self.params
    }
}
