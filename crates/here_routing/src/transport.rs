use std::{future::Future, time::Duration};

use reqwest::redirect;
use serde::Serialize;
use tracing::debug;

use crate::error::RoutingError;

/// Status and UTF-8 body of an HTTP response.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, RoutingError> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// The two HTTP calls the routing client needs. Redirects must not be
/// followed, the matrix job poll loop has to see `303 See Other`.
pub trait HttpTransport: Send + Sync {
    fn get(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> impl Future<Output = Result<HttpResponse, RoutingError>> + Send;

    fn post_json<B: Serialize + Sync>(
        &self,
        url: &str,
        query: &[(&str, &str)],
        body: &B,
    ) -> impl Future<Output = Result<HttpResponse, RoutingError>> + Send;
}

pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self, RoutingError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(redirect::Policy::none())
            .build()?;

        Ok(Self { client })
    }

    async fn read(response: reqwest::Response) -> Result<HttpResponse, RoutingError> {
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(HttpResponse { status, body })
    }
}

impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<HttpResponse, RoutingError> {
        debug!("HereApi: GET {}", url);
        let response = self.client.get(url).query(query).send().await?;
        Self::read(response).await
    }

    async fn post_json<B: Serialize + Sync>(
        &self,
        url: &str,
        query: &[(&str, &str)],
        body: &B,
    ) -> Result<HttpResponse, RoutingError> {
        debug!("HereApi: POST {}", url);
        let response = self
            .client
            .post(url)
            .query(query)
            .json(body)
            .send()
            .await?;
        Self::read(response).await
    }
}
