//! Asynchronous matrix calculation.
//!
//! The job is submitted once, its status url is then polled every
//! `poll_interval` until the job completes or fails, and the result is
//! downloaded from the result url.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
    client::HereRoutingClient,
    error::{RoutingError, classify_error_body},
    geocoder::Geocoder,
    matrix::{MatrixRequest, MatrixResponse},
    transport::{HttpResponse, HttpTransport},
};

const OPERATION: &str = "async_matrix";

const STATUS_OK: u16 = 200;
const STATUS_ACCEPTED: u16 = 202;
const STATUS_SEE_OTHER: u16 = 303;

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum MatrixJobStatus {
    Accepted,
    InProgress,
    Completed,
    Failed,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone)]
pub struct MatrixJob {
    pub matrix_id: String,
    pub status: MatrixJobStatus,
    pub status_url: String,
    /// Only known once the job is completed.
    pub result_url: Option<String>,
}

/// Body of the submission and status responses.
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
struct MatrixJobStatusBody {
    matrix_id: Option<String>,
    status: Option<MatrixJobStatus>,
    status_url: Option<String>,
    result_url: Option<String>,
    #[serde(default)]
    error: serde_json::Value,
}

impl MatrixJobStatusBody {
    /// Content of a non-empty `error` field.
    fn error_message(&self) -> Option<String> {
        match &self.error {
            serde_json::Value::Null => None,
            serde_json::Value::String(message) if message.is_empty() => None,
            serde_json::Value::String(message) => Some(message.clone()),
            serde_json::Value::Object(object) if object.is_empty() => None,
            serde_json::Value::Array(array) if array.is_empty() => None,
            other => Some(other.to_string()),
        }
    }
}

/// Body of a 401/403 poll. Either the OAuth shape (`error`,
/// `error_description`) or the problem shape (`title`), possibly empty.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct AuthErrorBody {
    error: Option<String>,
    error_description: Option<String>,
    title: Option<String>,
}

impl AuthErrorBody {
    fn message(self, status: u16) -> String {
        match (self.error, self.error_description, self.title) {
            (Some(error), Some(description), _) => format!("{}: {}", error, description),
            (Some(message), None, _) | (None, Some(message), _) | (None, None, Some(message)) => {
                message
            }
            (None, None, None) => format!("status {}", status),
        }
    }
}

#[derive(Deserialize, Debug)]
struct ProblemBody {
    title: String,
}

impl MatrixJob {
    fn from_accepted(body: MatrixJobStatusBody) -> Result<Self, RoutingError> {
        match (body.matrix_id, body.status_url) {
            (Some(matrix_id), Some(status_url)) => Ok(Self {
                matrix_id,
                status: body.status.unwrap_or(MatrixJobStatus::Accepted),
                status_url,
                result_url: None,
            }),
            _ => Err(RoutingError::generic(OPERATION)),
        }
    }

    /// Applies a status body. Returns true once the job is completed.
    fn update(&mut self, body: MatrixJobStatusBody) -> Result<bool, RoutingError> {
        if let Some(status) = body.status {
            self.status = status;
        }
        if let Some(result_url) = &body.result_url {
            self.result_url = Some(result_url.clone());
        }

        if self.status == MatrixJobStatus::Completed {
            if self.result_url.is_none() {
                return Err(RoutingError::generic(OPERATION));
            }
            return Ok(true);
        }

        if let Some(message) = body.error_message() {
            self.status = MatrixJobStatus::Failed;
            return Err(RoutingError::MatrixJobFailed(message));
        }
        if self.status == MatrixJobStatus::Failed {
            return Err(RoutingError::MatrixJobFailed(format!(
                "matrix {} failed",
                self.matrix_id
            )));
        }

        if let Some(status_url) = body.status_url {
            self.status_url = status_url;
        }

        Ok(false)
    }
}

fn decode<T: serde::de::DeserializeOwned>(response: &HttpResponse) -> Result<T, RoutingError> {
    response.json().map_err(|_| RoutingError::generic(OPERATION))
}

impl<T, G> HereRoutingClient<T, G>
where
    T: HttpTransport,
    G: Geocoder,
{
    /// Submits, waits for and downloads an asynchronous matrix calculation.
    pub async fn async_matrix(
        &self,
        request: &MatrixRequest,
    ) -> Result<MatrixResponse, RoutingError> {
        let job = self.submit_matrix_job(request).await?;
        let job = self.wait_for_matrix_job(job).await?;
        self.fetch_matrix_result(&job).await
    }

    pub async fn submit_matrix_job(&self, request: &MatrixRequest) -> Result<MatrixJob, RoutingError> {
        let body = self.matrix_request_body(request).await?;

        let response = self
            .transport
            .post_json(
                &self.params.matrix_url,
                &[("apiKey", self.params.api_key.as_str())],
                &body,
            )
            .await?;

        if response.status != STATUS_ACCEPTED {
            warn!(
                "HereApi: Matrix job rejected with status {}",
                response.status
            );
            return Err(classify_error_body(&response.body, OPERATION));
        }

        let job = MatrixJob::from_accepted(decode(&response)?)?;
        info!("HereApi: Matrix {} calculation {:?}", job.matrix_id, job.status);

        Ok(job)
    }

    /// Polls the job until it is completed. Fails on authentication errors,
    /// on a failed job, or after `max_poll_attempts` polls.
    pub async fn wait_for_matrix_job(&self, mut job: MatrixJob) -> Result<MatrixJob, RoutingError> {
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;

            debug!(
                "HereApi: Polling matrix {} ({}), attempt {}",
                job.matrix_id, job.status_url, attempt
            );

            if self.poll_matrix_job(&mut job).await? {
                info!("HereApi: Matrix {} calculation completed", job.matrix_id);
                return Ok(job);
            }

            if self
                .params
                .max_poll_attempts
                .is_some_and(|max_attempts| attempt >= max_attempts)
            {
                warn!(
                    "HereApi: Matrix {} still {:?} after {} polls",
                    job.matrix_id, job.status, attempt
                );
                return Err(RoutingError::Timeout(attempt));
            }

            tokio::time::sleep(self.params.poll_interval).await;
        }
    }

    /// Checks the job status once. Returns true once the job is completed.
    pub async fn poll_matrix_job(&self, job: &mut MatrixJob) -> Result<bool, RoutingError> {
        let response = self
            .transport
            .get(&job.status_url, &[("apiKey", self.params.api_key.as_str())])
            .await?;

        match response.status {
            STATUS_OK | STATUS_SEE_OTHER => job.update(decode(&response)?),
            401 | 403 => {
                let body: AuthErrorBody = response.json().unwrap_or_default();
                Err(RoutingError::InvalidCredentials(body.message(response.status)))
            }
            404 | 500 => {
                let body: ProblemBody = decode(&response)?;
                Err(RoutingError::Api {
                    status: response.status,
                    message: body.title,
                })
            }
            status => {
                warn!("HereApi: Unexpected status {} while polling", status);
                Err(RoutingError::generic(OPERATION))
            }
        }
    }

    pub async fn fetch_matrix_result(&self, job: &MatrixJob) -> Result<MatrixResponse, RoutingError> {
        let result_url = job
            .result_url
            .as_deref()
            .ok_or_else(|| RoutingError::generic(OPERATION))?;

        debug!("HereApi: Downloading matrix {} result", job.matrix_id);
        let response = self
            .transport
            .get(result_url, &[("apiKey", self.params.api_key.as_str())])
            .await?;

        if !response.is_success() {
            return Err(classify_error_body(&response.body, OPERATION));
        }

        decode(&response)
    }
}
