//! Remote prediction gateway.
//!
//! Thin wrapper over the backend's JSON contract:
//! - `GET /` health probe (any 2xx means reachable, body ignored)
//! - `GET /model-info` model metrics
//! - `POST /predict` grade prediction for one [`StudentProfile`]
//!
//! Every call is a single attempt: no retry, no client-side timeout beyond
//! the transport default. These are the only sources of outbound traffic.

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::error::GatewayError;
use crate::model::{ModelInfoResponse, ModelMetrics, PredictionResult, StudentProfile};

const USER_AGENT: &str = concat!("student-predictor/", env!("CARGO_PKG_VERSION"));

/// The three backend operations the controller sequences.
///
/// Implementations report failures as [`GatewayError`]; deciding what a
/// failure means for application state is the controller's job.
#[allow(async_fn_in_trait)]
pub trait PredictionGateway {
    /// Succeeds when the root endpoint answers with a success status.
    async fn check_health(&self) -> Result<(), GatewayError>;

    /// Fetches the trained model's metrics.
    async fn fetch_metadata(&self) -> Result<ModelMetrics, GatewayError>;

    /// Submits one profile for prediction.
    async fn predict(&self, profile: &StudentProfile) -> Result<PredictionResult, GatewayError>;
}

/// [`PredictionGateway`] backed by a pooled reqwest client.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    config: ClientConfig,
}

impl HttpGateway {
    pub fn new(config: ClientConfig) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| GatewayError::ClientSetup(e.to_string()))?;

        Ok(Self { client, config })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T, GatewayError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| transport_error(url, e))?;
        ensure_success(url, response.status())?;
        decode(url, response).await
    }
}

impl PredictionGateway for HttpGateway {
    async fn check_health(&self) -> Result<(), GatewayError> {
        let url = self.config.base_url();
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| transport_error(url, e))?;
        ensure_success(url, response.status())?;

        debug!(url = %url, status = %response.status(), "backend health check passed");
        Ok(())
    }

    async fn fetch_metadata(&self) -> Result<ModelMetrics, GatewayError> {
        let info: ModelInfoResponse = self.get_json(self.config.model_info_url()).await?;
        debug!(model = %info.metrics.model_name, "model metrics received");
        Ok(info.metrics)
    }

    async fn predict(&self, profile: &StudentProfile) -> Result<PredictionResult, GatewayError> {
        let url = self.config.predict_url();
        // `.json()` also sets `Content-Type: application/json`
        let response = self
            .client
            .post(url.clone())
            .json(profile)
            .send()
            .await
            .map_err(|e| transport_error(url, e))?;
        ensure_success(url, response.status())?;

        let result: PredictionResult = decode(url, response).await?;
        debug!(
            grade = result.predicted_grade,
            level = %result.performance_level,
            "prediction received"
        );
        Ok(result)
    }
}

fn transport_error(url: &Url, err: reqwest::Error) -> GatewayError {
    warn!(url = %url, error = %err, "backend request failed");
    GatewayError::Unreachable {
        url: url.to_string(),
        reason: err.to_string(),
    }
}

fn ensure_success(url: &Url, status: StatusCode) -> Result<(), GatewayError> {
    if status.is_success() {
        return Ok(());
    }
    warn!(url = %url, status = %status, "backend returned non-success status");
    Err(GatewayError::Status {
        url: url.to_string(),
        status: status.as_u16(),
    })
}

async fn decode<T: DeserializeOwned>(url: &Url, response: reqwest::Response) -> Result<T, GatewayError> {
    response.json::<T>().await.map_err(|e| {
        warn!(url = %url, error = %e, "could not decode backend response");
        GatewayError::Decode {
            url: url.to_string(),
            reason: e.to_string(),
        }
    })
}
