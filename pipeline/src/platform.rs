use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::contract::{
    ApplyEndpointRequest, EndpointConfigRequest, EndpointConfigResult, EndpointResult,
    ModelResult, RegisterModelRequest, TrainResult, TrainingJobRequest,
};
use crate::error::PlatformError;

/// Seam over the managed ML platform. One operation per pipeline stage;
/// each submits the external job and resolves once it reaches a terminal
/// state. Deadlines are enforced by the caller, not here.
#[async_trait]
pub trait MlPlatform: Send + Sync {
    async fn run_training_job(
        &self,
        request: TrainingJobRequest,
    ) -> Result<TrainResult, PlatformError>;

    async fn register_model(
        &self,
        request: RegisterModelRequest,
    ) -> Result<ModelResult, PlatformError>;

    async fn create_endpoint_config(
        &self,
        request: EndpointConfigRequest,
    ) -> Result<EndpointConfigResult, PlatformError>;

    /// Creates the named endpoint or, if it already exists, switches it to
    /// the new configuration.
    async fn apply_endpoint(
        &self,
        request: ApplyEndpointRequest,
    ) -> Result<EndpointResult, PlatformError>;
}

/// `MlPlatform` client against an HTTP control API.
#[derive(Debug, Clone)]
pub struct HttpMlPlatform {
    client: reqwest::Client,
    base_url: String,
}

impl HttpMlPlatform {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    // No client-side timeout: the stage budget above this call is the
    // ceiling on how long a submission may block.
    async fn send_json<B, T>(
        &self,
        operation: &str,
        request: reqwest::RequestBuilder,
        body: &B,
    ) -> Result<T, PlatformError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = request.json(body).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let message = response.text().await.unwrap_or_default();
            return Err(PlatformError::Remote {
                operation: operation.to_string(),
                message: format!("{}: {}", status, message),
            });
        }

        Ok(response.json().await?)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

#[async_trait]
impl MlPlatform for HttpMlPlatform {
    async fn run_training_job(
        &self,
        request: TrainingJobRequest,
    ) -> Result<TrainResult, PlatformError> {
        self.send_json(
            "training job",
            self.client.post(self.url("/training-jobs")),
            &request,
        )
        .await
    }

    async fn register_model(
        &self,
        request: RegisterModelRequest,
    ) -> Result<ModelResult, PlatformError> {
        self.send_json("model registration", self.client.post(self.url("/models")), &request)
            .await
    }

    async fn create_endpoint_config(
        &self,
        request: EndpointConfigRequest,
    ) -> Result<EndpointConfigResult, PlatformError> {
        self.send_json(
            "endpoint configuration",
            self.client.post(self.url("/endpoint-configs")),
            &request,
        )
        .await
    }

    async fn apply_endpoint(
        &self,
        request: ApplyEndpointRequest,
    ) -> Result<EndpointResult, PlatformError> {
        let path = format!("/endpoints/{}", request.endpoint_name);
        self.send_json("endpoint activation", self.client.put(self.url(&path)), &request)
            .await
    }
}
