use tracing::debug;

use mammoscan_common::ClassProbabilities;
use mammoscan_pipeline::IMAGE_CONTENT_TYPE;

use crate::config::InferenceConfig;
use crate::error::ClassifyError;

/// Client for the live serving endpoint.
#[derive(Clone)]
pub struct ClassifyService {
    client: reqwest::Client,
    invoke_url: String,
    endpoint_name: String,
}

impl ClassifyService {
    pub fn new(config: &InferenceConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            invoke_url: config.invoke_url.trim_end_matches('/').to_string(),
            endpoint_name: config.endpoint_name.clone(),
        }
    }

    /// Posts the image bytes to the endpoint and parses the five-class
    /// probability vector it answers with.
    pub async fn classify(&self, content: Vec<u8>) -> Result<ClassProbabilities, ClassifyError> {
        let url = format!(
            "{}/endpoints/{}/invocations",
            self.invoke_url, self.endpoint_name
        );
        debug!(endpoint = %self.endpoint_name, "invoking classification endpoint");

        let response = self
            .client
            .post(&url)
            .header("Content-Type", IMAGE_CONTENT_TYPE)
            .body(content)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(ClassifyError::Endpoint { status, message });
        }

        let probabilities: Vec<f32> = response.json().await?;
        Ok(ClassProbabilities::from_slice(&probabilities)?)
    }
}
