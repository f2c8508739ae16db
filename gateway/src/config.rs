use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use mammoscan_pipeline::PipelineConfig;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GatewayConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub inference: InferenceConfig,
    pub platform: PlatformConfig,
    pub pipeline: PipelineConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub public_url: String,
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    pub parameters_file: PathBuf,
    pub bucket: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct InferenceConfig {
    pub endpoint_name: String,
    pub invoke_url: String,
    pub resize_timeout_sec: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PlatformConfig {
    pub control_url: String,
}

impl GatewayConfig {
    /// Address downstream clients reach the resize operation on.
    pub fn resize_endpoint_url(&self) -> String {
        format!(
            "{}/api/v1/images/resize",
            self.server.public_url.trim_end_matches('/')
        )
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
                public_url: "http://127.0.0.1:8080".to_string(),
                cors_origins: vec!["http://localhost:3000".to_string()],
            },
            storage: StorageConfig {
                data_dir: PathBuf::from("/var/lib/mammoscan/data"),
                parameters_file: PathBuf::from("/var/lib/mammoscan/parameters.json"),
                bucket: "mammo-v2-ecs-model-files".to_string(),
            },
            inference: InferenceConfig {
                endpoint_name: "mammography-classification-endpoint".to_string(),
                invoke_url: "http://127.0.0.1:9000".to_string(),
                resize_timeout_sec: 120,
            },
            platform: PlatformConfig {
                control_url: "http://127.0.0.1:9000".to_string(),
            },
            pipeline: PipelineConfig::default(),
        }
    }
}
