use serde::{Deserialize, Serialize};
use tokio::time::Duration;

use crate::contract::Hyperparameters;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PipelineConfig {
    pub image_uri: String,
    pub endpoint_name: String,
    pub datasets: DatasetConfig,
    pub training: TrainingConfig,
    pub serving: ServingConfig,
    pub timeouts: TimeoutConfig,
    pub hyperparameters: Hyperparameters,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DatasetConfig {
    pub bucket: String,
    pub prefix: String,
    pub output_prefix: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TrainingConfig {
    pub instance_type: String,
    pub instance_count: u32,
    pub volume_size_gb: u32,
    pub max_runtime_hours: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServingConfig {
    pub instance_type: String,
    pub instance_count: u32,
    pub variant_name: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TimeoutConfig {
    pub train_min: u64,
    pub register_model_min: u64,
    pub configure_endpoint_min: u64,
    pub activate_endpoint_min: u64,
    pub execution_min: u64,
}

impl TimeoutConfig {
    pub fn train(&self) -> Duration {
        Duration::from_secs(self.train_min * 60)
    }

    pub fn register_model(&self) -> Duration {
        Duration::from_secs(self.register_model_min * 60)
    }

    pub fn configure_endpoint(&self) -> Duration {
        Duration::from_secs(self.configure_endpoint_min * 60)
    }

    pub fn activate_endpoint(&self) -> Duration {
        Duration::from_secs(self.activate_endpoint_min * 60)
    }

    pub fn execution(&self) -> Duration {
        Duration::from_secs(self.execution_min * 60)
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            image_uri: "811284229777.dkr.ecr.us-east-1.amazonaws.com/image-classification:1"
                .to_string(),
            endpoint_name: "mammography-classification-endpoint".to_string(),
            datasets: DatasetConfig {
                bucket: "mammo-v2-ecs-model-files".to_string(),
                prefix: "resize".to_string(),
                output_prefix: "model/output".to_string(),
            },
            training: TrainingConfig {
                instance_type: "p3.2xlarge".to_string(),
                instance_count: 1,
                volume_size_gb: 20,
                max_runtime_hours: 2,
            },
            serving: ServingConfig {
                instance_type: "m5.large".to_string(),
                instance_count: 1,
                variant_name: "AllTraffic".to_string(),
            },
            timeouts: TimeoutConfig {
                train_min: 60,
                register_model_min: 10,
                configure_endpoint_min: 10,
                activate_endpoint_min: 10,
                execution_min: 60,
            },
            hyperparameters: Hyperparameters::default(),
        }
    }
}
