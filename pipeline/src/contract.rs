use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const IMAGE_CONTENT_TYPE: &str = "application/x-image";

/// Seed record one execution starts from. All fields are fixed at launch
/// and immutable for the life of the execution.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PipelineInput {
    #[serde(rename = "smJobName")]
    pub sm_job_name: String,
    pub s3train: String,
    pub s3validation: String,
    pub s3train_lst: String,
    pub s3validation_lst: String,
    pub s3_output_location: String,
}

/// Training knobs, constant for the deployment's lifetime. Rendered to the
/// string map the training backend expects.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Hyperparameters {
    pub num_layers: u32,
    pub image_shape: String,
    pub num_classes: u32,
    pub num_training_samples: u32,
    pub mini_batch_size: u32,
    pub epochs: u32,
    pub learning_rate: f64,
    pub optimizer: String,
    pub top_k: u32,
    pub precision_dtype: String,
}

impl Hyperparameters {
    pub fn as_training_args(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            ("num_layers".to_string(), self.num_layers.to_string()),
            ("image_shape".to_string(), self.image_shape.clone()),
            ("num_classes".to_string(), self.num_classes.to_string()),
            (
                "num_training_samples".to_string(),
                self.num_training_samples.to_string(),
            ),
            (
                "mini_batch_size".to_string(),
                self.mini_batch_size.to_string(),
            ),
            ("epochs".to_string(), self.epochs.to_string()),
            ("learning_rate".to_string(), self.learning_rate.to_string()),
            ("optimizer".to_string(), self.optimizer.clone()),
            ("top_k".to_string(), self.top_k.to_string()),
            (
                "precision_dtype".to_string(),
                self.precision_dtype.clone(),
            ),
        ])
    }
}

impl Default for Hyperparameters {
    fn default() -> Self {
        Self {
            num_layers: 18,
            image_shape: "3,300,150".to_string(),
            num_classes: 5,
            num_training_samples: 1752,
            mini_batch_size: 120,
            epochs: 20,
            learning_rate: 0.01,
            optimizer: "sgd".to_string(),
            top_k: 2,
            precision_dtype: "float32".to_string(),
        }
    }
}

/// One named input channel of a training job.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct InputChannel {
    pub channel_name: String,
    pub s3_location: String,
    pub content_type: String,
}

impl InputChannel {
    pub fn new(channel_name: impl Into<String>, s3_location: impl Into<String>) -> Self {
        Self {
            channel_name: channel_name.into(),
            s3_location: s3_location.into(),
            content_type: IMAGE_CONTENT_TYPE.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ResourceSpec {
    pub instance_count: u32,
    pub instance_type: String,
    pub volume_size_gb: u32,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TrainingJobRequest {
    pub training_job_name: String,
    pub training_image: String,
    pub input_channels: Vec<InputChannel>,
    pub output_location: String,
    pub hyperparameters: BTreeMap<String, String>,
    pub resources: ResourceSpec,
    pub max_runtime_sec: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RegisterModelRequest {
    pub model_name: String,
    pub image: String,
    pub model_data_location: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EndpointConfigRequest {
    pub config_name: String,
    pub model_name: String,
    pub instance_count: u32,
    pub instance_type: String,
    pub variant_name: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ApplyEndpointRequest {
    pub endpoint_name: String,
    pub config_name: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TrainResult {
    pub job_name: String,
    pub model_artifacts: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ModelResult {
    pub model_name: String,
    pub model_arn: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct EndpointConfigResult {
    pub config_name: String,
    pub config_arn: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct EndpointResult {
    pub endpoint_arn: String,
}

/// Accumulating record threaded through the pipeline. Each stage appends
/// its own result; nothing written by an earlier stage is ever replaced.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ExecutionRecord {
    input: PipelineInput,
    train: Option<TrainResult>,
    model: Option<ModelResult>,
    endpoint_config: Option<EndpointConfigResult>,
    endpoint: Option<EndpointResult>,
}

impl ExecutionRecord {
    pub fn new(input: PipelineInput) -> Self {
        Self {
            input,
            train: None,
            model: None,
            endpoint_config: None,
            endpoint: None,
        }
    }

    pub fn input(&self) -> &PipelineInput {
        &self.input
    }

    pub fn train(&self) -> Option<&TrainResult> {
        self.train.as_ref()
    }

    pub fn model(&self) -> Option<&ModelResult> {
        self.model.as_ref()
    }

    pub fn endpoint_config(&self) -> Option<&EndpointConfigResult> {
        self.endpoint_config.as_ref()
    }

    pub fn endpoint(&self) -> Option<&EndpointResult> {
        self.endpoint.as_ref()
    }

    pub(crate) fn record_train(&mut self, result: TrainResult) {
        self.train.get_or_insert(result);
    }

    pub(crate) fn record_model(&mut self, result: ModelResult) {
        self.model.get_or_insert(result);
    }

    pub(crate) fn record_endpoint_config(&mut self, result: EndpointConfigResult) {
        self.endpoint_config.get_or_insert(result);
    }

    pub(crate) fn record_endpoint(&mut self, result: EndpointResult) {
        self.endpoint.get_or_insert(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hyperparameters_render_to_training_args() {
        let args = Hyperparameters::default().as_training_args();

        assert_eq!(args.get("num_layers").map(String::as_str), Some("18"));
        assert_eq!(args.get("image_shape").map(String::as_str), Some("3,300,150"));
        assert_eq!(args.get("learning_rate").map(String::as_str), Some("0.01"));
        assert_eq!(args.get("optimizer").map(String::as_str), Some("sgd"));
        assert_eq!(args.len(), 10);
    }

    #[test]
    fn pipeline_input_uses_launch_wire_names() {
        let input = PipelineInput {
            sm_job_name: "mammography-classification-2023-04-07-16-05-09".to_string(),
            s3train: "s3://bucket/resize/train/".to_string(),
            s3validation: "s3://bucket/resize/test/".to_string(),
            s3train_lst: "s3://bucket/resize/train-data.lst".to_string(),
            s3validation_lst: "s3://bucket/resize/test-data.lst".to_string(),
            s3_output_location: "s3://bucket/model/output".to_string(),
        };

        let wire = serde_json::to_value(&input).unwrap();
        assert_eq!(
            wire["smJobName"],
            "mammography-classification-2023-04-07-16-05-09"
        );
        assert_eq!(wire["s3train_lst"], "s3://bucket/resize/train-data.lst");
    }

    #[test]
    fn record_keeps_first_written_result() {
        let input = PipelineInput {
            sm_job_name: "job".to_string(),
            s3train: String::new(),
            s3validation: String::new(),
            s3train_lst: String::new(),
            s3validation_lst: String::new(),
            s3_output_location: String::new(),
        };
        let mut record = ExecutionRecord::new(input);

        record.record_train(TrainResult {
            job_name: "job".to_string(),
            model_artifacts: "s3://bucket/model/output/job/model.tar.gz".to_string(),
        });
        record.record_train(TrainResult {
            job_name: "other".to_string(),
            model_artifacts: String::new(),
        });

        assert_eq!(record.train().unwrap().job_name, "job");
    }
}
