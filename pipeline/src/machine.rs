use std::future::Future;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::time::{timeout, Duration, Instant};
use tracing::{error, info};

use crate::config::PipelineConfig;
use crate::contract::{
    ApplyEndpointRequest, EndpointConfigRequest, EndpointConfigResult, ExecutionRecord,
    InputChannel, ModelResult, PipelineInput, RegisterModelRequest, ResourceSpec, TrainResult,
    TrainingJobRequest,
};
use crate::error::{PlatformError, StageError};
use crate::params::{ParameterStore, ENDPOINT_PARAMETER};
use crate::platform::MlPlatform;

/// One unit of the sequential pipeline.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Train,
    RegisterModel,
    ConfigureEndpoint,
    ActivateEndpoint,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Train => "Train",
            Self::RegisterModel => "RegisterModel",
            Self::ConfigureEndpoint => "ConfigureEndpoint",
            Self::ActivateEndpoint => "ActivateEndpoint",
        };
        write!(f, "{}", name)
    }
}

/// States of one execution. Each working state carries the upstream result
/// the next stage consumes, so a stage cannot run before its inputs exist.
#[derive(Debug)]
pub enum PipelineState {
    Train,
    RegisterModel { train: TrainResult },
    ConfigureEndpoint { model: ModelResult },
    ActivateEndpoint { endpoint_config: EndpointConfigResult },
    Succeeded,
    Failed(StageError),
}

/// Terminal outcome of one execution.
#[derive(Debug)]
pub enum ExecutionStatus {
    Succeeded,
    Failed(StageError),
}

impl ExecutionStatus {
    pub fn is_succeeded(&self) -> bool {
        matches!(self, Self::Succeeded)
    }
}

#[derive(Debug)]
pub struct ExecutionReport {
    pub execution_name: String,
    pub status: ExecutionStatus,
    pub record: ExecutionRecord,
}

/// Drives one execution through Train, RegisterModel, ConfigureEndpoint and
/// ActivateEndpoint in strict sequence. Every stage is a single awaited
/// platform call bounded by its own budget, clipped to the whole-execution
/// deadline.
pub struct PipelineRunner {
    platform: Arc<dyn MlPlatform>,
    parameters: Arc<dyn ParameterStore>,
    config: PipelineConfig,
}

impl PipelineRunner {
    pub fn new(
        platform: Arc<dyn MlPlatform>,
        parameters: Arc<dyn ParameterStore>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            platform,
            parameters,
            config,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub async fn run(&self, input: PipelineInput) -> ExecutionReport {
        let execution_name = input.sm_job_name.clone();
        let deadline = Instant::now() + self.config.timeouts.execution();
        let mut record = ExecutionRecord::new(input);
        let mut state = PipelineState::Train;

        info!(execution = %execution_name, "starting pipeline execution");

        let status = loop {
            state = match state {
                PipelineState::Train => {
                    let request = self.training_request(record.input());
                    match self
                        .run_stage(
                            Stage::Train,
                            deadline,
                            self.config.timeouts.train(),
                            self.platform.run_training_job(request),
                        )
                        .await
                    {
                        Ok(train) => {
                            record.record_train(train.clone());
                            PipelineState::RegisterModel { train }
                        }
                        Err(err) => PipelineState::Failed(err),
                    }
                }
                PipelineState::RegisterModel { train } => {
                    let request = RegisterModelRequest {
                        model_name: train.job_name.clone(),
                        image: self.config.image_uri.clone(),
                        model_data_location: train.model_artifacts.clone(),
                    };
                    match self
                        .run_stage(
                            Stage::RegisterModel,
                            deadline,
                            self.config.timeouts.register_model(),
                            self.platform.register_model(request),
                        )
                        .await
                    {
                        Ok(model) => {
                            record.record_model(model.clone());
                            PipelineState::ConfigureEndpoint { model }
                        }
                        Err(err) => PipelineState::Failed(err),
                    }
                }
                PipelineState::ConfigureEndpoint { model } => {
                    let request = EndpointConfigRequest {
                        config_name: model.model_name.clone(),
                        model_name: model.model_name.clone(),
                        instance_count: self.config.serving.instance_count,
                        instance_type: self.config.serving.instance_type.clone(),
                        variant_name: self.config.serving.variant_name.clone(),
                    };
                    match self
                        .run_stage(
                            Stage::ConfigureEndpoint,
                            deadline,
                            self.config.timeouts.configure_endpoint(),
                            self.platform.create_endpoint_config(request),
                        )
                        .await
                    {
                        Ok(endpoint_config) => {
                            record.record_endpoint_config(endpoint_config.clone());
                            PipelineState::ActivateEndpoint { endpoint_config }
                        }
                        Err(err) => PipelineState::Failed(err),
                    }
                }
                PipelineState::ActivateEndpoint { endpoint_config } => {
                    let request = ApplyEndpointRequest {
                        endpoint_name: self.config.endpoint_name.clone(),
                        config_name: endpoint_config.config_name.clone(),
                    };
                    match self
                        .run_stage(
                            Stage::ActivateEndpoint,
                            deadline,
                            self.config.timeouts.activate_endpoint(),
                            self.platform.apply_endpoint(request),
                        )
                        .await
                    {
                        Ok(endpoint) => {
                            record.record_endpoint(endpoint);
                            PipelineState::Succeeded
                        }
                        Err(err) => PipelineState::Failed(err),
                    }
                }
                PipelineState::Succeeded => break self.publish(&record).await,
                PipelineState::Failed(err) => {
                    error!(execution = %execution_name, error = %err, "pipeline execution failed");
                    break ExecutionStatus::Failed(err);
                }
            };
        };

        if status.is_succeeded() {
            info!(execution = %execution_name, "pipeline execution succeeded");
        }

        ExecutionReport {
            execution_name,
            status,
            record,
        }
    }

    /// Awaits one stage operation under the smaller of its own budget and
    /// whatever remains of the whole-execution deadline.
    async fn run_stage<T, F>(
        &self,
        stage: Stage,
        deadline: Instant,
        budget: Duration,
        operation: F,
    ) -> Result<T, StageError>
    where
        F: Future<Output = Result<T, PlatformError>>,
    {
        let now = Instant::now();
        if now >= deadline {
            return Err(StageError::ExecutionDeadline { stage });
        }

        let remaining = deadline - now;
        let clipped = budget.min(remaining);

        info!(stage = %stage, budget_sec = clipped.as_secs(), "entering stage");

        match timeout(clipped, operation).await {
            Ok(Ok(result)) => {
                info!(stage = %stage, "stage completed");
                Ok(result)
            }
            Ok(Err(source)) => Err(StageError::Execution { stage, source }),
            Err(_) if remaining < budget => Err(StageError::ExecutionDeadline { stage }),
            Err(_) => Err(StageError::Timeout { stage, budget }),
        }
    }

    fn training_request(&self, input: &PipelineInput) -> TrainingJobRequest {
        TrainingJobRequest {
            training_job_name: input.sm_job_name.clone(),
            training_image: self.config.image_uri.clone(),
            input_channels: vec![
                InputChannel::new("train", &input.s3train),
                InputChannel::new("validation", &input.s3validation),
                InputChannel::new("train_lst", &input.s3train_lst),
                InputChannel::new("validation_lst", &input.s3validation_lst),
            ],
            output_location: input.s3_output_location.clone(),
            hyperparameters: self.config.hyperparameters.as_training_args(),
            resources: ResourceSpec {
                instance_count: self.config.training.instance_count,
                instance_type: self.config.training.instance_type.clone(),
                volume_size_gb: self.config.training.volume_size_gb,
            },
            max_runtime_sec: self.config.training.max_runtime_hours * 3600,
        }
    }

    async fn publish(&self, record: &ExecutionRecord) -> ExecutionStatus {
        let Some(endpoint) = record.endpoint() else {
            // Unreachable through the state machine; treated as a no-op.
            return ExecutionStatus::Succeeded;
        };

        match self
            .parameters
            .put(ENDPOINT_PARAMETER, &endpoint.endpoint_arn)
            .await
        {
            Ok(()) => ExecutionStatus::Succeeded,
            Err(source) => {
                error!(error = %source, "failed to publish endpoint identity");
                ExecutionStatus::Failed(StageError::Publish { source })
            }
        }
    }
}
