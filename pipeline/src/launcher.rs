use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::info;

use mammoscan_common::{second_timestamp, ObjectLocation};

use crate::contract::PipelineInput;
use crate::error::SubmissionError;
use crate::machine::{ExecutionReport, PipelineRunner};

pub const JOB_NAME_PREFIX: &str = "mammography-classification-";

/// Handle to one submitted execution.
pub struct ExecutionHandle {
    execution_name: String,
    handle: JoinHandle<ExecutionReport>,
}

impl ExecutionHandle {
    pub fn execution_name(&self) -> &str {
        &self.execution_name
    }

    pub async fn wait(self) -> anyhow::Result<ExecutionReport> {
        Ok(self.handle.await?)
    }
}

/// Assembles the launch-time input record, names the execution, and starts
/// it on the runner. Duplicate in-flight execution names are rejected at
/// submission and never retried here.
pub struct PipelineLauncher {
    runner: Arc<PipelineRunner>,
    in_flight: Arc<Mutex<HashSet<String>>>,
}

impl PipelineLauncher {
    pub fn new(runner: Arc<PipelineRunner>) -> Self {
        Self {
            runner,
            in_flight: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Starts one execution named after the current second.
    pub async fn start_pipeline(&self) -> Result<ExecutionHandle, SubmissionError> {
        let job_name = format!("{}{}", JOB_NAME_PREFIX, second_timestamp(Utc::now()));
        let input = self.assemble_input(job_name);
        self.submit(input).await
    }

    pub async fn submit(&self, input: PipelineInput) -> Result<ExecutionHandle, SubmissionError> {
        let execution_name = input.sm_job_name.clone();

        {
            let mut in_flight = self.in_flight.lock().await;
            if !in_flight.insert(execution_name.clone()) {
                return Err(SubmissionError::DuplicateExecution(execution_name));
            }
        }

        info!(execution = %execution_name, "submitting pipeline execution");

        let runner = self.runner.clone();
        let in_flight = self.in_flight.clone();
        let task_name = execution_name.clone();
        let handle = tokio::spawn(async move {
            let report = runner.run(input).await;
            in_flight.lock().await.remove(&task_name);
            report
        });

        Ok(ExecutionHandle {
            execution_name,
            handle,
        })
    }

    fn assemble_input(&self, job_name: String) -> PipelineInput {
        let datasets = &self.runner.config().datasets;
        let bucket = datasets.bucket.as_str();
        let prefix = datasets.prefix.as_str();

        PipelineInput {
            sm_job_name: job_name,
            s3train: ObjectLocation::new(bucket, format!("{}/train/", prefix)).uri(),
            s3validation: ObjectLocation::new(bucket, format!("{}/test/", prefix)).uri(),
            s3train_lst: ObjectLocation::new(bucket, format!("{}/train-data.lst", prefix)).uri(),
            s3validation_lst: ObjectLocation::new(bucket, format!("{}/test-data.lst", prefix))
                .uri(),
            s3_output_location: ObjectLocation::new(bucket, datasets.output_prefix.clone()).uri(),
        }
    }
}
