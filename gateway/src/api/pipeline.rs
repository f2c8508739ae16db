use actix_web::{post, web, HttpResponse};
use serde_json::json;
use tracing::error;

use mammoscan_pipeline::SubmissionError;

use crate::AppState;

#[post("/pipeline/executions")]
async fn start_pipeline(state: web::Data<AppState>) -> Result<HttpResponse, actix_web::Error> {
    let handle = state
        .launcher
        .start_pipeline()
        .await
        .map_err(submission_error_response)?;

    // The execution keeps running after the handle is dropped; the caller
    // gets its name for correlation.
    Ok(HttpResponse::Ok().json(json!({
        "execution": handle.execution_name(),
    })))
}

fn submission_error_response(err: SubmissionError) -> actix_web::Error {
    error!(error = %err, "pipeline submission rejected");
    match err {
        SubmissionError::DuplicateExecution(_) => actix_web::error::ErrorConflict(err),
        SubmissionError::Rejected(_) => actix_web::error::ErrorInternalServerError(err),
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(start_pipeline);
}
