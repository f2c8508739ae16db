use actix_web::{post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use tokio::time::{timeout, Duration};
use tracing::info;
use validator::Validate;

use crate::api::{classify_error_response, object_error_response, resize_error_response};
use crate::error::ResizeError;
use crate::services::{ClassifyService, ResizeService};
use crate::storage::ObjectStore;
use crate::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct PredictionRequest {
    #[validate(length(min = 1))]
    pub filename: String,
}

#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    pub prediction: String,
}

#[post("/predictions")]
async fn create_prediction(
    state: web::Data<AppState>,
    request: web::Json<PredictionRequest>,
) -> Result<HttpResponse, actix_web::Error> {
    let request = request.into_inner();
    request
        .validate()
        .map_err(actix_web::error::ErrorBadRequest)?;

    let bucket = state.config.storage.bucket.clone();
    let resize_service = ResizeService::new(state.object_store.clone());

    let resize_bound = Duration::from_secs(state.config.inference.resize_timeout_sec);
    let resized = match timeout(
        resize_bound,
        resize_service.resize(&bucket, &request.filename),
    )
    .await
    {
        Ok(result) => result.map_err(resize_error_response)?,
        Err(_) => {
            return Err(resize_error_response(ResizeError::Timeout {
                seconds: state.config.inference.resize_timeout_sec,
            }))
        }
    };

    let content = state
        .object_store
        .get(&resized.bucket, &resized.key)
        .await
        .map_err(object_error_response)?;

    let classify_service = ClassifyService::new(&state.config.inference);
    let probabilities = classify_service
        .classify(content)
        .await
        .map_err(classify_error_response)?;

    let prediction = probabilities.best_prediction();
    info!(
        filename = %request.filename,
        prediction = %prediction.description(),
        "image classified"
    );

    Ok(HttpResponse::Ok().json(PredictionResponse {
        prediction: prediction.description(),
    }))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_prediction);
}
