use actix_web::{get, web, HttpResponse};
use serde_json::json;
use tracing::warn;

use mammoscan_pipeline::{ParameterStore, ENDPOINT_PARAMETER};

use crate::AppState;

#[get("/health")]
async fn get_health(state: web::Data<AppState>) -> HttpResponse {
    // Surfaces whether a trained endpoint has been published yet.
    let classification_endpoint = match state.parameters.get(ENDPOINT_PARAMETER).await {
        Ok(value) => value,
        Err(err) => {
            warn!(error = %err, "parameter store unavailable");
            None
        }
    };

    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "classification_endpoint": classification_endpoint,
    }))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(get_health);
}
