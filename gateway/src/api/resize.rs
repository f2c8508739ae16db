use actix_web::{post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{api::resize_error_response, services::ResizeService, AppState};

#[derive(Debug, Deserialize, Validate)]
pub struct ResizeRequest {
    #[validate(length(min = 1))]
    pub bucket: String,

    #[validate(length(min = 1))]
    pub filename: String,
}

#[derive(Debug, Serialize)]
pub struct ResizeResponse {
    pub bucket: String,
    pub key: String,
}

#[post("/images/resize")]
async fn resize_image(
    state: web::Data<AppState>,
    request: web::Json<ResizeRequest>,
) -> Result<HttpResponse, actix_web::Error> {
    let request = request.into_inner();
    request
        .validate()
        .map_err(actix_web::error::ErrorBadRequest)?;

    let resize_service = ResizeService::new(state.object_store.clone());

    let location = resize_service
        .resize(&request.bucket, &request.filename)
        .await
        .map_err(resize_error_response)?;

    Ok(HttpResponse::Ok().json(ResizeResponse {
        bucket: location.bucket,
        key: location.key,
    }))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(resize_image);
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{test, web, App};
    use image::{DynamicImage, ImageFormat, RgbImage};

    use mammoscan_pipeline::{
        HttpMlPlatform, InMemoryParameterStore, PipelineLauncher, PipelineRunner,
    };

    use crate::config::GatewayConfig;
    use crate::storage::{MemoryObjectStore, ObjectStore};
    use crate::AppState;

    fn test_state(object_store: Arc<MemoryObjectStore>) -> web::Data<AppState> {
        let config = GatewayConfig::default();
        let parameters = Arc::new(InMemoryParameterStore::new());
        let platform = Arc::new(HttpMlPlatform::new("http://127.0.0.1:1"));
        let runner = Arc::new(PipelineRunner::new(
            platform,
            parameters.clone(),
            config.pipeline.clone(),
        ));

        web::Data::new(AppState {
            object_store,
            parameters,
            launcher: PipelineLauncher::new(runner),
            config,
        })
    }

    fn png_fixture() -> Vec<u8> {
        let image =
            DynamicImage::ImageRgb8(RgbImage::from_pixel(64, 64, image::Rgb([10, 20, 30])));
        let mut encoded = Cursor::new(Vec::new());
        image.write_to(&mut encoded, ImageFormat::Png).unwrap();
        encoded.into_inner()
    }

    #[actix_web::test]
    async fn resize_returns_the_new_location() {
        let store = Arc::new(MemoryObjectStore::new());
        store
            .put("bucket", "downloaded/original/scan.png", &png_fixture())
            .await
            .unwrap();

        let app = test::init_service(
            App::new()
                .app_data(test_state(store))
                .configure(crate::api::configure),
        )
        .await;

        let request = test::TestRequest::post()
            .uri("/api/v1/images/resize")
            .set_json(serde_json::json!({ "bucket": "bucket", "filename": "scan.png" }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, request).await;

        assert_eq!(body["bucket"], "bucket");
        assert_eq!(body["key"], "downloaded/resized/scan.png");
    }

    #[actix_web::test]
    async fn resize_of_missing_object_is_not_found() {
        let app = test::init_service(
            App::new()
                .app_data(test_state(Arc::new(MemoryObjectStore::new())))
                .configure(crate::api::configure),
        )
        .await;

        let request = test::TestRequest::post()
            .uri("/api/v1/images/resize")
            .set_json(serde_json::json!({ "bucket": "bucket", "filename": "missing.png" }))
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
