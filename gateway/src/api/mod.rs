mod pipeline;
mod predictions;
mod resize;
mod system;

use actix_web::web;
use tracing::error;

use crate::error::{ClassifyError, ObjectStoreError, ResizeError};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(system::configure)
            .configure(resize::configure)
            .configure(predictions::configure)
            .configure(pipeline::configure),
    );
}

pub(crate) fn resize_error_response(err: ResizeError) -> actix_web::Error {
    error!(error = %err, "resize failed");
    match err {
        ResizeError::SourceNotFound { .. } => actix_web::error::ErrorNotFound(err),
        ResizeError::Decode(_) => actix_web::error::ErrorUnprocessableEntity(err),
        ResizeError::Timeout { .. } => actix_web::error::ErrorGatewayTimeout(err),
        ResizeError::Encode(_) | ResizeError::Read(_) | ResizeError::Write(_) => {
            actix_web::error::ErrorInternalServerError(err)
        }
    }
}

pub(crate) fn object_error_response(err: ObjectStoreError) -> actix_web::Error {
    error!(error = %err, "object fetch failed");
    match err {
        ObjectStoreError::NotFound { .. } => actix_web::error::ErrorNotFound(err),
        ObjectStoreError::Io(_) => actix_web::error::ErrorInternalServerError(err),
    }
}

pub(crate) fn classify_error_response(err: ClassifyError) -> actix_web::Error {
    error!(error = %err, "classification failed");
    match err {
        ClassifyError::Invocation(_) | ClassifyError::Endpoint { .. } => {
            actix_web::error::ErrorBadGateway(err)
        }
        ClassifyError::Probabilities(_) => actix_web::error::ErrorInternalServerError(err),
    }
}
