mod classify_service;
mod resize_service;

pub use classify_service::*;
pub use resize_service::*;
