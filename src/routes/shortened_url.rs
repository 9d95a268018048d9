use actix_web::web;
use log::debug;

use crate::{
    errors::AppError,
    handlers::{create_handler, remove_handler, resolve_handler},
};

/// Largest accepted create body
const JSON_LIMIT_BYTES: usize = 32 * 1024;

// Unreadable bodies are answered like bodies without a `url`
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_LIMIT_BYTES)
        .error_handler(|err, _req| {
            debug!("Rejected create body: {}", err);
            AppError::Validation("Missing URL".to_string()).into()
        })
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/", web::post().to(create_handler))
        .route("/{hash}", web::get().to(resolve_handler))
        .route("/{hash}/remove/{remove_token}", web::delete().to(remove_handler));
}
