use actix_web::{
    http::header::{self, ContentType},
    web, HttpRequest, HttpResponse, Responder,
};
use log::{debug, info};
use serde_json::json;

use crate::{
    models::{CreateShortenedUrlDto, Resolution, ResponseFormat},
    services::ShortenedUrlServiceData,
    types::Result,
};

/// Resolve a hash and answer as text, JSON or a redirect depending on `Accept`
pub async fn resolve_handler(
    req: HttpRequest,
    path: web::Path<String>,
    service: ShortenedUrlServiceData,
) -> Result<impl Responder> {
    let hash = path.into_inner();
    let accept = req
        .headers()
        .get(header::ACCEPT)
        .and_then(|value| value.to_str().ok());
    let format = ResponseFormat::from_accept(accept);
    debug!("Resolve requested for '{}' ({:?})", hash, format);

    let response = match service.resolve(&hash, format).await? {
        Resolution::PlainText(url) => HttpResponse::Ok()
            .content_type(ContentType::plaintext())
            .body(url),
        Resolution::Json(view) => HttpResponse::Ok().json(view),
        Resolution::Redirect(url) => {
            info!("Redirecting '{}' to '{}'", hash, url);
            HttpResponse::Found()
                .insert_header((header::LOCATION, url))
                .finish()
        }
    };

    Ok(response)
}

/// Shorten the URL in the JSON body
pub async fn create_handler(
    dto: web::Json<CreateShortenedUrlDto>,
    service: ShortenedUrlServiceData,
) -> Result<impl Responder> {
    let shortened = service.create(dto.into_inner()).await?;
    Ok(HttpResponse::Ok().json(shortened))
}

/// Remove a shortened URL; answers the same whether or not anything matched
pub async fn remove_handler(
    path: web::Path<(String, String)>,
    service: ShortenedUrlServiceData,
) -> Result<impl Responder> {
    let (hash, remove_token) = path.into_inner();
    let removed = service.remove(&hash, &remove_token).await?;
    debug!("Remove for '{}' affected {} record(s)", hash, removed);

    Ok(HttpResponse::Ok().json(json!({ "message": "URL removed" })))
}
