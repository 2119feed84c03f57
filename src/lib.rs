#[macro_use]
extern crate diesel;

pub mod comments;
pub mod config;
pub mod database;
pub mod error;
pub mod models;
pub mod protocol;
mod schema;
pub mod store;
pub mod utils;
pub mod validation;

use actix_cors::Cors;
use actix_web::{web, HttpResponse, Responder};

use crate::{error::AppError, protocol::MessageResponse};

/// Registers every route. The comment store must be provided separately as
/// `web::Data<dyn CommentStore>`.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/", web::get().to(hello))
        .service(
            web::scope("/api")
                .route("", web::get().to(hello))
                .configure(comments::config),
        );
}

/// Allows exactly one origin, or none at all.
pub fn cors(origin: Option<&str>) -> Cors {
    let cors = match origin {
        Some(origin) => Cors::default().allowed_origin(origin),
        None => Cors::default(),
    };
    cors.allow_any_method().allow_any_header().max_age(3600)
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}

async fn hello() -> impl Responder {
    HttpResponse::Ok().json(MessageResponse::hello())
}
