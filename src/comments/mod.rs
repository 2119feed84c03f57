pub mod requests;

use actix_web::{delete, get, post, put, web, HttpResponse};

use self::requests::CommentPayload;
use crate::{error::Result, store::CommentStore, validation::validate};

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(list_comments)
        .service(get_comment)
        .service(create_comment)
        .service(update_comment)
        .service(delete_comment);
}

#[get("/comments")]
async fn list_comments(store: web::Data<dyn CommentStore>) -> Result<HttpResponse> {
    let comments = store.list().await?;
    tracing::debug!(count = comments.len(), "Fetched comments");
    Ok(HttpResponse::Ok().json(comments))
}

#[get("/comments/{id}")]
async fn get_comment(
    store: web::Data<dyn CommentStore>,
    id: web::Path<String>,
) -> Result<HttpResponse> {
    let comment = store.get(&id).await?;
    Ok(HttpResponse::Ok().json(comment))
}

#[post("/comments")]
async fn create_comment(
    store: web::Data<dyn CommentStore>,
    payload: web::Json<CommentPayload>,
) -> Result<HttpResponse> {
    let fields = validate(&payload)?;
    let comment = store.create(fields).await?;
    tracing::info!(id = %comment.id, "Created comment");
    Ok(HttpResponse::Created().json(comment))
}

// Answers 201 rather than 200, which existing clients rely on.
#[put("/comments/{id}")]
async fn update_comment(
    store: web::Data<dyn CommentStore>,
    id: web::Path<String>,
    payload: web::Json<CommentPayload>,
) -> Result<HttpResponse> {
    let fields = validate(&payload)?;
    let comment = store.update(&id, fields).await?;
    tracing::info!(id = %comment.id, "Updated comment");
    Ok(HttpResponse::Created().json(comment))
}

#[delete("/comments/{id}")]
async fn delete_comment(
    store: web::Data<dyn CommentStore>,
    id: web::Path<String>,
) -> Result<HttpResponse> {
    store.delete(&id).await?;
    tracing::info!(id = %id, "Deleted comment");
    Ok(HttpResponse::NoContent().finish())
}
