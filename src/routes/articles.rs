use actix_web::{delete, get, patch, post, put, web, HttpResponse};

use crate::model::{ArticlePayload, ListParameters, ValidationMode};
use crate::routes::ApiError;
use crate::startup::ApplicationServices;

#[get("/articles/")]
#[tracing::instrument(skip(services))]
async fn list_articles(
    parameters: web::Query<ListParameters>,
    services: web::Data<ApplicationServices>,
) -> Result<HttpResponse, ApiError> {
    let articles = services.article_service.list(&parameters).await?;

    Ok(HttpResponse::Ok().json(articles))
}

#[post("/articles/")]
#[tracing::instrument(skip(services))]
async fn create_article(
    payload: web::Json<ArticlePayload>,
    services: web::Data<ApplicationServices>,
) -> Result<HttpResponse, ApiError> {
    let article = services
        .article_service
        .create(payload.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(article))
}

#[get("/articles/stats/")]
#[tracing::instrument(skip(services))]
async fn article_stats(services: web::Data<ApplicationServices>) -> Result<HttpResponse, ApiError> {
    let stats = services.article_service.stats().await?;

    Ok(HttpResponse::Ok().json(stats))
}

#[get("/articles/{id}/")]
#[tracing::instrument(skip(services))]
async fn get_article(
    id: web::Path<i64>,
    services: web::Data<ApplicationServices>,
) -> Result<HttpResponse, ApiError> {
    let id = id.into_inner();

    match services.article_service.get(id).await? {
        Some(article) => Ok(HttpResponse::Ok().json(article)),
        None => Err(ApiError::NotFound(id)),
    }
}

#[put("/articles/{id}/")]
#[tracing::instrument(skip(services))]
async fn replace_article(
    id: web::Path<i64>,
    payload: web::Json<ArticlePayload>,
    services: web::Data<ApplicationServices>,
) -> Result<HttpResponse, ApiError> {
    let article = services
        .article_service
        .update(id.into_inner(), payload.into_inner(), ValidationMode::Full)
        .await?;

    Ok(HttpResponse::Ok().json(article))
}

#[patch("/articles/{id}/")]
#[tracing::instrument(skip(services))]
async fn update_article(
    id: web::Path<i64>,
    payload: web::Json<ArticlePayload>,
    services: web::Data<ApplicationServices>,
) -> Result<HttpResponse, ApiError> {
    let article = services
        .article_service
        .update(id.into_inner(), payload.into_inner(), ValidationMode::Partial)
        .await?;

    Ok(HttpResponse::Ok().json(article))
}

#[delete("/articles/{id}/")]
#[tracing::instrument(skip(services))]
async fn delete_article(
    id: web::Path<i64>,
    services: web::Data<ApplicationServices>,
) -> Result<HttpResponse, ApiError> {
    services.article_service.delete(id.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// `stats/` goes before `{id}/`
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_articles)
        .service(create_article)
        .service(article_stats)
        .service(get_article)
        .service(replace_article)
        .service(update_article)
        .service(delete_article);
}
