use crate::admin::{self, ModelSummary};
use crate::db::{Page, Store};
use crate::errors::AppError;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use validator::Validate;

#[derive(Deserialize, Validate)]
pub struct ChangeListQuery {
    q: Option<String>,

    #[validate(range(min = 0, message = "Limit must be a non-negative integer"))]
    limit: Option<i64>,

    #[validate(range(min = 0, message = "Offset must be a non-negative integer"))]
    offset: Option<i64>,
}

// GET /admin
pub async fn index() -> HttpResponse {
    let models: Vec<ModelSummary> = admin::REGISTRY.iter().map(|a| a.summary()).collect();
    HttpResponse::Ok().json(models)
}

// GET /admin/{model}
pub async fn changelist(
    store: web::Data<Store>,
    model: web::Path<String>,
    query: web::Query<ChangeListQuery>,
) -> Result<HttpResponse, AppError> {
    query.validate()?;

    let model_admin = admin::find(&model)
        .ok_or_else(|| AppError::NotFound(format!("No admin registered for {}", model)))?;
    let page = Page {
        limit: query.limit,
        offset: query.offset,
    };
    let list = model_admin
        .changelist(&store, query.q.as_deref(), page)
        .await?;
    Ok(HttpResponse::Ok().json(list))
}
