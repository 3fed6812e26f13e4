use crate::db::{Page, Store};
use crate::errors::AppError;
use crate::serializers::{ActivityInput, ActivityOut, Mode, Writable};
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

#[derive(Deserialize, Validate)]
pub struct GetActivitiesQuery {
    user: Option<i64>,

    #[validate(range(min = 0, message = "Limit must be a non-negative integer"))]
    limit: Option<i64>,

    #[validate(range(min = 0, message = "Offset must be a non-negative integer"))]
    offset: Option<i64>,
}

// GET /api/activities
pub async fn get_activities(
    store: web::Data<Store>,
    query: web::Query<GetActivitiesQuery>,
) -> Result<HttpResponse, AppError> {
    query.validate()?;

    let page = Page {
        limit: query.limit,
        offset: query.offset,
    };
    let activities = store.list_activities(query.user, page).await?;
    let body: Vec<ActivityOut> = activities.iter().map(ActivityOut::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

// POST /api/activities
pub async fn create_activity(
    store: web::Data<Store>,
    payload: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    let new = ActivityInput::from_body(payload.into_inner())?.resolve(None, Mode::Create)?;
    let activity = store.create_activity(new).await?;
    Ok(HttpResponse::Created().json(ActivityOut::from(&activity)))
}

// GET /api/activities/{id}
pub async fn get_activity(
    store: web::Data<Store>,
    activity_id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let activity = store.get_activity(*activity_id).await?;
    Ok(HttpResponse::Ok().json(ActivityOut::from(&activity)))
}

// PUT /api/activities/{id}
pub async fn replace_activity(
    store: web::Data<Store>,
    activity_id: web::Path<i64>,
    payload: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    let input = ActivityInput::from_body(payload.into_inner())?;
    update(&store, *activity_id, input, Mode::Replace).await
}

// PATCH /api/activities/{id}
pub async fn update_activity(
    store: web::Data<Store>,
    activity_id: web::Path<i64>,
    payload: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    let input = ActivityInput::from_body(payload.into_inner())?;
    update(&store, *activity_id, input, Mode::Partial).await
}

async fn update(
    store: &Store,
    activity_id: i64,
    input: ActivityInput,
    mode: Mode,
) -> Result<HttpResponse, AppError> {
    let current = store.get_activity(activity_id).await?;
    let changes = input.resolve(Some(&current), mode)?;
    let activity = store.update_activity(activity_id, changes).await?;
    Ok(HttpResponse::Ok().json(ActivityOut::from(&activity)))
}

// DELETE /api/activities/{id}
pub async fn delete_activity(
    store: web::Data<Store>,
    activity_id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    store.delete_activity(*activity_id).await?;
    Ok(HttpResponse::NoContent().finish())
}
