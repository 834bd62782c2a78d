//! `/api/activities` controller.
//!
//! Every endpoint builds one message, submits it through the
//! [`MediatorClient`](crate::framework::MediatorClient) in [`AppState`], and
//! turns the reply into a response.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use tracing::debug;
use uuid::Uuid;

use super::error::ApiError;
use super::AppState;
use crate::domain::{Ack, Activity, ActivityForm, NewActivity};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_activities).post(create_activity))
        .route(
            "/:id",
            get(get_activity).put(edit_activity).delete(delete_activity),
        )
}

#[tracing::instrument(skip(state))]
#[utoipa::path(get,
    tag = "activities",
    path = "/api/activities",
    responses(
        (status = 200, body = [Activity]),
        (status = 500, body = ErrorBody),
    )
)]
pub async fn list_activities(State(state): State<AppState>) -> Result<Json<Vec<Activity>>, ApiError> {
    let activities = state.mediator.list().await?;
    Ok(Json(activities))
}

#[tracing::instrument(skip(state, id))]
#[utoipa::path(get,
    tag = "activities",
    path = "/api/activities/{id}",
    params(("id" = Uuid, Path, description = "Activity identifier")),
    responses(
        (status = 200, body = Activity),
        (status = 400, body = ErrorBody),
        (status = 404, body = ErrorBody),
    )
)]
pub async fn get_activity(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Activity>, ApiError> {
    let Path(id) = id?;
    let activity = state.mediator.details(id).await?;
    Ok(Json(activity))
}

#[tracing::instrument(skip(state, payload))]
#[utoipa::path(post,
    tag = "activities",
    path = "/api/activities",
    request_body = NewActivity,
    responses(
        (status = 200, body = Ack),
        (status = 400, body = ErrorBody),
        (status = 409, body = ErrorBody),
    )
)]
pub async fn create_activity(
    State(state): State<AppState>,
    payload: Result<Json<NewActivity>, JsonRejection>,
) -> Result<Json<Ack>, ApiError> {
    let Json(payload) = payload?;
    let activity = payload.into_activity();
    debug!(?activity, "create_activity called");
    Ok(Json(state.mediator.create(activity).await?))
}

/// The route id always wins: the body is read as an [`ActivityForm`], which has
/// no `id` field, and the stored record is rebuilt around the route id.
#[tracing::instrument(skip(state, id, payload))]
#[utoipa::path(put,
    tag = "activities",
    path = "/api/activities/{id}",
    params(("id" = Uuid, Path, description = "Activity identifier")),
    request_body = ActivityForm,
    responses(
        (status = 200, body = Ack),
        (status = 400, body = ErrorBody),
        (status = 404, body = ErrorBody),
    )
)]
pub async fn edit_activity(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<ActivityForm>, JsonRejection>,
) -> Result<Json<Ack>, ApiError> {
    let Path(id) = id?;
    let Json(form) = payload?;
    let activity = Activity::from_form(id, form);
    debug!(?activity, "edit_activity called");
    Ok(Json(state.mediator.edit(activity).await?))
}

#[tracing::instrument(skip(state, id))]
#[utoipa::path(delete,
    tag = "activities",
    path = "/api/activities/{id}",
    params(("id" = Uuid, Path, description = "Activity identifier")),
    responses(
        (status = 200, body = Ack),
        (status = 400, body = ErrorBody),
        (status = 404, body = ErrorBody),
    )
)]
pub async fn delete_activity(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Ack>, ApiError> {
    let Path(id) = id?;
    Ok(Json(state.mediator.delete(id).await?))
}
