use std::sync::Arc;

use axum::{middleware, response::IntoResponse, routing::post, Extension, Json, Router};
use validator::Validate;

use crate::{
    db::applicationdb::ApplicationExt,
    dtos::applicationdtos::{ApplicationResponseDto, FilterApplicationDto, StudentApplicationDto},
    error::HttpError,
    middleware::{role_check, JWTAuthMiddleware},
    models::usermodel::AppRole,
    AppState,
};

pub fn application_handler() -> Router {
    Router::new().route(
        "/",
        post(submit_application).layer(middleware::from_fn(|state, req, next| {
            role_check(state, req, next, AppRole::Student)
        })),
    )
}

pub async fn submit_application(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddleware>,
    Json(body): Json<StudentApplicationDto>,
) -> Result<impl IntoResponse, HttpError> {
    let body = body.normalized();
    body.validate().map_err(HttpError::validation)?;

    let application = app_state
        .db_client
        .save_application(body.into_new_application(user.user.user_id))
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    tracing::info!("Application {} submitted by {}", application.id, user.user.user_id);

    Ok(Json(ApplicationResponseDto {
        status: "success".to_string(),
        message: "Application submitted successfully!".to_string(),
        application: FilterApplicationDto::filter_application(&application),
    }))
}
