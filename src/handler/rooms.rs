use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, Query},
    http::HeaderMap,
    middleware,
    response::IntoResponse,
    routing::{delete, get, post},
    Extension, Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{applicationdb::ApplicationExt, roomdb::RoomExt},
    dtos::{
        applicationdtos::{ApplicationResponseDto, FilterApplicationDto, RoomInterestDto},
        roomdtos::{
            CreateRoomDto, FilterRoomDto, ImageUploadQueryDto, ImageUploadResponseDto, RoomData,
            RoomFilterQuery, RoomListResponseDto, RoomResponseDto,
        },
        userdtos::Response,
    },
    error::HttpError,
    middleware::{auth, optional_session, role_check, JWTAuthMiddleware},
    models::{roommodel::Room, usermodel::AppRole},
    service::{
        catalog::{find_catalog_room, static_catalog},
        error::ServiceError,
        image_upload::{upload_room_images, ImageFile},
        room_filters::compile_filters,
        room_resolver::resolve_rooms,
        storage::SupabaseStorage,
    },
    AppState,
};

/// Room photos are checked one by one after parsing, so the body itself may
/// carry a full batch of oversized files.
pub fn image_upload_body_limit() -> DefaultBodyLimit {
    DefaultBodyLimit::max(64 * 1024 * 1024)
}

pub fn room_handler() -> Router {
    Router::new()
        .route(
            "/",
            get(get_rooms).merge(
                post(create_room)
                    .layer(middleware::from_fn(|state, req, next| {
                        role_check(state, req, next, AppRole::Owner)
                    }))
                    .layer(middleware::from_fn(auth)),
            ),
        )
        .route(
            "/mine",
            get(get_owner_rooms)
                .layer(middleware::from_fn(|state, req, next| {
                    role_check(state, req, next, AppRole::Owner)
                }))
                .layer(middleware::from_fn(auth)),
        )
        .route(
            "/images",
            post(upload_images)
                .layer(image_upload_body_limit())
                .layer(middleware::from_fn(|state, req, next| {
                    role_check(state, req, next, AppRole::Owner)
                }))
                .layer(middleware::from_fn(auth)),
        )
        .route(
            "/:room_id",
            delete(delete_room)
                .layer(middleware::from_fn(|state, req, next| {
                    role_check(state, req, next, AppRole::Owner)
                }))
                .layer(middleware::from_fn(auth)),
        )
        .route("/:room_id/interest", post(express_interest))
}

pub async fn get_rooms(
    Extension(app_state): Extension<Arc<AppState>>,
    Query(query): Query<RoomFilterQuery>,
) -> Result<impl IntoResponse, HttpError> {
    let filters = compile_filters(&query).map_err(ServiceError::from)?;

    let rooms = resolve_rooms(
        &app_state.db_client,
        &filters,
        static_catalog(),
        app_state.env.min_rooms_to_show,
    )
    .await?;

    Ok(Json(RoomListResponseDto {
        status: "success".to_string(),
        results: rooms.len(),
        rooms: FilterRoomDto::filter_rooms(&rooms),
    }))
}

pub async fn get_owner_rooms(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddleware>,
) -> Result<impl IntoResponse, HttpError> {
    let rooms = app_state
        .db_client
        .get_owner_rooms(user.user.user_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(RoomListResponseDto {
        status: "success".to_string(),
        results: rooms.len(),
        rooms: FilterRoomDto::filter_rooms(&rooms),
    }))
}

pub async fn create_room(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddleware>,
    Json(body): Json<CreateRoomDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate().map_err(HttpError::validation)?;

    let room = app_state
        .db_client
        .save_room(body.into_new_room(user.user.user_id))
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    tracing::info!("Room {} listed by owner {}", room.id, user.user.user_id);

    Ok(Json(RoomResponseDto {
        status: "success".to_string(),
        data: RoomData {
            room: FilterRoomDto::filter_room(&room),
        },
    }))
}

pub async fn delete_room(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddleware>,
    Path(room_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let deleted = app_state
        .db_client
        .delete_room(room_id, user.user.user_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if deleted == 0 {
        return Err(HttpError::not_found("Room not found"));
    }

    tracing::info!("Room {} deleted by owner {}", room_id, user.user.user_id);

    Ok(Json(Response {
        status: "success",
        message: "Room deleted successfully".to_string(),
    }))
}

pub async fn upload_images(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddleware>,
    Query(query): Query<ImageUploadQueryDto>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, HttpError> {
    let mut files = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| HttpError::bad_request(format!("Multipart error: {e}")))?
    {
        let Some(file_name) = field.file_name().map(|name| name.to_string()) else {
            continue;
        };
        let content_type = field.content_type().map(|ct| ct.to_string());
        let bytes = field
            .bytes()
            .await
            .map_err(|e| HttpError::bad_request(format!("Failed to read file: {e}")))?;

        files.push(ImageFile {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        });
    }

    if files.is_empty() {
        return Err(HttpError::bad_request("No files were uploaded"));
    }

    let storage = SupabaseStorage::new(
        app_state.http.clone(),
        &app_state.env,
        &user.user.access_token,
    );

    let outcome = upload_room_images(&storage, user.user.user_id, query.existing, files).await?;

    Ok(Json(ImageUploadResponseDto {
        status: "success".to_string(),
        urls: outcome.urls,
        skipped: outcome.skipped,
    }))
}

async fn find_room(app_state: &AppState, room_id: &str) -> Result<Room, HttpError> {
    if let Ok(uuid) = Uuid::parse_str(room_id) {
        let room = app_state
            .db_client
            .get_room_by_id(uuid)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?;

        if let Some(room) = room.filter(|r| r.is_active) {
            return Ok(room);
        }
    }

    find_catalog_room(room_id)
        .cloned()
        .ok_or_else(|| ServiceError::RoomNotFound(room_id.to_string()).into())
}

pub async fn express_interest(
    Extension(app_state): Extension<Arc<AppState>>,
    cookie_jar: CookieJar,
    headers: HeaderMap,
    Path(room_id): Path<String>,
    Json(body): Json<RoomInterestDto>,
) -> Result<impl IntoResponse, HttpError> {
    let body = body.normalized();
    body.validate().map_err(HttpError::validation)?;

    let session = optional_session(&cookie_jar, &headers, app_state.env.jwt_secret.as_bytes());

    let room = find_room(&app_state, &room_id).await?;

    let application = app_state
        .db_client
        .save_application(body.into_new_application(session.as_ref(), &room))
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    match &session {
        Some(user) => tracing::info!("User {} is interested in room {}", user.user_id, room.id),
        None => tracing::info!("Anonymous visitor is interested in room {}", room.id),
    }

    Ok(Json(ApplicationResponseDto {
        status: "success".to_string(),
        message: "Interest submitted! The owner will contact you soon.".to_string(),
        application: FilterApplicationDto::filter_application(&application),
    }))
}
