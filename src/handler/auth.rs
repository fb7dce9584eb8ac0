use std::sync::Arc;

use axum::{
    http::{header, HeaderMap, HeaderValue},
    middleware,
    response::{IntoResponse, Response as AxumResponse},
    routing::{get, post},
    Extension, Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use validator::Validate;

use crate::{
    dtos::userdtos::{
        FilterUserDto, LoginUserDto, Response, SessionResponseDto, SignUpDto, SignUpResponseDto,
        UserLoginResponseDto,
    },
    error::HttpError,
    middleware::{auth, optional_session, JWTAuthMiddleware, TOKEN_COOKIE},
    models::usermodel::dashboard_path,
    service::supabase_auth::SignUpOutcome,
    AppState,
};

pub fn auth_handler() -> Router {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/logout", post(logout).layer(middleware::from_fn(auth)))
        .route("/session", get(session))
}

fn token_cookie(value: String, max_age: time::Duration) -> Result<HeaderValue, HttpError> {
    let cookie = Cookie::build((TOKEN_COOKIE, value))
        .path("/")
        .max_age(max_age)
        .http_only(true)
        .build();

    cookie
        .to_string()
        .parse()
        .map_err(|_| HttpError::server_error("Failed to build session cookie"))
}

fn with_cookie(response: impl IntoResponse, cookie: HeaderValue) -> AxumResponse {
    let mut headers = HeaderMap::new();
    headers.append(header::SET_COOKIE, cookie);

    let mut response = response.into_response();
    response.headers_mut().extend(headers);
    response
}

pub async fn signup(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<SignUpDto>,
) -> Result<impl IntoResponse, HttpError> {
    let body = body.normalized();
    body.validate().map_err(HttpError::validation)?;

    let outcome = app_state
        .auth_client
        .sign_up(&body.email, &body.password, body.role)
        .await?;

    match outcome {
        SignUpOutcome::Session(session) => {
            tracing::info!("New {} account {}", body.role.to_str(), session.user.id);

            let role = session.user.role();
            let cookie = token_cookie(
                session.access_token.clone(),
                time::Duration::hours(app_state.env.jwt_maxage),
            )?;

            let response = Json(SignUpResponseDto {
                status: "success".to_string(),
                message: "Account created successfully".to_string(),
                user: FilterUserDto::new(session.user.id, session.user.email.clone(), role),
                token: Some(session.access_token),
                redirect_to: Some(dashboard_path(role).to_string()),
            });

            Ok(with_cookie(response, cookie))
        }
        SignUpOutcome::PendingConfirmation(user) => {
            tracing::info!("New {} account {} awaiting confirmation", body.role.to_str(), user.id);

            let response = Json(SignUpResponseDto {
                status: "success".to_string(),
                message: "Account created. Please check your email to confirm it.".to_string(),
                user: FilterUserDto::new(user.id, user.email.clone(), user.role()),
                token: None,
                redirect_to: None,
            });

            Ok(response.into_response())
        }
    }
}

pub async fn login(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<LoginUserDto>,
) -> Result<impl IntoResponse, HttpError> {
    let body = body.normalized();
    body.validate().map_err(HttpError::validation)?;

    let session = app_state
        .auth_client
        .sign_in(&body.email, &body.password)
        .await?;

    let role = session.user.role();
    let cookie = token_cookie(
        session.access_token.clone(),
        time::Duration::hours(app_state.env.jwt_maxage),
    )?;

    let response = Json(UserLoginResponseDto {
        status: "success".to_string(),
        token: session.access_token,
        user: FilterUserDto::new(session.user.id, session.user.email.clone(), role),
        redirect_to: dashboard_path(role).to_string(),
    });

    Ok(with_cookie(response, cookie))
}

pub async fn logout(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddleware>,
) -> Result<impl IntoResponse, HttpError> {
    // The local cookie is cleared even when the auth service is unreachable.
    if let Err(err) = app_state.auth_client.sign_out(&user.user.access_token).await {
        tracing::warn!("Sign-out for {} failed upstream: {}", user.user.user_id, err);
    }

    let cookie = token_cookie(String::new(), time::Duration::ZERO)?;

    let response = Json(Response {
        status: "success",
        message: "Logged out successfully".to_string(),
    });

    Ok(with_cookie(response, cookie))
}

pub async fn session(
    Extension(app_state): Extension<Arc<AppState>>,
    cookie_jar: CookieJar,
    headers: HeaderMap,
) -> Json<SessionResponseDto> {
    match optional_session(&cookie_jar, &headers, app_state.env.jwt_secret.as_bytes()) {
        Some(user) => Json(SessionResponseDto::from_session(&user)),
        None => Json(SessionResponseDto::anonymous()),
    }
}
