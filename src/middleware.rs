use std::sync::Arc;

use axum::{
    extract::Request,
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::IntoResponse,
    Extension,
};
use axum_extra::extract::cookie::CookieJar;

use crate::{
    error::{ErrorMessage, HttpError},
    models::usermodel::{route_guard, AppRole, RouteDecision, SessionUser, AUTH_PATH},
    utils::token,
    AppState,
};

pub const TOKEN_COOKIE: &str = "token";

#[derive(Debug, Clone)]
pub struct JWTAuthMiddleware {
    pub user: SessionUser,
}

/// Access token from the `token` cookie, falling back to a bearer header.
pub fn extract_token(cookie_jar: &CookieJar, headers: &HeaderMap) -> Option<String> {
    cookie_jar
        .get(TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .or_else(|| {
            headers
                .get(header::AUTHORIZATION)
                .and_then(|auth_header| auth_header.to_str().ok())
                .and_then(|auth_value| auth_value.strip_prefix("Bearer "))
                .map(|token| token.to_owned())
        })
}

/// Session of the caller when a valid token is present; anonymous otherwise.
pub fn optional_session(cookie_jar: &CookieJar, headers: &HeaderMap, secret: &[u8]) -> Option<SessionUser> {
    extract_token(cookie_jar, headers).and_then(|t| token::decode_token(t, secret).ok())
}

pub async fn auth(
    cookie_jar: CookieJar,
    Extension(app_state): Extension<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<impl IntoResponse, HttpError> {
    let token = extract_token(&cookie_jar, req.headers()).ok_or_else(|| {
        HttpError::redirect(
            ErrorMessage::TokenNotProvided.to_string(),
            StatusCode::UNAUTHORIZED,
            AUTH_PATH,
        )
    })?;

    let user = token::decode_token(token, app_state.env.jwt_secret.as_bytes()).map_err(|_| {
        HttpError::redirect(
            ErrorMessage::InvalidToken.to_string(),
            StatusCode::UNAUTHORIZED,
            AUTH_PATH,
        )
    })?;

    tracing::debug!("Authenticated request from user {}", user.user_id);

    req.extensions_mut().insert(JWTAuthMiddleware { user });

    Ok(next.run(req).await)
}

pub async fn role_check(
    Extension(_app_state): Extension<Arc<AppState>>,
    req: Request,
    next: Next,
    required_role: AppRole,
) -> Result<impl IntoResponse, HttpError> {
    let session = req.extensions().get::<JWTAuthMiddleware>().map(|auth| &auth.user);

    match route_guard(session, Some(required_role)) {
        RouteDecision::Allow => Ok(next.run(req).await),
        RouteDecision::RedirectToAuth => Err(HttpError::redirect(
            ErrorMessage::UserNotAuthenticated.to_string(),
            StatusCode::UNAUTHORIZED,
            AUTH_PATH,
        )),
        RouteDecision::RedirectTo(dashboard) => Err(HttpError::redirect(
            ErrorMessage::PermissionDenied.to_string(),
            StatusCode::FORBIDDEN,
            dashboard,
        )),
    }
}
