use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::{ErrorMessage, HttpError},
    models::usermodel::{AppRole, SessionUser},
};

pub const TOKEN_AUDIENCE: &str = "authenticated";

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct UserMetadata {
    pub role: Option<AppRole>,
}

/// Claims carried by an access token issued by the auth service.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub aud: String,
    pub exp: usize,
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: UserMetadata,
}

pub fn decode_token<T: Into<String>>(token: T, secret: &[u8]) -> Result<SessionUser, HttpError> {
    let token = token.into();

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&[TOKEN_AUDIENCE]);

    let decoded = decode::<TokenClaims>(&token, &DecodingKey::from_secret(secret), &validation)
        .map_err(|_| HttpError::unauthorized(ErrorMessage::InvalidToken.to_string()))?;

    let user_id = Uuid::parse_str(&decoded.claims.sub)
        .map_err(|_| HttpError::unauthorized(ErrorMessage::InvalidToken.to_string()))?;

    Ok(SessionUser {
        user_id,
        email: decoded.claims.email,
        role: decoded.claims.user_metadata.role,
        access_token: token,
    })
}

#[cfg(test)]
pub(crate) fn issue_test_token(user_id: Uuid, role: Option<AppRole>, secret: &[u8]) -> String {
    use jsonwebtoken::{encode, EncodingKey, Header};

    let claims = TokenClaims {
        sub: user_id.to_string(),
        aud: TOKEN_AUDIENCE.to_string(),
        exp: (chrono::Utc::now() + chrono::Duration::hours(1)).timestamp() as usize,
        email: Some("tester@example.com".to_string()),
        user_metadata: UserMetadata { role },
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(secret)).unwrap()
}
