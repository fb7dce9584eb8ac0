// service/supabase_auth.rs
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::{
    config::Config, error::ErrorMessage, models::usermodel::AppRole,
    service::error::ServiceError,
};

#[derive(Debug, Clone, Deserialize)]
pub struct AuthUserMetadata {
    pub role: Option<AppRole>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: Option<AuthUserMetadata>,
}

impl AuthUser {
    pub fn role(&self) -> Option<AppRole> {
        self.user_metadata.as_ref().and_then(|m| m.role)
    }
}

/// A session issued by the auth service.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_in: Option<i64>,
    pub user: AuthUser,
}

/// Sign-up answers with a full session when email confirmation is off and with
/// the bare user otherwise.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SignUpOutcome {
    Session(AuthSession),
    PendingConfirmation(AuthUser),
}

#[derive(Debug, Deserialize)]
struct AuthErrorBody {
    msg: Option<String>,
    message: Option<String>,
    error_description: Option<String>,
}

/// Client for the hosted auth service (`/auth/v1`).
#[derive(Debug, Clone)]
pub struct AuthClient {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
}

impl AuthClient {
    pub fn new(http: reqwest::Client, config: &Config) -> Self {
        Self {
            http,
            base_url: format!("{}/auth/v1", config.supabase_url),
            anon_key: config.supabase_anon_key.clone(),
        }
    }

    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        role: AppRole,
    ) -> Result<SignUpOutcome, ServiceError> {
        let payload = json!({
            "email": email,
            "password": password,
            "data": { "role": role },
        });

        let response = self
            .http
            .post(format!("{}/signup", self.base_url))
            .header("apikey", &self.anon_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let message = Self::error_message(response).await;
            return Err(ServiceError::Auth(friendly_sign_up_error(&message)));
        }

        Ok(response.json::<SignUpOutcome>().await?)
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, ServiceError> {
        let response = self
            .http
            .post(format!("{}/token?grant_type=password", self.base_url))
            .header("apikey", &self.anon_key)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ServiceError::Auth(Self::error_message(response).await));
        }

        Ok(response.json::<AuthSession>().await?)
    }

    pub async fn sign_out(&self, access_token: &str) -> Result<(), ServiceError> {
        let response = self
            .http
            .post(format!("{}/logout", self.base_url))
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ServiceError::Auth(Self::error_message(response).await));
        }

        Ok(())
    }

    async fn error_message(response: reqwest::Response) -> String {
        let status = response.status();
        match response.json::<AuthErrorBody>().await {
            Ok(body) => body
                .msg
                .or(body.error_description)
                .or(body.message)
                .unwrap_or_else(|| format!("Auth request failed with status {}", status)),
            Err(_) => format!("Auth request failed with status {}", status),
        }
    }
}

pub fn friendly_sign_up_error(message: &str) -> String {
    if message.contains("already registered") {
        ErrorMessage::EmailExist.to_string()
    } else {
        message.to_string()
    }
}
