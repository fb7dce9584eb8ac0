use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::usermodel::{dashboard_path, AppRole, SessionUser};

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct SignUpDto {
    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Invalid email address")
    )]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    pub role: AppRole,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct LoginUserDto {
    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Invalid email address")
    )]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

impl SignUpDto {
    pub fn normalized(mut self) -> Self {
        self.email = self.email.trim().to_string();
        self
    }
}

impl LoginUserDto {
    pub fn normalized(mut self) -> Self {
        self.email = self.email.trim().to_string();
        self
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FilterUserDto {
    pub id: String,
    pub email: Option<String>,
    pub role: Option<String>,
}

impl FilterUserDto {
    pub fn new(id: Uuid, email: Option<String>, role: Option<AppRole>) -> Self {
        FilterUserDto {
            id: id.to_string(),
            email,
            role: role.map(|r| r.to_str().to_string()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserLoginResponseDto {
    pub status: String,
    pub token: String,
    pub user: FilterUserDto,
    pub redirect_to: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SignUpResponseDto {
    pub status: String,
    pub message: String,
    pub user: FilterUserDto,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_to: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponseDto {
    pub is_authenticated: bool,
    pub user_id: Option<String>,
    pub email: Option<String>,
    pub role: Option<AppRole>,
    pub dashboard: Option<String>,
}

impl SessionResponseDto {
    pub fn anonymous() -> Self {
        SessionResponseDto {
            is_authenticated: false,
            user_id: None,
            email: None,
            role: None,
            dashboard: None,
        }
    }

    pub fn from_session(session: &SessionUser) -> Self {
        SessionResponseDto {
            is_authenticated: true,
            user_id: Some(session.user_id.to_string()),
            email: session.email.clone(),
            role: session.role,
            dashboard: Some(dashboard_path(session.role).to_string()),
        }
    }
}

#[derive(Serialize, Deserialize)]
pub struct Response {
    pub status: &'static str,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_are_checked_after_trimming() {
        let dto = LoginUserDto {
            email: "  student@college.edu ".to_string(),
            password: "hunter22".to_string(),
        }
        .normalized();
        assert_eq!(dto.email, "student@college.edu");
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn short_password_and_bad_email_are_field_errors() {
        let dto = SignUpDto {
            email: "not-an-email".to_string(),
            password: "12345".to_string(),
            role: AppRole::Student,
        };
        let errors = dto.validate().unwrap_err();
        let fields = errors.field_errors();
        assert_eq!(fields["email"][0].message.as_deref(), Some("Invalid email address"));
        assert_eq!(
            fields["password"][0].message.as_deref(),
            Some("Password must be at least 6 characters")
        );
    }

    #[test]
    fn role_is_snake_case_on_the_wire() {
        let dto: SignUpDto = serde_json::from_value(serde_json::json!({
            "email": "owner@example.com",
            "password": "secret1",
            "role": "owner"
        }))
        .unwrap();
        assert_eq!(dto.role, AppRole::Owner);
    }

    #[test]
    fn session_points_at_the_role_dashboard() {
        let session = SessionUser {
            user_id: Uuid::new_v4(),
            email: Some("owner@example.com".to_string()),
            role: Some(AppRole::Owner),
            access_token: "token".to_string(),
        };
        let dto = SessionResponseDto::from_session(&session);
        assert!(dto.is_authenticated);
        assert_eq!(dto.dashboard.as_deref(), Some("/owner"));

        let body = serde_json::to_value(SessionResponseDto::anonymous()).unwrap();
        assert_eq!(body["is_authenticated"], false);
        assert!(body["dashboard"].is_null());
    }
}
