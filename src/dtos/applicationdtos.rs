use std::{borrow::Cow, sync::LazyLock};

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::{
    applicationmodel::{NewApplication, StudentApplication},
    roommodel::Room,
    usermodel::SessionUser,
};

static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[+]?[\d\s-]{10,15}$").unwrap());

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

fn check_move_in_date(date: &NaiveDate, today: NaiveDate) -> Result<(), ValidationError> {
    if *date < today {
        let mut error = ValidationError::new("move_in_date_in_past");
        error.message = Some(Cow::from("Move-in date cannot be in the past"));
        return Err(error);
    }
    Ok(())
}

fn validate_move_in_date(date: &NaiveDate) -> Result<(), ValidationError> {
    check_move_in_date(date, today())
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct StudentApplicationDto {
    #[validate(length(min = 2, max = 100, message = "Name must be between 2 and 100 characters"))]
    pub name: String,

    #[validate(regex(path = "PHONE_RE", message = "Please enter a valid phone number"))]
    pub phone: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(
        min = 2,
        max = 200,
        message = "Preferred location must be between 2 and 200 characters"
    ))]
    pub preferred_location: String,

    #[validate(range(
        min = 1000,
        max = 100000,
        message = "Budget must be between ₹1,000 and ₹1,00,000"
    ))]
    pub budget: i32,

    #[validate(custom = "validate_move_in_date")]
    pub move_in_date: NaiveDate,
}

impl StudentApplicationDto {
    pub fn normalized(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.phone = self.phone.trim().to_string();
        self.email = self.email.trim().to_string();
        self.preferred_location = self.preferred_location.trim().to_string();
        self
    }

    pub fn into_new_application(self, user_id: Uuid) -> NewApplication {
        NewApplication {
            user_id: Some(user_id),
            name: self.name,
            phone: self.phone,
            email: self.email,
            preferred_location: self.preferred_location,
            budget: self.budget,
            move_in_date: self.move_in_date,
        }
    }
}

/// Quick "I'm interested" form on a room card.
#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct RoomInterestDto {
    #[validate(length(min = 2, max = 100, message = "Name must be between 2 and 100 characters"))]
    pub name: String,

    #[validate(regex(path = "PHONE_RE", message = "Please enter a valid phone number"))]
    pub phone: String,
}

impl RoomInterestDto {
    pub fn normalized(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.phone = self.phone.trim().to_string();
        self
    }

    /// The room stands in for the fields the short form does not ask for.
    /// Anonymous visitors are recorded under a placeholder address derived
    /// from their phone number.
    pub fn into_new_application(self, session: Option<&SessionUser>, room: &Room) -> NewApplication {
        let email = session
            .and_then(|s| s.email.clone())
            .unwrap_or_else(|| placeholder_email(&self.phone));

        NewApplication {
            user_id: session.map(|s| s.user_id),
            name: self.name,
            phone: self.phone,
            email,
            preferred_location: room.location.clone(),
            budget: room.price,
            move_in_date: today(),
        }
    }
}

pub fn placeholder_email(phone: &str) -> String {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    format!("{}@placeholder.com", digits)
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FilterApplicationDto {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub preferred_location: String,
    pub budget: i32,
    pub move_in_date: NaiveDate,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl FilterApplicationDto {
    pub fn filter_application(application: &StudentApplication) -> Self {
        FilterApplicationDto {
            id: application.id.to_string(),
            name: application.name.to_owned(),
            phone: application.phone.to_owned(),
            email: application.email.to_owned(),
            preferred_location: application.preferred_location.to_owned(),
            budget: application.budget,
            move_in_date: application.move_in_date,
            created_at: application.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApplicationResponseDto {
    pub status: String,
    pub message: String,
    pub application: FilterApplicationDto,
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn valid_application() -> StudentApplicationDto {
        StudentApplicationDto {
            name: "Asha Rao".to_string(),
            phone: "+91 98765-43210".to_string(),
            email: "asha@college.edu".to_string(),
            preferred_location: "Koramangala".to_string(),
            budget: 12_000,
            move_in_date: today() + Duration::days(14),
        }
    }

    #[test]
    fn valid_application_passes() {
        assert!(valid_application().validate().is_ok());
    }

    #[test]
    fn today_is_an_acceptable_move_in_date() {
        let dto = StudentApplicationDto {
            move_in_date: today(),
            ..valid_application()
        };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn past_move_in_date_is_rejected() {
        let reference = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let yesterday = NaiveDate::from_ymd_opt(2025, 6, 14).unwrap();

        let err = check_move_in_date(&yesterday, reference).unwrap_err();
        assert_eq!(err.message.as_deref(), Some("Move-in date cannot be in the past"));
        assert!(check_move_in_date(&reference, reference).is_ok());
    }

    #[test]
    fn budget_and_phone_bounds() {
        let dto = StudentApplicationDto {
            budget: 999,
            phone: "12345".to_string(),
            ..valid_application()
        };
        let errors = dto.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("budget"));
        assert!(fields.contains_key("phone"));
        assert_eq!(fields.len(), 2);

        let ceiling = StudentApplicationDto {
            budget: 100_000,
            ..valid_application()
        };
        assert!(ceiling.validate().is_ok());
    }

    #[test]
    fn interest_form_is_trimmed_before_validation() {
        let dto = RoomInterestDto {
            name: "  A ".to_string(),
            phone: " 9876543210 ".to_string(),
        }
        .normalized();
        assert_eq!(dto.phone, "9876543210");

        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
        assert!(!errors.field_errors().contains_key("phone"));
    }

    #[test]
    fn interest_borrows_location_and_price_from_room() {
        let room = crate::service::catalog::find_catalog_room("mock-2").unwrap();
        let session = SessionUser {
            user_id: Uuid::new_v4(),
            email: Some("ravi@example.com".to_string()),
            role: None,
            access_token: "token".to_string(),
        };
        let dto = RoomInterestDto {
            name: "Ravi".to_string(),
            phone: "9876543210".to_string(),
        };

        let application = dto.into_new_application(Some(&session), room);

        assert_eq!(application.user_id, Some(session.user_id));
        assert_eq!(application.email, "ravi@example.com");
        assert_eq!(application.preferred_location, room.location);
        assert_eq!(application.budget, room.price);
        assert_eq!(application.move_in_date, today());
    }

    #[test]
    fn anonymous_interest_uses_phone_placeholder_email() {
        let room = crate::service::catalog::find_catalog_room("mock-5").unwrap();
        let dto = RoomInterestDto {
            name: "Meera".to_string(),
            phone: "+91 98765-43210".to_string(),
        };

        let application = dto.into_new_application(None, room);

        assert_eq!(application.user_id, None);
        assert_eq!(application.email, "919876543210@placeholder.com");
        assert_eq!(application.phone, "+91 98765-43210");
    }
}
