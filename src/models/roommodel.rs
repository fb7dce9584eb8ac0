use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "property_type")]
pub enum PropertyType {
    #[serde(rename = "1 BHK")]
    #[sqlx(rename = "1 BHK")]
    OneBhk,
    #[serde(rename = "2 BHK")]
    #[sqlx(rename = "2 BHK")]
    TwoBhk,
    #[serde(rename = "3 BHK")]
    #[sqlx(rename = "3 BHK")]
    ThreeBhk,
    #[serde(rename = "1 Bed")]
    #[sqlx(rename = "1 Bed")]
    OneBed,
    #[serde(rename = "2 Bed")]
    #[sqlx(rename = "2 Bed")]
    TwoBed,
}

impl PropertyType {
    pub const ALL: [PropertyType; 5] = [
        PropertyType::OneBhk,
        PropertyType::TwoBhk,
        PropertyType::ThreeBhk,
        PropertyType::OneBed,
        PropertyType::TwoBed,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            PropertyType::OneBhk => "1 BHK",
            PropertyType::TwoBhk => "2 BHK",
            PropertyType::ThreeBhk => "3 BHK",
            PropertyType::OneBed => "1 Bed",
            PropertyType::TwoBed => "2 Bed",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

impl FromStr for PropertyType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PropertyType::ALL
            .into_iter()
            .find(|t| t.to_str() == s)
            .ok_or(())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "tenant_preference")]
pub enum TenantPreference {
    Bachelor,
    Family,
    Girls,
    Working,
    Any,
}

impl TenantPreference {
    pub const ALL: [TenantPreference; 5] = [
        TenantPreference::Bachelor,
        TenantPreference::Family,
        TenantPreference::Girls,
        TenantPreference::Working,
        TenantPreference::Any,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            TenantPreference::Bachelor => "Bachelor",
            TenantPreference::Family => "Family",
            TenantPreference::Girls => "Girls",
            TenantPreference::Working => "Working",
            TenantPreference::Any => "Any",
        }
    }
}

impl fmt::Display for TenantPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

impl FromStr for TenantPreference {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TenantPreference::ALL
            .into_iter()
            .find(|t| t.to_str() == s)
            .ok_or(())
    }
}

/// A rentable listing. Static catalog entries carry no owner.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone, PartialEq)]
pub struct Room {
    pub id: String,
    pub owner_id: Option<Uuid>,
    pub title: String,
    pub location: String,
    pub price: i32,
    pub property_type: PropertyType,
    pub tenant_preference: TenantPreference,
    pub contact_number: String,
    pub images: Vec<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields an owner supplies when listing a room. Always inserted as active.
#[derive(Debug, Clone)]
pub struct NewRoom {
    pub owner_id: Uuid,
    pub title: String,
    pub location: String,
    pub price: i32,
    pub property_type: PropertyType,
    pub tenant_preference: TenantPreference,
    pub contact_number: String,
    pub images: Vec<String>,
}
