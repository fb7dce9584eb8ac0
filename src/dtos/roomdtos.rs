use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    models::roommodel::{NewRoom, PropertyType, Room, TenantPreference},
    service::image_upload::SkippedImage,
    utils::currency::format_inr,
};

pub const DEFAULT_ROOM_IMAGE: &str =
    "https://images.unsplash.com/photo-1502672260266-1c1ef2d93688?w=800";

static CONTACT_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\d\s+()-]{10,15}$").unwrap());

/// Raw selector state of the listing page, exactly as the UI sends it.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct RoomFilterQuery {
    pub location: Option<String>,
    pub price_range: Option<String>,
    pub property_type: Option<String>,
    pub tenant_preference: Option<String>,
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct CreateRoomDto {
    #[validate(
        length(min = 5, message = "Title must be at least 5 characters"),
        length(max = 100, message = "Title must be at most 100 characters")
    )]
    pub title: String,

    #[validate(
        length(min = 3, message = "Location must be at least 3 characters"),
        length(max = 100, message = "Location must be at most 100 characters")
    )]
    pub location: String,

    #[validate(
        range(min = 1000, message = "Price must be at least ₹1,000"),
        range(max = 100000, message = "Price cannot exceed ₹1,00,000")
    )]
    pub price: i32,

    pub property_type: PropertyType,
    pub tenant_preference: TenantPreference,

    #[validate(regex(path = "CONTACT_NUMBER_RE", message = "Please enter a valid phone number"))]
    pub contact_number: String,

    #[serde(default)]
    #[validate(length(max = 5, message = "A room can have at most 5 images"))]
    pub images: Vec<String>,
}

impl CreateRoomDto {
    pub fn into_new_room(self, owner_id: uuid::Uuid) -> NewRoom {
        NewRoom {
            owner_id,
            title: self.title.trim().to_string(),
            location: self.location.trim().to_string(),
            price: self.price,
            property_type: self.property_type,
            tenant_preference: self.tenant_preference,
            contact_number: self.contact_number.trim().to_string(),
            images: self.images,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FilterRoomDto {
    pub id: String,
    pub title: String,
    pub location: String,
    pub price: i32,
    pub formatted_price: String,
    pub property_type: PropertyType,
    pub tenant_preference: TenantPreference,
    pub contact_number: String,
    pub images: Vec<String>,
    pub cover_image: String,
    pub is_active: bool,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl FilterRoomDto {
    pub fn filter_room(room: &Room) -> Self {
        FilterRoomDto {
            id: room.id.to_owned(),
            title: room.title.to_owned(),
            location: room.location.to_owned(),
            price: room.price,
            formatted_price: format_inr(room.price as i64),
            property_type: room.property_type,
            tenant_preference: room.tenant_preference,
            contact_number: room.contact_number.to_owned(),
            images: room.images.clone(),
            cover_image: room
                .images
                .first()
                .cloned()
                .unwrap_or_else(|| DEFAULT_ROOM_IMAGE.to_string()),
            is_active: room.is_active,
            created_at: room.created_at,
            updated_at: room.updated_at,
        }
    }

    pub fn filter_rooms(rooms: &[Room]) -> Vec<FilterRoomDto> {
        rooms.iter().map(FilterRoomDto::filter_room).collect()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RoomData {
    pub room: FilterRoomDto,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RoomResponseDto {
    pub status: String,
    pub data: RoomData,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RoomListResponseDto {
    pub status: String,
    pub rooms: Vec<FilterRoomDto>,
    pub results: usize,
}

#[derive(Debug, Deserialize)]
pub struct ImageUploadQueryDto {
    #[serde(default)]
    pub existing: usize,
}

#[derive(Debug, Serialize)]
pub struct ImageUploadResponseDto {
    pub status: String,
    pub urls: Vec<String>,
    pub skipped: Vec<SkippedImage>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_room() -> CreateRoomDto {
        CreateRoomDto {
            title: "Sunny 1 BHK near campus".to_string(),
            location: "Koramangala, Bangalore".to_string(),
            price: 14_000,
            property_type: PropertyType::OneBhk,
            tenant_preference: TenantPreference::Any,
            contact_number: "+91 98765 43210".to_string(),
            images: vec![],
        }
    }

    #[test]
    fn valid_room_passes() {
        assert!(valid_room().validate().is_ok());
    }

    #[test]
    fn price_below_minimum_is_a_field_error() {
        let dto = CreateRoomDto { price: 500, ..valid_room() };

        let errors = dto.validate().unwrap_err();
        let fields = errors.field_errors();

        assert_eq!(fields.len(), 1);
        let price_errors = fields.get("price").unwrap();
        assert_eq!(
            price_errors[0].message.as_deref(),
            Some("Price must be at least ₹1,000")
        );
    }

    #[test]
    fn short_title_and_bad_phone_are_reported_together() {
        let dto = CreateRoomDto {
            title: "Flat".to_string(),
            contact_number: "call me".to_string(),
            ..valid_room()
        };

        let errors = dto.validate().unwrap_err();
        let fields = errors.field_errors();

        assert!(fields.contains_key("title"));
        assert!(fields.contains_key("contact_number"));
        assert!(!fields.contains_key("price"));
    }

    #[test]
    fn too_many_images_rejected() {
        let dto = CreateRoomDto {
            images: (0..6).map(|i| format!("https://cdn.test/{i}.jpg")).collect(),
            ..valid_room()
        };
        assert!(dto.validate().unwrap_err().field_errors().contains_key("images"));
    }

    #[test]
    fn unknown_property_type_does_not_deserialize() {
        let body = serde_json::json!({
            "title": "Sunny 1 BHK near campus",
            "location": "Koramangala",
            "price": 14000,
            "property_type": "Villa",
            "tenant_preference": "Any",
            "contact_number": "+91 98765 43210"
        });
        assert!(serde_json::from_value::<CreateRoomDto>(body).is_err());
    }

    #[test]
    fn cover_image_falls_back_to_placeholder() {
        let room = crate::service::catalog::find_catalog_room("mock-3").unwrap().clone();
        let with_images = FilterRoomDto::filter_room(&room);
        assert_eq!(with_images.cover_image, room.images[0]);
        assert_eq!(with_images.formatted_price, "₹8,000");

        let bare = Room { images: vec![], ..room };
        assert_eq!(FilterRoomDto::filter_room(&bare).cover_image, DEFAULT_ROOM_IMAGE);
    }
}
