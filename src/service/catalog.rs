//! Built-in fallback listings shown when the live catalog is thin. Read-only.

use std::sync::LazyLock;

use chrono::{DateTime, TimeZone, Utc};

use crate::models::roommodel::{PropertyType, Room, TenantPreference};

struct CatalogEntry {
    id: &'static str,
    title: &'static str,
    location: &'static str,
    price: i32,
    property_type: PropertyType,
    tenant_preference: TenantPreference,
    contact_number: &'static str,
    images: &'static [&'static str],
}

const ENTRIES: &[CatalogEntry] = &[
    CatalogEntry {
        id: "mock-1",
        title: "Spacious 2 BHK Near IIT Delhi",
        location: "Hauz Khas, New Delhi",
        price: 18000,
        property_type: PropertyType::TwoBhk,
        tenant_preference: TenantPreference::Any,
        contact_number: "+91 98765 43210",
        images: &[
            "https://images.unsplash.com/photo-1502672260266-1c1ef2d93688?w=800",
            "https://images.unsplash.com/photo-1560448204-e02f11c3d0e2?w=800",
        ],
    },
    CatalogEntry {
        id: "mock-2",
        title: "Cozy 1 BHK for Working Professionals",
        location: "Koramangala, Bangalore",
        price: 15000,
        property_type: PropertyType::OneBhk,
        tenant_preference: TenantPreference::Working,
        contact_number: "+91 98765 43211",
        images: &[
            "https://images.unsplash.com/photo-1522708323590-d24dbb6b0267?w=800",
            "https://images.unsplash.com/photo-1560185007-cde436f6a4d0?w=800",
        ],
    },
    CatalogEntry {
        id: "mock-3",
        title: "Modern 1 Bed Room Near College",
        location: "Andheri West, Mumbai",
        price: 8000,
        property_type: PropertyType::OneBed,
        tenant_preference: TenantPreference::Bachelor,
        contact_number: "+91 98765 43212",
        images: &[
            "https://images.unsplash.com/photo-1513694203232-719a280e022f?w=800",
        ],
    },
    CatalogEntry {
        id: "mock-4",
        title: "Girls PG with All Amenities",
        location: "Sector 62, Noida",
        price: 7000,
        property_type: PropertyType::OneBed,
        tenant_preference: TenantPreference::Girls,
        contact_number: "+91 98765 43213",
        images: &[
            "https://images.unsplash.com/photo-1554995207-c18c203602cb?w=800",
            "https://images.unsplash.com/photo-1586023492125-27b2c045efd7?w=800",
        ],
    },
    CatalogEntry {
        id: "mock-5",
        title: "Family Friendly 3 BHK Apartment",
        location: "Salt Lake, Kolkata",
        price: 20000,
        property_type: PropertyType::ThreeBhk,
        tenant_preference: TenantPreference::Family,
        contact_number: "+91 98765 43214",
        images: &[
            "https://images.unsplash.com/photo-1600596542815-ffad4c1539a9?w=800",
            "https://images.unsplash.com/photo-1600607687939-ce8a6c25118c?w=800",
        ],
    },
    CatalogEntry {
        id: "mock-6",
        title: "Budget Friendly 2 Bed Sharing",
        location: "Kothrud, Pune",
        price: 5000,
        property_type: PropertyType::TwoBed,
        tenant_preference: TenantPreference::Bachelor,
        contact_number: "+91 98765 43215",
        images: &[
            "https://images.unsplash.com/photo-1598928506311-c55ez2-d-a2eb?w=800",
            "https://images.unsplash.com/photo-1617806118233-18e1de247200?w=800",
        ],
    },
    CatalogEntry {
        id: "mock-7",
        title: "Premium 2 BHK Near Tech Park",
        location: "Whitefield, Bangalore",
        price: 22000,
        property_type: PropertyType::TwoBhk,
        tenant_preference: TenantPreference::Working,
        contact_number: "+91 98765 43216",
        images: &[
            "https://images.unsplash.com/photo-1600585154340-be6161a56a0c?w=800",
        ],
    },
    CatalogEntry {
        id: "mock-8",
        title: "Affordable 1 BHK Student Housing",
        location: "Powai, Mumbai",
        price: 12000,
        property_type: PropertyType::OneBhk,
        tenant_preference: TenantPreference::Any,
        contact_number: "+91 98765 43217",
        images: &[
            "https://images.unsplash.com/photo-1600566753190-17f0baa2a6c3?w=800",
            "https://images.unsplash.com/photo-1600573472592-401b489a3cdc?w=800",
        ],
    },
    CatalogEntry {
        id: "mock-9",
        title: "Fully Furnished 1 Bed Near Metro",
        location: "Rajouri Garden, Delhi",
        price: 9500,
        property_type: PropertyType::OneBed,
        tenant_preference: TenantPreference::Working,
        contact_number: "+91 98765 43218",
        images: &[
            "https://images.unsplash.com/photo-1600047509807-ba8f99d2cdde?w=800",
        ],
    },
    CatalogEntry {
        id: "mock-10",
        title: "Spacious 3 BHK for Large Family",
        location: "Jubilee Hills, Hyderabad",
        price: 25000,
        property_type: PropertyType::ThreeBhk,
        tenant_preference: TenantPreference::Family,
        contact_number: "+91 98765 43219",
        images: &[
            "https://images.unsplash.com/photo-1600607687644-aac4c3eac7f4?w=800",
            "https://images.unsplash.com/photo-1600566752355-35792bedcfea?w=800",
        ],
    },
];

fn listed_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

static CATALOG: LazyLock<Vec<Room>> = LazyLock::new(|| {
    let listed_at = listed_at();
    ENTRIES
        .iter()
        .map(|entry| Room {
            id: entry.id.to_string(),
            owner_id: None,
            title: entry.title.to_string(),
            location: entry.location.to_string(),
            price: entry.price,
            property_type: entry.property_type,
            tenant_preference: entry.tenant_preference,
            contact_number: entry.contact_number.to_string(),
            images: entry.images.iter().map(|u| u.to_string()).collect(),
            is_active: true,
            created_at: listed_at,
            updated_at: listed_at,
        })
        .collect()
});

pub fn static_catalog() -> &'static [Room] {
    &CATALOG
}

pub fn find_catalog_room(room_id: &str) -> Option<&'static Room> {
    static_catalog().iter().find(|room| room.id == room_id)
}
