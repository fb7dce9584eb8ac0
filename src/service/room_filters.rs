//! Turns the raw selector values of the listing page into a [`RoomFilters`]
//! descriptor. Missing, empty and `"all"` values all mean "no constraint".

use serde::Serialize;
use thiserror::Error;

use crate::{
    dtos::roomdtos::RoomFilterQuery,
    models::roommodel::{PropertyType, Room, TenantPreference},
};

pub const ALL_SENTINEL: &str = "all";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("Unknown price range '{0}'")]
    UnknownPriceRange(String),

    #[error("Unknown property type '{0}'")]
    UnknownPropertyType(String),

    #[error("Unknown tenant preference '{0}'")]
    UnknownTenantPreference(String),
}

/// Inclusive bounds on the monthly rent, in whole rupees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PriceRange {
    pub min: i32,
    pub max: i32,
}

impl PriceRange {
    pub fn contains(&self, price: i32) -> bool {
        price >= self.min && price <= self.max
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceBucket {
    All,
    From5kTo10k,
    From10kTo15k,
    From15kTo20k,
    Above20k,
}

impl PriceBucket {
    pub fn from_token(token: &str) -> Option<PriceBucket> {
        match token {
            "" | ALL_SENTINEL => Some(PriceBucket::All),
            "5000-10000" => Some(PriceBucket::From5kTo10k),
            "10000-15000" => Some(PriceBucket::From10kTo15k),
            "15000-20000" => Some(PriceBucket::From15kTo20k),
            "20000-100000" | "20000+" => Some(PriceBucket::Above20k),
            _ => None,
        }
    }

    pub fn range(&self) -> Option<PriceRange> {
        let (min, max) = match self {
            PriceBucket::All => return None,
            PriceBucket::From5kTo10k => (5_000, 10_000),
            PriceBucket::From10kTo15k => (10_000, 15_000),
            PriceBucket::From15kTo20k => (15_000, 20_000),
            PriceBucket::Above20k => (20_000, 100_000),
        };
        Some(PriceRange { min, max })
    }
}

/// Normalized search constraints. `None` on a field means that dimension is
/// unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct RoomFilters {
    pub location: Option<String>,
    pub price_range: Option<PriceRange>,
    pub property_type: Option<PropertyType>,
    pub tenant_preference: Option<TenantPreference>,
}

impl RoomFilters {
    /// Local evaluation of the same predicates the live query applies.
    pub fn matches(&self, room: &Room) -> bool {
        if let Some(location) = &self.location {
            if !room
                .location
                .to_lowercase()
                .contains(&location.to_lowercase())
            {
                return false;
            }
        }

        if let Some(range) = &self.price_range {
            if !range.contains(room.price) {
                return false;
            }
        }

        if let Some(property_type) = self.property_type {
            if room.property_type != property_type {
                return false;
            }
        }

        if let Some(tenant_preference) = self.tenant_preference {
            if room.tenant_preference != tenant_preference {
                return false;
            }
        }

        true
    }

    /// ILIKE pattern for the location term, with LIKE metacharacters escaped so
    /// the database and [`RoomFilters::matches`] agree on what a match is.
    pub fn location_pattern(&self) -> Option<String> {
        self.location.as_ref().map(|term| {
            let mut escaped = String::with_capacity(term.len() + 2);
            escaped.push('%');
            for c in term.chars() {
                if matches!(c, '%' | '_' | '\\') {
                    escaped.push('\\');
                }
                escaped.push(c);
            }
            escaped.push('%');
            escaped
        })
    }
}

fn selection(value: Option<&str>) -> Option<&str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && *v != ALL_SENTINEL)
}

pub fn compile_filters(query: &RoomFilterQuery) -> Result<RoomFilters, FilterError> {
    let location = query
        .location
        .as_deref()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string);

    let price_range = match query.price_range.as_deref().map(str::trim) {
        None => None,
        Some(token) => PriceBucket::from_token(token)
            .ok_or_else(|| FilterError::UnknownPriceRange(token.to_string()))?
            .range(),
    };

    let property_type = selection(query.property_type.as_deref())
        .map(|v| {
            v.parse::<PropertyType>()
                .map_err(|_| FilterError::UnknownPropertyType(v.to_string()))
        })
        .transpose()?;

    let tenant_preference = selection(query.tenant_preference.as_deref())
        .map(|v| {
            v.parse::<TenantPreference>()
                .map_err(|_| FilterError::UnknownTenantPreference(v.to_string()))
        })
        .transpose()?;

    Ok(RoomFilters {
        location,
        price_range,
        property_type,
        tenant_preference,
    })
}
