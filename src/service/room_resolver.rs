//! Decides which rooms a student sees for a filter: live results first, padded
//! with matching static catalog entries while the live set is below the
//! display threshold.

use std::collections::HashSet;

use crate::{
    db::roomdb::RoomExt,
    models::roommodel::Room,
    service::{error::ServiceError, room_filters::RoomFilters},
};

pub const MIN_ROOMS_TO_SHOW: usize = 12;

/// Pads `live` with catalog rooms that match `filters` and are not already
/// present, stopping at `min_rooms`. A live set at or above the threshold is
/// returned untouched.
pub fn merge_with_catalog(
    live: Vec<Room>,
    filters: &RoomFilters,
    catalog: &[Room],
    min_rooms: usize,
) -> Vec<Room> {
    if live.len() >= min_rooms {
        return live;
    }

    let needed = min_rooms - live.len();
    let live_ids: HashSet<&str> = live.iter().map(|r| r.id.as_str()).collect();

    let fallback: Vec<Room> = catalog
        .iter()
        .filter(|room| filters.matches(room))
        .filter(|room| !live_ids.contains(room.id.as_str()))
        .take(needed)
        .cloned()
        .collect();

    let mut merged = live;
    merged.extend(fallback);
    merged
}

/// One resolution: a single live query, then the catalog merge. A failed query
/// is returned as-is and never replaced by catalog data.
pub async fn resolve_rooms<S>(
    store: &S,
    filters: &RoomFilters,
    catalog: &[Room],
    min_rooms: usize,
) -> Result<Vec<Room>, ServiceError>
where
    S: RoomExt + Sync + ?Sized,
{
    let live = store.get_active_rooms(filters).await.map_err(|e| {
        tracing::error!(error = %e, ?filters, "live room query failed");
        ServiceError::Database(e)
    })?;

    let live_count = live.len();
    let rooms = merge_with_catalog(live, filters, catalog, min_rooms);

    tracing::debug!(
        live = live_count,
        fallback = rooms.len() - live_count,
        "resolved rooms"
    );

    Ok(rooms)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::{Duration, TimeZone, Utc};
    use uuid::Uuid;

    use super::*;
    use crate::{
        models::roommodel::{NewRoom, PropertyType, TenantPreference},
        service::{catalog::static_catalog, room_filters::PriceRange},
    };

    fn room(id: &str, location: &str, price: i32, minutes_ago: i64) -> Room {
        let created =
            Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap() - Duration::minutes(minutes_ago);
        Room {
            id: id.to_string(),
            owner_id: Some(Uuid::nil()),
            title: format!("Room {id}"),
            location: location.to_string(),
            price,
            property_type: PropertyType::OneBhk,
            tenant_preference: TenantPreference::Any,
            contact_number: "+91 99999 00000".to_string(),
            images: vec![],
            is_active: true,
            created_at: created,
            updated_at: created,
        }
    }

    fn live_rooms(n: usize, location: &str) -> Vec<Room> {
        (0..n)
            .map(|i| room(&format!("live-{i}"), location, 12_000, i as i64))
            .collect()
    }

    fn ids(rooms: &[Room]) -> Vec<&str> {
        rooms.iter().map(|r| r.id.as_str()).collect()
    }

    struct FakeRooms {
        live: Vec<Room>,
        fail: bool,
        seen: Mutex<Vec<RoomFilters>>,
    }

    impl FakeRooms {
        fn returning(live: Vec<Room>) -> Self {
            FakeRooms { live, fail: false, seen: Mutex::new(vec![]) }
        }

        fn failing() -> Self {
            FakeRooms { live: vec![], fail: true, seen: Mutex::new(vec![]) }
        }
    }

    #[async_trait]
    impl RoomExt for FakeRooms {
        async fn get_active_rooms(&self, filters: &RoomFilters) -> Result<Vec<Room>, sqlx::Error> {
            self.seen.lock().unwrap().push(filters.clone());
            if self.fail {
                return Err(sqlx::Error::PoolTimedOut);
            }
            Ok(self.live.clone())
        }

        async fn get_owner_rooms(&self, _owner_id: Uuid) -> Result<Vec<Room>, sqlx::Error> {
            unimplemented!()
        }

        async fn get_room_by_id(&self, _room_id: Uuid) -> Result<Option<Room>, sqlx::Error> {
            unimplemented!()
        }

        async fn save_room(&self, _room: NewRoom) -> Result<Room, sqlx::Error> {
            unimplemented!()
        }

        async fn delete_room(&self, _room_id: Uuid, _owner_id: Uuid) -> Result<u64, sqlx::Error> {
            unimplemented!()
        }
    }

    #[test]
    fn full_live_set_is_returned_unmodified() {
        let live = live_rooms(15, "Pune");
        let merged = merge_with_catalog(live.clone(), &RoomFilters::default(), static_catalog(), 12);
        assert_eq!(merged, live);
    }

    #[test]
    fn exactly_threshold_skips_fallback() {
        let live = live_rooms(12, "Pune");
        let merged = merge_with_catalog(live.clone(), &RoomFilters::default(), static_catalog(), 12);
        assert_eq!(merged.len(), 12);
        assert!(merged.iter().all(|r| r.id.starts_with("live-")));
    }

    #[test]
    fn sparse_location_search_is_padded_with_matching_catalog_rooms() {
        let filters = RoomFilters {
            location: Some("Bangalore".to_string()),
            ..Default::default()
        };
        let catalog = vec![
            room("cat-1", "Koramangala, Bangalore", 15_000, 0),
            room("cat-2", "Powai, Mumbai", 12_000, 0),
            room("cat-3", "Whitefield, Bangalore", 22_000, 0),
            room("cat-4", "HSR Layout, bangalore", 9_000, 0),
            room("cat-5", "Indiranagar, BANGALORE", 18_000, 0),
        ];
        let live = live_rooms(3, "Jayanagar, Bangalore");

        let merged = merge_with_catalog(live, &filters, &catalog, 12);

        assert_eq!(
            ids(&merged),
            vec!["live-0", "live-1", "live-2", "cat-1", "cat-3", "cat-4", "cat-5"]
        );
    }

    #[test]
    fn fallback_stops_at_threshold_in_catalog_order() {
        let live = live_rooms(9, "Anywhere");
        let merged = merge_with_catalog(live, &RoomFilters::default(), static_catalog(), 12);

        assert_eq!(merged.len(), 12);
        assert_eq!(&ids(&merged)[9..], &["mock-1", "mock-2", "mock-3"]);
    }

    #[test]
    fn catalog_rooms_already_live_are_not_repeated() {
        let mut live = live_rooms(1, "Delhi");
        live.push(static_catalog()[0].clone());

        let merged = merge_with_catalog(live, &RoomFilters::default(), static_catalog(), 12);

        // two live rooms plus the nine remaining catalog entries
        assert_eq!(merged.len(), 11);
        assert_eq!(merged.iter().filter(|r| r.id == "mock-1").count(), 1);
        assert_eq!(&ids(&merged)[..3], &["live-0", "mock-1", "mock-2"]);
    }

    #[test]
    fn fallback_respects_every_filter_dimension() {
        let filters = RoomFilters {
            location: None,
            price_range: Some(PriceRange { min: 5_000, max: 10_000 }),
            property_type: Some(PropertyType::OneBed),
            tenant_preference: None,
        };

        let merged = merge_with_catalog(vec![], &filters, static_catalog(), 12);

        assert_eq!(ids(&merged), vec!["mock-3", "mock-4", "mock-9"]);
    }

    #[test]
    fn no_matches_anywhere_yields_empty_list() {
        let filters = RoomFilters {
            location: Some("Chennai".to_string()),
            ..Default::default()
        };
        assert!(merge_with_catalog(vec![], &filters, static_catalog(), 12).is_empty());
    }

    #[tokio::test]
    async fn unfiltered_search_with_fifteen_live_rooms_never_uses_catalog() {
        let store = FakeRooms::returning(live_rooms(15, "Hyderabad"));

        let rooms = resolve_rooms(&store, &RoomFilters::default(), static_catalog(), 12)
            .await
            .unwrap();

        assert_eq!(rooms.len(), 15);
        assert!(rooms.iter().all(|r| r.id.starts_with("live-")));
        assert!(rooms.windows(2).all(|w| w[0].created_at >= w[1].created_at));
    }

    #[tokio::test]
    async fn filters_reach_the_live_query() {
        let store = FakeRooms::returning(vec![]);
        let filters = RoomFilters {
            tenant_preference: Some(TenantPreference::Girls),
            ..Default::default()
        };

        let rooms = resolve_rooms(&store, &filters, static_catalog(), 12).await.unwrap();

        assert_eq!(store.seen.lock().unwrap().as_slice(), &[filters]);
        assert_eq!(ids(&rooms), vec!["mock-4"]);
    }

    #[tokio::test]
    async fn query_failure_is_not_papered_over() {
        let store = FakeRooms::failing();

        let result = resolve_rooms(&store, &RoomFilters::default(), static_catalog(), 12).await;

        assert!(matches!(result, Err(ServiceError::Database(sqlx::Error::PoolTimedOut))));
    }
}
