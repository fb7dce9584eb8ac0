use async_trait::async_trait;
use uuid::Uuid;

use super::DBClient;
use crate::{
    models::roommodel::{NewRoom, Room},
    service::room_filters::RoomFilters,
};

const ROOM_COLUMNS: &str = r#"
    id::text AS id, owner_id, title, location, price,
    property_type, tenant_preference, contact_number,
    COALESCE(images, '{}') AS images, is_active, created_at, updated_at
"#;

const DELETE_OWNED_ROOM_SQL: &str = "DELETE FROM rooms WHERE id = $1 AND owner_id = $2";

/// Binds: `$1` ILIKE pattern, `$2`/`$3` inclusive price bounds, `$4` property
/// type, `$5` tenant preference. A NULL bind disables its predicate.
fn active_rooms_sql() -> String {
    format!(
        r#"
        SELECT {ROOM_COLUMNS}
        FROM rooms
        WHERE is_active = TRUE
        AND ($1::text IS NULL OR location ILIKE $1)
        AND ($2::int IS NULL OR price >= $2)
        AND ($3::int IS NULL OR price <= $3)
        AND ($4::text IS NULL OR property_type = $4::property_type)
        AND ($5::text IS NULL OR tenant_preference = $5::tenant_preference)
        ORDER BY created_at DESC
        "#
    )
}

#[async_trait]
pub trait RoomExt {
    /// Active rooms matching every present filter, newest first.
    async fn get_active_rooms(&self, filters: &RoomFilters) -> Result<Vec<Room>, sqlx::Error>;

    async fn get_owner_rooms(&self, owner_id: Uuid) -> Result<Vec<Room>, sqlx::Error>;

    async fn get_room_by_id(&self, room_id: Uuid) -> Result<Option<Room>, sqlx::Error>;

    async fn save_room(&self, room: NewRoom) -> Result<Room, sqlx::Error>;

    /// Returns the number of rows removed; zero when the room does not exist
    /// or belongs to someone else.
    async fn delete_room(&self, room_id: Uuid, owner_id: Uuid) -> Result<u64, sqlx::Error>;
}

#[async_trait]
impl RoomExt for DBClient {
    async fn get_active_rooms(&self, filters: &RoomFilters) -> Result<Vec<Room>, sqlx::Error> {
        let sql = active_rooms_sql();

        let rooms = sqlx::query_as::<_, Room>(&sql)
            .bind(filters.location_pattern())
            .bind(filters.price_range.map(|r| r.min))
            .bind(filters.price_range.map(|r| r.max))
            .bind(filters.property_type.map(|t| t.to_str()))
            .bind(filters.tenant_preference.map(|t| t.to_str()))
            .fetch_all(&self.pool)
            .await?;

        Ok(rooms)
    }

    async fn get_owner_rooms(&self, owner_id: Uuid) -> Result<Vec<Room>, sqlx::Error> {
        let sql = format!(
            r#"
            SELECT {ROOM_COLUMNS}
            FROM rooms
            WHERE owner_id = $1
            ORDER BY created_at DESC
            "#
        );

        sqlx::query_as::<_, Room>(&sql)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await
    }

    async fn get_room_by_id(&self, room_id: Uuid) -> Result<Option<Room>, sqlx::Error> {
        let sql = format!("SELECT {ROOM_COLUMNS} FROM rooms WHERE id = $1");

        sqlx::query_as::<_, Room>(&sql)
            .bind(room_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn save_room(&self, room: NewRoom) -> Result<Room, sqlx::Error> {
        let sql = format!(
            r#"
            INSERT INTO rooms (
                owner_id, title, location, price, property_type,
                tenant_preference, contact_number, images, is_active
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, TRUE)
            RETURNING {ROOM_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Room>(&sql)
            .bind(room.owner_id)
            .bind(room.title)
            .bind(room.location)
            .bind(room.price)
            .bind(room.property_type)
            .bind(room.tenant_preference)
            .bind(room.contact_number)
            .bind(room.images)
            .fetch_one(&self.pool)
            .await
    }

    async fn delete_room(&self, room_id: Uuid, owner_id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(DELETE_OWNED_ROOM_SQL)
            .bind(room_id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        dtos::roomdtos::RoomFilterQuery,
        service::{catalog::static_catalog, room_filters::compile_filters},
    };

    /// Postgres ILIKE with the default `\` escape, enough to check patterns.
    fn ilike(text: &str, pattern: &str) -> bool {
        fn go(t: &[char], p: &[char]) -> bool {
            match p.split_first() {
                None => t.is_empty(),
                Some(('%', rest)) => (0..=t.len()).any(|i| go(&t[i..], rest)),
                Some(('_', rest)) => !t.is_empty() && go(&t[1..], rest),
                Some(('\\', rest)) => match rest.split_first() {
                    Some((c, rest)) => t.first() == Some(c) && go(&t[1..], rest),
                    None => false,
                },
                Some((c, rest)) => t.first() == Some(c) && go(&t[1..], rest),
            }
        }
        let t: Vec<char> = text.to_lowercase().chars().collect();
        let p: Vec<char> = pattern.to_lowercase().chars().collect();
        go(&t, &p)
    }

    #[test]
    fn live_query_only_reads_active_rooms() {
        let sql = active_rooms_sql();
        assert!(sql.contains("WHERE is_active = TRUE"));
        assert!(sql.contains("location ILIKE $1"));
        assert!(sql.contains("ORDER BY created_at DESC"));
    }

    #[test]
    fn delete_is_scoped_to_the_owner() {
        assert!(DELETE_OWNED_ROOM_SQL.contains("id = $1"));
        assert!(DELETE_OWNED_ROOM_SQL.contains("owner_id = $2"));
    }

    #[test]
    fn location_pattern_agrees_with_local_matching() {
        for term in ["bangalore", "BANG", "kora", "pune", "100%", "a_b", "\\", "_"] {
            let filters = compile_filters(&RoomFilterQuery {
                location: Some(term.to_string()),
                ..Default::default()
            })
            .unwrap();
            let pattern = filters.location_pattern().unwrap();

            for room in static_catalog() {
                assert_eq!(
                    ilike(&room.location, &pattern),
                    filters.matches(room),
                    "term {term:?} on {:?}",
                    room.location
                );
            }
        }
    }
}
