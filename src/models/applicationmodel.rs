use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct StudentApplication {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub preferred_location: String,
    pub budget: i32,
    pub move_in_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewApplication {
    pub user_id: Option<Uuid>,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub preferred_location: String,
    pub budget: i32,
    pub move_in_date: NaiveDate,
}
