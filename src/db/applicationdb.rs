use async_trait::async_trait;

use super::DBClient;
use crate::models::applicationmodel::{NewApplication, StudentApplication};

#[async_trait]
pub trait ApplicationExt {
    async fn save_application(
        &self,
        application: NewApplication,
    ) -> Result<StudentApplication, sqlx::Error>;
}

#[async_trait]
impl ApplicationExt for DBClient {
    async fn save_application(
        &self,
        application: NewApplication,
    ) -> Result<StudentApplication, sqlx::Error> {
        sqlx::query_as::<_, StudentApplication>(
            r#"
            INSERT INTO student_applications (
                user_id, name, phone, email, preferred_location, budget, move_in_date
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, user_id, name, phone, email, preferred_location,
                budget, move_in_date, created_at
            "#,
        )
        .bind(application.user_id)
        .bind(application.name)
        .bind(application.phone)
        .bind(application.email)
        .bind(application.preferred_location)
        .bind(application.budget)
        .bind(application.move_in_date)
        .fetch_one(&self.pool)
        .await
    }
}
