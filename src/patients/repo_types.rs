use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Patient {
    pub id: i64,
    pub patient_uuid: Uuid,
    pub name: String,
    pub email: String,
    pub weight: f64, // kg
    pub height: f64, // cm
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}
