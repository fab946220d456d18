use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Nutritional reference food, values per 100 g.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Food {
    pub id: i64,
    pub food_uuid: Uuid,
    pub food_name: String,
    pub kcal_per_serving: f64,
    pub carbs_per_serving: f64,
    pub protein_per_serving: f64,
    pub fat_per_serving: f64,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}
