use anyhow::Context;
use sqlx::PgPool;
use uuid::Uuid;

use super::dto::{CreateFoodRequest, UpdateFoodRequest};
use super::repo_types::Food;

const FOOD_COLUMNS: &str = "id, food_uuid, food_name, kcal_per_serving, carbs_per_serving, \
                            protein_per_serving, fat_per_serving, created_at, updated_at";

pub async fn list(db: &PgPool) -> anyhow::Result<Vec<Food>> {
    let rows = sqlx::query_as::<_, Food>(&format!(
        "SELECT {FOOD_COLUMNS} FROM foods WHERE deleted_at IS NULL ORDER BY food_name"
    ))
    .fetch_all(db)
    .await
    .context("list foods")?;
    Ok(rows)
}

pub async fn find_by_uuid(db: &PgPool, food_uuid: Uuid) -> anyhow::Result<Option<Food>> {
    let row = sqlx::query_as::<_, Food>(&format!(
        "SELECT {FOOD_COLUMNS} FROM foods WHERE food_uuid = $1 AND deleted_at IS NULL"
    ))
    .bind(food_uuid)
    .fetch_optional(db)
    .await
    .context("find food by uuid")?;
    Ok(row)
}

pub async fn create(db: &PgPool, food: &CreateFoodRequest) -> anyhow::Result<Food> {
    let row = sqlx::query_as::<_, Food>(&format!(
        r#"
        INSERT INTO foods (food_uuid, food_name, kcal_per_serving, carbs_per_serving,
                           protein_per_serving, fat_per_serving)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING {FOOD_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(&food.food_name)
    .bind(food.kcal_per_serving)
    .bind(food.carbs_per_serving)
    .bind(food.protein_per_serving)
    .bind(food.fat_per_serving)
    .fetch_one(db)
    .await
    .context("insert food")?;
    Ok(row)
}

/// Apply the present fields; returns `None` when no active food matches.
pub async fn update(
    db: &PgPool,
    food_uuid: Uuid,
    changes: &UpdateFoodRequest,
) -> anyhow::Result<Option<Food>> {
    let row = sqlx::query_as::<_, Food>(&format!(
        r#"
        UPDATE foods
           SET food_name = COALESCE($2, food_name),
               kcal_per_serving = COALESCE($3, kcal_per_serving),
               carbs_per_serving = COALESCE($4, carbs_per_serving),
               protein_per_serving = COALESCE($5, protein_per_serving),
               fat_per_serving = COALESCE($6, fat_per_serving),
               updated_at = now()
         WHERE food_uuid = $1 AND deleted_at IS NULL
        RETURNING {FOOD_COLUMNS}
        "#
    ))
    .bind(food_uuid)
    .bind(changes.food_name.as_deref())
    .bind(changes.kcal_per_serving)
    .bind(changes.carbs_per_serving)
    .bind(changes.protein_per_serving)
    .bind(changes.fat_per_serving)
    .fetch_optional(db)
    .await
    .context("update food")?;
    Ok(row)
}

/// Soft delete; returns whether a row was affected.
pub async fn soft_delete(db: &PgPool, food_uuid: Uuid) -> anyhow::Result<bool> {
    let res = sqlx::query(
        "UPDATE foods SET deleted_at = now() WHERE food_uuid = $1 AND deleted_at IS NULL",
    )
    .bind(food_uuid)
    .execute(db)
    .await
    .context("soft delete food")?;
    Ok(res.rows_affected() > 0)
}
