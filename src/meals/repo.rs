use anyhow::Context;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use super::repo_types::{Meal, MealFoodRow};

const MEAL_COLUMNS: &str =
    "id, meal_uuid, name, description, meal_plan_id, meal_order, created_at, updated_at";

pub async fn list(db: &PgPool) -> anyhow::Result<Vec<Meal>> {
    let rows = sqlx::query_as::<_, Meal>(&format!(
        "SELECT {MEAL_COLUMNS} FROM meals WHERE deleted_at IS NULL ORDER BY meal_order, name"
    ))
    .fetch_all(db)
    .await
    .context("list meals")?;
    Ok(rows)
}

/// Active meals of a plan in display order.
pub async fn list_by_plan(db: &PgPool, meal_plan_id: i64) -> anyhow::Result<Vec<Meal>> {
    let rows = sqlx::query_as::<_, Meal>(&format!(
        r#"
        SELECT {MEAL_COLUMNS}
          FROM meals
         WHERE meal_plan_id = $1 AND deleted_at IS NULL
         ORDER BY meal_order, name
        "#
    ))
    .bind(meal_plan_id)
    .fetch_all(db)
    .await
    .context("list meals by plan")?;
    Ok(rows)
}

pub async fn find_by_uuid(db: &PgPool, meal_uuid: Uuid) -> anyhow::Result<Option<Meal>> {
    let row = sqlx::query_as::<_, Meal>(&format!(
        "SELECT {MEAL_COLUMNS} FROM meals WHERE meal_uuid = $1 AND deleted_at IS NULL"
    ))
    .bind(meal_uuid)
    .fetch_optional(db)
    .await
    .context("find meal by uuid")?;
    Ok(row)
}

/// Foods of a meal with their reference values, ordered by food name.
/// Soft-deleted foods are left out.
pub async fn list_foods(db: &PgPool, meal_id: i64) -> anyhow::Result<Vec<MealFoodRow>> {
    let rows = sqlx::query_as::<_, MealFoodRow>(
        r#"
        SELECT f.food_uuid, f.food_name, f.kcal_per_serving, f.carbs_per_serving,
               f.protein_per_serving, f.fat_per_serving, mf.quantity
          FROM meal_foods mf
          JOIN foods f ON f.id = mf.food_id
         WHERE mf.meal_id = $1 AND f.deleted_at IS NULL
         ORDER BY f.food_name, mf.id
        "#,
    )
    .bind(meal_id)
    .fetch_all(db)
    .await
    .context("list meal foods")?;
    Ok(rows)
}

// ---- Transactional writes ----

pub async fn next_order_tx(
    tx: &mut Transaction<'_, Postgres>,
    meal_plan_id: i64,
) -> anyhow::Result<i32> {
    let (next,): (i32,) = sqlx::query_as(
        r#"
        SELECT COALESCE(MAX(meal_order), 0) + 1
          FROM meals
         WHERE meal_plan_id = $1 AND deleted_at IS NULL
        "#,
    )
    .bind(meal_plan_id)
    .fetch_one(&mut **tx)
    .await
    .context("next meal order")?;
    Ok(next)
}

pub async fn insert_meal_tx(
    tx: &mut Transaction<'_, Postgres>,
    name: &str,
    description: Option<&str>,
    meal_plan_id: i64,
    meal_order: i32,
) -> anyhow::Result<Meal> {
    let row = sqlx::query_as::<_, Meal>(&format!(
        r#"
        INSERT INTO meals (meal_uuid, name, description, meal_plan_id, meal_order)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING {MEAL_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(name)
    .bind(description)
    .bind(meal_plan_id)
    .bind(meal_order)
    .fetch_one(&mut **tx)
    .await
    .context("insert meal")?;
    Ok(row)
}

pub async fn update_meal_tx(
    tx: &mut Transaction<'_, Postgres>,
    meal_id: i64,
    name: Option<&str>,
    description: Option<&str>,
    meal_order: Option<i32>,
) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        UPDATE meals
           SET name = COALESCE($2, name),
               description = COALESCE($3, description),
               meal_order = COALESCE($4, meal_order),
               updated_at = now()
         WHERE id = $1 AND deleted_at IS NULL
        "#,
    )
    .bind(meal_id)
    .bind(name)
    .bind(description)
    .bind(meal_order)
    .execute(&mut **tx)
    .await
    .context("update meal")?;
    Ok(())
}

pub async fn insert_meal_food_tx(
    tx: &mut Transaction<'_, Postgres>,
    meal_id: i64,
    food_id: i64,
    quantity: f64,
) -> anyhow::Result<()> {
    sqlx::query("INSERT INTO meal_foods (meal_id, food_id, quantity) VALUES ($1, $2, $3)")
        .bind(meal_id)
        .bind(food_id)
        .bind(quantity)
        .execute(&mut **tx)
        .await
        .context("insert meal food")?;
    Ok(())
}

pub async fn clear_foods_tx(
    tx: &mut Transaction<'_, Postgres>,
    meal_id: i64,
) -> anyhow::Result<()> {
    sqlx::query("DELETE FROM meal_foods WHERE meal_id = $1")
        .bind(meal_id)
        .execute(&mut **tx)
        .await
        .context("clear meal foods")?;
    Ok(())
}

pub async fn soft_delete_tx(
    tx: &mut Transaction<'_, Postgres>,
    meal_id: i64,
) -> anyhow::Result<bool> {
    let res = sqlx::query(
        "UPDATE meals SET deleted_at = now() WHERE id = $1 AND deleted_at IS NULL",
    )
    .bind(meal_id)
    .execute(&mut **tx)
    .await
    .context("soft delete meal")?;
    Ok(res.rows_affected() > 0)
}
