use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::meals::repo as meals_repo;

use super::dto::UpdateMealPlanRequest;
use super::repo_types::{MealPlan, MealPlanSummary, MealPlanTree};

const PLAN_COLUMNS: &str =
    "id, meal_plan_uuid, name, description, patient_id, created_at, updated_at";

const SUMMARY_SELECT: &str = r#"
    SELECT mp.id, mp.meal_plan_uuid, mp.name, mp.description, p.patient_uuid,
           (SELECT COUNT(*) FROM meals m
             WHERE m.meal_plan_id = mp.id AND m.deleted_at IS NULL) AS meals_count
      FROM meal_plans mp
      JOIN patients p ON p.id = mp.patient_id
     WHERE mp.deleted_at IS NULL
"#;

pub async fn find_by_uuid(db: &PgPool, meal_plan_uuid: Uuid) -> anyhow::Result<Option<MealPlan>> {
    let row = sqlx::query_as::<_, MealPlan>(&format!(
        "SELECT {PLAN_COLUMNS} FROM meal_plans WHERE meal_plan_uuid = $1 AND deleted_at IS NULL"
    ))
    .bind(meal_plan_uuid)
    .fetch_optional(db)
    .await
    .context("find meal plan by uuid")?;
    Ok(row)
}

pub async fn list_summaries(db: &PgPool) -> anyhow::Result<Vec<MealPlanSummary>> {
    let rows = sqlx::query_as::<_, MealPlanSummary>(&format!("{SUMMARY_SELECT} ORDER BY mp.id"))
        .fetch_all(db)
        .await
        .context("list meal plans")?;
    Ok(rows)
}

pub async fn find_summary(
    db: &PgPool,
    meal_plan_uuid: Uuid,
) -> anyhow::Result<Option<MealPlanSummary>> {
    let row = sqlx::query_as::<_, MealPlanSummary>(&format!(
        "{SUMMARY_SELECT} AND mp.meal_plan_uuid = $1"
    ))
    .bind(meal_plan_uuid)
    .fetch_optional(db)
    .await
    .context("find meal plan summary")?;
    Ok(row)
}

pub async fn create(
    db: &PgPool,
    name: &str,
    description: Option<&str>,
    patient_id: i64,
) -> anyhow::Result<MealPlan> {
    let row = sqlx::query_as::<_, MealPlan>(&format!(
        r#"
        INSERT INTO meal_plans (meal_plan_uuid, name, description, patient_id)
        VALUES ($1, $2, $3, $4)
        RETURNING {PLAN_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(name)
    .bind(description)
    .bind(patient_id)
    .fetch_one(db)
    .await
    .context("insert meal plan")?;
    Ok(row)
}

pub async fn update(
    db: &PgPool,
    meal_plan_uuid: Uuid,
    changes: &UpdateMealPlanRequest,
) -> anyhow::Result<bool> {
    let res = sqlx::query(
        r#"
        UPDATE meal_plans
           SET name = COALESCE($2, name),
               description = COALESCE($3, description),
               updated_at = now()
         WHERE meal_plan_uuid = $1 AND deleted_at IS NULL
        "#,
    )
    .bind(meal_plan_uuid)
    .bind(changes.name.as_deref())
    .bind(changes.description.as_deref())
    .execute(db)
    .await
    .context("update meal plan")?;
    Ok(res.rows_affected() > 0)
}

/// Soft-deletes the plan together with its active meals.
pub async fn soft_delete(db: &PgPool, meal_plan_uuid: Uuid) -> anyhow::Result<bool> {
    let mut tx = db.begin().await.context("begin tx")?;
    let deleted: Option<(i64,)> = sqlx::query_as(
        r#"
        UPDATE meal_plans SET deleted_at = now()
         WHERE meal_plan_uuid = $1 AND deleted_at IS NULL
        RETURNING id
        "#,
    )
    .bind(meal_plan_uuid)
    .fetch_optional(&mut *tx)
    .await
    .context("soft delete meal plan")?;

    let Some((plan_id,)) = deleted else {
        return Ok(false);
    };
    sqlx::query(
        "UPDATE meals SET deleted_at = now() WHERE meal_plan_id = $1 AND deleted_at IS NULL",
    )
    .bind(plan_id)
    .execute(&mut *tx)
    .await
    .context("soft delete plan meals")?;
    tx.commit().await.context("commit tx")?;
    Ok(true)
}

/// Where the details endpoint gets its materialized plan from.
#[async_trait]
pub trait MealPlanTreeSource: Send + Sync {
    async fn fetch_tree(&self, meal_plan_uuid: Uuid) -> anyhow::Result<Option<MealPlanTree>>;
}

#[derive(Clone)]
pub struct PgMealPlanTrees {
    db: PgPool,
}

impl PgMealPlanTrees {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MealPlanTreeSource for PgMealPlanTrees {
    async fn fetch_tree(&self, meal_plan_uuid: Uuid) -> anyhow::Result<Option<MealPlanTree>> {
        let Some(plan) = find_summary(&self.db, meal_plan_uuid).await? else {
            return Ok(None);
        };
        let meals = meals_repo::list_by_plan(&self.db, plan.id).await?;
        let mut tree = Vec::with_capacity(meals.len());
        for meal in meals {
            let foods = meals_repo::list_foods(&self.db, meal.id).await?;
            tree.push((meal, foods));
        }
        Ok(Some(MealPlanTree { plan, meals: tree }))
    }
}
