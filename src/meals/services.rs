use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::foods::repo as foods_repo;
use crate::meal_plans::repo as plans_repo;
use crate::validation::FieldErrors;

use super::dto::{CreateMealRequest, FoodQuantity, MealResponse, UpdateMealRequest};
use super::repo;
use super::repo_types::Meal;

fn check_foods(errs: &mut FieldErrors, foods: &[FoodQuantity]) {
    for (i, f) in foods.iter().enumerate() {
        errs.non_negative(&format!("foods[{i}].quantity"), f.quantity);
    }
}

fn check_order(errs: &mut FieldErrors, order: Option<i32>) {
    if order.is_some_and(|o| o < 0) {
        errs.push("meal_order", "must be an integer >= 0");
    }
}

pub fn validate_create(mut req: CreateMealRequest) -> ApiResult<CreateMealRequest> {
    req.name = req.name.trim().to_string();

    let mut errs = FieldErrors::new();
    errs.non_empty("name", &req.name);
    check_order(&mut errs, req.meal_order);
    check_foods(&mut errs, &req.foods);
    errs.finish("Invalid meal data!")?;
    Ok(req)
}

pub fn validate_update(mut req: UpdateMealRequest) -> ApiResult<UpdateMealRequest> {
    if req.is_empty() {
        return Err(ApiError::bad_request("No fields to update"));
    }
    req.name = req.name.map(|n| n.trim().to_string());

    let mut errs = FieldErrors::new();
    if let Some(name) = &req.name {
        errs.non_empty("name", name);
    }
    check_order(&mut errs, req.meal_order);
    if let Some(foods) = &req.foods {
        check_foods(&mut errs, foods);
    }
    errs.finish("Invalid meal data!")?;
    Ok(req)
}

/// Maps each requested food to its row id. Fails with 404 on the first unknown food.
async fn resolve_food_ids(db: &PgPool, foods: &[FoodQuantity]) -> ApiResult<Vec<(i64, f64)>> {
    let mut out = Vec::with_capacity(foods.len());
    for item in foods {
        let food = foods_repo::find_by_uuid(db, item.food_uuid)
            .await?
            .ok_or_else(|| {
                warn!(food_uuid = %item.food_uuid, "meal references unknown food");
                ApiError::not_found(format!("Food with uuid {} not found", item.food_uuid))
            })?;
        out.push((food.id, item.quantity));
    }
    Ok(out)
}

/// Loads the meal's foods and builds the simple response.
pub async fn respond(db: &PgPool, meal: Meal) -> ApiResult<MealResponse> {
    let foods = repo::list_foods(db, meal.id).await?;
    Ok(MealResponse::new(meal, &foods))
}

pub async fn find(db: &PgPool, meal_uuid: Uuid) -> ApiResult<Meal> {
    repo::find_by_uuid(db, meal_uuid)
        .await?
        .ok_or_else(|| ApiError::not_found("Meal not found!"))
}

pub async fn create(db: &PgPool, req: CreateMealRequest) -> ApiResult<MealResponse> {
    let req = validate_create(req)?;
    let plan = plans_repo::find_by_uuid(db, req.meal_plan_uuid)
        .await?
        .ok_or_else(|| ApiError::not_found("Meal plan not found!"))?;
    let food_ids = resolve_food_ids(db, &req.foods).await?;

    let mut tx = db.begin().await?;
    let order = match req.meal_order {
        Some(o) => o,
        None => repo::next_order_tx(&mut tx, plan.id).await?,
    };
    let meal =
        repo::insert_meal_tx(&mut tx, &req.name, req.description.as_deref(), plan.id, order)
            .await?;
    for (food_id, quantity) in food_ids {
        repo::insert_meal_food_tx(&mut tx, meal.id, food_id, quantity).await?;
    }
    tx.commit().await?;

    info!(meal_uuid = %meal.meal_uuid, meal_plan_uuid = %plan.meal_plan_uuid, "meal created");
    respond(db, meal).await
}

pub async fn update(
    db: &PgPool,
    meal_uuid: Uuid,
    req: UpdateMealRequest,
) -> ApiResult<MealResponse> {
    let req = validate_update(req)?;
    let meal = find(db, meal_uuid).await?;
    let food_ids = match &req.foods {
        Some(foods) => Some(resolve_food_ids(db, foods).await?),
        None => None,
    };

    let mut tx = db.begin().await?;
    repo::update_meal_tx(
        &mut tx,
        meal.id,
        req.name.as_deref(),
        req.description.as_deref(),
        req.meal_order,
    )
    .await?;
    if let Some(food_ids) = food_ids {
        repo::clear_foods_tx(&mut tx, meal.id).await?;
        for (food_id, quantity) in food_ids {
            repo::insert_meal_food_tx(&mut tx, meal.id, food_id, quantity).await?;
        }
    }
    tx.commit().await?;

    info!(%meal_uuid, "meal updated");
    let meal = find(db, meal_uuid).await?;
    respond(db, meal).await
}

pub async fn delete(db: &PgPool, meal_uuid: Uuid) -> ApiResult<()> {
    let meal = find(db, meal_uuid).await?;
    let mut tx = db.begin().await?;
    repo::clear_foods_tx(&mut tx, meal.id).await?;
    if !repo::soft_delete_tx(&mut tx, meal.id).await? {
        return Err(ApiError::not_found("Meal not found!"));
    }
    tx.commit().await?;
    info!(%meal_uuid, "meal deleted");
    Ok(())
}
