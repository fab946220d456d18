use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::patients::repo as patients_repo;
use crate::validation::FieldErrors;

use super::dto::{CreateMealPlanRequest, MealPlanDetailResponse, UpdateMealPlanRequest};
use super::repo::{self, MealPlanTreeSource};
use super::repo_types::MealPlanSummary;

pub fn validate_create(mut req: CreateMealPlanRequest) -> ApiResult<CreateMealPlanRequest> {
    req.name = req.name.trim().to_string();
    let mut errs = FieldErrors::new();
    errs.non_empty("name", &req.name);
    errs.finish("Invalid meal plan data!")?;
    Ok(req)
}

pub fn validate_update(mut req: UpdateMealPlanRequest) -> ApiResult<UpdateMealPlanRequest> {
    if req.is_empty() {
        return Err(ApiError::bad_request("No fields to update"));
    }
    req.name = req.name.map(|n| n.trim().to_string());
    let mut errs = FieldErrors::new();
    if let Some(name) = &req.name {
        errs.non_empty("name", name);
    }
    errs.finish("Invalid meal plan data!")?;
    Ok(req)
}

pub async fn summary(db: &PgPool, meal_plan_uuid: Uuid) -> ApiResult<MealPlanSummary> {
    repo::find_summary(db, meal_plan_uuid)
        .await?
        .ok_or_else(|| ApiError::not_found("Meal plan not found!"))
}

pub async fn create(db: &PgPool, req: CreateMealPlanRequest) -> ApiResult<MealPlanSummary> {
    let req = validate_create(req)?;
    let patient = patients_repo::find_by_uuid(db, req.patient_uuid)
        .await?
        .ok_or_else(|| ApiError::not_found("Patient not found!"))?;
    let plan = repo::create(db, &req.name, req.description.as_deref(), patient.id).await?;
    info!(
        meal_plan_uuid = %plan.meal_plan_uuid,
        patient_uuid = %patient.patient_uuid,
        "meal plan created"
    );
    summary(db, plan.meal_plan_uuid).await
}

pub async fn update(
    db: &PgPool,
    meal_plan_uuid: Uuid,
    req: UpdateMealPlanRequest,
) -> ApiResult<MealPlanSummary> {
    let req = validate_update(req)?;
    if !repo::update(db, meal_plan_uuid, &req).await? {
        return Err(ApiError::not_found("Meal plan not found!"));
    }
    info!(%meal_plan_uuid, "meal plan updated");
    summary(db, meal_plan_uuid).await
}

pub async fn details(
    trees: &dyn MealPlanTreeSource,
    meal_plan_uuid: Uuid,
) -> ApiResult<MealPlanDetailResponse> {
    let tree = trees
        .fetch_tree(meal_plan_uuid)
        .await?
        .ok_or_else(|| ApiError::not_found("Meal plan not found!"))?;
    Ok(tree.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_name_is_rejected() {
        let req = CreateMealPlanRequest {
            name: "   ".into(),
            description: None,
            patient_uuid: Uuid::new_v4(),
        };
        assert!(matches!(validate_create(req), Err(ApiError::Validation { .. })));
    }

    #[test]
    fn empty_update_is_bad_request() {
        assert!(matches!(
            validate_update(UpdateMealPlanRequest::default()),
            Err(ApiError::BadRequest(_))
        ));
    }

    #[test]
    fn description_only_update_passes() {
        let req = UpdateMealPlanRequest {
            name: None,
            description: Some("cutting phase".into()),
        };
        assert!(validate_update(req).is_ok());
    }
}
