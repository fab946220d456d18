use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    auth::AuthUser,
    error::{ApiError, ApiResult},
    response::ApiResponse,
    state::AppState,
};

use super::dto::{
    CreateMealPlanRequest, MealPlanDetailResponse, MealPlanResponse, UpdateMealPlanRequest,
};
use super::{repo, services};

pub fn meal_plan_routes() -> Router<AppState> {
    Router::new()
        .route("/meal-plans", get(list_meal_plans).post(create_meal_plan))
        .route(
            "/meal-plans/:meal_plan_uuid",
            get(get_meal_plan).put(update_meal_plan).delete(delete_meal_plan),
        )
        .route("/meal-plans/:meal_plan_uuid/details", get(get_meal_plan_details))
}

#[instrument(skip(state))]
pub async fn list_meal_plans(
    State(state): State<AppState>,
    _user: AuthUser,
) -> ApiResult<Json<ApiResponse<Vec<MealPlanResponse>>>> {
    let plans = repo::list_summaries(&state.db).await?;
    Ok(ApiResponse::ok(plans.into_iter().map(Into::into).collect()))
}

#[instrument(skip(state))]
pub async fn get_meal_plan(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(meal_plan_uuid): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<MealPlanResponse>>> {
    let plan = services::summary(&state.db, meal_plan_uuid).await?;
    Ok(ApiResponse::ok(plan.into()))
}

#[instrument(skip(state))]
pub async fn get_meal_plan_details(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(meal_plan_uuid): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<MealPlanDetailResponse>>> {
    let details = services::details(state.plan_trees.as_ref(), meal_plan_uuid).await?;
    Ok(ApiResponse::ok(details))
}

#[instrument(skip(state, payload))]
pub async fn create_meal_plan(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(payload): Json<CreateMealPlanRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<MealPlanResponse>>)> {
    let plan = services::create(&state.db, payload).await?;
    Ok(ApiResponse::created(plan.into()))
}

#[instrument(skip(state, payload))]
pub async fn update_meal_plan(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(meal_plan_uuid): Path<Uuid>,
    Json(payload): Json<UpdateMealPlanRequest>,
) -> ApiResult<Json<ApiResponse<MealPlanResponse>>> {
    let plan = services::update(&state.db, meal_plan_uuid, payload).await?;
    Ok(ApiResponse::ok(plan.into()))
}

#[instrument(skip(state))]
pub async fn delete_meal_plan(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(meal_plan_uuid): Path<Uuid>,
) -> ApiResult<StatusCode> {
    if !repo::soft_delete(&state.db, meal_plan_uuid).await? {
        return Err(ApiError::not_found("Meal plan not found!"));
    }
    info!(%meal_plan_uuid, "meal plan deleted");
    Ok(StatusCode::NO_CONTENT)
}
