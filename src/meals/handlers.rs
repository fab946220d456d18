use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use crate::{
    auth::AuthUser,
    error::{ApiError, ApiResult},
    meal_plans::repo as plans_repo,
    response::ApiResponse,
    state::AppState,
};

use super::dto::{CreateMealRequest, MealListItem, MealResponse, UpdateMealRequest};
use super::{repo, services};

pub fn meal_routes() -> Router<AppState> {
    Router::new()
        .route("/meals", get(list_meals).post(create_meal))
        .route(
            "/meals/:meal_uuid",
            get(get_meal).put(update_meal).delete(delete_meal),
        )
        .route("/meal-plans/:meal_plan_uuid/meals", get(list_plan_meals))
}

#[instrument(skip(state))]
pub async fn list_meals(
    State(state): State<AppState>,
    _user: AuthUser,
) -> ApiResult<Json<ApiResponse<Vec<MealListItem>>>> {
    let meals = repo::list(&state.db).await?;
    Ok(ApiResponse::ok(meals.into_iter().map(Into::into).collect()))
}

#[instrument(skip(state))]
pub async fn list_plan_meals(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(meal_plan_uuid): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<Vec<MealListItem>>>> {
    let plan = plans_repo::find_by_uuid(&state.db, meal_plan_uuid)
        .await?
        .ok_or_else(|| ApiError::not_found("Meal plan not found!"))?;
    let meals = repo::list_by_plan(&state.db, plan.id).await?;
    Ok(ApiResponse::ok(meals.into_iter().map(Into::into).collect()))
}

#[instrument(skip(state))]
pub async fn get_meal(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(meal_uuid): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<MealResponse>>> {
    let meal = services::find(&state.db, meal_uuid).await?;
    Ok(ApiResponse::ok(services::respond(&state.db, meal).await?))
}

#[instrument(skip(state, payload))]
pub async fn create_meal(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(payload): Json<CreateMealRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<MealResponse>>)> {
    let meal = services::create(&state.db, payload).await?;
    Ok(ApiResponse::created(meal))
}

#[instrument(skip(state, payload))]
pub async fn update_meal(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(meal_uuid): Path<Uuid>,
    Json(payload): Json<UpdateMealRequest>,
) -> ApiResult<Json<ApiResponse<MealResponse>>> {
    let meal = services::update(&state.db, meal_uuid, payload).await?;
    Ok(ApiResponse::ok(meal))
}

#[instrument(skip(state))]
pub async fn delete_meal(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(meal_uuid): Path<Uuid>,
) -> ApiResult<StatusCode> {
    services::delete(&state.db, meal_uuid).await?;
    Ok(StatusCode::NO_CONTENT)
}
