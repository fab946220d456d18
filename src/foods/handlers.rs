use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::AuthUser,
    error::{ApiError, ApiResult},
    response::ApiResponse,
    state::AppState,
};

use super::dto::{CreateFoodRequest, FoodResponse, UpdateFoodRequest};
use super::{repo, services};

pub fn food_routes() -> Router<AppState> {
    Router::new()
        .route("/foods", get(list_foods).post(create_food))
        .route(
            "/foods/:food_uuid",
            get(get_food).put(update_food).delete(delete_food),
        )
}

#[instrument(skip(state))]
pub async fn list_foods(
    State(state): State<AppState>,
    _user: AuthUser,
) -> ApiResult<Json<ApiResponse<Vec<FoodResponse>>>> {
    let foods = repo::list(&state.db).await?;
    Ok(ApiResponse::ok(foods.into_iter().map(Into::into).collect()))
}

#[instrument(skip(state))]
pub async fn get_food(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(food_uuid): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<FoodResponse>>> {
    let food = repo::find_by_uuid(&state.db, food_uuid)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Food with uuid {food_uuid} not found")))?;
    Ok(ApiResponse::ok(food.into()))
}

#[instrument(skip(state, payload))]
pub async fn create_food(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(payload): Json<CreateFoodRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<FoodResponse>>)> {
    let payload = services::validate_create(payload)?;
    let food = repo::create(&state.db, &payload).await?;
    info!(food_uuid = %food.food_uuid, name = %food.food_name, "food created");
    Ok(ApiResponse::created(food.into()))
}

#[instrument(skip(state, payload))]
pub async fn update_food(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(food_uuid): Path<Uuid>,
    Json(payload): Json<UpdateFoodRequest>,
) -> ApiResult<Json<ApiResponse<FoodResponse>>> {
    let payload = services::validate_update(payload)?;
    let food = match repo::update(&state.db, food_uuid, &payload).await? {
        Some(f) => f,
        None => {
            warn!(%food_uuid, "update of unknown food");
            return Err(ApiError::not_found(format!("Food with uuid {food_uuid} not found")));
        }
    };
    info!(%food_uuid, "food updated");
    Ok(ApiResponse::ok(food.into()))
}

#[instrument(skip(state))]
pub async fn delete_food(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(food_uuid): Path<Uuid>,
) -> ApiResult<StatusCode> {
    if !repo::soft_delete(&state.db, food_uuid).await? {
        return Err(ApiError::not_found(format!("Food with uuid {food_uuid} not found")));
    }
    info!(%food_uuid, "food deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use crate::state::AppState;
    use crate::test_support::{authed, send};
    use axum::http::{Method, StatusCode};

    #[tokio::test]
    async fn foods_require_token() {
        let state = AppState::fake();
        let res = send(
            &state,
            axum::http::Request::get("/api/v1/foods")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(res.0, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn create_food_with_negative_kcal_is_unprocessable() {
        let state = AppState::fake();
        let body = serde_json::json!({
            "food_name": "Mystery",
            "kcal_per_serving": -5.0,
            "carbs_per_serving": 1.0,
            "protein_per_serving": 1.0,
            "fat_per_serving": 1.0
        });
        let req = authed(&state, Method::POST, "/api/v1/foods", Some(body));
        let (status, json) = send(&state, req).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["message"], "Invalid food data!");
        assert!(json["details"]["kcal_per_serving"].is_string());
    }

    #[tokio::test]
    async fn empty_food_update_is_bad_request() {
        let state = AppState::fake();
        let uri = format!("/api/v1/foods/{}", uuid::Uuid::new_v4());
        let (status, _) = send(
            &state,
            authed(&state, Method::PUT, &uri, Some(serde_json::json!({}))),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
