use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::{dto::PublicUser, repo_types::User, AuthUser},
    error::{ApiError, ApiResult},
    response::ApiResponse,
    state::AppState,
    validation::FieldErrors,
};

use super::dto::UpdateUserRequest;

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route(
            "/users/:user_uuid",
            get(get_user).put(update_user).delete(delete_user),
        )
}

fn validate_update(mut req: UpdateUserRequest) -> ApiResult<UpdateUserRequest> {
    if req.full_name.is_none() && req.email.is_none() {
        return Err(ApiError::bad_request("No fields to update"));
    }
    req.full_name = req.full_name.map(|n| n.trim().to_string());
    req.email = req.email.map(|e| e.trim().to_lowercase());

    let mut errs = FieldErrors::new();
    if let Some(name) = &req.full_name {
        errs.non_empty("full_name", name);
    }
    if let Some(email) = &req.email {
        errs.email("email", email);
    }
    errs.finish("Invalid user data!")?;
    Ok(req)
}

#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
    _user: AuthUser,
) -> ApiResult<Json<ApiResponse<Vec<PublicUser>>>> {
    let users = User::list(&state.db).await?;
    Ok(ApiResponse::ok(users.into_iter().map(Into::into).collect()))
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(user_uuid): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<PublicUser>>> {
    let user = User::find_by_uuid(&state.db, user_uuid)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found!"))?;
    Ok(ApiResponse::ok(user.into()))
}

#[instrument(skip(state, payload))]
pub async fn update_user(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(user_uuid): Path<Uuid>,
    Json(payload): Json<UpdateUserRequest>,
) -> ApiResult<Json<ApiResponse<PublicUser>>> {
    let payload = validate_update(payload)?;

    if let Some(email) = payload.email.as_deref() {
        if let Some(other) = User::find_by_email(&state.db, email).await? {
            if other.user_uuid != user_uuid {
                warn!(%email, "email already registered");
                return Err(ApiError::conflict("Email already registered"));
            }
        }
    }

    let user = User::update(&state.db, user_uuid, &payload)
        .await
        .map_err(|e| ApiError::conflict_on_duplicate(e, "Email already registered"))?
        .ok_or_else(|| ApiError::not_found("User not found!"))?;
    info!(%user_uuid, "user updated");
    Ok(ApiResponse::ok(user.into()))
}

#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(user_uuid): Path<Uuid>,
) -> ApiResult<StatusCode> {
    if !User::soft_delete(&state.db, user_uuid).await? {
        return Err(ApiError::not_found("User not found!"));
    }
    info!(%user_uuid, "user deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_needs_at_least_one_field() {
        assert!(matches!(
            validate_update(UpdateUserRequest::default()),
            Err(ApiError::BadRequest(_))
        ));
    }

    #[test]
    fn update_normalizes_email() {
        let ok = validate_update(UpdateUserRequest {
            full_name: None,
            email: Some("  Nutri@Clinic.ORG ".into()),
        })
        .unwrap();
        assert_eq!(ok.email.as_deref(), Some("nutri@clinic.org"));
    }

    #[test]
    fn update_rejects_blank_name() {
        assert!(matches!(
            validate_update(UpdateUserRequest {
                full_name: Some("  ".into()),
                email: None,
            }),
            Err(ApiError::Validation { .. })
        ));
    }

    #[test]
    fn password_is_not_an_updatable_field() {
        let res: Result<UpdateUserRequest, _> =
            serde_json::from_str(r#"{"password":"hunter22"}"#);
        assert!(res.is_err());
    }
}
