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

use super::dto::{CreatePatientRequest, PublicPatient, UpdatePatientRequest};
use super::{repo, services};

pub fn patient_routes() -> Router<AppState> {
    Router::new()
        .route("/patients", get(list_patients).post(create_patient))
        .route(
            "/patients/:patient_uuid",
            get(get_patient).put(update_patient).delete(delete_patient),
        )
}

#[instrument(skip(state))]
pub async fn list_patients(
    State(state): State<AppState>,
    _user: AuthUser,
) -> ApiResult<Json<ApiResponse<Vec<PublicPatient>>>> {
    let patients = repo::list(&state.db).await?;
    Ok(ApiResponse::ok(patients.into_iter().map(Into::into).collect()))
}

#[instrument(skip(state))]
pub async fn get_patient(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(patient_uuid): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<PublicPatient>>> {
    let patient = repo::find_by_uuid(&state.db, patient_uuid)
        .await?
        .ok_or_else(|| {
            ApiError::not_found(format!("Patient with uuid {patient_uuid} not found!"))
        })?;
    Ok(ApiResponse::ok(patient.into()))
}

#[instrument(skip(state, payload))]
pub async fn create_patient(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(payload): Json<CreatePatientRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<PublicPatient>>)> {
    let patient = services::create(&state.db, payload).await?;
    info!(patient_uuid = %patient.patient_uuid, "patient created");
    Ok(ApiResponse::created(patient.into()))
}

#[instrument(skip(state, payload))]
pub async fn update_patient(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(patient_uuid): Path<Uuid>,
    Json(payload): Json<UpdatePatientRequest>,
) -> ApiResult<Json<ApiResponse<PublicPatient>>> {
    let patient = services::update(&state.db, patient_uuid, payload).await?;
    info!(%patient_uuid, "patient updated");
    Ok(ApiResponse::ok(patient.into()))
}

#[instrument(skip(state))]
pub async fn delete_patient(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(patient_uuid): Path<Uuid>,
) -> ApiResult<StatusCode> {
    if !repo::soft_delete(&state.db, patient_uuid).await? {
        return Err(ApiError::not_found(format!("Patient with uuid {patient_uuid} not found!")));
    }
    info!(%patient_uuid, "patient deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use crate::state::AppState;
    use crate::test_support::{authed, send};
    use axum::http::{Method, StatusCode};

    #[tokio::test]
    async fn create_patient_with_bad_email_is_unprocessable() {
        let state = AppState::fake();
        let body = serde_json::json!({
            "name": "Joao",
            "email": "joao-at-example",
            "weight": 80.0,
            "height": 178.0
        });
        let (status, json) =
            send(&state, authed(&state, Method::POST, "/api/v1/patients", Some(body))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(json["details"]["email"].is_string());
    }

    #[tokio::test]
    async fn malformed_patient_uuid_is_rejected() {
        let state = AppState::fake();
        let (status, _) =
            send(&state, authed(&state, Method::GET, "/api/v1/patients/not-a-uuid", None)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
