use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    error::{ApiError, ApiResult},
    response::ApiResponse,
    state::AppState,
    validation::FieldErrors,
};

use super::dto::{LoginRequest, RegisterRequest, Session};
use super::repo_types::User;
use super::{password, token::SessionKeys};

const BAD_CREDENTIALS: &str = "Invalid email or password!";

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

fn validate_register(mut req: RegisterRequest) -> ApiResult<RegisterRequest> {
    req.email = req.email.trim().to_lowercase();
    req.full_name = req.full_name.trim().to_string();

    let mut errs = FieldErrors::new();
    errs.non_empty("full_name", &req.full_name);
    errs.email("email", &req.email);
    errs.min_len("password", &req.password, 6);
    errs.finish("Invalid user data!")?;
    Ok(req)
}

fn open_session(state: &AppState, user: User) -> ApiResult<Session> {
    let token = SessionKeys::from_ref(state).issue(user.user_uuid)?;
    Ok(Session {
        user: user.into(),
        token,
    })
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Session>>)> {
    let payload = validate_register(payload)?;

    if User::find_by_email(&state.db, &payload.email).await?.is_some() {
        warn!(email = %payload.email, "email already registered");
        return Err(ApiError::conflict("Email already registered"));
    }

    let hash = password::hash(&payload.password)?;
    let user = User::create(&state.db, &payload.full_name, &payload.email, &hash)
        .await
        .map_err(|e| ApiError::conflict_on_duplicate(e, "Email already registered"))?;

    info!(user_uuid = %user.user_uuid, "user registered");
    Ok(ApiResponse::created(open_session(&state, user)?))
}

/// Unknown email and wrong password fail the same way.
fn check_credentials(email: &str, found: Option<User>, password: &str) -> ApiResult<User> {
    let Some(user) = found else {
        warn!(%email, "login for unknown email");
        return Err(ApiError::bad_request(BAD_CREDENTIALS));
    };
    if !password::matches(password, &user.password_hash) {
        warn!(user_uuid = %user.user_uuid, "login with wrong password");
        return Err(ApiError::bad_request(BAD_CREDENTIALS));
    }
    Ok(user)
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<Json<ApiResponse<Session>>> {
    let email = payload.email.trim().to_lowercase();
    let found = User::find_by_email(&state.db, &email).await?;
    let user = check_credentials(&email, found, &payload.password)?;
    info!(user_uuid = %user.user_uuid, "user logged in");
    Ok(ApiResponse::ok(open_session(&state, user)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::send;
    use axum::{body::Body, http::Request};

    fn register_req(full_name: &str, email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            full_name: full_name.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    #[test]
    fn register_normalizes_name_and_email() {
        let ok =
            validate_register(register_req(" Ana Souza ", " Ana@Clinic.ORG", "secret")).unwrap();
        assert_eq!(ok.full_name, "Ana Souza");
        assert_eq!(ok.email, "ana@clinic.org");
    }

    #[test]
    fn six_character_password_is_enough() {
        assert!(validate_register(register_req("Ana", "ana@clinic.org", "abcdef")).is_ok());
        assert!(validate_register(register_req("Ana", "ana@clinic.org", "abcde")).is_err());
    }

    #[test]
    fn public_user_hides_password_hash() {
        let user = User {
            id: 1,
            user_uuid: uuid::Uuid::new_v4(),
            full_name: "Ana Souza".into(),
            email: "ana@example.com".into(),
            password_hash: "$argon2id$secret".into(),
            created_at: time::OffsetDateTime::now_utc(),
            updated_at: time::OffsetDateTime::now_utc(),
        };
        let json = serde_json::to_string(&crate::auth::dto::PublicUser::from(user)).unwrap();
        assert!(json.contains("ana@example.com"));
        assert!(json.contains("user_uuid"));
        assert!(!json.contains("argon2"));
    }

    #[tokio::test]
    async fn session_body_is_user_and_token() {
        let state = AppState::fake();
        let user_uuid = uuid::Uuid::new_v4();
        let user = User {
            id: 7,
            user_uuid,
            full_name: "Ana".into(),
            email: "ana@clinic.org".into(),
            password_hash: "x".into(),
            created_at: time::OffsetDateTime::now_utc(),
            updated_at: time::OffsetDateTime::now_utc(),
        };
        let session = open_session(&state, user).unwrap();
        let keys = SessionKeys::from_ref(&state);
        assert_eq!(keys.user_uuid(&session.token).unwrap(), user_uuid);

        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["user"]["email"], "ana@clinic.org");
        assert!(json["token"].is_string());
        assert!(json.get("refresh_token").is_none());
    }

    #[test]
    fn bad_credentials_are_a_bad_request() {
        let user = User {
            id: 3,
            user_uuid: uuid::Uuid::new_v4(),
            full_name: "Ana".into(),
            email: "ana@clinic.org".into(),
            password_hash: password::hash("secret").unwrap(),
            created_at: time::OffsetDateTime::now_utc(),
            updated_at: time::OffsetDateTime::now_utc(),
        };

        for err in [
            check_credentials("ana@clinic.org", Some(user.clone()), "wrong!").unwrap_err(),
            check_credentials("nobody@clinic.org", None, "secret").unwrap_err(),
        ] {
            assert_eq!(err.status(), StatusCode::BAD_REQUEST);
            assert!(matches!(err, ApiError::BadRequest(ref m) if m == BAD_CREDENTIALS));
        }

        let ok = check_credentials("ana@clinic.org", Some(user), "secret").unwrap();
        assert_eq!(ok.email, "ana@clinic.org");
    }

    #[tokio::test]
    async fn register_rejects_bad_input_before_touching_db() {
        let state = AppState::fake();
        let body = serde_json::json!({
            "full_name": " ",
            "email": "not-an-email",
            "password": "123"
        });
        let req = Request::post("/api/v1/auth/register")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let (status, json) = send(&state, req).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["success"], false);
        assert!(json["details"]["full_name"].is_string());
        assert!(json["details"]["email"].is_string());
        assert!(json["details"]["password"].is_string());
    }

    #[tokio::test]
    async fn refresh_and_me_are_not_routes() {
        let state = AppState::fake();
        let req = Request::post("/api/v1/auth/refresh")
            .header("content-type", "application/json")
            .body(Body::from("{}"))
            .unwrap();
        assert_eq!(send(&state, req).await.0, StatusCode::NOT_FOUND);
        let req = Request::get("/api/v1/me").body(Body::empty()).unwrap();
        assert_eq!(send(&state, req).await.0, StatusCode::NOT_FOUND);
    }
}
