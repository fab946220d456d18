use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::validation::FieldErrors;

use super::dto::{CreatePatientRequest, UpdatePatientRequest};
use super::repo;
use super::repo_types::Patient;

pub fn validate_create(mut req: CreatePatientRequest) -> ApiResult<CreatePatientRequest> {
    req.name = req.name.trim().to_string();
    req.email = req.email.trim().to_lowercase();

    let mut errs = FieldErrors::new();
    errs.non_empty("name", &req.name);
    errs.email("email", &req.email);
    errs.non_negative("weight", req.weight);
    errs.non_negative("height", req.height);
    errs.finish("Invalid patient data!")?;
    Ok(req)
}

pub fn validate_update(mut req: UpdatePatientRequest) -> ApiResult<UpdatePatientRequest> {
    if req.is_empty() {
        return Err(ApiError::bad_request("No fields to update"));
    }
    req.name = req.name.map(|n| n.trim().to_string());
    req.email = req.email.map(|e| e.trim().to_lowercase());

    let mut errs = FieldErrors::new();
    if let Some(name) = &req.name {
        errs.non_empty("name", name);
    }
    if let Some(email) = &req.email {
        errs.email("email", email);
    }
    if let Some(w) = req.weight {
        errs.non_negative("weight", w);
    }
    if let Some(h) = req.height {
        errs.non_negative("height", h);
    }
    errs.finish("Invalid patient data!")?;
    Ok(req)
}

pub async fn create(db: &PgPool, req: CreatePatientRequest) -> ApiResult<Patient> {
    let req = validate_create(req)?;
    if repo::find_by_email(db, &req.email).await?.is_some() {
        warn!(email = %req.email, "patient email already registered");
        return Err(ApiError::conflict("Patient email already registered"));
    }
    repo::create(db, &req)
        .await
        .map_err(|e| ApiError::conflict_on_duplicate(e, "Patient email already registered"))
}

pub async fn update(
    db: &PgPool,
    patient_uuid: Uuid,
    req: UpdatePatientRequest,
) -> ApiResult<Patient> {
    let req = validate_update(req)?;
    let current = repo::find_by_uuid(db, patient_uuid)
        .await?
        .ok_or_else(|| ApiError::not_found("Patient not found!"))?;

    if let Some(email) = req.email.as_deref().filter(|e| *e != current.email) {
        if repo::find_by_email(db, email).await?.is_some() {
            warn!(%email, "patient email change collides");
            return Err(ApiError::conflict("The new email already exists!"));
        }
    }

    repo::update(db, patient_uuid, &req)
        .await
        .map_err(|e| ApiError::conflict_on_duplicate(e, "The new email already exists!"))?
        .ok_or_else(|| ApiError::not_found("Patient not found!"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_normalizes_email_and_name() {
        let ok = validate_create(CreatePatientRequest {
            name: " Maria ".into(),
            email: " Maria@Example.COM ".into(),
            weight: 70.5,
            height: 165.0,
        })
        .unwrap();
        assert_eq!(ok.name, "Maria");
        assert_eq!(ok.email, "maria@example.com");
    }

    #[test]
    fn create_rejects_negative_measurements() {
        let res = validate_create(CreatePatientRequest {
            name: "Maria".into(),
            email: "maria@example.com".into(),
            weight: -1.0,
            height: 165.0,
        });
        match res {
            Err(ApiError::Validation { details, .. }) => {
                assert!(details.unwrap().get("weight").is_some());
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn update_requires_a_field_and_valid_email() {
        assert!(matches!(
            validate_update(UpdatePatientRequest::default()),
            Err(ApiError::BadRequest(_))
        ));
        assert!(matches!(
            validate_update(UpdatePatientRequest {
                email: Some("nope".into()),
                ..Default::default()
            }),
            Err(ApiError::Validation { .. })
        ));
        assert!(validate_update(UpdatePatientRequest {
            height: Some(180.0),
            ..Default::default()
        })
        .is_ok());
    }
}
