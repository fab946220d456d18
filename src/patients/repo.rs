use anyhow::Context;
use sqlx::PgPool;
use uuid::Uuid;

use super::dto::{CreatePatientRequest, UpdatePatientRequest};
use super::repo_types::Patient;

const PATIENT_COLUMNS: &str =
    "id, patient_uuid, name, email, weight, height, created_at, updated_at";

pub async fn list(db: &PgPool) -> anyhow::Result<Vec<Patient>> {
    let rows = sqlx::query_as::<_, Patient>(&format!(
        "SELECT {PATIENT_COLUMNS} FROM patients WHERE deleted_at IS NULL ORDER BY name"
    ))
    .fetch_all(db)
    .await
    .context("list patients")?;
    Ok(rows)
}

pub async fn find_by_uuid(db: &PgPool, patient_uuid: Uuid) -> anyhow::Result<Option<Patient>> {
    let row = sqlx::query_as::<_, Patient>(&format!(
        "SELECT {PATIENT_COLUMNS} FROM patients WHERE patient_uuid = $1 AND deleted_at IS NULL"
    ))
    .bind(patient_uuid)
    .fetch_optional(db)
    .await
    .context("find patient by uuid")?;
    Ok(row)
}

pub async fn find_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<Patient>> {
    let row = sqlx::query_as::<_, Patient>(&format!(
        "SELECT {PATIENT_COLUMNS} FROM patients WHERE email = $1 AND deleted_at IS NULL"
    ))
    .bind(email)
    .fetch_optional(db)
    .await
    .context("find patient by email")?;
    Ok(row)
}

pub async fn create(db: &PgPool, p: &CreatePatientRequest) -> anyhow::Result<Patient> {
    let row = sqlx::query_as::<_, Patient>(&format!(
        r#"
        INSERT INTO patients (patient_uuid, name, email, weight, height)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING {PATIENT_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(&p.name)
    .bind(&p.email)
    .bind(p.weight)
    .bind(p.height)
    .fetch_one(db)
    .await
    .context("insert patient")?;
    Ok(row)
}

pub async fn update(
    db: &PgPool,
    patient_uuid: Uuid,
    changes: &UpdatePatientRequest,
) -> anyhow::Result<Option<Patient>> {
    let row = sqlx::query_as::<_, Patient>(&format!(
        r#"
        UPDATE patients
           SET name = COALESCE($2, name),
               email = COALESCE($3, email),
               weight = COALESCE($4, weight),
               height = COALESCE($5, height),
               updated_at = now()
         WHERE patient_uuid = $1 AND deleted_at IS NULL
        RETURNING {PATIENT_COLUMNS}
        "#
    ))
    .bind(patient_uuid)
    .bind(changes.name.as_deref())
    .bind(changes.email.as_deref())
    .bind(changes.weight)
    .bind(changes.height)
    .fetch_optional(db)
    .await
    .context("update patient")?;
    Ok(row)
}

pub async fn soft_delete(db: &PgPool, patient_uuid: Uuid) -> anyhow::Result<bool> {
    let res = sqlx::query(
        "UPDATE patients SET deleted_at = now() WHERE patient_uuid = $1 AND deleted_at IS NULL",
    )
    .bind(patient_uuid)
    .execute(db)
    .await
    .context("soft delete patient")?;
    Ok(res.rows_affected() > 0)
}
