use anyhow::Context;
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::{repo::USER_COLUMNS, repo_types::User};

use super::dto::UpdateUserRequest;

impl User {
    pub async fn list(db: &PgPool) -> anyhow::Result<Vec<User>> {
        let rows = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE deleted_at IS NULL ORDER BY full_name"
        ))
        .fetch_all(db)
        .await
        .context("list users")?;
        Ok(rows)
    }

    pub async fn update(
        db: &PgPool,
        user_uuid: Uuid,
        changes: &UpdateUserRequest,
    ) -> anyhow::Result<Option<User>> {
        let row = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
               SET full_name = COALESCE($2, full_name),
                   email = COALESCE($3, email),
                   updated_at = now()
             WHERE user_uuid = $1 AND deleted_at IS NULL
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user_uuid)
        .bind(changes.full_name.as_deref())
        .bind(changes.email.as_deref())
        .fetch_optional(db)
        .await
        .context("update user")?;
        Ok(row)
    }

    pub async fn soft_delete(db: &PgPool, user_uuid: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query(
            "UPDATE users SET deleted_at = now() WHERE user_uuid = $1 AND deleted_at IS NULL",
        )
        .bind(user_uuid)
        .execute(db)
        .await
        .context("soft delete user")?;
        Ok(res.rows_affected() > 0)
    }
}
