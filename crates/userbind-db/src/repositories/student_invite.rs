//! PostgreSQL implementation of InviteRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use userbind_core::entities::StudentInvite;
use userbind_core::error::DomainError;
use userbind_core::traits::{InviteRepository, RepoResult};
use userbind_core::value_objects::UserId;

use crate::models::StudentInviteModel;

use super::error::{map_db_error, map_unique_violation};
use super::user::bind_identity_if_unbound;

/// PostgreSQL implementation of InviteRepository
#[derive(Clone)]
pub struct PgInviteRepository {
    pool: PgPool,
}

impl PgInviteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InviteRepository for PgInviteRepository {
    #[instrument(skip(self))]
    async fn find_by_code(&self, code: &str) -> RepoResult<Option<StudentInvite>> {
        let result = sqlx::query_as::<_, StudentInviteModel>(
            r#"
            SELECT code, student_id, student_name, created_at, used, used_by, used_at
            FROM student_invites
            WHERE code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(StudentInvite::from))
    }

    #[instrument(skip(self, invite), fields(student_id = %invite.student_id))]
    async fn create(&self, invite: &StudentInvite) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO student_invites (code, student_id, student_name, created_at, used)
            VALUES ($1, $2, $3, $4, FALSE)
            "#,
        )
        .bind(&invite.code)
        .bind(&invite.student_id)
        .bind(&invite.student_name)
        .bind(invite.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, |_| DomainError::InviteCodeExists))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn claim(&self, code: &str, user_id: UserId, at: DateTime<Utc>) -> RepoResult<bool> {
        // Conditional update: concurrent claimers serialize on the row lock and
        // only the first sees used = FALSE.
        let result = sqlx::query(
            r#"
            UPDATE student_invites
            SET used = TRUE, used_by = $2, used_at = $3
            WHERE code = $1 AND used = FALSE
            "#,
        )
        .bind(code)
        .bind(user_id.into_inner())
        .bind(at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn redeem(
        &self,
        code: &str,
        user_id: UserId,
        at: DateTime<Utc>,
    ) -> RepoResult<StudentInvite> {
        // Dropping the transaction on an early return rolls the claim back.
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let claimed = sqlx::query_as::<_, StudentInviteModel>(
            r#"
            UPDATE student_invites
            SET used = TRUE, used_by = $2, used_at = $3
            WHERE code = $1 AND used = FALSE
            RETURNING code, student_id, student_name, created_at, used, used_by, used_at
            "#,
        )
        .bind(code)
        .bind(user_id.into_inner())
        .bind(at)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let Some(invite) = claimed.map(StudentInvite::from) else {
            let exists = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS (SELECT 1 FROM student_invites WHERE code = $1)",
            )
            .bind(code)
            .fetch_one(&mut *tx)
            .await
            .map_err(map_db_error)?;

            return Err(if exists {
                DomainError::InviteAlreadyUsed(code.to_string())
            } else {
                DomainError::InviteNotFound(code.to_string())
            });
        };

        if !bind_identity_if_unbound(&mut *tx, user_id, &invite.student_id, &invite.student_name)
            .await?
        {
            return Err(DomainError::AlreadyBound(user_id));
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(invite)
    }

    #[instrument(skip(self))]
    async fn list_page(&self, offset: i64, limit: i64) -> RepoResult<Vec<StudentInvite>> {
        let results = sqlx::query_as::<_, StudentInviteModel>(
            r#"
            SELECT code, student_id, student_name, created_at, used, used_by, used_at
            FROM student_invites
            ORDER BY created_at DESC, code ASC
            OFFSET $1
            LIMIT $2
            "#,
        )
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(StudentInvite::from).collect())
    }

    #[instrument(skip(self))]
    async fn count(&self) -> RepoResult<u64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM student_invites")
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(u64::try_from(count).unwrap_or(0))
    }

    #[instrument(skip(self))]
    async fn delete(&self, code: &str) -> RepoResult<()> {
        sqlx::query("DELETE FROM student_invites WHERE code = $1")
            .bind(code)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(())
    }
}
