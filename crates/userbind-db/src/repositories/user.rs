//! PostgreSQL implementation of UserRepository

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use tracing::instrument;

use userbind_core::entities::User;
use userbind_core::error::DomainError;
use userbind_core::traits::{RepoResult, UserRepository};
use userbind_core::value_objects::UserId;

use crate::models::UserModel;

use super::error::{map_db_error, map_unique_violation, user_not_found};

const USER_COLUMNS: &str = "id, handle, email, privileges, student_id, student_name, \
                            is_school_student, created_at, updated_at";

/// Write the identity unless the account already carries one.
///
/// Returns false for a bound account and `UserNotFound` for a missing one.
/// Takes a connection so it can run inside a caller's transaction.
pub(crate) async fn bind_identity_if_unbound(
    conn: &mut PgConnection,
    id: UserId,
    student_id: &str,
    student_name: &str,
) -> RepoResult<bool> {
    let result = sqlx::query(
        r"
        UPDATE users
        SET student_id = $2, student_name = $3, is_school_student = TRUE, updated_at = NOW()
        WHERE id = $1 AND (student_id = '' OR student_name = '')
        ",
    )
    .bind(id.into_inner())
    .bind(student_id)
    .bind(student_name)
    .execute(&mut *conn)
    .await
    .map_err(map_db_error)?;

    if result.rows_affected() > 0 {
        return Ok(true);
    }

    let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM users WHERE id = $1)")
        .bind(id.into_inner())
        .fetch_one(&mut *conn)
        .await
        .map_err(map_db_error)?;

    if exists {
        Ok(false)
    } else {
        Err(user_not_found(id))
    }
}

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self, ids), fields(count = ids.len()))]
    async fn find_many(&self, ids: &[UserId]) -> RepoResult<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let raw: Vec<i64> = ids.iter().map(|id| id.into_inner()).collect();

        let results = sqlx::query_as::<_, UserModel>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ANY($1)"
        ))
        .bind(raw)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(User::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_handle(&self, handle: &str) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE LOWER(handle) = LOWER($1)"
        ))
        .bind(handle)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE LOWER(email) = LOWER($1)"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self, user, password_hash), fields(handle = %user.handle))]
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<User> {
        let created = sqlx::query_as::<_, UserModel>(&format!(
            r"
            INSERT INTO users (handle, email, password_hash, privileges, student_id,
                               student_name, is_school_student, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {USER_COLUMNS}
            "
        ))
        .bind(&user.handle)
        .bind(&user.email)
        .bind(password_hash)
        .bind(user.privileges.to_i64())
        .bind(&user.student_id)
        .bind(&user.student_name)
        .bind(user.is_school_student)
        .bind(user.created_at)
        .bind(user.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_unique_violation(e, |constraint| match constraint {
                Some(name) if name.contains("email") => DomainError::EmailAlreadyExists,
                _ => DomainError::HandleAlreadyExists,
            })
        })?;

        Ok(User::from(created))
    }

    #[instrument(skip(self))]
    async fn update_settings(
        &self,
        id: UserId,
        student_id: Option<&str>,
        student_name: Option<&str>,
        is_school_student: Option<bool>,
    ) -> RepoResult<User> {
        let updated = sqlx::query_as::<_, UserModel>(&format!(
            r"
            UPDATE users
            SET student_id = COALESCE($2, student_id),
                student_name = COALESCE($3, student_name),
                is_school_student = COALESCE($4, is_school_student),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "
        ))
        .bind(id.into_inner())
        .bind(student_id)
        .bind(student_name)
        .bind(is_school_student)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        updated.map(User::from).ok_or_else(|| user_not_found(id))
    }

    #[instrument(skip(self))]
    async fn set_student_identity(
        &self,
        id: UserId,
        student_id: &str,
        student_name: &str,
    ) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE users
            SET student_id = $2, student_name = $3, is_school_student = TRUE, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .bind(student_id)
        .bind(student_name)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(user_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn bind_if_unbound(
        &self,
        id: UserId,
        student_id: &str,
        student_name: &str,
    ) -> RepoResult<bool> {
        let mut conn = self.pool.acquire().await.map_err(map_db_error)?;
        bind_identity_if_unbound(&mut conn, id, student_id, student_name).await
    }

    #[instrument(skip(self))]
    async fn get_password_hash(&self, id: UserId) -> RepoResult<Option<String>> {
        let result = sqlx::query_scalar::<_, String>(
            r"
            SELECT password_hash FROM users WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }

    #[instrument(skip(self))]
    async fn count(&self) -> RepoResult<u64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(u64::try_from(count).unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgUserRepository>();
    }
}
