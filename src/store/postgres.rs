use std::marker::PhantomData;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{Error as SqlxError, PgPool};
use tracing::error;

use super::{Repository, UserStore};
use crate::error::AppError;
use crate::models::user::{NewUser, User};
use crate::models::{Document, Record};

#[derive(sqlx::FromRow)]
struct DocumentRow {
    id: i64,
    body: Json<serde_json::Value>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl DocumentRow {
    fn into_record<T: Document>(self) -> Result<Record<T>, AppError> {
        let data = serde_json::from_value(self.body.0).map_err(|e| {
            error!(?e, id = self.id, collection = T::COLLECTION, "Stored document does not decode");
            AppError::internal(format!("Corrupt {} document {}", T::COLLECTION, self.id))
        })?;

        Ok(Record {
            id: self.id,
            data,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";

fn map_violation(err: SqlxError, code: &str, mapped: AppError) -> AppError {
    match err {
        SqlxError::Database(db_err) if db_err.code().as_deref() == Some(code) => mapped,
        other => other.into(),
    }
}

fn missing_reference(err: SqlxError) -> AppError {
    map_violation(err, FOREIGN_KEY_VIOLATION, AppError::validation("Referenced dealer does not exist"))
}

/// One table per collection: `id`, `record_date`, `body JSONB`, timestamps.
pub struct PgRepository<T> {
    pool: PgPool,
    _marker: PhantomData<fn() -> T>,
}

impl<T> PgRepository<T> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _marker: PhantomData,
        }
    }
}

impl<T> Clone for PgRepository<T> {
    fn clone(&self) -> Self {
        Self::new(self.pool.clone())
    }
}

#[async_trait]
impl<T: Document> Repository<T> for PgRepository<T> {
    async fn list(&self) -> Result<Vec<Record<T>>, AppError> {
        let sql = format!(
            "SELECT id, body, created_at, updated_at FROM {}
             ORDER BY record_date DESC NULLS LAST, id DESC",
            T::COLLECTION
        );
        let rows = sqlx::query_as::<_, DocumentRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(DocumentRow::into_record).collect()
    }

    async fn get(&self, id: i64) -> Result<Option<Record<T>>, AppError> {
        let sql = format!(
            "SELECT id, body, created_at, updated_at FROM {} WHERE id = $1",
            T::COLLECTION
        );
        sqlx::query_as::<_, DocumentRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(DocumentRow::into_record)
            .transpose()
    }

    async fn insert(&self, data: T) -> Result<Record<T>, AppError> {
        let sql = format!(
            "INSERT INTO {} (record_date, body) VALUES ($1, $2)
             RETURNING id, body, created_at, updated_at",
            T::COLLECTION
        );
        sqlx::query_as::<_, DocumentRow>(&sql)
            .bind(data.record_date())
            .bind(Json(&data))
            .fetch_one(&self.pool)
            .await
            .map_err(missing_reference)?
            .into_record()
    }

    async fn replace(&self, id: i64, data: T) -> Result<Option<Record<T>>, AppError> {
        let sql = format!(
            "UPDATE {} SET record_date = $2, body = $3, updated_at = NOW()
             WHERE id = $1
             RETURNING id, body, created_at, updated_at",
            T::COLLECTION
        );
        sqlx::query_as::<_, DocumentRow>(&sql)
            .bind(id)
            .bind(data.record_date())
            .bind(Json(&data))
            .fetch_optional(&self.pool)
            .await
            .map_err(missing_reference)?
            .map(DocumentRow::into_record)
            .transpose()
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", T::COLLECTION);
        let result = sqlx::query(&sql)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                map_violation(
                    e,
                    FOREIGN_KEY_VIOLATION,
                    AppError::conflict(format!("{} {id} is still referenced", T::COLLECTION)),
                )
            })?;
        Ok(result.rows_affected() > 0)
    }
}

#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const USER_COLUMNS: &str = "id, username, email, mobile_no, password_hash, role, is_active, created_at";

#[async_trait]
impl UserStore for PgUserStore {
    async fn create(&self, user: NewUser) -> Result<User, AppError> {
        let sql = format!(
            "INSERT INTO users (username, email, mobile_no, password_hash, role)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {USER_COLUMNS}"
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.mobile_no)
            .bind(&user.password_hash)
            .bind(&user.role)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                map_violation(e, UNIQUE_VIOLATION, AppError::conflict("Username or email already exists"))
            })
    }

    async fn find_by_login(&self, login: &str) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE username = $1 OR email = $1");
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(login)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn get(&self, id: i64) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;
    use std::error::Error as StdError;
    use std::fmt;

    use sqlx::error::{DatabaseError, ErrorKind};

    use super::*;

    #[derive(Debug)]
    struct CodedError(&'static str);

    impl fmt::Display for CodedError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "database error {}", self.0)
        }
    }

    impl StdError for CodedError {}

    impl DatabaseError for CodedError {
        fn message(&self) -> &str {
            "constraint violated"
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed(self.0))
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    fn db_error(code: &'static str) -> SqlxError {
        SqlxError::Database(Box::new(CodedError(code)))
    }

    #[test]
    fn referenced_dealer_delete_maps_to_conflict() {
        let err = map_violation(
            db_error("23503"),
            FOREIGN_KEY_VIOLATION,
            AppError::conflict("dealers 1 is still referenced"),
        );
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[test]
    fn dangling_dealer_id_maps_to_validation() {
        assert!(matches!(missing_reference(db_error("23503")), AppError::ValidationError(_)));
    }

    #[test]
    fn other_codes_stay_database_errors() {
        assert!(matches!(missing_reference(db_error("23505")), AppError::DatabaseError(_)));
        assert!(matches!(missing_reference(SqlxError::RowNotFound), AppError::DatabaseError(_)));
    }
}
