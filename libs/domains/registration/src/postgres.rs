use async_trait::async_trait;
use sea_orm::{DatabaseConnection, DbBackend, DbErr, FromQueryResult, SqlErr, Statement};
use uuid::Uuid;

use crate::error::{StorageError, StorageResult};
use crate::models::RecordId;
use crate::repository::UserRepository;

/// Values are always bound, never interpolated.
pub const INSERT_USER_SQL: &str =
    "INSERT INTO users (username, email, password) VALUES ($1, $2, $3) RETURNING id";

/// PostgreSQL implementation of UserRepository using SeaORM
#[derive(Clone)]
pub struct PgUserRepository {
    db: DatabaseConnection,
}

impl PgUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[derive(Debug, FromQueryResult)]
struct InsertedRow {
    id: Uuid,
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn insert_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> StorageResult<RecordId> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            INSERT_USER_SQL,
            [username.into(), email.into(), password_hash.into()],
        );

        let row = InsertedRow::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(|e| map_insert_error(e, username))?
            .ok_or_else(|| StorageError::Database("INSERT returned no id".to_string()))?;

        Ok(row.id)
    }
}

fn map_insert_error(err: DbErr, username: &str) -> StorageError {
    if let Some(SqlErr::UniqueConstraintViolation(_)) = err.sql_err() {
        return StorageError::DuplicateUsername(username.to_string());
    }

    let err_str = err.to_string();
    if err_str.contains("duplicate key") || err_str.contains("unique constraint") {
        StorageError::DuplicateUsername(username.to_string())
    } else {
        StorageError::Database(err_str)
    }
}
