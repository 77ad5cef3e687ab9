//! PostgreSQL implementation of UserRepository.

use std::collections::BTreeSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::{db_error, like_pattern};
use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::role::RoleName;
use crate::domain::user::User;
use crate::ports::UserRepository;

/// PostgreSQL implementation of the UserRepository port.
///
/// The unique indexes on `username` and `email` enforce global uniqueness
/// even when concurrent registrations pass the service-level checks;
/// constraint violations surface as the matching Conflict errors.
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Creates a repository over the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a user account.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    email: String,
    first_name: Option<String>,
    last_name: Option<String>,
    about: Option<String>,
    password_hash: String,
    security_question: Option<String>,
    security_answer: Option<String>,
    enabled: bool,
    created_at: DateTime<Utc>,
    roles: Vec<String>,
}

impl TryFrom<UserRow> for User {
    type Error = DomainError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let roles = row
            .roles
            .iter()
            .map(|r| {
                r.parse::<RoleName>().map_err(|e| {
                    DomainError::new(ErrorCode::DatabaseError, format!("Invalid role: {}", e))
                })
            })
            .collect::<Result<BTreeSet<_>, _>>()?;

        Ok(User {
            id: UserId::from_uuid(row.id),
            username: row.username,
            email: row.email,
            first_name: row.first_name,
            last_name: row.last_name,
            about: row.about,
            password_hash: row.password_hash,
            security_question: row.security_question,
            security_answer: row.security_answer,
            enabled: row.enabled,
            created_at: Timestamp::from_datetime(row.created_at),
            roles,
        })
    }
}

const SELECT_USER: &str = "SELECT id, username, email, first_name, last_name, about, \
     password_hash, security_question, security_answer, enabled, created_at, roles \
     FROM users";

fn into_users(rows: Vec<UserRow>) -> Result<Vec<User>, DomainError> {
    rows.into_iter().map(User::try_from).collect()
}

fn map_save_error(e: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &e {
        match db_err.constraint() {
            Some("users_username_key") => {
                return DomainError::new(ErrorCode::UsernameExists, "Username already taken")
            }
            Some("users_email_key") => {
                return DomainError::new(ErrorCode::EmailExists, "Email already taken")
            }
            _ => {}
        }
    }
    db_error("Failed to save user", e)
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let sql = format!("{} WHERE username = $1", SELECT_USER);
        let row: Option<UserRow> = sqlx::query_as(&sql)
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find user by username", e))?;
        row.map(User::try_from).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let sql = format!("{} WHERE email = $1", SELECT_USER);
        let row: Option<UserRow> = sqlx::query_as(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find user by email", e))?;
        row.map(User::try_from).transpose()
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, DomainError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE username = $1)")
                .bind(username)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| db_error("Failed to check username", e))?;
        Ok(exists)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| db_error("Failed to check email", e))?;
        Ok(exists)
    }

    async fn save(&self, user: &User) -> Result<(), DomainError> {
        let roles: Vec<String> = user.roles.iter().map(|r| r.as_str().to_string()).collect();
        sqlx::query(
            r#"
            INSERT INTO users (
                id, username, email, first_name, last_name, about, password_hash,
                security_question, security_answer, enabled, created_at, roles
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            ON CONFLICT (id) DO UPDATE SET
                email = EXCLUDED.email,
                first_name = EXCLUDED.first_name,
                last_name = EXCLUDED.last_name,
                about = EXCLUDED.about,
                password_hash = EXCLUDED.password_hash,
                security_question = EXCLUDED.security_question,
                security_answer = EXCLUDED.security_answer,
                enabled = EXCLUDED.enabled,
                roles = EXCLUDED.roles
            "#,
        )
        .bind(user.id.as_uuid())
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.about)
        .bind(&user.password_hash)
        .bind(&user.security_question)
        .bind(&user.security_answer)
        .bind(user.enabled)
        .bind(user.created_at.as_datetime())
        .bind(&roles)
        .execute(&self.pool)
        .await
        .map_err(map_save_error)?;
        Ok(())
    }

    async fn delete(&self, id: &UserId) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete user", e))?;
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<User>, DomainError> {
        let sql = format!("{} ORDER BY created_at, username", SELECT_USER);
        let rows: Vec<UserRow> = sqlx::query_as(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list users", e))?;
        into_users(rows)
    }

    async fn find_by_first_name(&self, first_name: &str) -> Result<Vec<User>, DomainError> {
        let sql = format!(
            "{} WHERE first_name = $1 ORDER BY created_at, username",
            SELECT_USER
        );
        let rows: Vec<UserRow> = sqlx::query_as(&sql)
            .bind(first_name)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list users by first name", e))?;
        into_users(rows)
    }

    async fn find_by_last_name(&self, last_name: &str) -> Result<Vec<User>, DomainError> {
        let sql = format!(
            "{} WHERE last_name = $1 ORDER BY created_at, username",
            SELECT_USER
        );
        let rows: Vec<UserRow> = sqlx::query_as(&sql)
            .bind(last_name)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list users by last name", e))?;
        into_users(rows)
    }

    async fn find_oldest(&self, limit: u32) -> Result<Vec<User>, DomainError> {
        let sql = format!(
            "{} ORDER BY created_at ASC, username LIMIT $1",
            SELECT_USER
        );
        let rows: Vec<UserRow> = sqlx::query_as(&sql)
            .bind(i64::from(limit))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list oldest users", e))?;
        into_users(rows)
    }

    async fn find_newest(&self, limit: u32) -> Result<Vec<User>, DomainError> {
        let sql = format!(
            "{} ORDER BY created_at DESC, username LIMIT $1",
            SELECT_USER
        );
        let rows: Vec<UserRow> = sqlx::query_as(&sql)
            .bind(i64::from(limit))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list newest users", e))?;
        into_users(rows)
    }

    async fn find_enabled(&self) -> Result<Vec<User>, DomainError> {
        let sql = format!(
            "{} WHERE enabled ORDER BY created_at, username",
            SELECT_USER
        );
        let rows: Vec<UserRow> = sqlx::query_as(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list enabled users", e))?;
        into_users(rows)
    }

    async fn find_admins(&self) -> Result<Vec<User>, DomainError> {
        let sql = format!(
            "{} WHERE 'ADMIN' = ANY (roles) ORDER BY created_at, username",
            SELECT_USER
        );
        let rows: Vec<UserRow> = sqlx::query_as(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list admins", e))?;
        into_users(rows)
    }

    async fn search_by_username(&self, term: &str) -> Result<Vec<User>, DomainError> {
        let sql = format!(
            "{} WHERE username ILIKE $1 ORDER BY created_at, username",
            SELECT_USER
        );
        let rows: Vec<UserRow> = sqlx::query_as(&sql)
            .bind(like_pattern(term))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to search users by username", e))?;
        into_users(rows)
    }

    async fn search_by_name(&self, term: &str) -> Result<Vec<User>, DomainError> {
        let sql = format!(
            "{} WHERE first_name ILIKE $1 OR last_name ILIKE $1 \
             ORDER BY created_at, username",
            SELECT_USER
        );
        let rows: Vec<UserRow> = sqlx::query_as(&sql)
            .bind(like_pattern(term))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to search users by name", e))?;
        into_users(rows)
    }

    async fn search_by_email(&self, term: &str) -> Result<Vec<User>, DomainError> {
        let sql = format!(
            "{} WHERE email ILIKE $1 ORDER BY created_at, username",
            SELECT_USER
        );
        let rows: Vec<UserRow> = sqlx::query_as(&sql)
            .bind(like_pattern(term))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to search users by email", e))?;
        into_users(rows)
    }
}
