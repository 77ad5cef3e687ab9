//! PostgreSQL implementation of HeroRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::db_error;
use crate::domain::foundation::{DomainError, ErrorCode, HeroId, Timestamp};
use crate::domain::hero::{Hero, HeroType};
use crate::ports::HeroRepository;

/// PostgreSQL implementation of the HeroRepository port.
///
/// The unique index on `name` backs the service-level uniqueness check;
/// violations surface as `HERO_EXISTS`.
pub struct PostgresHeroRepository {
    pool: PgPool,
}

impl PostgresHeroRepository {
    /// Creates a repository over the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a hero.
#[derive(Debug, sqlx::FromRow)]
struct HeroRow {
    id: Uuid,
    name: String,
    username: String,
    hero_type: String,
    level: i32,
    created_at: DateTime<Utc>,
}

impl TryFrom<HeroRow> for Hero {
    type Error = DomainError;

    fn try_from(row: HeroRow) -> Result<Self, Self::Error> {
        let hero_type = HeroType::parse(&row.hero_type).ok_or_else(|| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid hero type value: {}", row.hero_type),
            )
        })?;

        Ok(Hero {
            id: HeroId::from_uuid(row.id),
            name: row.name,
            username: row.username,
            hero_type,
            level: row.level,
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

const SELECT_HERO: &str =
    "SELECT id, name, username, hero_type, level, created_at FROM heroes";

fn into_heroes(rows: Vec<HeroRow>) -> Result<Vec<Hero>, DomainError> {
    rows.into_iter().map(Hero::try_from).collect()
}

fn map_save_error(e: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.constraint() == Some("heroes_name_key") {
            return DomainError::new(ErrorCode::HeroExists, "Hero name already taken");
        }
    }
    db_error("Failed to save hero", e)
}

#[async_trait]
impl HeroRepository for PostgresHeroRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Hero>, DomainError> {
        let sql = format!("{} WHERE name = $1", SELECT_HERO);
        let row: Option<HeroRow> = sqlx::query_as(&sql)
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find hero by name", e))?;
        row.map(Hero::try_from).transpose()
    }

    async fn exists_by_name(&self, name: &str) -> Result<bool, DomainError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM heroes WHERE name = $1)")
                .bind(name)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| db_error("Failed to check hero name", e))?;
        Ok(exists)
    }

    async fn save(&self, hero: &Hero) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO heroes (id, name, username, hero_type, level, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO UPDATE SET
                hero_type = EXCLUDED.hero_type,
                level = EXCLUDED.level
            "#,
        )
        .bind(hero.id.as_uuid())
        .bind(&hero.name)
        .bind(&hero.username)
        .bind(hero.hero_type.as_str())
        .bind(hero.level)
        .bind(hero.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(map_save_error)?;
        Ok(())
    }

    async fn delete(&self, id: &HeroId) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM heroes WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete hero", e))?;
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Hero>, DomainError> {
        let sql = format!("{} ORDER BY created_at, name", SELECT_HERO);
        let rows: Vec<HeroRow> = sqlx::query_as(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list heroes", e))?;
        into_heroes(rows)
    }

    async fn find_by_username(&self, username: &str) -> Result<Vec<Hero>, DomainError> {
        let sql = format!(
            "{} WHERE username = $1 ORDER BY created_at, name",
            SELECT_HERO
        );
        let rows: Vec<HeroRow> = sqlx::query_as(&sql)
            .bind(username)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list heroes by owner", e))?;
        into_heroes(rows)
    }

    async fn find_by_type(&self, hero_type: HeroType) -> Result<Vec<Hero>, DomainError> {
        let sql = format!(
            "{} WHERE hero_type = $1 ORDER BY created_at, name",
            SELECT_HERO
        );
        let rows: Vec<HeroRow> = sqlx::query_as(&sql)
            .bind(hero_type.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list heroes by type", e))?;
        into_heroes(rows)
    }

    async fn find_by_level(&self, level: i32) -> Result<Vec<Hero>, DomainError> {
        let sql = format!("{} WHERE level = $1 ORDER BY created_at, name", SELECT_HERO);
        let rows: Vec<HeroRow> = sqlx::query_as(&sql)
            .bind(level)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list heroes by level", e))?;
        into_heroes(rows)
    }

    async fn find_by_level_above(&self, level: i32) -> Result<Vec<Hero>, DomainError> {
        let sql = format!("{} WHERE level > $1 ORDER BY created_at, name", SELECT_HERO);
        let rows: Vec<HeroRow> = sqlx::query_as(&sql)
            .bind(level)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list heroes above level", e))?;
        into_heroes(rows)
    }

    async fn find_by_level_below(&self, level: i32) -> Result<Vec<Hero>, DomainError> {
        let sql = format!("{} WHERE level < $1 ORDER BY created_at, name", SELECT_HERO);
        let rows: Vec<HeroRow> = sqlx::query_as(&sql)
            .bind(level)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list heroes below level", e))?;
        into_heroes(rows)
    }

    async fn find_top_by_level(&self, limit: u32) -> Result<Vec<Hero>, DomainError> {
        let sql = format!("{} ORDER BY level DESC, name LIMIT $1", SELECT_HERO);
        let rows: Vec<HeroRow> = sqlx::query_as(&sql)
            .bind(i64::from(limit))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list top heroes", e))?;
        into_heroes(rows)
    }

    async fn find_newest(&self, limit: u32) -> Result<Vec<Hero>, DomainError> {
        let sql = format!("{} ORDER BY created_at DESC, name LIMIT $1", SELECT_HERO);
        let rows: Vec<HeroRow> = sqlx::query_as(&sql)
            .bind(i64::from(limit))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list newest heroes", e))?;
        into_heroes(rows)
    }
}
