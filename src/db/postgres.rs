use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;

use super::UserStore;
use crate::error::Result;
use crate::models::{ActivityEntry, NewActivityEntry, UserRecord};

const USER_COLUMNS: &str = "uuid, money, country, activity_total, sync_count, stat_count, \
                            last_sync_time, last_stat_time, created_at";

/// PostgreSQL-backed user store
#[derive(Clone, Debug)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a connection pool and wrap it in a store
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        tracing::info!("Creating database connection pool...");

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(max_connections.min(2))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .connect(database_url)
            .await?;

        tracing::info!("Database connection pool created successfully");

        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Apply pending schema migrations
    pub async fn migrate(&self) -> Result<()> {
        tracing::info!("Running database migrations...");
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(sqlx::Error::from)?;
        tracing::info!("Migrations complete");
        Ok(())
    }
}

async fn update_user<'e, E>(executor: E, user: &UserRecord) -> Result<()>
where
    E: sqlx::Executor<'e, Database = sqlx::Postgres>,
{
    sqlx::query(
        r#"
        UPDATE user_data
        SET money = $2,
            country = $3,
            activity_total = $4,
            sync_count = $5,
            stat_count = $6,
            last_sync_time = $7,
            last_stat_time = $8
        WHERE uuid = $1
        "#,
    )
    .bind(&user.uuid)
    .bind(user.money)
    .bind(&user.country)
    .bind(user.activity_total)
    .bind(user.sync_count)
    .bind(user.stat_count)
    .bind(user.last_sync_time)
    .bind(user.last_stat_time)
    .execute(executor)
    .await?;
    Ok(())
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_user(&self, uuid: &str) -> Result<Option<UserRecord>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM user_data WHERE uuid = $1");
        Ok(sqlx::query_as::<_, UserRecord>(&sql)
            .bind(uuid)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn save_user(&self, user: &UserRecord) -> Result<()> {
        update_user(&self.pool, user).await
    }

    async fn save_activity(&self, user: &UserRecord, entry: &NewActivityEntry) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        update_user(&mut *tx, user).await?;

        sqlx::query(
            r#"
            INSERT INTO user_activity_history (uuid, activity, activity_date)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(&entry.uuid)
        .bind(entry.activity)
        .bind(entry.activity_date)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn top_users_by_money(&self, country: &str, limit: i64) -> Result<Vec<UserRecord>> {
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM user_data WHERE country = $1 ORDER BY money DESC LIMIT $2"
        );
        Ok(sqlx::query_as::<_, UserRecord>(&sql)
            .bind(country)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn count_users_created_since(&self, country: &str, since: DateTime<Utc>) -> Result<i64> {
        Ok(sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM user_data WHERE country = $1 AND created_at >= $2",
        )
        .bind(country)
        .bind(since)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn activity_history(
        &self,
        uuid: &str,
        since: NaiveDate,
        limit: i64,
    ) -> Result<Vec<ActivityEntry>> {
        Ok(sqlx::query_as::<_, ActivityEntry>(
            r#"
            SELECT id, uuid, activity, activity_date
            FROM user_activity_history
            WHERE uuid = $1 AND activity_date >= $2
            ORDER BY activity_date DESC, id DESC
            LIMIT $3
            "#,
        )
        .bind(uuid)
        .bind(since)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
