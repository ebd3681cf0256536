use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands, Client};
use std::time::Duration;

use super::Cache;

/// Redis-backed cache sharing one multiplexed connection
#[derive(Clone)]
pub struct RedisCache {
    connection: ConnectionManager,
}

impl RedisCache {
    pub async fn connect(redis_url: &str) -> anyhow::Result<Self> {
        tracing::info!("Connecting to Redis...");

        let client = Client::open(redis_url)?;
        let connection = client.get_connection_manager().await?;

        tracing::info!("Redis connection established");

        Ok(Self { connection })
    }
}

#[async_trait]
impl Cache for RedisCache {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        let mut connection = self.connection.clone();
        let value: Option<String> = connection.get(key).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> anyhow::Result<()> {
        let mut connection = self.connection.clone();
        // SETEX rejects a zero expiry
        let seconds = ttl.as_secs().max(1);
        connection.set_ex::<_, _, ()>(key, value, seconds).await?;
        Ok(())
    }
}
