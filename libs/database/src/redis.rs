use redis::Client;
use redis::aio::ConnectionManager;
use tracing::info;

use crate::error::{DatabaseError, DatabaseResult};
use crate::retry::{RetryPolicy, retry_with_backoff};

/// Open a reconnecting connection and confirm it with PING
pub async fn connect(url: &str) -> redis::RedisResult<ConnectionManager> {
    let client = Client::open(url)?;
    let manager = ConnectionManager::new(client).await?;

    let mut conn = manager.clone();
    let _: String = redis::cmd("PING").query_async(&mut conn).await?;

    info!("Connected to Redis");
    Ok(manager)
}

pub async fn connect_with_retry(url: &str, policy: RetryPolicy) -> DatabaseResult<ConnectionManager> {
    let manager = retry_with_backoff(|| connect(url), &policy).await?;
    Ok(manager)
}

pub async fn check_health(manager: &ConnectionManager) -> DatabaseResult<()> {
    let mut conn = manager.clone();
    let reply: String = redis::cmd("PING")
        .query_async(&mut conn)
        .await
        .map_err(|e| DatabaseError::HealthCheckFailed(format!("Redis: {}", e)))?;

    if reply == "PONG" {
        Ok(())
    } else {
        Err(DatabaseError::HealthCheckFailed(format!(
            "Redis: unexpected PING reply '{}'",
            reply
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_rejects_malformed_url() {
        assert!(connect("not-a-redis-url").await.is_err());
    }

    #[tokio::test]
    #[ignore = "requires a running Redis at REDIS_URL"]
    async fn test_connect_and_ping() {
        let url = std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".into());
        let manager = connect(&url).await.unwrap();
        check_health(&manager).await.unwrap();
    }
}
