use redis::{AsyncCommands, Client};
use serde::{de::DeserializeOwned, Serialize};

#[derive(Clone)]
pub struct RedisService {
    client: Client,
}

impl RedisService {
    pub fn new(redis_url: &str) -> Result<Self, String> {
        let client = Client::open(redis_url).map_err(|e| format!("Invalid Redis URL: {}", e))?;
        Ok(Self { client })
    }

    pub async fn check_connection(&self) -> Result<(), String> {
        let mut con = self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| e.to_string())?;

        let _: () = con.set("geoblog_health_check", "ok").await.map_err(|e| e.to_string())?;
        Ok(())
    }

    /// Stores `value` as JSON under `key`, expiring after `expire_secs`.
    pub async fn set<V: Serialize>(&self, key: &str, value: &V, expire_secs: u64) -> Result<(), String> {
        let mut con = self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| e.to_string())?;

        let json = serde_json::to_string(value).map_err(|e| e.to_string())?;

        let _: () = con.set_ex(key, json, expire_secs).await.map_err(|e| e.to_string())?;
        Ok(())
    }

    /// `Ok(None)` on a miss; `Err` when Redis is unreachable or the value is not valid JSON for `V`.
    pub async fn get<V: DeserializeOwned>(&self, key: &str) -> Result<Option<V>, String> {
        let mut con = self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| e.to_string())?;

        let result: Option<String> = con.get(key).await.map_err(|e| e.to_string())?;

        match result {
            Some(json) => serde_json::from_str(&json).map(Some).map_err(|e| e.to_string()),
            None => Ok(None),
        }
    }
}
