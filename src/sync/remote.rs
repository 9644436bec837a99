//! Remote task service contract and HTTP implementation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

use super::error::RemoteError;

/// A task as mirrored remotely, uniquely keyed by `(task_id, user_id)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteRecord {
    pub task_id: String,
    pub user_id: String,
    /// The task's full field set, as serialized by the local store
    pub data: Value,
    pub synced_at: DateTime<Utc>,
}

/// One bucket of the remote status aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCount {
    pub status: String,
    pub count: u64,
}

/// Summary the service reports about itself, used by the health probe.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RemoteInfo {
    #[serde(default)]
    pub documents: u64,
}

/// The remote task service. Writes are serialized per record by the
/// service itself; a crash mid-batch leaves partial remote state.
#[allow(async_fn_in_trait)]
pub trait RemoteStore {
    async fn ping(&self) -> Result<(), RemoteError>;

    async fn upsert(&self, record: &RemoteRecord) -> Result<(), RemoteError>;

    async fn fetch_all(&self, user_id: &str) -> Result<Vec<RemoteRecord>, RemoteError>;

    /// Returns the number of records removed.
    async fn delete_one(&self, task_id: &str, user_id: &str) -> Result<u64, RemoteError>;

    async fn aggregate_by_status(&self, user_id: &str) -> Result<Vec<StatusCount>, RemoteError>;

    async fn search(&self, query: &str, user_id: &str) -> Result<Vec<RemoteRecord>, RemoteError>;

    async fn info(&self) -> Result<RemoteInfo, RemoteError>;
}

/// REST client for the hosted task service.
pub struct HttpRemoteStore {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Deserialize)]
struct DeleteResponse {
    deleted: u64,
}

impl HttpRemoteStore {
    /// Build a client with a fixed connect/request timeout. `bearer_token`
    /// comes from the identity provider when the user is authenticated.
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        bearer_token: Option<&str>,
    ) -> Result<Self, RemoteError> {
        let mut headers = reqwest::header::HeaderMap::new();
        if let Some(token) = bearer_token {
            let value = format!("Bearer {}", token);
            if let Ok(value) = reqwest::header::HeaderValue::from_str(&value) {
                headers.insert(reqwest::header::AUTHORIZATION, value);
            }
        }

        let client = reqwest::Client::builder()
            .user_agent(concat!("task-reminder/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn check(response: reqwest::Response) -> Result<reqwest::Response, RemoteError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(RemoteError::Status(response.status()))
        }
    }
}

impl RemoteStore for HttpRemoteStore {
    async fn ping(&self) -> Result<(), RemoteError> {
        let response = self.client.get(self.url("/api/health")).send().await?;
        Self::check(response)?;
        Ok(())
    }

    async fn upsert(&self, record: &RemoteRecord) -> Result<(), RemoteError> {
        let response = self
            .client
            .put(self.url(&format!("/api/tasks/{}", record.task_id)))
            .query(&[("user_id", record.user_id.as_str())])
            .json(record)
            .send()
            .await?;
        Self::check(response)?;
        Ok(())
    }

    async fn fetch_all(&self, user_id: &str) -> Result<Vec<RemoteRecord>, RemoteError> {
        let response = self
            .client
            .get(self.url("/api/tasks"))
            .query(&[("user_id", user_id)])
            .send()
            .await?;
        Ok(Self::check(response)?.json().await?)
    }

    async fn delete_one(&self, task_id: &str, user_id: &str) -> Result<u64, RemoteError> {
        let response = self
            .client
            .delete(self.url(&format!("/api/tasks/{}", task_id)))
            .query(&[("user_id", user_id)])
            .send()
            .await?;
        let body: DeleteResponse = Self::check(response)?.json().await?;
        Ok(body.deleted)
    }

    async fn aggregate_by_status(&self, user_id: &str) -> Result<Vec<StatusCount>, RemoteError> {
        let response = self
            .client
            .get(self.url("/api/tasks/stats"))
            .query(&[("user_id", user_id)])
            .send()
            .await?;
        Ok(Self::check(response)?.json().await?)
    }

    async fn search(&self, query: &str, user_id: &str) -> Result<Vec<RemoteRecord>, RemoteError> {
        let response = self
            .client
            .get(self.url("/api/tasks/search"))
            .query(&[("user_id", user_id), ("q", query)])
            .send()
            .await?;
        Ok(Self::check(response)?.json().await?)
    }

    async fn info(&self) -> Result<RemoteInfo, RemoteError> {
        let response = self.client.get(self.url("/api/health")).send().await?;
        Ok(Self::check(response)?.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_stripped() {
        let remote =
            HttpRemoteStore::new("http://localhost:8000/", Duration::from_secs(5), None).unwrap();
        assert_eq!(remote.base_url(), "http://localhost:8000");
        assert_eq!(remote.url("/api/tasks"), "http://localhost:8000/api/tasks");
    }

    #[test]
    fn test_record_round_trip() {
        let record = RemoteRecord {
            task_id: "7".to_string(),
            user_id: "u1".to_string(),
            data: serde_json::json!({"title": "X", "status": "pending"}),
            synced_at: Utc::now(),
        };
        let json = serde_json::to_string(&record).unwrap();
        let back: RemoteRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.task_id, record.task_id);
        assert_eq!(back.user_id, record.user_id);
        assert_eq!(back.data, record.data);
        assert_eq!(back.synced_at, record.synced_at);
    }
}
