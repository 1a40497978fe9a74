//! Flat-file subscription persistence
//!
//! Subscriptions are appended to a JSON-lines file and read back in full
//! on every lookup. Duplicates are permitted and there is no index; the
//! file is the entire data structure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shiptrack_common::Result;
use std::io::Write;
use std::path::PathBuf;
use tokio::sync::Mutex;
use tracing::warn;

/// One subscription line: order id + email + timestamp
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    #[serde(rename = "orderId")]
    pub order_id: String,
    pub email: String,
    #[serde(rename = "subscribedAt")]
    pub subscribed_at: DateTime<Utc>,
}

/// JSON-lines subscription store
///
/// The mutex serializes writers so concurrent subscribes cannot interleave
/// partial lines; reads take the same lock for a consistent snapshot.
pub struct SubscriptionStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl SubscriptionStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
        }
    }

    /// Append one subscription record. Duplicates are allowed.
    pub async fn append(&self, order_id: &str, email: &str) -> Result<Subscription> {
        let record = Subscription {
            order_id: order_id.to_string(),
            email: email.to_string(),
            subscribed_at: Utc::now(),
        };
        let line = serde_json::to_string(&record)
            .map_err(|e| shiptrack_common::Error::Internal(e.to_string()))?;

        let _guard = self.lock.lock().await;
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", line)?;

        Ok(record)
    }

    /// Read every subscription from the file. Malformed lines are skipped
    /// with a warning rather than failing the lookup.
    pub async fn all(&self) -> Result<Vec<Subscription>> {
        let _guard = self.lock.lock().await;
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut records = Vec::new();
        for line in content.lines() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<Subscription>(line) {
                Ok(record) => records.push(record),
                Err(e) => warn!("Skipping malformed subscription line: {}", e),
            }
        }
        Ok(records)
    }

    /// All subscriber emails for one order, duplicates included
    pub async fn subscribers_for(&self, order_id: &str) -> Result<Vec<String>> {
        Ok(self
            .all()
            .await?
            .into_iter()
            .filter(|s| s.order_id == order_id)
            .map(|s| s.email)
            .collect())
    }

    /// Total record count, for the analytics endpoint
    pub async fn count(&self) -> Result<usize> {
        Ok(self.all().await?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> SubscriptionStore {
        SubscriptionStore::new(dir.path().join("subscriptions.jsonl"))
    }

    #[tokio::test]
    async fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(store.all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn append_then_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.append("ORD1001", "a@example.com").await.unwrap();
        let records = store.all().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].order_id, "ORD1001");
        assert_eq!(records[0].email, "a@example.com");
    }

    #[tokio::test]
    async fn duplicate_subscriptions_append_two_records() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.append("ORD1001", "a@example.com").await.unwrap();
        store.append("ORD1001", "a@example.com").await.unwrap();

        assert_eq!(store.count().await.unwrap(), 2);
        let subs = store.subscribers_for("ORD1001").await.unwrap();
        assert_eq!(subs, vec!["a@example.com", "a@example.com"]);
    }

    #[tokio::test]
    async fn subscribers_filtered_by_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.append("ORD1001", "a@example.com").await.unwrap();
        store.append("ORD1002", "b@example.com").await.unwrap();

        let subs = store.subscribers_for("ORD1002").await.unwrap();
        assert_eq!(subs, vec!["b@example.com"]);
    }

    #[tokio::test]
    async fn malformed_lines_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("subscriptions.jsonl");
        std::fs::write(&path, "not json\n").unwrap();
        let store = SubscriptionStore::new(path);
        store.append("ORD1001", "a@example.com").await.unwrap();
        assert_eq!(store.count().await.unwrap(), 1);
    }
}
