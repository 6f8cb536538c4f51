pub mod bootstrap;

use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::fs;
use tokio::sync::{Mutex, MutexGuard};
use tracing::info;

use quill_types::models::{ContentItem, User};

/// One JSON-array-backed record set on disk.
///
/// Every read is whole-document and every write rewrites the whole
/// document, so the only safe mutation is lock -> load -> mutate -> save
/// with the guard held across the entire sequence. The lock serializes
/// writers within this process; multi-process deployments are out of scope.
pub struct Collection<T> {
    path: PathBuf,
    lock: Mutex<()>,
    _marker: PhantomData<T>,
}

impl<T> Collection<T>
where
    T: Serialize + DeserializeOwned,
{
    fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
            _marker: PhantomData,
        }
    }

    /// Acquire the collection's mutation guard. Hold it across the whole
    /// load/mutate/save sequence; plain reads may skip it.
    pub async fn lock(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().await
    }

    /// Parse the whole on-disk array, in stored order.
    pub async fn load(&self) -> Result<Vec<T>> {
        let bytes = fs::read(&self.path)
            .await
            .with_context(|| format!("reading {}", self.path.display()))?;
        let records = serde_json::from_slice(&bytes)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        Ok(records)
    }

    /// Rewrite the whole array, pretty-printed.
    ///
    /// Writes to a sibling `.tmp` file and renames it into place so a crash
    /// mid-write leaves the previous document intact rather than a torn one.
    pub async fn save(&self, records: &[T]) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(records)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, &bytes)
            .await
            .with_context(|| format!("writing {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .await
            .with_context(|| format!("replacing {}", self.path.display()))?;
        Ok(())
    }

    /// Write the bootstrap records, but only if the file does not exist yet.
    pub async fn seed_if_missing(&self, records: Vec<T>) -> Result<()> {
        if fs::try_exists(&self.path).await? {
            return Ok(());
        }
        self.save(&records).await?;
        info!(
            "Seeded {} with {} bootstrap record(s)",
            self.path.display(),
            records.len()
        );
        Ok(())
    }
}

/// The two flat-file collections that make up all persistent state.
pub struct JsonStore {
    pub users: Collection<User>,
    pub content: Collection<ContentItem>,
}

impl JsonStore {
    /// Open (creating if needed) the data directory and bind both
    /// collections. Files themselves are created lazily by seeding.
    pub async fn open(data_dir: &Path) -> Result<Self> {
        fs::create_dir_all(data_dir)
            .await
            .with_context(|| format!("creating data dir {}", data_dir.display()))?;
        info!("Data directory: {}", data_dir.display());
        Ok(Self {
            users: Collection::new(data_dir.join("users.json")),
            content: Collection::new(data_dir.join("content.json")),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user(id: &str, username: &str) -> User {
        User {
            id: id.to_string(),
            username: username.to_string(),
            password_hash: "$argon2id$stub".to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn save_then_load_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::open(dir.path()).await.unwrap();

        let records = vec![user("1", "alice"), user("2", "bob"), user("3", "carol")];
        store.users.save(&records).await.unwrap();

        let loaded = store.users.load().await.unwrap();
        let names: Vec<_> = loaded.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, ["alice", "bob", "carol"]);
    }

    #[tokio::test]
    async fn seed_only_when_file_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::open(dir.path()).await.unwrap();

        store
            .users
            .seed_if_missing(vec![user("admin-id", "admin")])
            .await
            .unwrap();
        assert_eq!(store.users.load().await.unwrap().len(), 1);

        // A later seed must not clobber accumulated data.
        let mut users = store.users.load().await.unwrap();
        users.push(user("2", "bob"));
        store.users.save(&users).await.unwrap();

        store
            .users
            .seed_if_missing(vec![user("admin-id", "admin")])
            .await
            .unwrap();
        assert_eq!(store.users.load().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn load_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::open(dir.path()).await.unwrap();
        assert!(store.users.load().await.is_err());
    }

    #[tokio::test]
    async fn save_is_pretty_printed_and_leaves_no_tmp_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::open(dir.path()).await.unwrap();
        store.users.save(&[user("1", "alice")]).await.unwrap();

        let text = std::fs::read_to_string(dir.path().join("users.json")).unwrap();
        assert!(text.contains('\n'), "expected pretty-printed output");
        assert!(!dir.path().join("users.json.tmp").exists());
    }

    #[tokio::test]
    async fn collections_are_independent() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::open(dir.path()).await.unwrap();
        store.users.save(&[user("1", "alice")]).await.unwrap();

        // content.json was never written
        assert!(store.content.load().await.is_err());
    }
}
