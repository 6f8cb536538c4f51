use anyhow::Result;
use chrono::Utc;

use quill_auth::password;
use quill_types::models::{ContentItem, User};

use crate::JsonStore;

pub const DEFAULT_ADMIN_ID: &str = "admin-id";
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Seed both collections with their bootstrap records. Each file is only
/// written if it does not exist yet, so this is safe to run on every start.
pub async fn seed_defaults(store: &JsonStore) -> Result<()> {
    let admin = User {
        id: DEFAULT_ADMIN_ID.to_string(),
        username: DEFAULT_ADMIN_USERNAME.to_string(),
        password_hash: password::hash(DEFAULT_ADMIN_PASSWORD)?,
        created_at: Utc::now(),
    };
    store.users.seed_if_missing(vec![admin]).await?;

    let welcome = ContentItem {
        id: "welcome-id".to_string(),
        title: "Welcome".to_string(),
        content: "This is the first post.".to_string(),
        author: DEFAULT_ADMIN_USERNAME.to_string(),
        user_id: DEFAULT_ADMIN_ID.to_string(),
        date: Utc::now(),
    };
    store.content.seed_if_missing(vec![welcome]).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn seeds_admin_and_welcome_post() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::open(dir.path()).await.unwrap();
        seed_defaults(&store).await.unwrap();

        let users = store.users.load().await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].username, DEFAULT_ADMIN_USERNAME);
        assert!(password::verify(DEFAULT_ADMIN_PASSWORD, &users[0].password_hash));

        let content = store.content.load().await.unwrap();
        assert_eq!(content.len(), 1);
        assert_eq!(content[0].user_id, users[0].id);
    }

    #[tokio::test]
    async fn reseeding_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::open(dir.path()).await.unwrap();
        seed_defaults(&store).await.unwrap();
        let before = store.users.load().await.unwrap()[0].password_hash.clone();

        seed_defaults(&store).await.unwrap();
        let after = store.users.load().await.unwrap()[0].password_hash.clone();
        assert_eq!(before, after);
    }
}
