use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered account, one record per line in `users.json`.
///
/// The on-disk field is named `password` for compatibility with existing
/// deployments, but it only ever holds a PHC-format hash string — the
/// plaintext never touches disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(rename = "password")]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// A published item, stored in `content.json`.
///
/// `author` is a display name and is not validated against `username`;
/// `user_id` is the owning account and gates deletion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: String,
    pub title: String,
    pub content: String,
    pub author: String,
    pub user_id: String,
    pub date: DateTime<Utc>,
}
