use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Community board post. `likes` is always derived from `liked_by` - the like
/// relation is the single source of truth, so the counter cannot drift.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommunityPost {
    pub id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub tags: Vec<String>,
    pub likes: u64,
    pub liked_by: Vec<Uuid>,
    pub comments: Vec<Comment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CommunityPost {
    /// Create a new post with no likes or comments.
    pub fn new(user_id: Uuid, content: String, tags: Vec<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            content,
            tags,
            likes: 0,
            liked_by: Vec::new(),
            comments: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// A comment on a community post. Deletion is restricted to the author.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(post_id: Uuid, user_id: Uuid, content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            post_id,
            user_id,
            content,
            created_at: Utc::now(),
        }
    }
}

/// Result of a like toggle, returned to the client so its optimistic update
/// can reconcile against the authoritative count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikeState {
    pub liked: bool,
    pub likes: u64,
}
