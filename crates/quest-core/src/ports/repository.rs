use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Comment, CommunityPost, Interview, LikeState, User};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an entity (create or update).
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with matching-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    /// Find a user holding the given email verification token.
    async fn find_by_verify_token(&self, token: &str) -> Result<Option<User>, RepoError>;

    /// Find one other user who is flagged eligible and whose teach/learn
    /// skills complement the caller's. Eligibility is the flag alone; the
    /// skill check is `User::is_complementary_with`.
    async fn find_match_candidate(&self, caller: &User) -> Result<Option<User>, RepoError>;

    /// Atomically clear `is_finding_match` on both users, succeeding only if
    /// both flags were still set. Returns false when a concurrent caller
    /// already claimed either party.
    async fn claim_match(&self, first: Uuid, second: Uuid) -> Result<bool, RepoError>;
}

/// Community post repository. Posts aggregate their like set and comments.
#[async_trait]
pub trait PostRepository: BaseRepository<CommunityPost, Uuid> {
    /// List posts, newest first.
    async fn list_recent(&self) -> Result<Vec<CommunityPost>, RepoError>;

    /// Flip the caller's membership in the post's like set and return the
    /// resulting state with the derived count.
    async fn toggle_like(&self, post_id: Uuid, user_id: Uuid) -> Result<LikeState, RepoError>;

    /// Append a comment to a post.
    async fn add_comment(&self, comment: Comment) -> Result<Comment, RepoError>;

    /// Look up a single comment.
    async fn find_comment(&self, comment_id: Uuid) -> Result<Option<Comment>, RepoError>;

    /// Delete a comment. Authorization is the caller's concern.
    async fn delete_comment(&self, comment_id: Uuid) -> Result<(), RepoError>;
}

/// Interview repository.
#[async_trait]
pub trait InterviewRepository: BaseRepository<Interview, Uuid> {
    /// List a user's interviews, newest first.
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<Interview>, RepoError>;
}
