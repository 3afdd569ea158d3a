//! In-memory repository implementations - used when `DATABASE_URL` is not
//! set, and as the backing store for the handler test suite. Data is lost on
//! process restart.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use quest_core::domain::{Comment, CommunityPost, Interview, LikeState, User};
use quest_core::error::RepoError;
use quest_core::ports::{
    BaseRepository, InterviewRepository, PostRepository, UserRepository,
};

/// In-memory user store behind an async RwLock.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn save(&self, user: User) -> Result<User, RepoError> {
        self.users.write().await.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        match self.users.write().await.remove(&id) {
            Some(_) => Ok(()),
            None => Err(RepoError::NotFound),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_verify_token(&self, token: &str) -> Result<Option<User>, RepoError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.verify_token.as_deref() == Some(token))
            .cloned())
    }

    async fn find_match_candidate(&self, caller: &User) -> Result<Option<User>, RepoError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|candidate| {
                candidate.id != caller.id
                    && candidate.is_finding_match
                    && caller.is_complementary_with(candidate)
            })
            .cloned())
    }

    async fn claim_match(&self, first: Uuid, second: Uuid) -> Result<bool, RepoError> {
        // The single write lock makes the check-and-flip atomic in-process.
        let mut users = self.users.write().await;

        let both_flagged = users.get(&first).is_some_and(|u| u.is_finding_match)
            && users.get(&second).is_some_and(|u| u.is_finding_match);
        if !both_flagged {
            return Ok(false);
        }

        for id in [first, second] {
            if let Some(user) = users.get_mut(&id) {
                user.is_finding_match = false;
                user.updated_at = Utc::now();
            }
        }
        Ok(true)
    }
}

/// In-memory community post store. The post aggregate keeps its like set and
/// comments inline; the like count is always `liked_by.len()`.
#[derive(Default)]
pub struct InMemoryPostRepository {
    posts: RwLock<HashMap<Uuid, CommunityPost>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<CommunityPost, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<CommunityPost>, RepoError> {
        Ok(self.posts.read().await.get(&id).cloned())
    }

    async fn save(&self, post: CommunityPost) -> Result<CommunityPost, RepoError> {
        self.posts.write().await.insert(post.id, post.clone());
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        match self.posts.write().await.remove(&id) {
            Some(_) => Ok(()),
            None => Err(RepoError::NotFound),
        }
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list_recent(&self) -> Result<Vec<CommunityPost>, RepoError> {
        let mut posts: Vec<CommunityPost> = self.posts.read().await.values().cloned().collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }

    async fn toggle_like(&self, post_id: Uuid, user_id: Uuid) -> Result<LikeState, RepoError> {
        let mut posts = self.posts.write().await;
        let post = posts.get_mut(&post_id).ok_or(RepoError::NotFound)?;

        let liked = match post.liked_by.iter().position(|id| *id == user_id) {
            Some(pos) => {
                post.liked_by.remove(pos);
                false
            }
            None => {
                post.liked_by.push(user_id);
                true
            }
        };
        post.likes = post.liked_by.len() as u64;
        post.updated_at = Utc::now();

        Ok(LikeState {
            liked,
            likes: post.likes,
        })
    }

    async fn add_comment(&self, comment: Comment) -> Result<Comment, RepoError> {
        let mut posts = self.posts.write().await;
        let post = posts.get_mut(&comment.post_id).ok_or(RepoError::NotFound)?;

        // Newest first, matching the display order clients expect.
        post.comments.insert(0, comment.clone());
        post.updated_at = Utc::now();
        Ok(comment)
    }

    async fn find_comment(&self, comment_id: Uuid) -> Result<Option<Comment>, RepoError> {
        Ok(self
            .posts
            .read()
            .await
            .values()
            .flat_map(|p| p.comments.iter())
            .find(|c| c.id == comment_id)
            .cloned())
    }

    async fn delete_comment(&self, comment_id: Uuid) -> Result<(), RepoError> {
        let mut posts = self.posts.write().await;
        for post in posts.values_mut() {
            if let Some(pos) = post.comments.iter().position(|c| c.id == comment_id) {
                post.comments.remove(pos);
                post.updated_at = Utc::now();
                return Ok(());
            }
        }
        Err(RepoError::NotFound)
    }
}

/// In-memory interview store.
#[derive(Default)]
pub struct InMemoryInterviewRepository {
    interviews: RwLock<HashMap<Uuid, Interview>>,
}

impl InMemoryInterviewRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<Interview, Uuid> for InMemoryInterviewRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Interview>, RepoError> {
        Ok(self.interviews.read().await.get(&id).cloned())
    }

    async fn save(&self, interview: Interview) -> Result<Interview, RepoError> {
        self.interviews
            .write()
            .await
            .insert(interview.id, interview.clone());
        Ok(interview)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        match self.interviews.write().await.remove(&id) {
            Some(_) => Ok(()),
            None => Err(RepoError::NotFound),
        }
    }
}

#[async_trait]
impl InterviewRepository for InMemoryInterviewRepository {
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<Interview>, RepoError> {
        let mut interviews: Vec<Interview> = self
            .interviews
            .read()
            .await
            .values()
            .filter(|i| i.user_id == user_id)
            .cloned()
            .collect();
        interviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(interviews)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flagged_user(teach: &str, learning: &str) -> User {
        let mut user = User::new(
            format!("user-{teach}"),
            format!("{teach}@example.com"),
            "hash".to_string(),
        );
        user.skills_to_teach = vec![teach.to_string()];
        user.currently_learning = Some(learning.to_string());
        user.is_finding_match = true;
        user
    }

    #[tokio::test]
    async fn double_like_restores_original_count() {
        let repo = InMemoryPostRepository::new();
        let post = CommunityPost::new(Uuid::new_v4(), "hello".to_string(), vec![]);
        let post_id = post.id;
        repo.save(post).await.unwrap();

        let liker = Uuid::new_v4();
        let first = repo.toggle_like(post_id, liker).await.unwrap();
        assert!(first.liked);
        assert_eq!(first.likes, 1);

        let second = repo.toggle_like(post_id, liker).await.unwrap();
        assert!(!second.liked);
        assert_eq!(second.likes, 0);
    }

    #[tokio::test]
    async fn unflagged_user_is_not_a_candidate() {
        let repo = InMemoryUserRepository::new();
        let caller = flagged_user("React", "Python");
        let mut candidate = flagged_user("Python", "React");
        candidate.is_finding_match = false;
        repo.save(caller.clone()).await.unwrap();
        repo.save(candidate).await.unwrap();

        assert!(repo.find_match_candidate(&caller).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn claim_match_is_single_shot() {
        let repo = InMemoryUserRepository::new();
        let a = flagged_user("React", "Python");
        let b = flagged_user("Python", "React");
        repo.save(a.clone()).await.unwrap();
        repo.save(b.clone()).await.unwrap();

        assert!(repo.claim_match(a.id, b.id).await.unwrap());
        // A second claim must lose: both flags are already cleared.
        assert!(!repo.claim_match(a.id, b.id).await.unwrap());

        let a_after = repo.find_by_id(a.id).await.unwrap().unwrap();
        let b_after = repo.find_by_id(b.id).await.unwrap().unwrap();
        assert!(!a_after.is_finding_match);
        assert!(!b_after.is_finding_match);
    }

    #[tokio::test]
    async fn deleted_comment_leaves_others_in_place() {
        let repo = InMemoryPostRepository::new();
        let post = CommunityPost::new(Uuid::new_v4(), "post".to_string(), vec![]);
        let post_id = post.id;
        repo.save(post).await.unwrap();

        let keep = Comment::new(post_id, Uuid::new_v4(), "keep me".to_string());
        let removed = Comment::new(post_id, Uuid::new_v4(), "drop me".to_string());
        repo.add_comment(keep.clone()).await.unwrap();
        repo.add_comment(removed.clone()).await.unwrap();

        repo.delete_comment(removed.id).await.unwrap();

        let after = repo.find_by_id(post_id).await.unwrap().unwrap();
        assert_eq!(after.comments.len(), 1);
        assert_eq!(after.comments[0].id, keep.id);
    }
}
