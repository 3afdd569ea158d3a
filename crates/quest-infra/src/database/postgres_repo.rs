//! PostgreSQL repository implementations.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, DbErr, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use quest_core::domain::{Comment, CommunityPost, LikeState, User};
use quest_core::error::RepoError;
use quest_core::ports::{BaseRepository, InterviewRepository, PostRepository, UserRepository};

use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::interview::{self, Entity as InterviewEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::post_like::{self, Entity as PostLikeEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::PostgresBaseRepository;
use crate::mask_email;

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL interview repository.
pub type PostgresInterviewRepository = PostgresBaseRepository<InterviewEntity>;

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(user_email = %mask_email(email), "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }

    async fn find_by_verify_token(&self, token: &str) -> Result<Option<User>, RepoError> {
        let result = UserEntity::find()
            .filter(user::Column::VerifyToken.eq(token))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }

    async fn find_match_candidate(&self, caller: &User) -> Result<Option<User>, RepoError> {
        // Eligibility is a single flag filter; the complementary-skill check
        // runs over the (small) eligible set in memory.
        let eligible = UserEntity::find()
            .filter(user::Column::IsFindingMatch.eq(true))
            .filter(user::Column::Id.ne(caller.id))
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(eligible
            .into_iter()
            .map(User::from)
            .find(|candidate| caller.is_complementary_with(candidate)))
    }

    async fn claim_match(&self, first: Uuid, second: Uuid) -> Result<bool, RepoError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| RepoError::Connection(e.to_string()))?;

        // Conditional flip: only rows whose flag is still set are touched.
        // Anything other than two updated rows means a concurrent caller got
        // there first, and the claim is abandoned.
        let result = UserEntity::update_many()
            .col_expr(user::Column::IsFindingMatch, Expr::value(false))
            .col_expr(
                user::Column::UpdatedAt,
                Expr::value(Utc::now().fixed_offset()),
            )
            .filter(user::Column::Id.is_in([first, second]))
            .filter(user::Column::IsFindingMatch.eq(true))
            .exec(&txn)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        if result.rows_affected == 2 {
            txn.commit()
                .await
                .map_err(|e| RepoError::Query(e.to_string()))?;
            Ok(true)
        } else {
            txn.rollback()
                .await
                .map_err(|e| RepoError::Query(e.to_string()))?;
            tracing::debug!(
                rows = result.rows_affected,
                "Match claim lost to a concurrent caller"
            );
            Ok(false)
        }
    }
}

#[async_trait]
impl InterviewRepository for PostgresInterviewRepository {
    async fn find_by_user_id(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<quest_core::domain::Interview>, RepoError> {
        let result = InterviewEntity::find()
            .filter(interview::Column::UserId.eq(user_id))
            .order_by_desc(interview::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

/// PostgreSQL community post repository. Posts are aggregates over three
/// tables (posts, post_likes, comments); the like count is always derived
/// from the like rows.
pub struct PostgresPostRepository {
    db: DbConn,
}

impl PostgresPostRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    fn assemble(model: post::Model, liked_by: Vec<Uuid>, comments: Vec<Comment>) -> CommunityPost {
        CommunityPost {
            id: model.id,
            user_id: model.user_id,
            content: model.content,
            tags: serde_json::from_value(model.tags).unwrap_or_default(),
            likes: liked_by.len() as u64,
            liked_by,
            comments,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

#[async_trait]
impl BaseRepository<CommunityPost, Uuid> for PostgresPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<CommunityPost>, RepoError> {
        let Some(model) = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?
        else {
            return Ok(None);
        };

        let liked_by = PostLikeEntity::find()
            .filter(post_like::Column::PostId.eq(id))
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?
            .into_iter()
            .map(|row| row.user_id)
            .collect();

        let comments = CommentEntity::find()
            .filter(comment::Column::PostId.eq(id))
            .order_by_desc(comment::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok(Some(Self::assemble(model, liked_by, comments)))
    }

    async fn save(&self, entity: CommunityPost) -> Result<CommunityPost, RepoError> {
        let returned = entity.clone();
        let active_model: post::ActiveModel = entity.into();

        match active_model.clone().update(&self.db).await {
            Ok(_) => {}
            Err(DbErr::RecordNotUpdated) => {
                active_model
                    .insert(&self.db)
                    .await
                    .map_err(|e| RepoError::Query(e.to_string()))?;
            }
            Err(e) => return Err(RepoError::Query(e.to_string())),
        }

        Ok(returned)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let result = PostEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn list_recent(&self) -> Result<Vec<CommunityPost>, RepoError> {
        let posts = PostEntity::find()
            .order_by_desc(post::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        let ids: Vec<Uuid> = posts.iter().map(|p| p.id).collect();

        let mut likes_by_post: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        for row in PostLikeEntity::find()
            .filter(post_like::Column::PostId.is_in(ids.clone()))
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?
        {
            likes_by_post.entry(row.post_id).or_default().push(row.user_id);
        }

        let mut comments_by_post: HashMap<Uuid, Vec<Comment>> = HashMap::new();
        for row in CommentEntity::find()
            .filter(comment::Column::PostId.is_in(ids))
            .order_by_desc(comment::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?
        {
            comments_by_post
                .entry(row.post_id)
                .or_default()
                .push(row.into());
        }

        Ok(posts
            .into_iter()
            .map(|model| {
                let liked_by = likes_by_post.remove(&model.id).unwrap_or_default();
                let comments = comments_by_post.remove(&model.id).unwrap_or_default();
                Self::assemble(model, liked_by, comments)
            })
            .collect())
    }

    async fn toggle_like(&self, post_id: Uuid, user_id: Uuid) -> Result<LikeState, RepoError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| RepoError::Connection(e.to_string()))?;

        if PostEntity::find_by_id(post_id)
            .one(&txn)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?
            .is_none()
        {
            return Err(RepoError::NotFound);
        }

        let existing = PostLikeEntity::find_by_id((post_id, user_id))
            .one(&txn)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        let liked = match existing {
            Some(row) => {
                row.delete(&txn)
                    .await
                    .map_err(|e| RepoError::Query(e.to_string()))?;
                false
            }
            None => {
                post_like::ActiveModel {
                    post_id: Set(post_id),
                    user_id: Set(user_id),
                    created_at: Set(Utc::now().into()),
                }
                .insert(&txn)
                .await
                .map_err(|e| RepoError::Query(e.to_string()))?;
                true
            }
        };

        let likes = PostLikeEntity::find()
            .filter(post_like::Column::PostId.eq(post_id))
            .count(&txn)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(LikeState { liked, likes })
    }

    async fn add_comment(&self, new_comment: Comment) -> Result<Comment, RepoError> {
        if PostEntity::find_by_id(new_comment.post_id)
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?
            .is_none()
        {
            return Err(RepoError::NotFound);
        }

        let returned = new_comment.clone();
        let active_model: comment::ActiveModel = new_comment.into();
        active_model
            .insert(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(returned)
    }

    async fn find_comment(&self, comment_id: Uuid) -> Result<Option<Comment>, RepoError> {
        let result = CommentEntity::find_by_id(comment_id)
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }

    async fn delete_comment(&self, comment_id: Uuid) -> Result<(), RepoError> {
        let result = CommentEntity::delete_by_id(comment_id)
            .exec(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}
