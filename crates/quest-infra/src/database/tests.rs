#[cfg(test)]
mod tests {
    use crate::database::entity::user;
    use crate::database::postgres_repo::PostgresUserRepository;
    use quest_core::domain::User;
    use quest_core::ports::{BaseRepository, UserRepository};
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn user_row(
        username: &str,
        teach: &[&str],
        learning: Option<&str>,
        finding: bool,
    ) -> user::Model {
        let now = chrono::Utc::now();
        user::Model {
            id: uuid::Uuid::new_v4(),
            username: username.to_owned(),
            email: format!("{username}@example.com"),
            password_hash: "hash".to_owned(),
            rank: "Beginner".to_owned(),
            skills_to_teach: serde_json::json!(teach),
            skills_to_learn: serde_json::json!([]),
            currently_learning: learning.map(String::from),
            is_finding_match: finding,
            is_verified: true,
            verify_token: None,
            verify_token_expires: None,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    #[tokio::test]
    async fn test_find_user_by_id() {
        let row = user_row("mock", &["Rust"], None, false);
        let user_id = row.id;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![row]])
            .into_connection();

        let repo = PostgresUserRepository::new(db);

        let result: Option<User> = repo.find_by_id(user_id).await.unwrap();

        assert!(result.is_some());
        let user = result.unwrap();
        assert_eq!(user.username, "mock");
        assert_eq!(user.skills_to_teach, vec!["Rust".to_string()]);
    }

    #[tokio::test]
    async fn test_candidate_query_filters_complementary_skills() {
        // Both rows come back from the flag filter; only the second is
        // complementary with the caller.
        let one_sided = user_row("onesided", &["Go"], Some("React"), true);
        let complementary = user_row("partner", &["Python"], Some("React"), true);
        let partner_id = complementary.id;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![one_sided, complementary]])
            .into_connection();

        let repo = PostgresUserRepository::new(db);

        let caller: User = user_row("caller", &["React"], Some("Python"), true).into();
        let found = repo.find_match_candidate(&caller).await.unwrap();

        assert_eq!(found.map(|u| u.id), Some(partner_id));
    }
}
