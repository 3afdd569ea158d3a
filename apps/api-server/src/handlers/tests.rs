//! API-contract tests running against the in-memory repositories.

use std::sync::Arc;
use std::time::Duration;

use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use serde_json::{Value, json};

use quest_core::ports::{
    CodeRunner, InterviewGrader, Mailer, PasswordService, RateLimiter, TokenService, VoiceGateway,
};
use quest_infra::auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
use quest_infra::external::{CannedGrader, DisabledCodeRunner, DisabledVoiceGateway, LogMailer};
use quest_infra::rate_limit::{InMemoryRateLimiter, RateLimitConfig};

use crate::handlers::configure_routes;
use crate::state::AppState;

fn test_app() -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    test_app_with_state(AppState::in_memory())
}

fn test_app_with_state(
    state: AppState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let token_service: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(JwtConfig {
        secret: "test-secret".to_string(),
        expiration_hours: 1,
        issuer: "test".to_string(),
    }));
    let password_service: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());
    let mailer: Arc<dyn Mailer> = Arc::new(LogMailer);
    let grader: Arc<dyn InterviewGrader> = Arc::new(CannedGrader::default());
    let code_runner: Arc<dyn CodeRunner> = Arc::new(DisabledCodeRunner);
    let voice_gateway: Arc<dyn VoiceGateway> = Arc::new(DisabledVoiceGateway);
    // Generous budget so tests never trip the limiter.
    let limiter: Arc<dyn RateLimiter> = Arc::new(InMemoryRateLimiter::new(RateLimitConfig {
        max_requests: 10_000,
        window: Duration::from_secs(60),
    }));

    App::new()
        .app_data(web::Data::new(state))
        .app_data(web::Data::new(token_service))
        .app_data(web::Data::new(password_service))
        .app_data(web::Data::new(mailer))
        .app_data(web::Data::new(grader))
        .app_data(web::Data::new(code_runner))
        .app_data(web::Data::new(voice_gateway))
        .configure(|cfg| configure_routes(cfg, limiter))
}

/// Register a user and return their bearer token.
async fn register(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    username: &str,
    email: &str,
) -> String {
    let request = test::TestRequest::post()
        .uri("/api/users/register")
        .set_json(json!({
            "username": username,
            "email": email,
            "password": "correct-horse-battery",
        }))
        .to_request();

    let response = test::call_service(app, request).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(response).await;
    body["data"]["access_token"]
        .as_str()
        .expect("access token in register response")
        .to_string()
}

async fn patch_profile(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    token: &str,
    body: Value,
) -> Value {
    let request = test::TestRequest::patch()
        .uri("/api/users/profile")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(body)
        .to_request();

    let response = test::call_service(app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    test::read_body_json(response).await
}

async fn create_post(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    token: &str,
    content: &str,
) -> Value {
    let request = test::TestRequest::post()
        .uri("/api/community/posts")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({"content": content, "tags": ["rust"]}))
        .to_request();

    let response = test::call_service(app, request).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    test::read_body_json(response).await
}

#[actix_web::test]
async fn health_endpoint_reports_ok() {
    let app = test::init_service(test_app()).await;

    let response =
        test::call_service(&app, test::TestRequest::get().uri("/api/health").to_request()).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["status"], "ok");
}

#[actix_web::test]
async fn register_login_and_profile_roundtrip() {
    let app = test::init_service(test_app()).await;
    let token = register(&app, "alice", "alice@example.com").await;

    let profile = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/users/profile")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request(),
    )
    .await;
    assert_eq!(profile.status(), StatusCode::OK);
    let body: Value = test::read_body_json(profile).await;
    assert_eq!(body["data"]["username"], "alice");
    assert_eq!(body["data"]["rank"], "Beginner");
    assert_eq!(body["data"]["is_verified"], false);

    let login = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/users/login")
            .set_json(json!({
                "email": "alice@example.com",
                "password": "correct-horse-battery",
            }))
            .to_request(),
    )
    .await;
    assert_eq!(login.status(), StatusCode::OK);
    // Login also sets the auth cookie.
    assert!(
        login
            .response()
            .cookies()
            .any(|cookie| cookie.name() == "token")
    );
}

#[actix_web::test]
async fn wrong_password_is_unauthorized() {
    let app = test::init_service(test_app()).await;
    register(&app, "bob", "bob@example.com").await;

    let login = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/users/login")
            .set_json(json!({"email": "bob@example.com", "password": "wrong-password"}))
            .to_request(),
    )
    .await;

    assert_eq!(login.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn duplicate_email_registration_conflicts() {
    let app = test::init_service(test_app()).await;
    register(&app, "carol", "carol@example.com").await;

    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/users/register")
            .set_json(json!({
                "username": "carol2",
                "email": "carol@example.com",
                "password": "another-password",
            }))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn unauthenticated_profile_request_is_rejected() {
    let app = test::init_service(test_app()).await;

    let response = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/users/profile").to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn like_toggle_twice_returns_to_original_state() {
    let app = test::init_service(test_app()).await;
    let token = register(&app, "dave", "dave@example.com").await;
    let post = create_post(&app, &token, "anyone learning Rust?").await;
    let post_id = post["data"]["id"].as_str().unwrap().to_string();

    let like_uri = format!("/api/community/posts/{post_id}/likes");
    let first = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&like_uri)
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request(),
    )
    .await;
    assert_eq!(first.status(), StatusCode::OK);
    let body: Value = test::read_body_json(first).await;
    assert_eq!(body["data"]["liked"], true);
    assert_eq!(body["data"]["likes"], 1);

    let second = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&like_uri)
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request(),
    )
    .await;
    let body: Value = test::read_body_json(second).await;
    assert_eq!(body["data"]["liked"], false);
    assert_eq!(body["data"]["likes"], 0);
}

#[actix_web::test]
async fn non_author_cannot_delete_comment() {
    let app = test::init_service(test_app()).await;
    let author = register(&app, "erin", "erin@example.com").await;
    let other = register(&app, "frank", "frank@example.com").await;

    let post = create_post(&app, &author, "trading React for Python lessons").await;
    let post_id = post["data"]["id"].as_str().unwrap().to_string();

    let comment = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/community/posts/{post_id}/comments"))
            .insert_header(("Authorization", format!("Bearer {author}")))
            .set_json(json!({"content": "still available?"}))
            .to_request(),
    )
    .await;
    assert_eq!(comment.status(), StatusCode::CREATED);
    let comment_body: Value = test::read_body_json(comment).await;
    let comment_id = comment_body["data"]["id"].as_str().unwrap().to_string();

    let deletion = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!(
                "/api/community/posts/{post_id}/comments/{comment_id}"
            ))
            .insert_header(("Authorization", format!("Bearer {other}")))
            .to_request(),
    )
    .await;
    assert_eq!(deletion.status(), StatusCode::FORBIDDEN);

    // The comment is still attached to the post.
    let fetched = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/community/posts/{post_id}"))
            .insert_header(("Authorization", format!("Bearer {author}")))
            .to_request(),
    )
    .await;
    let body: Value = test::read_body_json(fetched).await;
    assert_eq!(body["data"]["comments"].as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn blank_comment_is_rejected() {
    let app = test::init_service(test_app()).await;
    let token = register(&app, "grace", "grace@example.com").await;
    let post = create_post(&app, &token, "tips for the S rank?").await;
    let post_id = post["data"]["id"].as_str().unwrap().to_string();

    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/community/posts/{post_id}/comments"))
            .insert_header(("Authorization", format!("Bearer {token}")))
            .set_json(json!({"content": "   "}))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let fetched = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/community/posts/{post_id}"))
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request(),
    )
    .await;
    let body: Value = test::read_body_json(fetched).await;
    assert!(body["data"]["comments"].as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn match_flow_pairs_complementary_users() {
    let app = test::init_service(test_app()).await;
    let alice = register(&app, "alice", "alice@match.example").await;
    let bob = register(&app, "bob", "bob@match.example").await;

    patch_profile(
        &app,
        &alice,
        json!({
            "skills_to_teach": ["React"],
            "currently_learning": "Python",
            "is_finding_match": true,
        }),
    )
    .await;
    patch_profile(
        &app,
        &bob,
        json!({
            "skills_to_teach": ["Python"],
            "currently_learning": "React",
            "is_finding_match": true,
        }),
    )
    .await;

    let matched = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/matches")
            .insert_header(("Authorization", format!("Bearer {alice}")))
            .to_request(),
    )
    .await;
    assert_eq!(matched.status(), StatusCode::OK);
    let body: Value = test::read_body_json(matched).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["match"]["username"], "bob");

    // Both parties' eligibility flags were cleared by the claim.
    for token in [&alice, &bob] {
        let profile = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/users/profile")
                .insert_header(("Authorization", format!("Bearer {token}")))
                .to_request(),
        )
        .await;
        let body: Value = test::read_body_json(profile).await;
        assert_eq!(body["data"]["is_finding_match"], false);
    }

    // A second attempt fails eligibility: the caller is no longer flagged.
    let again = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/matches")
            .insert_header(("Authorization", format!("Bearer {alice}")))
            .to_request(),
    )
    .await;
    assert_eq!(again.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn match_without_candidates_reports_no_match() {
    let app = test::init_service(test_app()).await;
    let token = register(&app, "solo", "solo@example.com").await;

    patch_profile(
        &app,
        &token,
        json!({
            "skills_to_teach": ["Go"],
            "currently_learning": "Haskell",
            "is_finding_match": true,
        }),
    )
    .await;

    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/matches")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "No match found");
}

#[actix_web::test]
async fn finalize_missing_interview_returns_404() {
    let app = test::init_service(test_app()).await;
    let token = register(&app, "heidi", "heidi@example.com").await;

    let response = test::call_service(
        &app,
        test::TestRequest::patch()
            .uri(&format!(
                "/api/interviews/{}/finalize",
                uuid::Uuid::new_v4()
            ))
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn interview_answer_analyze_finalize_flow() {
    let app = test::init_service(test_app()).await;
    let token = register(&app, "ivan", "ivan@example.com").await;

    let created = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/interviews")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .set_json(json!({
                "role": "Backend Engineer",
                "interview_type": "technical",
                "level": "junior",
            }))
            .to_request(),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(created).await;
    let interview_id = body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["questions"].as_array().unwrap().len(), 5);

    let answered = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/interviews/{interview_id}/answer"))
            .insert_header(("Authorization", format!("Bearer {token}")))
            .set_json(json!({"index": 0, "answer": "I would start by profiling the service."}))
            .to_request(),
    )
    .await;
    assert_eq!(answered.status(), StatusCode::OK);

    let analyzed = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/interviews/{interview_id}/analyze"))
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request(),
    )
    .await;
    assert_eq!(analyzed.status(), StatusCode::OK);
    let body: Value = test::read_body_json(analyzed).await;
    assert_eq!(body["data"]["graded"].as_array().unwrap().len(), 1);

    let finalized = test::call_service(
        &app,
        test::TestRequest::patch()
            .uri(&format!("/api/interviews/{interview_id}/finalize"))
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request(),
    )
    .await;
    assert_eq!(finalized.status(), StatusCode::OK);
    let body: Value = test::read_body_json(finalized).await;
    assert_eq!(body["data"]["finalized"], true);

    // Finalized interviews no longer accept answers.
    let late = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/interviews/{interview_id}/answer"))
            .insert_header(("Authorization", format!("Bearer {token}")))
            .set_json(json!({"index": 1, "answer": "too late"}))
            .to_request(),
    )
    .await;
    assert_eq!(late.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn out_of_range_answer_index_is_rejected() {
    let app = test::init_service(test_app()).await;
    let token = register(&app, "judy", "judy@example.com").await;

    let created = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/interviews")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .set_json(json!({
                "role": "Data Engineer",
                "interview_type": "technical",
                "level": "mid",
                "questions": ["Tell me about a pipeline you built."],
            }))
            .to_request(),
    )
    .await;
    let body: Value = test::read_body_json(created).await;
    let interview_id = body["data"]["id"].as_str().unwrap().to_string();

    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/interviews/{interview_id}/answer"))
            .insert_header(("Authorization", format!("Bearer {token}")))
            .set_json(json!({"index": 5, "answer": "out of range"}))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn blank_playground_code_is_rejected() {
    let app = test::init_service(test_app()).await;
    let token = register(&app, "kim", "kim@example.com").await;

    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/playground/execute")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .set_json(json!({"language": "python", "code": "  "}))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn unconfigured_providers_map_to_bad_gateway() {
    let app = test::init_service(test_app()).await;
    let token = register(&app, "leo", "leo@example.com").await;

    let execute = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/playground/execute")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .set_json(json!({"language": "python", "code": "print('hi')"}))
            .to_request(),
    )
    .await;
    assert_eq!(execute.status(), StatusCode::BAD_GATEWAY);

    let call = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/vapi/start-interview")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .set_json(json!({
                "role": "Backend Engineer",
                "interview_type": "technical",
                "level": "junior",
            }))
            .to_request(),
    )
    .await;
    assert_eq!(call.status(), StatusCode::BAD_GATEWAY);
}

#[actix_web::test]
async fn verify_email_consumes_token() {
    // Keep a handle on the state so the test can read the verification token
    // the way the mailed link would carry it.
    let state = AppState::in_memory();
    let app = test::init_service(test_app_with_state(state.clone())).await;

    let bearer = register(&app, "mallory", "mallory@example.com").await;

    // An unknown token is rejected and the account stays unverified.
    let bad = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/users/verifyemail")
            .set_json(json!({"token": "not-a-real-token"}))
            .to_request(),
    )
    .await;
    assert_eq!(bad.status(), StatusCode::BAD_REQUEST);

    let stored = state
        .users
        .find_by_email("mallory@example.com")
        .await
        .unwrap()
        .unwrap();
    assert!(!stored.is_verified);
    let verify_token = stored.verify_token.clone().unwrap();

    let verified = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/users/verifyemail")
            .set_json(json!({"token": verify_token}))
            .to_request(),
    )
    .await;
    assert_eq!(verified.status(), StatusCode::OK);

    let profile = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/users/profile")
            .insert_header(("Authorization", format!("Bearer {bearer}")))
            .to_request(),
    )
    .await;
    let body: Value = test::read_body_json(profile).await;
    assert_eq!(body["data"]["is_verified"], true);
    // The token is single-use.
    let reused = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/users/verifyemail")
            .set_json(json!({"token": stored.verify_token.unwrap()}))
            .to_request(),
    )
    .await;
    assert_eq!(reused.status(), StatusCode::BAD_REQUEST);
}
