//! HTTP handlers and route configuration.

mod auth;
mod community;
mod health;
mod interviews;
mod matches;
mod playground;
mod profile;
mod voice;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use actix_web::web;

use quest_core::ports::RateLimiter;

use crate::middleware::rate_limit::RateLimitMiddleware;

/// Configure all application routes. The credential endpoints sit behind the
/// per-IP rate limiter.
pub fn configure_routes(cfg: &mut web::ServiceConfig, limiter: Arc<dyn RateLimiter>) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Auth lifecycle and profile
            .service(
                web::scope("/users")
                    .wrap(RateLimitMiddleware::new(limiter))
                    .route("/register", web::post().to(auth::register))
                    .route("/login", web::post().to(auth::login))
                    .route("/logout", web::post().to(auth::logout))
                    .route("/verifyemail", web::post().to(auth::verify_email))
                    .route("/profile", web::get().to(profile::get_profile))
                    .route("/profile", web::patch().to(profile::update_profile)),
            )
            // Matching
            .route("/matches", web::post().to(matches::request_match))
            // Community board
            .service(
                web::scope("/community")
                    .route("/posts", web::get().to(community::list_posts))
                    .route("/posts", web::post().to(community::create_post))
                    .route("/posts/{id}", web::get().to(community::get_post))
                    .route("/posts/{id}", web::delete().to(community::delete_post))
                    .route("/posts/{id}/likes", web::post().to(community::toggle_like))
                    .route(
                        "/posts/{id}/comments",
                        web::post().to(community::add_comment),
                    )
                    .route(
                        "/posts/{id}/comments/{comment_id}",
                        web::delete().to(community::delete_comment),
                    ),
            )
            // Practice interviews
            .service(
                web::scope("/interviews")
                    .route("", web::get().to(interviews::list_interviews))
                    .route("", web::post().to(interviews::create_interview))
                    .route("/{id}", web::get().to(interviews::get_interview))
                    .route("/{id}", web::put().to(interviews::update_interview))
                    .route("/{id}", web::delete().to(interviews::delete_interview))
                    .route("/{id}/answer", web::post().to(interviews::record_answer))
                    .route(
                        "/{id}/analyze",
                        web::post().to(interviews::analyze_interview),
                    )
                    .route(
                        "/{id}/finalize",
                        web::patch().to(interviews::finalize_interview),
                    ),
            )
            // Code playground
            .route("/playground/execute", web::post().to(playground::execute))
            // Voice interview proxy
            .service(
                web::scope("/vapi")
                    .route("/start-interview", web::post().to(voice::start_interview))
                    .route("/end-interview", web::post().to(voice::end_interview))
                    .route(
                        "/transcription/{call_id}",
                        web::get().to(voice::transcription),
                    ),
            ),
    );
}
