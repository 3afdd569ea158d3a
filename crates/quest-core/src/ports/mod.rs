//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod execution;
mod grading;
mod mail;
mod rate_limit;
mod repository;
mod voice;

pub use auth::{AuthError, PasswordService, TokenClaims, TokenService};
pub use execution::{CodeRunner, ExecutionError, ExecutionOutcome, ExecutionRequest};
pub use grading::{AnswerGrade, GraderError, InterviewGrader};
pub use mail::{MailError, Mailer};
pub use rate_limit::{RateLimitError, RateLimitResult, RateLimiter};
pub use repository::{BaseRepository, InterviewRepository, PostRepository, UserRepository};
pub use voice::{CallHandle, Transcription, VoiceError, VoiceGateway};
