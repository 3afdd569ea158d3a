//! # Quest Shared
//!
//! Types shared between the SkillQuest API and its clients: request/response
//! DTOs and the response envelopes the client store reconciles against.

pub mod dto;
pub mod response;

pub use response::{ApiResponse, ErrorResponse};
