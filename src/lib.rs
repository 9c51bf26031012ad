//! EvalAI Client - typed access to the EvalAI hackathon evaluation API
//!
//! This library provides two independent pieces:
//! - [`ApiClient`], async request helpers for hackathons, submissions and
//!   evaluations
//! - [`PathRouter`], a hash-fragment router publishing the current path as an
//!   observable value

pub mod config;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use config::Settings;
pub use models::{Evaluation, GithubSubmission, Hackathon, HackathonUpdate, Submission, SubmissionUpload};
pub use routes::{Location, MemoryLocation, PathRouter};
pub use services::{ApiClient, ApiError};
