// Service exports
pub mod api;
pub mod evaluations;
pub mod hackathons;
pub mod submissions;

pub use api::{ApiClient, ApiError};
pub use evaluations::Evaluations;
pub use hackathons::Hackathons;
pub use submissions::Submissions;
