// Model exports
pub mod domain;
pub mod requests;
pub mod responses;
pub mod timestamp;

pub use domain::{Evaluation, Hackathon, ResourceId, Submission};
pub use requests::{GithubSubmission, HackathonUpdate, SubmissionUpload, UploadFile};
pub use responses::{LeaderboardEntry, SubmissionReceipt, SubmissionResult};
