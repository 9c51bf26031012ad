use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::domain::{Evaluation, Hackathon, ResourceId, Submission};

/// Leaderboard row; the backend does not publish a fixed shape for these
pub type LeaderboardEntry = Value;

/// Response for the one-shot create-and-evaluate submission endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    #[serde(default)]
    pub success: bool,
    pub id: ResourceId,
    pub hackathon_id: ResourceId,
    #[serde(default)]
    pub overall_score: Option<f64>,
}

/// A submission together with its evaluation and hackathon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionResult {
    #[serde(flatten)]
    pub submission: Submission,
    pub evaluation: Evaluation,
    pub hackathon: Hackathon,
}
