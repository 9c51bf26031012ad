use crate::models::{Evaluation, LeaderboardEntry, ResourceId, SubmissionResult};
use crate::services::{ApiClient, ApiError};

/// Evaluation operations
#[derive(Debug, Clone, Copy)]
pub struct Evaluations<'a> {
    api: &'a ApiClient,
}

impl<'a> Evaluations<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// Evaluation for a single submission
    pub async fn get(&self, submission_id: ResourceId) -> Result<Evaluation, ApiError> {
        self.api
            .get(&format!("/submission/{}/evaluation", submission_id))
            .await
    }

    /// Leaderboard rows for a hackathon, left untyped
    pub async fn leaderboard(
        &self,
        hackathon_id: ResourceId,
    ) -> Result<Vec<LeaderboardEntry>, ApiError> {
        self.api
            .get(&format!("/hackathon/{}/results", hackathon_id))
            .await
    }

    /// Ask the backend to (re)evaluate a submission
    pub async fn trigger(&self, submission_id: ResourceId) -> Result<Evaluation, ApiError> {
        self.api
            .post_empty(&format!("/submission/{}/evaluate", submission_id))
            .await
    }

    /// Submission with its evaluation and hackathon embedded
    pub async fn result(&self, submission_id: ResourceId) -> Result<SubmissionResult, ApiError> {
        self.api.get(&format!("/results/{}", submission_id)).await
    }
}
