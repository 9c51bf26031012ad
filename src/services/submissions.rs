use reqwest::multipart::Form;

use crate::models::{GithubSubmission, ResourceId, Submission, SubmissionReceipt, SubmissionUpload};
use crate::services::{ApiClient, ApiError};

/// Submission operations
#[derive(Debug, Clone, Copy)]
pub struct Submissions<'a> {
    api: &'a ApiClient,
}

impl<'a> Submissions<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// All submissions for a hackathon
    pub async fn list(&self, hackathon_id: ResourceId) -> Result<Vec<Submission>, ApiError> {
        self.api
            .get(&format!("/hackathon/{}/submissions", hackathon_id))
            .await
    }

    pub async fn get(
        &self,
        hackathon_id: ResourceId,
        submission_id: ResourceId,
    ) -> Result<Submission, ApiError> {
        self.api
            .get(&format!(
                "/hackathon/{}/submission/{}",
                hackathon_id, submission_id
            ))
            .await
    }

    /// Submit a caller-built multipart form
    pub async fn submit_with_files(
        &self,
        hackathon_id: ResourceId,
        form: Form,
    ) -> Result<Submission, ApiError> {
        self.api
            .post_multipart(&format!("/hackathon/{}/submit", hackathon_id), form)
            .await
    }

    /// Submit files described by a [`SubmissionUpload`]
    pub async fn upload(
        &self,
        hackathon_id: ResourceId,
        upload: SubmissionUpload,
    ) -> Result<Submission, ApiError> {
        self.submit_with_files(hackathon_id, upload.into_form()).await
    }

    /// Submit a project by repository URL
    pub async fn submit_with_github(
        &self,
        hackathon_id: ResourceId,
        submission: &GithubSubmission,
    ) -> Result<Submission, ApiError> {
        self.api
            .post_json(
                &format!("/hackathon/{}/submit/github", hackathon_id),
                submission,
            )
            .await
    }

    /// Create a submission and have the backend evaluate it in the same call
    pub async fn create_and_evaluate(
        &self,
        hackathon_id: ResourceId,
        upload: SubmissionUpload,
    ) -> Result<SubmissionReceipt, ApiError> {
        self.api
            .post_multipart("/submissions", upload.into_form_for(hackathon_id))
            .await
    }
}
