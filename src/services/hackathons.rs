use crate::models::{Hackathon, HackathonUpdate, ResourceId};
use crate::services::{ApiClient, ApiError};

/// Hackathon operations
#[derive(Debug, Clone, Copy)]
pub struct Hackathons<'a> {
    api: &'a ApiClient,
}

impl<'a> Hackathons<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// All hackathons, in the order the server returns them
    pub async fn list(&self) -> Result<Vec<Hackathon>, ApiError> {
        self.api.get("/hackathons").await
    }

    pub async fn get(&self, id: ResourceId) -> Result<Hackathon, ApiError> {
        self.api.get(&format!("/hackathon/{}", id)).await
    }

    /// Create a hackathon; the returned record carries the assigned id
    pub async fn create(&self, hackathon: &Hackathon) -> Result<Hackathon, ApiError> {
        self.api.post_json("/hackathon", hackathon).await
    }

    /// Apply a partial update, sending only the fields set on `update`
    pub async fn update(
        &self,
        id: ResourceId,
        update: &HackathonUpdate,
    ) -> Result<Hackathon, ApiError> {
        self.api.put_json(&format!("/hackathon/{}", id), update).await
    }

    pub async fn delete(&self, id: ResourceId) -> Result<(), ApiError> {
        self.api.delete(&format!("/hackathon/{}", id)).await
    }
}
