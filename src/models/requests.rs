use chrono::{DateTime, Utc};
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

use super::domain::ResourceId;
use super::timestamp;

/// Partial hackathon update
///
/// Only the fields that are set are serialized, so the backend leaves the
/// rest untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HackathonUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluation_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criteria: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_email: Option<String>,
    #[serde(default, with = "timestamp::option", skip_serializing_if = "Option::is_none")]
    pub deadline: Option<DateTime<Utc>>,
}

impl HackathonUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Body for submitting a project by repository URL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GithubSubmission {
    pub team_name: String,
    pub project_name: String,
    pub github_url: String,
}

impl GithubSubmission {
    pub fn new(
        team_name: impl Into<String>,
        project_name: impl Into<String>,
        github_url: impl Into<String>,
    ) -> Self {
        Self {
            team_name: team_name.into(),
            project_name: project_name.into(),
            github_url: github_url.into(),
        }
    }
}

/// A file attached to a multipart submission
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub content: Vec<u8>,
}

/// Builder for multipart submission bodies
///
/// Produces the form fields the backend reads: `team_name`, `project_name`,
/// `project_description`, `participant_email` and one `project_files` part per
/// attached file.
#[derive(Debug, Clone, Default)]
pub struct SubmissionUpload {
    pub team_name: String,
    pub project_name: String,
    pub project_description: Option<String>,
    pub participant_email: Option<String>,
    pub files: Vec<UploadFile>,
}

/// Form field holding uploaded files
pub const FILES_FIELD: &str = "project_files";

impl SubmissionUpload {
    pub fn new(team_name: impl Into<String>, project_name: impl Into<String>) -> Self {
        Self {
            team_name: team_name.into(),
            project_name: project_name.into(),
            ..Default::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.project_description = Some(description.into());
        self
    }

    pub fn participant_email(mut self, email: impl Into<String>) -> Self {
        self.participant_email = Some(email.into());
        self
    }

    pub fn file(mut self, file_name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        self.files.push(UploadFile {
            file_name: file_name.into(),
            content: content.into(),
        });
        self
    }

    /// Read a file from disk and attach it under its base name
    pub async fn attach_path(self, path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(self.file(file_name, content))
    }

    /// Build the multipart form for `/hackathon/{id}/submit`
    pub fn into_form(self) -> Form {
        let mut form = Form::new()
            .text("team_name", self.team_name)
            .text("project_name", self.project_name);

        if let Some(description) = self.project_description {
            form = form.text("project_description", description);
        }
        if let Some(email) = self.participant_email {
            form = form.text("participant_email", email);
        }

        for file in self.files {
            let part = Part::bytes(file.content).file_name(file.file_name);
            form = form.part(FILES_FIELD, part);
        }

        form
    }

    /// Build the multipart form for `/submissions`, which carries the
    /// hackathon id as a form field instead of in the path
    pub fn into_form_for(self, hackathon_id: ResourceId) -> Form {
        self.into_form().text("hackathon_id", hackathon_id.to_string())
    }
}
