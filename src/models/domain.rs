use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::timestamp;

/// Backend-assigned numeric identifier
pub type ResourceId = u64;

/// Hackathon as exposed by the API
///
/// `id`, `created_at` and `submission_count` are assigned by the server and are
/// left empty when creating a new hackathon. Timestamps the client cannot read
/// decode as `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hackathon {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ResourceId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub evaluation_prompt: String,
    /// Judging criteria; the backend applies its own defaults when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criteria: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_email: Option<String>,
    #[serde(default, with = "timestamp::option", skip_serializing_if = "Option::is_none")]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(default, with = "timestamp::option", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submission_count: Option<u64>,
}

impl Hackathon {
    /// Create a hackathon record ready to be posted
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        evaluation_prompt: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            evaluation_prompt: evaluation_prompt.into(),
            ..Default::default()
        }
    }
}

/// Project submitted to a hackathon
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ResourceId>,
    #[serde(default)]
    pub hackathon_id: ResourceId,
    #[serde(default)]
    pub team_name: String,
    #[serde(default)]
    pub project_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participant_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluated: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_count: Option<u64>,
    #[serde(default, with = "timestamp::option", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "timestamp::option", skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
    /// Present in hackathon listings once the submission has been scored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluation: Option<Evaluation>,
}

/// AI evaluation of a submission
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ResourceId>,
    #[serde(default)]
    pub submission_id: ResourceId,
    #[serde(default)]
    pub overall_score: f64,
    #[serde(default)]
    pub relevance_score: f64,
    #[serde(default)]
    pub technical_complexity_score: f64,
    #[serde(default)]
    pub creativity_score: f64,
    #[serde(default)]
    pub documentation_score: f64,
    #[serde(default)]
    pub productivity_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    /// Per-criterion breakdown, either a JSON object or a JSON-encoded string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detailed_scores: Option<Value>,
    #[serde(default, with = "timestamp::option", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "timestamp::option", skip_serializing_if = "Option::is_none")]
    pub evaluated_at: Option<DateTime<Utc>>,
}

impl Evaluation {
    /// Detailed scores as structured JSON, decoding the string form if needed
    pub fn detailed_scores_json(&self) -> Option<Value> {
        match self.detailed_scores.as_ref()? {
            Value::String(s) if s.trim().is_empty() => None,
            Value::String(s) => serde_json::from_str(s).ok(),
            Value::Null => None,
            other => Some(other.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_hackathon_decodes_backend_payload() {
        let payload = json!({
            "id": 3,
            "name": "Spring Jam",
            "description": "Build something",
            "evaluation_prompt": "Judge fairly",
            "criteria": [{"name": "Relevance", "weight": 0.2}],
            "created_at": "2024-03-01T10:00:00.500000",
            "deadline": null,
            "host_email": null,
            "submission_count": 4
        });

        let hackathon: Hackathon = serde_json::from_value(payload).unwrap();
        assert_eq!(hackathon.id, Some(3));
        assert_eq!(hackathon.criteria.as_ref().map(Vec::len), Some(1));
        assert!(hackathon.created_at.is_some());
        assert!(hackathon.deadline.is_none());
        assert_eq!(hackathon.submission_count, Some(4));
    }

    #[test]
    fn test_odd_deadline_does_not_fail_the_listing() {
        let payload = json!([
            {"id": 1, "name": "A", "deadline": "end of March"},
            {"id": 2, "name": "B", "deadline": "2024-03-31T23:59:59"}
        ]);

        let hackathons: Vec<Hackathon> = serde_json::from_value(payload).unwrap();
        assert_eq!(hackathons.len(), 2);
        assert!(hackathons[0].deadline.is_none());
        assert!(hackathons[1].deadline.is_some());
    }

    #[test]
    fn test_new_hackathon_omits_server_fields() {
        let hackathon = Hackathon::new("Jam", "desc", "prompt");
        let value = serde_json::to_value(&hackathon).unwrap();
        let obj = value.as_object().unwrap();

        assert!(!obj.contains_key("id"));
        assert!(!obj.contains_key("created_at"));
        assert!(!obj.contains_key("criteria"));
        assert_eq!(obj["name"], "Jam");
    }

    #[test]
    fn test_submission_with_nested_evaluation() {
        let payload = json!({
            "id": 9,
            "hackathon_id": 3,
            "team_name": "Crabs",
            "project_name": "Ferris",
            "submitted_at": "2024-03-02T08:00:00",
            "evaluated": true,
            "file_count": 2,
            "evaluation": {
                "id": 1,
                "submission_id": 9,
                "overall_score": 8.5,
                "evaluated_at": "2024-03-02T08:05:00Z"
            }
        });

        let submission: Submission = serde_json::from_value(payload).unwrap();
        let evaluation = submission.evaluation.unwrap();
        assert_eq!(evaluation.submission_id, 9);
        assert_eq!(evaluation.overall_score, 8.5);
        assert_eq!(evaluation.relevance_score, 0.0);
    }

    #[test]
    fn test_detailed_scores_accepts_string_or_object() {
        let as_object = Evaluation {
            detailed_scores: Some(json!({"relevance": {"score": 7}})),
            ..Default::default()
        };
        let as_string = Evaluation {
            detailed_scores: Some(json!("{\"relevance\": {\"score\": 7}}")),
            ..Default::default()
        };

        assert_eq!(as_object.detailed_scores_json(), as_string.detailed_scores_json());
        assert!(Evaluation::default().detailed_scores_json().is_none());
    }
}
