// Integration tests for the EvalAI API client, against a mockito backend

use evalai_client::models::{GithubSubmission, Hackathon, HackathonUpdate, SubmissionUpload};
use evalai_client::{ApiClient, ApiError};
use mockito::{Matcher, Server, ServerGuard};
use reqwest::multipart::Form;
use reqwest::StatusCode;
use serde_json::json;

fn client_for(server: &ServerGuard) -> ApiClient {
    ApiClient::new(format!("{}/api", server.url())).unwrap()
}

fn json_body(value: serde_json::Value) -> String {
    value.to_string()
}

#[tokio::test]
async fn test_list_hackathons_empty() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/hackathons")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create_async()
        .await;

    let hackathons = client_for(&server).hackathons().list().await.unwrap();

    assert!(hackathons.is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_list_hackathons_keeps_server_order() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/hackathons")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json_body(json!([
            {"id": 7, "name": "Newest", "description": "", "evaluation_prompt": "", "criteria": []},
            {"id": 2, "name": "Older", "description": "", "evaluation_prompt": "", "criteria": []}
        ])))
        .create_async()
        .await;

    let hackathons = client_for(&server).hackathons().list().await.unwrap();

    let ids: Vec<_> = hackathons.iter().map(|h| h.id).collect();
    assert_eq!(ids, vec![Some(7), Some(2)]);
}

#[tokio::test]
async fn test_get_hackathon_substitutes_id() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/hackathon/42")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json_body(json!({
            "id": 42,
            "name": "Answer Jam",
            "description": "Everything",
            "evaluation_prompt": "Be kind",
            "created_at": "2024-03-01T09:00:00.000001",
            "submission_count": 0
        })))
        .create_async()
        .await;

    let hackathon = client_for(&server).hackathons().get(42).await.unwrap();

    assert_eq!(hackathon.id, Some(42));
    assert_eq!(hackathon.name, "Answer Jam");
    assert!(hackathon.created_at.is_some());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_create_hackathon_posts_record_without_id() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/hackathon")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "name": "Jam",
            "description": "Build things",
            "evaluation_prompt": "Score it",
            "host_email": "host@example.com"
        })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(json_body(json!({
            "id": 5,
            "name": "Jam",
            "description": "Build things",
            "evaluation_prompt": "Score it",
            "host_email": "host@example.com",
            "criteria": [{"name": "Relevance", "weight": 0.2}]
        })))
        .create_async()
        .await;

    let hackathon = Hackathon {
        host_email: Some("host@example.com".to_string()),
        ..Hackathon::new("Jam", "Build things", "Score it")
    };
    let created = client_for(&server).hackathons().create(&hackathon).await.unwrap();

    assert_eq!(created.id, Some(5));
    assert_eq!(created.criteria.map(|c| c.len()), Some(1));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_update_sends_only_partial_fields() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("PUT", "/api/hackathon/3")
        .match_body(Matcher::Json(json!({"name": "Renamed"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json_body(json!({
            "id": 3,
            "name": "Renamed",
            "description": "unchanged",
            "evaluation_prompt": "unchanged"
        })))
        .create_async()
        .await;

    let update = HackathonUpdate {
        name: Some("Renamed".to_string()),
        ..Default::default()
    };
    let updated = client_for(&server).hackathons().update(3, &update).await.unwrap();

    assert_eq!(updated.name, "Renamed");
    assert_eq!(updated.description, "unchanged");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_delete_hackathon_no_content() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("DELETE", "/api/hackathon/7")
        .with_status(204)
        .create_async()
        .await;

    let result = client_for(&server).hackathons().delete(7).await;

    assert!(result.is_ok(), "DELETE with 204 should succeed: {:?}", result);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_not_found_surfaces_status_and_body() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/hackathon/99")
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error": "Hackathon not found"}"#)
        .create_async()
        .await;

    let err = client_for(&server).hackathons().get(99).await.unwrap_err();

    match err {
        ApiError::StatusError { status, ref body } => {
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert!(body.contains("Hackathon not found"));
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_server_error_is_not_retried() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/hackathons")
        .with_status(500)
        .with_body("boom")
        .expect(1)
        .create_async()
        .await;

    let err = client_for(&server).hackathons().list().await.unwrap_err();

    assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_network_failure_is_request_error() {
    // Nothing listens on port 1
    let client = ApiClient::new("http://127.0.0.1:1/api").unwrap();

    let err = client.hackathons().list().await.unwrap_err();

    assert!(matches!(err, ApiError::RequestError(_)));
    assert!(err.status().is_none());
}

#[tokio::test]
async fn test_list_submissions_for_hackathon() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/hackathon/4/submissions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json_body(json!([
            {
                "id": 11,
                "hackathon_id": 4,
                "team_name": "Crabs",
                "project_name": "Ferris",
                "evaluated": true,
                "evaluation": {"id": 1, "submission_id": 11, "overall_score": 7.5}
            },
            {"id": 12, "hackathon_id": 4, "team_name": "Gophers", "project_name": "Go", "evaluated": false}
        ])))
        .create_async()
        .await;

    let submissions = client_for(&server).submissions().list(4).await.unwrap();

    assert_eq!(submissions.len(), 2);
    assert_eq!(submissions[0].evaluation.as_ref().map(|e| e.overall_score), Some(7.5));
    assert!(submissions[1].evaluation.is_none());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_get_submission_by_pair() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/hackathon/4/submission/11")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json_body(json!({
            "id": 11,
            "hackathon_id": 4,
            "team_name": "Crabs",
            "project_name": "Ferris",
            "github_url": "https://github.com/crabs/ferris",
            "status": "evaluated"
        })))
        .create_async()
        .await;

    let submission = client_for(&server).submissions().get(4, 11).await.unwrap();

    assert_eq!(submission.id, Some(11));
    assert_eq!(submission.status.as_deref(), Some("evaluated"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_submit_with_files_uses_multipart() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/hackathon/4/submit")
        .match_header(
            "content-type",
            Matcher::Regex("^multipart/form-data; boundary=".to_string()),
        )
        .match_body(Matcher::Regex(r#"name="project_name""#.to_string()))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(json_body(json!({
            "id": 20,
            "hackathon_id": 4,
            "team_name": "Crabs",
            "project_name": "Ferris"
        })))
        .create_async()
        .await;

    let form = Form::new()
        .text("team_name", "Crabs")
        .text("project_name", "Ferris");
    let submission = client_for(&server)
        .submissions()
        .submit_with_files(4, form)
        .await
        .unwrap();

    assert_eq!(submission.id, Some(20));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_upload_attaches_project_files() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/hackathon/4/submit")
        .match_header(
            "content-type",
            Matcher::Regex("^multipart/form-data".to_string()),
        )
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"name="project_files"; filename="main.rs""#.to_string()),
            Matcher::Regex("fn main\\(\\) \\{\\}".to_string()),
            Matcher::Regex(r#"name="team_name""#.to_string()),
        ]))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(json_body(json!({"id": 21, "hackathon_id": 4, "team_name": "Crabs", "project_name": "Ferris"})))
        .create_async()
        .await;

    let upload = SubmissionUpload::new("Crabs", "Ferris").file("main.rs", "fn main() {}");
    let submission = client_for(&server).submissions().upload(4, upload).await.unwrap();

    assert_eq!(submission.id, Some(21));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_submit_with_github_sends_json() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/hackathon/4/submit/github")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "team_name": "Crabs",
            "project_name": "Ferris",
            "github_url": "https://github.com/crabs/ferris"
        })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(json_body(json!({
            "id": 22,
            "hackathon_id": 4,
            "team_name": "Crabs",
            "project_name": "Ferris",
            "github_url": "https://github.com/crabs/ferris"
        })))
        .create_async()
        .await;

    let body = GithubSubmission::new("Crabs", "Ferris", "https://github.com/crabs/ferris");
    let submission = client_for(&server)
        .submissions()
        .submit_with_github(4, &body)
        .await
        .unwrap();

    assert_eq!(submission.github_url.as_deref(), Some("https://github.com/crabs/ferris"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_create_and_evaluate_carries_hackathon_id_field() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/submissions")
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"name="hackathon_id""#.to_string()),
            Matcher::Regex(r#"name="project_files"; filename="README.md""#.to_string()),
        ]))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(json_body(json!({
            "success": true,
            "id": 30,
            "hackathon_id": 4,
            "overall_score": 8.25
        })))
        .create_async()
        .await;

    let upload = SubmissionUpload::new("Crabs", "Ferris")
        .participant_email("crab@example.com")
        .file("README.md", "# Ferris");
    let receipt = client_for(&server)
        .submissions()
        .create_and_evaluate(4, upload)
        .await
        .unwrap();

    assert!(receipt.success);
    assert_eq!(receipt.id, 30);
    assert_eq!(receipt.overall_score, Some(8.25));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_get_evaluation_for_submission() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/submission/11/evaluation")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json_body(json!({
            "id": 1,
            "submission_id": 11,
            "overall_score": 7.8,
            "relevance_score": 8.0,
            "technical_complexity_score": 7.0,
            "creativity_score": 9.0,
            "documentation_score": 6.5,
            "productivity_score": 8.5,
            "feedback": "Solid work",
            "detailed_scores": {"relevance": {"score": 8}},
            "evaluated_at": "2024-03-02T08:05:00Z"
        })))
        .create_async()
        .await;

    let evaluation = client_for(&server).evaluations().get(11).await.unwrap();

    assert_eq!(evaluation.submission_id, 11);
    assert_eq!(evaluation.creativity_score, 9.0);
    assert_eq!(evaluation.feedback.as_deref(), Some("Solid work"));
    assert!(evaluation.detailed_scores_json().is_some());
    assert!(evaluation.evaluated_at.is_some());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_leaderboard_is_untyped() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/hackathon/4/results")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json_body(json!([
            {"rank": 1, "team_name": "Crabs", "overall_score": 9.1},
            {"rank": 2, "team_name": "Gophers"}
        ])))
        .create_async()
        .await;

    let rows = client_for(&server).evaluations().leaderboard(4).await.unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["team_name"], "Crabs");
    assert!(rows[1].get("overall_score").is_none());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_trigger_evaluation_posts_without_body() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/submission/11/evaluate")
        .match_header("content-type", Matcher::Missing)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json_body(json!({"id": 2, "submission_id": 11, "overall_score": 6.0})))
        .create_async()
        .await;

    let evaluation = client_for(&server).evaluations().trigger(11).await.unwrap();

    assert_eq!(evaluation.id, Some(2));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_individual_result_embeds_evaluation_and_hackathon() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/results/11")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json_body(json!({
            "id": 11,
            "hackathon_id": 4,
            "team_name": "Crabs",
            "project_name": "Ferris",
            "submitted_at": "2024-03-02T08:00:00",
            "evaluated": true,
            "file_count": 1,
            "evaluation": {"id": 1, "submission_id": 11, "overall_score": 7.8},
            "hackathon": {"id": 4, "name": "Spring Jam", "description": "", "evaluation_prompt": ""}
        })))
        .create_async()
        .await;

    let result = client_for(&server).evaluations().result(11).await.unwrap();

    assert_eq!(result.submission.project_name, "Ferris");
    assert_eq!(result.submission.file_count, Some(1));
    assert_eq!(result.evaluation.overall_score, 7.8);
    assert_eq!(result.hackathon.name, "Spring Jam");
    mock.assert_async().await;
}
