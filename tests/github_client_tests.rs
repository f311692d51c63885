//! HTTP mock tests for the GitHub issue host.

use reqwest::Url;
use rstest::rstest;
use secrecy::SecretString;
use serde_json::{Value, json};
use tasklink::sync::{
    adapters::github::{GitHubClient, GitHubConfig},
    domain::{Comment, RepositoryFullName, TicketNumber},
    ports::{IssueHost, IssueHostError},
};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const COMMENTS_PATH: &str = "/repos/acme/widgets/issues/12/comments";

fn client_for(server: &MockServer) -> GitHubClient {
    let base_url = Url::parse(&server.uri()).expect("valid mock URL");
    GitHubClient::new(GitHubConfig::new(
        SecretString::new("ghs_test_token".into()),
        base_url,
    ))
    .expect("client should build")
}

fn repository() -> RepositoryFullName {
    RepositoryFullName::new("acme/widgets").expect("valid repository")
}

fn issue() -> TicketNumber {
    TicketNumber::new(12).expect("valid number")
}

fn comment_page(count: usize, offset: usize) -> Value {
    Value::Array(
        (0..count)
            .map(|index| json!({ "id": offset + index, "body": format!("comment {}", offset + index) }))
            .collect(),
    )
}

#[rstest]
#[tokio::test]
async fn list_comments_sends_api_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(COMMENTS_PATH))
        .and(header("Authorization", "Bearer ghs_test_token"))
        .and(header("Accept", "application/vnd.github+json"))
        .and(header("User-Agent", "tasklink"))
        .and(header("X-GitHub-Api-Version", "2022-11-28"))
        .and(query_param("per_page", "100"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "body": "Thanks for the report" },
            { "id": 2, "body": null },
            { "id": 3, "body": "Created a ClickUp task: [CU-86abc](https://app.clickup.com/t/86abc)" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let comments = client_for(&server)
        .list_comments(&repository(), issue())
        .await
        .expect("comments should list");

    assert_eq!(
        comments,
        vec![
            Comment::new("Thanks for the report"),
            Comment::without_body(),
            Comment::new("Created a ClickUp task: [CU-86abc](https://app.clickup.com/t/86abc)"),
        ]
    );
}

#[rstest]
#[tokio::test]
async fn list_comments_follows_full_pages() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(COMMENTS_PATH))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(comment_page(100, 0)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(COMMENTS_PATH))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(comment_page(3, 100)))
        .expect(1)
        .mount(&server)
        .await;

    let comments = client_for(&server)
        .list_comments(&repository(), issue())
        .await
        .expect("comments should list");

    assert_eq!(comments.len(), 103);
    assert_eq!(
        comments.last().and_then(Comment::body),
        Some("comment 102")
    );
}

#[rstest]
#[tokio::test]
async fn create_comment_posts_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(COMMENTS_PATH))
        .and(body_json(json!({ "body": "hello" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 9 })))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server)
        .create_comment(&repository(), issue(), "hello")
        .await;

    assert!(result.is_ok(), "unexpected error: {result:?}");
}

#[rstest]
#[tokio::test]
async fn forbidden_comment_is_an_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(COMMENTS_PATH))
        .respond_with(
            ResponseTemplate::new(403).set_body_string("Resource not accessible by integration"),
        )
        .mount(&server)
        .await;

    let result = client_for(&server)
        .create_comment(&repository(), issue(), "hello")
        .await;

    assert!(matches!(result, Err(IssueHostError::Http { status: 403, .. })));
}
