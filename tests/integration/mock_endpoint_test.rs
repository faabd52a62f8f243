use super::common;

use common::test_server::TestServer;
use dupi::config::ProjectSettings;
use serde_json::{json, Value};

const USER: &str = "interface User {\n  id: number;\n  email: string;\n  isActive: boolean;\n  tags: string[];\n}";

async fn create_user_project(server: &TestServer, client: &reqwest::Client) -> Value {
    let response = client
        .post(server.url("/api/projects"))
        .json(&json!({ "name": "Users", "interface_code": USER }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.unwrap();
    body["data"].clone()
}

#[tokio::test]
async fn test_mock_url_is_served() {
    let server = TestServer::with_settings(ProjectSettings {
        base_url: "http://mock.test".to_string(),
        ..ProjectSettings::default()
    })
    .await;
    let client = reqwest::Client::new();

    let project = create_user_project(&server, &client).await;
    let endpoint = project["endpoint"].as_str().unwrap();
    assert_eq!(project["url"], format!("http://mock.test{}", endpoint));

    let response = client
        .get(server.url(&format!("{}?count=3", endpoint)))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    let records = body["data"].as_array().unwrap();
    assert_eq!(records.len(), 3);
    for record in records {
        assert!(record["email"].as_str().unwrap().contains('@'));
        assert!(record["isActive"].is_boolean());
    }
    assert_eq!(body["metadata"]["generated_count"], 3);
}

#[tokio::test]
async fn test_mock_post_with_count() {
    let server = TestServer::new().await;
    let client = reqwest::Client::new();

    let project = create_user_project(&server, &client).await;
    let endpoint = project["endpoint"].as_str().unwrap();

    let response = client
        .post(server.url(endpoint))
        .json(&json!({ "count": 2 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"].as_array().map(Vec::len), Some(2));

    let response = client
        .post(server.url(endpoint))
        .json(&json!({ "count": 1000 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_project_limit_returns_conflict() {
    let server = TestServer::with_settings(ProjectSettings {
        max_projects: 1,
        ..ProjectSettings::default()
    })
    .await;
    let client = reqwest::Client::new();

    create_user_project(&server, &client).await;

    let response = client
        .post(server.url("/api/projects"))
        .json(&json!({ "name": "Second", "interface_code": USER }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 409);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert!(body["error"].is_string());
}
