use super::mock_generator::MockGenerator;
use super::project_manager::ProjectManager;
use crate::config::ProjectSettings;
use crate::domain::{CreateProjectRequest, HttpMethod, ProjectError, ProjectUpdate, TypeKind};
use chrono::{Duration, Utc};

const USER: &str = "interface User {\n  id: number;\n  email: string;\n  nickname?: string;\n}";

fn request(name: &str) -> CreateProjectRequest {
    CreateProjectRequest {
        name: name.to_string(),
        interface_code: USER.to_string(),
        ..Default::default()
    }
}

fn manager_with(settings: ProjectSettings) -> ProjectManager {
    ProjectManager::new(settings, MockGenerator::default())
}

#[tokio::test]
async fn test_create_project_defaults() {
    let manager = ProjectManager::default();
    let before = Utc::now();
    let project = manager.create_project(request("Users")).await.unwrap();

    assert_eq!(project.name, "Users");
    assert_eq!(project.method, HttpMethod::Get);
    assert_eq!(project.expected_status_codes, vec![200]);
    assert_eq!(project.endpoint, format!("/api/mock/{}", project.id));
    assert_eq!(project.url, format!("http://localhost:3000/api/mock/{}", project.id));
    assert!(project.is_active);

    let ttl = project.expires_at - before;
    assert!(ttl >= Duration::hours(24) && ttl <= Duration::hours(24) + Duration::minutes(1));
}

#[tokio::test]
async fn test_create_project_rejects_missing_fields() {
    let manager = ProjectManager::default();

    let err = manager.create_project(request("  ")).await.unwrap_err();
    assert!(matches!(err, ProjectError::Validation(_)));

    let mut blank_interface = request("Blank");
    blank_interface.interface_code = "\n  \n".to_string();
    let err = manager.create_project(blank_interface).await.unwrap_err();
    assert!(matches!(err, ProjectError::Validation(_)));

    let mut zero_ttl = request("Zero");
    zero_ttl.expiration_hours = Some(0);
    let err = manager.create_project(zero_ttl).await.unwrap_err();
    assert!(matches!(err, ProjectError::Validation(_)));
}

#[tokio::test]
async fn test_malformed_interface_is_still_accepted() {
    let manager = ProjectManager::default();
    let mut req = request("Odd");
    req.interface_code = "foo bar baz".to_string();

    let project = manager.create_project(req).await.unwrap();
    let data = manager.generate_mock_response(&project.id, None).await.unwrap();
    assert_eq!(data, serde_json::json!({}));
}

#[tokio::test]
async fn test_project_limit() {
    let manager = manager_with(ProjectSettings {
        max_projects: 2,
        ..ProjectSettings::default()
    });

    let first = manager.create_project(request("a")).await.unwrap();
    manager.create_project(request("b")).await.unwrap();
    let err = manager.create_project(request("c")).await.unwrap_err();
    assert!(matches!(err, ProjectError::LimitReached(2)));

    // Deactivated projects no longer count against the limit
    assert!(manager.deactivate_project(&first.id).await);
    assert!(manager.create_project(request("c")).await.is_ok());
}

#[tokio::test]
async fn test_get_hides_inactive_and_expired() {
    let manager = ProjectManager::default();
    let live = manager.create_project(request("live")).await.unwrap();
    let expired = manager.create_project(request("expired")).await.unwrap();
    let inactive = manager.create_project(request("inactive")).await.unwrap();

    manager.set_expiry(&expired.id, Utc::now() - Duration::hours(1)).await;
    manager.deactivate_project(&inactive.id).await;

    assert!(manager.get_project(&live.id).await.is_some());
    assert!(manager.get_project(&expired.id).await.is_none());
    assert!(manager.get_project(&inactive.id).await.is_none());
    assert!(manager.get_project("missing").await.is_none());

    let listed: Vec<String> = manager
        .list_active_projects()
        .await
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(listed, vec![live.id]);
}

#[tokio::test]
async fn test_generate_mock_response() {
    let manager = ProjectManager::default();
    let project = manager.create_project(request("Users")).await.unwrap();

    let single = manager.generate_mock_response(&project.id, None).await.unwrap();
    assert!(single.is_object());
    assert!(single["email"].as_str().unwrap().contains('@'));

    let one = manager.generate_mock_response(&project.id, Some(1)).await.unwrap();
    assert!(one.is_object());

    let many = manager.generate_mock_response(&project.id, Some(5)).await.unwrap();
    assert_eq!(many.as_array().map(Vec::len), Some(5));
}

#[tokio::test]
async fn test_generate_for_unknown_or_expired_project() {
    let manager = ProjectManager::default();
    let err = manager.generate_mock_response("nope", None).await.unwrap_err();
    assert!(matches!(err, ProjectError::NotFound(_)));
    assert_eq!(err.to_string(), "Project not found or expired");

    let project = manager.create_project(request("Users")).await.unwrap();
    manager.set_expiry(&project.id, Utc::now() - Duration::seconds(1)).await;
    let err = manager.generate_mock_response(&project.id, None).await.unwrap_err();
    assert!(matches!(err, ProjectError::NotFound(_)));
}

#[tokio::test]
async fn test_parsed_interface() {
    let manager = ProjectManager::default();
    let project = manager.create_project(request("Users")).await.unwrap();

    let parsed = manager.parsed_interface(&project.id).await.unwrap();
    assert_eq!(parsed.name, "User");
    assert_eq!(parsed.properties["id"].kind, TypeKind::Number);
    assert!(parsed.properties["nickname"].is_optional);
}

#[tokio::test]
async fn test_update_project() {
    let manager = ProjectManager::default();
    let project = manager.create_project(request("Users")).await.unwrap();

    let updated = manager
        .update_project(
            &project.id,
            ProjectUpdate {
                name: Some("Accounts".to_string()),
                interface_code: Some("interface Account {\n  balance: number;\n}".to_string()),
                method: Some(HttpMethod::Post),
                expiration_hours: Some(2),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.name, "Accounts");
    assert_eq!(updated.method, HttpMethod::Post);
    assert!(updated.updated_at >= project.updated_at);
    assert!(updated.expires_at < project.expires_at);

    let data = manager.generate_mock_response(&project.id, None).await.unwrap();
    assert!(data["balance"].is_i64());
    assert!(data.get("email").is_none());
}

#[tokio::test]
async fn test_update_rejects_invalid_and_skips_inactive() {
    let manager = ProjectManager::default();
    let project = manager.create_project(request("Users")).await.unwrap();

    let err = manager
        .update_project(
            &project.id,
            ProjectUpdate {
                name: Some(String::new()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ProjectError::Validation(_)));

    manager.deactivate_project(&project.id).await;
    let result = manager
        .update_project(&project.id, ProjectUpdate::default())
        .await
        .unwrap();
    assert!(result.is_none());

    assert!(manager
        .update_project("missing", ProjectUpdate::default())
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_deactivate_unknown_project() {
    let manager = ProjectManager::default();
    assert!(!manager.deactivate_project("missing").await);
}

#[tokio::test]
async fn test_cleanup_and_stats() {
    let manager = ProjectManager::default();
    let keep = manager.create_project(request("keep")).await.unwrap();
    let gone = manager.create_project(request("gone")).await.unwrap();
    let off = manager.create_project(request("off")).await.unwrap();

    manager.set_expiry(&gone.id, Utc::now() - Duration::minutes(5)).await;
    manager.deactivate_project(&off.id).await;

    let stats = manager.stats().await;
    assert_eq!(stats.total, 3);
    assert_eq!(stats.active, 1);
    assert_eq!(stats.expired, 2);

    assert_eq!(manager.cleanup_expired_projects().await, 1);
    assert_eq!(manager.cleanup_expired_projects().await, 0);

    let stats = manager.stats().await;
    assert_eq!(stats.total, 2);
    assert_eq!(stats.active, 1);
    assert!(manager.get_project(&keep.id).await.is_some());
}

#[tokio::test]
async fn test_clones_share_registry() {
    let manager = ProjectManager::default();
    let clone = manager.clone();
    let project = manager.create_project(request("shared")).await.unwrap();
    assert!(clone.get_project(&project.id).await.is_some());
}

#[tokio::test]
async fn test_concurrent_creates() {
    let manager = ProjectManager::default();
    let handles: Vec<_> = (0..20)
        .map(|i| {
            let manager = manager.clone();
            tokio::spawn(async move { manager.create_project(request(&format!("p{i}"))).await })
        })
        .collect();

    for handle in handles {
        assert!(handle.await.unwrap().is_ok());
    }
    assert_eq!(manager.stats().await.active, 20);
}
