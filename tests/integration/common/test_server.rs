use dupi::adapters::health_handler::HealthHandler;
use dupi::adapters::mock_generator::MockGenerator;
use dupi::adapters::project_manager::ProjectManager;
use dupi::config::{GeneratorConfig, ProjectSettings};
use std::net::SocketAddr;
use std::sync::Arc;

pub struct TestServer {
    pub addr: SocketAddr,
    pub base_url: String,
}

impl TestServer {
    pub async fn new() -> Self {
        Self::with_settings(ProjectSettings::default()).await
    }

    pub async fn with_settings(settings: ProjectSettings) -> Self {
        let projects = Arc::new(ProjectManager::new(
            settings,
            MockGenerator::new(GeneratorConfig::default()),
        ));
        let health_handler = Arc::new(HealthHandler::new(projects.clone()));
        let app = dupi::create_app(projects, health_handler);

        // Start server on random port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Wait for server to be ready
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        TestServer { addr, base_url }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
