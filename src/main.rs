use clap::Parser;
use dupi::adapters::health_handler::HealthHandler;
use dupi::adapters::mock_generator::MockGenerator;
use dupi::adapters::project_manager::ProjectManager;
use dupi::cli::Cli;
use dupi::config::Settings;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let settings = Settings::new_with_cli(&cli)?;
    let host = settings.server.host.clone();
    let port = settings.server.port;

    info!("Starting Dupi mock server on {}:{}", host, port);

    let generator = MockGenerator::new(settings.generator);
    let projects = Arc::new(ProjectManager::new(settings.projects.clone(), generator));
    let _cleanup = projects.spawn_cleanup();

    let health_handler = Arc::new(HealthHandler::new(projects.clone()));
    let app = dupi::create_app(projects, health_handler);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
