use chrono::{DateTime, Duration, Utc};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration as StdDuration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::adapters::interface_parser::parse_interface;
use crate::adapters::mock_generator::MockGenerator;
use crate::config::ProjectSettings;
use crate::domain::{
    ApiProject, CreateProjectRequest, HttpMethod, ParsedInterface, ProjectError, ProjectStats,
    ProjectUpdate,
};

/// In-memory registry of mock projects.
///
/// Cloning is cheap and every clone shares the same registry.
#[derive(Clone)]
pub struct ProjectManager {
    projects: Arc<RwLock<HashMap<String, ApiProject>>>,
    settings: ProjectSettings,
    generator: MockGenerator,
}

impl ProjectManager {
    pub fn new(settings: ProjectSettings, generator: MockGenerator) -> Self {
        Self {
            projects: Arc::new(RwLock::new(HashMap::new())),
            settings,
            generator,
        }
    }

    pub async fn create_project(
        &self,
        request: CreateProjectRequest,
    ) -> Result<ApiProject, ProjectError> {
        validate_name(&request.name)?;
        let parsed = validate_interface(&request.interface_code)?;
        let hours = match request.expiration_hours {
            Some(0) => {
                return Err(ProjectError::Validation(
                    "Expiration hours must be greater than 0".to_string(),
                ))
            }
            Some(hours) => hours,
            None => self.settings.default_expiration_hours,
        };

        let now = Utc::now();
        let id = uuid::Uuid::new_v4().simple().to_string();
        let endpoint = format!("/api/mock/{}", id);
        let project = ApiProject {
            url: format!("{}{}", self.settings.base_url.trim_end_matches('/'), endpoint),
            endpoint,
            id: id.clone(),
            name: request.name,
            description: request.description,
            interface_code: request.interface_code,
            method: request.method.unwrap_or(HttpMethod::Get),
            expected_status_codes: request.expected_status_codes.unwrap_or_else(|| vec![200]),
            expires_at: expiry_from(now, hours),
            created_at: now,
            updated_at: now,
            is_active: true,
        };

        let mut projects = self.projects.write().await;
        let live = projects.values().filter(|p| p.is_live(now)).count();
        if live >= self.settings.max_projects {
            return Err(ProjectError::LimitReached(live));
        }
        projects.insert(id, project.clone());

        info!(
            project_id = %project.id,
            interface = %parsed.name,
            fields = parsed.properties.len(),
            "Created mock project"
        );
        Ok(project)
    }

    /// Live project by id; inactive and expired projects are hidden.
    pub async fn get_project(&self, id: &str) -> Option<ApiProject> {
        let projects = self.projects.read().await;
        projects.get(id).filter(|p| p.is_live(Utc::now())).cloned()
    }

    /// Apply a partial update. `Ok(None)` when the project is missing or inactive.
    pub async fn update_project(
        &self,
        id: &str,
        update: ProjectUpdate,
    ) -> Result<Option<ApiProject>, ProjectError> {
        if let Some(name) = &update.name {
            validate_name(name)?;
        }
        if let Some(code) = &update.interface_code {
            validate_interface(code)?;
        }
        if update.expiration_hours == Some(0) {
            return Err(ProjectError::Validation(
                "Expiration hours must be greater than 0".to_string(),
            ));
        }

        let mut projects = self.projects.write().await;
        let Some(project) = projects.get_mut(id).filter(|p| p.is_active) else {
            return Ok(None);
        };

        let now = Utc::now();
        if let Some(name) = update.name {
            project.name = name;
        }
        if let Some(description) = update.description {
            project.description = Some(description);
        }
        if let Some(code) = update.interface_code {
            project.interface_code = code;
        }
        if let Some(method) = update.method {
            project.method = method;
        }
        if let Some(codes) = update.expected_status_codes {
            project.expected_status_codes = codes;
        }
        if let Some(hours) = update.expiration_hours {
            project.expires_at = expiry_from(now, hours);
        }
        project.updated_at = now;

        debug!(project_id = %id, "Updated mock project");
        Ok(Some(project.clone()))
    }

    /// Returns false when no project has this id.
    pub async fn deactivate_project(&self, id: &str) -> bool {
        let mut projects = self.projects.write().await;
        match projects.get_mut(id) {
            Some(project) => {
                project.is_active = false;
                project.updated_at = Utc::now();
                info!(project_id = %id, "Deactivated mock project");
                true
            }
            None => false,
        }
    }

    /// Structural model of a live project's interface.
    pub async fn parsed_interface(&self, id: &str) -> Result<ParsedInterface, ProjectError> {
        let project = self.get_project(id).await.ok_or_else(ProjectError::not_found)?;
        Ok(parse_interface(&project.interface_code))
    }

    /// Parse the stored interface and generate `count` records (a bare object
    /// when `count` is absent or 1).
    pub async fn generate_mock_response(
        &self,
        id: &str,
        count: Option<usize>,
    ) -> Result<Value, ProjectError> {
        let parsed = self.parsed_interface(id).await?;
        Ok(self
            .generator
            .generate_mock_data(&parsed, count, &mut rand::thread_rng()))
    }

    /// Live projects, oldest first.
    pub async fn list_active_projects(&self) -> Vec<ApiProject> {
        let now = Utc::now();
        let projects = self.projects.read().await;
        let mut active: Vec<ApiProject> =
            projects.values().filter(|p| p.is_live(now)).cloned().collect();
        active.sort_by_key(|p| p.created_at);
        active
    }

    /// Drop every project past its expiry. Returns how many were removed.
    pub async fn cleanup_expired_projects(&self) -> usize {
        let now = Utc::now();
        let mut projects = self.projects.write().await;
        let before = projects.len();
        projects.retain(|_, p| p.expires_at >= now);
        let removed = before - projects.len();
        if removed > 0 {
            info!(removed, "Removed expired mock projects");
        }
        removed
    }

    pub async fn stats(&self) -> ProjectStats {
        let now = Utc::now();
        let projects = self.projects.read().await;
        let active = projects.values().filter(|p| p.is_live(now)).count();
        ProjectStats {
            total: projects.len(),
            active,
            expired: projects.len() - active,
        }
    }

    /// Run [`Self::cleanup_expired_projects`] on the configured interval.
    pub fn spawn_cleanup(&self) -> JoinHandle<()> {
        let manager = self.clone();
        let period = StdDuration::from_secs(self.settings.cleanup_interval_seconds.max(1));
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                manager.cleanup_expired_projects().await;
            }
        })
    }

    #[cfg(test)]
    pub(crate) async fn set_expiry(&self, id: &str, expires_at: DateTime<Utc>) {
        if let Some(project) = self.projects.write().await.get_mut(id) {
            project.expires_at = expires_at;
        }
    }
}

impl Default for ProjectManager {
    fn default() -> Self {
        Self::new(ProjectSettings::default(), MockGenerator::default())
    }
}

fn expiry_from(now: DateTime<Utc>, hours: u64) -> DateTime<Utc> {
    let hours = i64::try_from(hours).unwrap_or(i64::MAX);
    Duration::try_hours(hours)
        .and_then(|d| now.checked_add_signed(d))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

fn validate_name(name: &str) -> Result<(), ProjectError> {
    if name.trim().is_empty() {
        return Err(ProjectError::Validation(
            "Name and interface code are required".to_string(),
        ));
    }
    Ok(())
}

/// Interface text must be present. Its contents are parsed leniently and never
/// rejected.
fn validate_interface(code: &str) -> Result<ParsedInterface, ProjectError> {
    if code.trim().is_empty() {
        return Err(ProjectError::Validation(
            "Name and interface code are required".to_string(),
        ));
    }
    Ok(parse_interface(code))
}
