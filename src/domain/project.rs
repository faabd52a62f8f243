use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

/// A registered mock endpoint backed by an interface definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiProject {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub interface_code: String,
    /// Path of the mock endpoint, e.g. `/api/mock/{id}`
    pub endpoint: String,
    /// Absolute URL built from the configured base URL
    pub url: String,
    pub method: HttpMethod,
    pub expected_status_codes: Vec<u16>,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_active: bool,
}

impl ApiProject {
    /// Active and not yet past its expiry.
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.is_active && self.expires_at > now
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateProjectRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub interface_code: String,
    #[serde(default)]
    pub method: Option<HttpMethod>,
    #[serde(default)]
    pub expected_status_codes: Option<Vec<u16>>,
    #[serde(default)]
    pub expiration_hours: Option<u64>,
}

/// Partial update; only the fields that are set are applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub interface_code: Option<String>,
    #[serde(default)]
    pub method: Option<HttpMethod>,
    #[serde(default)]
    pub expected_status_codes: Option<Vec<u16>>,
    /// Resets the expiry to now plus this many hours
    #[serde(default)]
    pub expiration_hours: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectStats {
    pub total: usize,
    pub active: usize,
    pub expired: usize,
}
