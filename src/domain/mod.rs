pub mod error;
pub mod interface;
pub mod project;

pub use error::{ParseError, ProjectError};
pub use interface::{ParsedInterface, Properties, StringFormat, TypeInfo, TypeKind};
pub use project::{ApiProject, CreateProjectRequest, HttpMethod, ProjectStats, ProjectUpdate};
