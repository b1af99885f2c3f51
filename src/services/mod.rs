pub mod project_service;
pub mod repo_service;

pub use project_service::ProjectService;
pub use repo_service::RepoCacheService;
