//! HTTP surface for the repository cache and project services.
//!
//! Thin request/response mapping only: handlers translate the typed
//! service errors to status codes and never contain domain logic.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::domain::errors::{RemoteError, ServiceError};
use crate::domain::models::{RepoRecord, ServerConfig, UserProject};
use crate::domain::ports::{ProjectStore, RemoteRepoSource, RepoStore};
use crate::services::{ProjectService, RepoCacheService};

/// Response with one repository record.
#[derive(Debug, Serialize)]
pub struct RepoResponse {
    pub id: Option<i64>,
    pub username: String,
    pub repo_name: String,
    pub url: String,
    pub fetched_at: String,
}

impl From<RepoRecord> for RepoResponse {
    fn from(r: RepoRecord) -> Self {
        Self {
            id: r.id,
            username: r.username,
            repo_name: r.repo_name,
            url: r.url,
            fetched_at: r.fetched_at.to_rfc3339(),
        }
    }
}

/// Response with one project.
#[derive(Debug, Serialize)]
pub struct ProjectResponse {
    pub id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    pub user_id: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<UserProject> for ProjectResponse {
    fn from(p: UserProject) -> Self {
        Self {
            id: p.id,
            name: p.name,
            description: p.description,
            user_id: p.user_id,
            created_at: p.created_at.to_rfc3339(),
            updated_at: p.updated_at.to_rfc3339(),
        }
    }
}

/// Request to create a project.
#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub user_id: i64,
}

/// Request to update a project.
#[derive(Debug, Deserialize)]
pub struct UpdateProjectRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub user_id: i64,
}

/// Query parameters for project listing.
#[derive(Debug, Deserialize)]
pub struct ProjectQueryParams {
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Translate a service error to its HTTP status and error code.
fn status_for(err: &ServiceError) -> (StatusCode, &'static str) {
    match err {
        ServiceError::InvalidArgument(_) => (StatusCode::BAD_REQUEST, "INVALID_ARGUMENT"),
        ServiceError::RepoNotFound { .. } | ServiceError::ProjectNotFound(_) => {
            (StatusCode::NOT_FOUND, "NOT_FOUND")
        }
        ServiceError::Remote(RemoteError::RateLimited { .. }) => {
            (StatusCode::TOO_MANY_REQUESTS, "RATE_LIMITED")
        }
        ServiceError::Remote(_) => (StatusCode::BAD_GATEWAY, "REMOTE_UNAVAILABLE"),
        ServiceError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_FAILURE"),
        ServiceError::Serialization(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL"),
    }
}

fn into_api_error(err: ServiceError) -> ApiError {
    let (status, code) = status_for(&err);
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
            code: code.to_string(),
        }),
    )
}

/// Shared state for the HTTP surface.
struct AppState<S: RepoStore, R: RemoteRepoSource, P: ProjectStore> {
    repos: Arc<RepoCacheService<S, R>>,
    projects: Arc<ProjectService<P>>,
}

/// The API server.
pub struct ApiServer<S: RepoStore + 'static, R: RemoteRepoSource + 'static, P: ProjectStore + 'static>
{
    config: ServerConfig,
    repos: Arc<RepoCacheService<S, R>>,
    projects: Arc<ProjectService<P>>,
}

impl<S: RepoStore + 'static, R: RemoteRepoSource + 'static, P: ProjectStore + 'static>
    ApiServer<S, R, P>
{
    pub fn new(
        repos: Arc<RepoCacheService<S, R>>,
        projects: Arc<ProjectService<P>>,
        config: ServerConfig,
    ) -> Self {
        Self {
            config,
            repos,
            projects,
        }
    }

    /// Build the router. Public so integration tests can drive the app
    /// without binding a socket first.
    pub fn into_router(self) -> Router {
        let state = Arc::new(AppState {
            repos: self.repos,
            projects: self.projects,
        });

        let app = Router::new()
            // Read-through repository cache
            .route("/repos/{username}", get(get_repos::<S, R, P>))
            .route("/repos/{username}/{repo}", get(get_repo::<S, R, P>))
            .route("/cached", get(list_cached::<S, R, P>))
            // Project CRUD
            .route(
                "/api/v1/projects",
                get(list_projects::<S, R, P>).post(create_project::<S, R, P>),
            )
            .route(
                "/api/v1/projects/{id}",
                get(get_project::<S, R, P>)
                    .put(update_project::<S, R, P>)
                    .delete(delete_project::<S, R, P>),
            )
            // Health check
            .route("/health", get(health_check))
            .with_state(state);

        if self.config.enable_cors {
            app.layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            )
            .layer(TraceLayer::new_for_http())
        } else {
            app.layer(TraceLayer::new_for_http())
        }
    }

    /// Start the server with a shutdown signal.
    pub async fn serve_with_shutdown<F>(
        self,
        shutdown: F,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port).parse()?;
        let router = self.into_router();

        tracing::info!("API server listening on {}", addr);

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await?;
        Ok(())
    }

    /// Start the server.
    pub async fn serve(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.serve_with_shutdown(std::future::pending()).await
    }
}

// Handler functions

async fn health_check() -> &'static str {
    "OK"
}

async fn get_repos<S: RepoStore + 'static, R: RemoteRepoSource + 'static, P: ProjectStore + 'static>(
    State(state): State<Arc<AppState<S, R, P>>>,
    Path(username): Path<String>,
) -> Result<Json<Vec<RepoResponse>>, ApiError> {
    let repos = state
        .repos
        .repos_for_user(&username)
        .await
        .map_err(into_api_error)?;
    Ok(Json(repos.into_iter().map(RepoResponse::from).collect()))
}

async fn get_repo<S: RepoStore + 'static, R: RemoteRepoSource + 'static, P: ProjectStore + 'static>(
    State(state): State<Arc<AppState<S, R, P>>>,
    Path((username, repo)): Path<(String, String)>,
) -> Result<Json<RepoResponse>, ApiError> {
    let record = state
        .repos
        .repo_for_user(&username, &repo)
        .await
        .map_err(into_api_error)?;
    Ok(Json(record.into()))
}

async fn list_cached<S: RepoStore + 'static, R: RemoteRepoSource + 'static, P: ProjectStore + 'static>(
    State(state): State<Arc<AppState<S, R, P>>>,
) -> Result<Json<Vec<RepoResponse>>, ApiError> {
    let repos = state.repos.cached_repos().await.map_err(into_api_error)?;
    Ok(Json(repos.into_iter().map(RepoResponse::from).collect()))
}

async fn create_project<S: RepoStore + 'static, R: RemoteRepoSource + 'static, P: ProjectStore + 'static>(
    State(state): State<Arc<AppState<S, R, P>>>,
    Json(req): Json<CreateProjectRequest>,
) -> Result<(StatusCode, Json<ProjectResponse>), ApiError> {
    let mut project = UserProject::new(req.name, req.user_id);
    project.description = req.description;

    let created = state
        .projects
        .create_project(project)
        .await
        .map_err(into_api_error)?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

async fn get_project<S: RepoStore + 'static, R: RemoteRepoSource + 'static, P: ProjectStore + 'static>(
    State(state): State<Arc<AppState<S, R, P>>>,
    Path(id): Path<i64>,
) -> Result<Json<ProjectResponse>, ApiError> {
    let project = state
        .projects
        .get_project(id)
        .await
        .map_err(into_api_error)?
        .ok_or_else(|| into_api_error(ServiceError::ProjectNotFound(id)))?;
    Ok(Json(project.into()))
}

async fn list_projects<S: RepoStore + 'static, R: RemoteRepoSource + 'static, P: ProjectStore + 'static>(
    State(state): State<Arc<AppState<S, R, P>>>,
    Query(params): Query<ProjectQueryParams>,
) -> Result<Json<Vec<ProjectResponse>>, ApiError> {
    let projects = match (params.user_id, params.name) {
        (Some(user_id), _) => state.projects.projects_for_user(user_id).await,
        (None, Some(name)) => state.projects.search_projects(&name).await,
        (None, None) => state.projects.list_projects().await,
    }
    .map_err(into_api_error)?;

    Ok(Json(projects.into_iter().map(ProjectResponse::from).collect()))
}

async fn update_project<S: RepoStore + 'static, R: RemoteRepoSource + 'static, P: ProjectStore + 'static>(
    State(state): State<Arc<AppState<S, R, P>>>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateProjectRequest>,
) -> Result<Json<ProjectResponse>, ApiError> {
    let existing = state
        .projects
        .get_project(id)
        .await
        .map_err(into_api_error)?
        .ok_or_else(|| into_api_error(ServiceError::ProjectNotFound(id)))?;

    let updated = UserProject {
        name: req.name,
        description: req.description,
        user_id: req.user_id,
        ..existing
    };

    let saved = state
        .projects
        .update_project(updated)
        .await
        .map_err(into_api_error)?;
    Ok(Json(saved.into()))
}

async fn delete_project<S: RepoStore + 'static, R: RemoteRepoSource + 'static, P: ProjectStore + 'static>(
    State(state): State<Arc<AppState<S, R, P>>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state
        .projects
        .delete_project(id)
        .await
        .map_err(into_api_error)?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                ServiceError::InvalidArgument("x".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                ServiceError::RepoNotFound {
                    username: "a".into(),
                    repo_name: "b".into(),
                },
                StatusCode::NOT_FOUND,
            ),
            (ServiceError::ProjectNotFound(1), StatusCode::NOT_FOUND),
            (
                ServiceError::Remote(RemoteError::RateLimited {
                    retry_after_secs: None,
                }),
                StatusCode::TOO_MANY_REQUESTS,
            ),
            (
                ServiceError::Remote(RemoteError::Unreachable("x".into())),
                StatusCode::BAD_GATEWAY,
            ),
            (
                ServiceError::Remote(RemoteError::Status {
                    status: 500,
                    body: String::new(),
                }),
                StatusCode::BAD_GATEWAY,
            ),
            (
                ServiceError::Storage("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(status_for(&err).0, expected, "wrong status for {err}");
        }
    }

    #[test]
    fn test_rate_limited_has_distinct_code() {
        let (_, code) = status_for(&ServiceError::Remote(RemoteError::RateLimited {
            retry_after_secs: Some(5),
        }));
        assert_eq!(code, "RATE_LIMITED");

        let (_, code) = status_for(&ServiceError::Remote(RemoteError::Unreachable("x".into())));
        assert_eq!(code, "REMOTE_UNAVAILABLE");
    }
}
