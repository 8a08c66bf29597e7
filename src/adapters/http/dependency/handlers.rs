//! HTTP handlers for dependency graph endpoints.

use std::sync::Arc;

use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::dependency::{
    AddDependencyCommand, AddDependencyError, AddDependencyHandler, DetectCyclesHandler,
    ListBlockingHandler, ListDependenciesHandler, ListDependenciesQuery, ResolveDependencyCommand,
    ResolveDependencyError, ResolveDependencyHandler,
};
use crate::domain::dependency::{Dependency, InitiativeRef};
use crate::domain::foundation::{CommandMetadata, DependencyId, ErrorCode, InitiativeId};
use crate::ports::{CollectionStore, EventPublisher};

use super::super::auth::AuthenticatedUser;
use super::super::error::ErrorResponse;
use super::dto::{
    CreateDependencyRequest, CycleDiagnosticsResponse, DependencyResponse,
    InitiativeRefRequest, ListDependenciesParams, ResolveDependencyResponse,
};

// ────────────────────────────────────────────────────────────────────────────
// Application State
// ────────────────────────────────────────────────────────────────────────────

/// Shared state for dependency endpoints.
#[derive(Clone)]
pub struct DependencyAppState {
    pub dependencies: Arc<dyn CollectionStore<Dependency>>,
    pub event_publisher: Arc<dyn EventPublisher>,
}

impl DependencyAppState {
    pub fn add_dependency_handler(&self) -> AddDependencyHandler {
        AddDependencyHandler::new(self.dependencies.clone(), self.event_publisher.clone())
    }

    pub fn resolve_dependency_handler(&self) -> ResolveDependencyHandler {
        ResolveDependencyHandler::new(self.dependencies.clone(), self.event_publisher.clone())
    }

    pub fn list_dependencies_handler(&self) -> ListDependenciesHandler {
        ListDependenciesHandler::new(self.dependencies.clone())
    }

    pub fn list_blocking_handler(&self) -> ListBlockingHandler {
        ListBlockingHandler::new(self.dependencies.clone())
    }

    pub fn detect_cycles_handler(&self) -> DetectCyclesHandler {
        DetectCyclesHandler::new(self.dependencies.clone())
    }
}

fn parse_initiative(
    request: InitiativeRefRequest,
    field: &str,
) -> Result<InitiativeRef, DependencyApiError> {
    let id: InitiativeId = request.id.parse().map_err(|_| {
        DependencyApiError::BadRequest(format!("Invalid initiative ID in '{}'", field))
    })?;
    Ok(InitiativeRef::new(id, request.title))
}

// ────────────────────────────────────────────────────────────────────────────
// Command Handlers (POST endpoints)
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/dependencies - Add a dependency edge
pub async fn add_dependency(
    State(state): State<DependencyAppState>,
    user: AuthenticatedUser,
    Json(request): Json<CreateDependencyRequest>,
) -> Result<impl IntoResponse, DependencyApiError> {
    let handler = state.add_dependency_handler();
    let cmd = AddDependencyCommand {
        from: parse_initiative(request.from, "from")?,
        to: parse_initiative(request.to, "to")?,
        kind: request.kind,
        description: request.description,
    };
    let metadata = CommandMetadata::new(user.user_id);

    let result = handler.handle(cmd, metadata).await?;

    Ok((
        StatusCode::CREATED,
        Json(DependencyResponse::from(&result.dependency)),
    ))
}

/// POST /api/dependencies/:id/resolve - Resolve a dependency (idempotent)
pub async fn resolve_dependency(
    State(state): State<DependencyAppState>,
    Path(dependency_id): Path<String>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, DependencyApiError> {
    let dependency_id: DependencyId = dependency_id
        .parse()
        .map_err(|_| DependencyApiError::BadRequest("Invalid dependency ID format".to_string()))?;

    let handler = state.resolve_dependency_handler();
    let cmd = ResolveDependencyCommand { dependency_id };
    let metadata = CommandMetadata::new(user.user_id);

    let result = handler.handle(cmd, metadata).await?;

    let response = ResolveDependencyResponse {
        dependency: DependencyResponse::from(&result.dependency),
        newly_resolved: result.newly_resolved,
    };

    Ok((StatusCode::OK, Json(response)))
}

// ────────────────────────────────────────────────────────────────────────────
// Query Handlers (GET endpoints)
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/dependencies - List dependencies with optional kind/status filters
pub async fn list_dependencies(
    State(state): State<DependencyAppState>,
    Query(params): Query<ListDependenciesParams>,
) -> Result<impl IntoResponse, DependencyApiError> {
    let handler = state.list_dependencies_handler();
    let dependencies = handler
        .handle(ListDependenciesQuery {
            kind: params.kind,
            status: params.status,
        })
        .await
        .map_err(DependencyApiError::from_domain)?;

    let response: Vec<DependencyResponse> =
        dependencies.iter().map(DependencyResponse::from).collect();
    Ok((StatusCode::OK, Json(response)))
}

/// GET /api/dependencies/blocking - List unresolved blocking edges
pub async fn list_blocking(
    State(state): State<DependencyAppState>,
) -> Result<impl IntoResponse, DependencyApiError> {
    let handler = state.list_blocking_handler();
    let dependencies = handler
        .handle()
        .await
        .map_err(DependencyApiError::from_domain)?;

    let response: Vec<DependencyResponse> =
        dependencies.iter().map(DependencyResponse::from).collect();
    Ok((StatusCode::OK, Json(response)))
}

/// GET /api/dependencies/diagnostics/cycles - Report cycles among active
/// blocking edges
pub async fn detect_cycles(
    State(state): State<DependencyAppState>,
) -> Result<impl IntoResponse, DependencyApiError> {
    let handler = state.detect_cycles_handler();
    let cycles = handler
        .handle()
        .await
        .map_err(DependencyApiError::from_domain)?;

    let response = CycleDiagnosticsResponse {
        cycles: cycles
            .into_iter()
            .map(|cycle| cycle.into_iter().map(|id| id.to_string()).collect())
            .collect(),
    };

    Ok((StatusCode::OK, Json(response)))
}

// ────────────────────────────────────────────────────────────────────────────
// Error Handling
// ────────────────────────────────────────────────────────────────────────────

/// API error type that converts dependency errors to HTTP responses.
#[derive(Debug)]
pub enum DependencyApiError {
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Internal(String),
}

impl DependencyApiError {
    fn from_domain(err: crate::domain::foundation::DomainError) -> Self {
        match err.code {
            ErrorCode::ConcurrentModification => DependencyApiError::Conflict(err.message),
            _ => DependencyApiError::Internal(err.message),
        }
    }
}

impl From<AddDependencyError> for DependencyApiError {
    fn from(err: AddDependencyError) -> Self {
        match err {
            AddDependencyError::Validation(e) => DependencyApiError::BadRequest(e.to_string()),
            AddDependencyError::Domain(e) => DependencyApiError::from_domain(e),
        }
    }
}

impl From<ResolveDependencyError> for DependencyApiError {
    fn from(err: ResolveDependencyError) -> Self {
        match err {
            ResolveDependencyError::NotFound(id) => {
                DependencyApiError::NotFound(id.to_string())
            }
            ResolveDependencyError::Domain(e) => DependencyApiError::from_domain(e),
        }
    }
}

impl IntoResponse for DependencyApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            DependencyApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ErrorResponse::bad_request(msg))
            }
            DependencyApiError::NotFound(id) => (
                StatusCode::NOT_FOUND,
                ErrorResponse::not_found("Dependency", &id),
            ),
            DependencyApiError::Conflict(msg) => {
                (StatusCode::CONFLICT, ErrorResponse::conflict(msg))
            }
            DependencyApiError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::internal(msg))
            }
        };

        (status, Json(error)).into_response()
    }
}
