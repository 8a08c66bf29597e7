//! HTTP handlers for alignment matrix endpoints.
//!
//! These handlers connect Axum routes to application layer command/query
//! handlers.

use std::sync::Arc;

use axum::extract::{Json, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::matrix::{
    AddActionCommand, AddActionError, AddActionHandler, AddMetricCommand, AddMetricError,
    AddMetricHandler, AddObjectiveCommand, AddObjectiveError, AddObjectiveHandler,
    GetStrengthHandler, GetStrengthQuery, ListLinksHandler, ToggleLinkCommand, ToggleLinkError,
    ToggleLinkHandler,
};
use crate::domain::foundation::{CommandMetadata, ErrorCode, ObjectiveId};
use crate::domain::matrix::{ActionItem, AlignmentLink, Column, Metric, Objective};
use crate::ports::{CollectionStore, EventPublisher};

use super::super::auth::AuthenticatedUser;
use super::super::error::ErrorResponse;
use super::dto::{
    ActionResponse, CreateActionRequest, CreateMetricRequest, CreateObjectiveRequest,
    LinkResponse, MetricResponse, ObjectiveResponse, StrengthParams, StrengthResponse,
    ToggleLinkRequest, ToggleLinkResponse,
};

// ────────────────────────────────────────────────────────────────────────────
// Application State
// ────────────────────────────────────────────────────────────────────────────

/// Shared state for matrix endpoints.
#[derive(Clone)]
pub struct MatrixAppState {
    pub objectives: Arc<dyn CollectionStore<Objective>>,
    pub metrics: Arc<dyn CollectionStore<Metric>>,
    pub actions: Arc<dyn CollectionStore<ActionItem>>,
    pub links: Arc<dyn CollectionStore<AlignmentLink>>,
    pub event_publisher: Arc<dyn EventPublisher>,
}

impl MatrixAppState {
    pub fn add_objective_handler(&self) -> AddObjectiveHandler {
        AddObjectiveHandler::new(self.objectives.clone(), self.event_publisher.clone())
    }

    pub fn add_metric_handler(&self) -> AddMetricHandler {
        AddMetricHandler::new(self.metrics.clone(), self.event_publisher.clone())
    }

    pub fn add_action_handler(&self) -> AddActionHandler {
        AddActionHandler::new(self.actions.clone(), self.event_publisher.clone())
    }

    pub fn toggle_link_handler(&self) -> ToggleLinkHandler {
        ToggleLinkHandler::new(self.links.clone(), self.event_publisher.clone())
    }

    pub fn get_strength_handler(&self) -> GetStrengthHandler {
        GetStrengthHandler::new(self.links.clone())
    }

    pub fn list_links_handler(&self) -> ListLinksHandler {
        ListLinksHandler::new(self.links.clone())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Command Handlers (POST endpoints)
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/alignment/objectives - Add an objective row
pub async fn add_objective(
    State(state): State<MatrixAppState>,
    user: AuthenticatedUser,
    Json(request): Json<CreateObjectiveRequest>,
) -> Result<impl IntoResponse, MatrixApiError> {
    let handler = state.add_objective_handler();
    let cmd = AddObjectiveCommand {
        kind: request.kind,
        description: request.description,
    };
    let metadata = CommandMetadata::new(user.user_id);

    let result = handler.handle(cmd, metadata).await?;

    Ok((
        StatusCode::CREATED,
        Json(ObjectiveResponse::from(&result.objective)),
    ))
}

/// POST /api/alignment/metrics - Add a metric column
pub async fn add_metric(
    State(state): State<MatrixAppState>,
    user: AuthenticatedUser,
    Json(request): Json<CreateMetricRequest>,
) -> Result<impl IntoResponse, MatrixApiError> {
    let handler = state.add_metric_handler();
    let cmd = AddMetricCommand {
        name: request.name,
        target: request.target,
        unit: request.unit,
    };
    let metadata = CommandMetadata::new(user.user_id);

    let result = handler.handle(cmd, metadata).await?;

    Ok((
        StatusCode::CREATED,
        Json(MetricResponse::from(&result.metric)),
    ))
}

/// POST /api/alignment/actions - Add an improvement action column
pub async fn add_action(
    State(state): State<MatrixAppState>,
    user: AuthenticatedUser,
    Json(request): Json<CreateActionRequest>,
) -> Result<impl IntoResponse, MatrixApiError> {
    let handler = state.add_action_handler();
    let cmd = AddActionCommand {
        description: request.description,
        owner: request.owner,
    };
    let metadata = CommandMetadata::new(user.user_id);

    let result = handler.handle(cmd, metadata).await?;

    Ok((
        StatusCode::CREATED,
        Json(ActionResponse::from(&result.action)),
    ))
}

/// POST /api/alignment/toggle - Cycle one cell through its strength states
pub async fn toggle_link(
    State(state): State<MatrixAppState>,
    user: AuthenticatedUser,
    Json(request): Json<ToggleLinkRequest>,
) -> Result<impl IntoResponse, MatrixApiError> {
    let handler = state.toggle_link_handler();
    let cmd = ToggleLinkCommand {
        objective_id: request.objective_id,
        column: request.column,
    };
    let metadata = CommandMetadata::new(user.user_id);

    let result = handler.handle(cmd, metadata).await?;

    let response = ToggleLinkResponse {
        link: result.link.map(LinkResponse::from),
    };

    Ok((StatusCode::OK, Json(response)))
}

// ────────────────────────────────────────────────────────────────────────────
// Query Handlers (GET endpoints)
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/alignment/links - List all stored cells
pub async fn list_links(
    State(state): State<MatrixAppState>,
) -> Result<impl IntoResponse, MatrixApiError> {
    let handler = state.list_links_handler();
    let links = handler.handle().await.map_err(MatrixApiError::from_domain)?;

    let response: Vec<LinkResponse> = links.into_iter().map(LinkResponse::from).collect();
    Ok((StatusCode::OK, Json(response)))
}

/// GET /api/alignment/strength - Look up one cell's strength
pub async fn get_strength(
    State(state): State<MatrixAppState>,
    Query(params): Query<StrengthParams>,
) -> Result<impl IntoResponse, MatrixApiError> {
    let objective_id: ObjectiveId = params
        .objective_id
        .parse()
        .map_err(|_| MatrixApiError::BadRequest("Invalid objective ID format".to_string()))?;

    let column = match params.column_type.as_str() {
        "metric" => Column::Metric(params.column_id.parse().map_err(|_| {
            MatrixApiError::BadRequest("Invalid column ID format".to_string())
        })?),
        "action" => Column::Action(params.column_id.parse().map_err(|_| {
            MatrixApiError::BadRequest("Invalid column ID format".to_string())
        })?),
        other => {
            return Err(MatrixApiError::BadRequest(format!(
                "Unknown column type: {}",
                other
            )))
        }
    };

    let handler = state.get_strength_handler();
    let strength = handler
        .handle(GetStrengthQuery {
            objective_id,
            column,
        })
        .await
        .map_err(MatrixApiError::from_domain)?;

    Ok((StatusCode::OK, Json(StrengthResponse { strength })))
}

// ────────────────────────────────────────────────────────────────────────────
// Error Handling
// ────────────────────────────────────────────────────────────────────────────

/// API error type that converts matrix errors to HTTP responses.
#[derive(Debug)]
pub enum MatrixApiError {
    BadRequest(String),
    Conflict(String),
    Internal(String),
}

impl MatrixApiError {
    fn from_domain(err: crate::domain::foundation::DomainError) -> Self {
        match err.code {
            ErrorCode::ConcurrentModification => MatrixApiError::Conflict(err.message),
            _ => MatrixApiError::Internal(err.message),
        }
    }
}

impl From<AddObjectiveError> for MatrixApiError {
    fn from(err: AddObjectiveError) -> Self {
        match err {
            AddObjectiveError::Validation(e) => MatrixApiError::BadRequest(e.to_string()),
            AddObjectiveError::Domain(e) => MatrixApiError::from_domain(e),
        }
    }
}

impl From<AddMetricError> for MatrixApiError {
    fn from(err: AddMetricError) -> Self {
        match err {
            AddMetricError::Validation(e) => MatrixApiError::BadRequest(e.to_string()),
            AddMetricError::Domain(e) => MatrixApiError::from_domain(e),
        }
    }
}

impl From<AddActionError> for MatrixApiError {
    fn from(err: AddActionError) -> Self {
        match err {
            AddActionError::Validation(e) => MatrixApiError::BadRequest(e.to_string()),
            AddActionError::Domain(e) => MatrixApiError::from_domain(e),
        }
    }
}

impl From<ToggleLinkError> for MatrixApiError {
    fn from(err: ToggleLinkError) -> Self {
        match err {
            ToggleLinkError::Domain(e) => MatrixApiError::from_domain(e),
        }
    }
}

impl IntoResponse for MatrixApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            MatrixApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ErrorResponse::bad_request(msg))
            }
            MatrixApiError::Conflict(msg) => (StatusCode::CONFLICT, ErrorResponse::conflict(msg)),
            MatrixApiError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::internal(msg))
            }
        };

        (status, Json(error)).into_response()
    }
}
