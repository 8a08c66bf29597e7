//! HTTP handlers for PDCA cycle endpoints.

use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::pdca::{
    CompletePhaseCommand, CompletePhaseError, CompletePhaseHandler, CreateCycleCommand,
    CreateCycleError, CreateCycleHandler, GetCycleHandler, ListCyclesHandler,
};
use crate::domain::foundation::{CommandMetadata, ErrorCode, InitiativeId, PdcaCycleId};
use crate::domain::pdca::{PdcaCycle, PdcaPhase};
use crate::ports::{CollectionStore, EventPublisher};

use super::super::auth::AuthenticatedUser;
use super::super::error::ErrorResponse;
use super::dto::{CompletePhaseRequest, CreateCycleRequest, CycleResponse};

// ────────────────────────────────────────────────────────────────────────────
// Application State
// ────────────────────────────────────────────────────────────────────────────

/// Shared state for PDCA endpoints.
#[derive(Clone)]
pub struct PdcaAppState {
    pub cycles: Arc<dyn CollectionStore<PdcaCycle>>,
    pub event_publisher: Arc<dyn EventPublisher>,
}

impl PdcaAppState {
    pub fn create_cycle_handler(&self) -> CreateCycleHandler {
        CreateCycleHandler::new(self.cycles.clone(), self.event_publisher.clone())
    }

    pub fn complete_phase_handler(&self) -> CompletePhaseHandler {
        CompletePhaseHandler::new(self.cycles.clone(), self.event_publisher.clone())
    }

    pub fn get_cycle_handler(&self) -> GetCycleHandler {
        GetCycleHandler::new(self.cycles.clone())
    }

    pub fn list_cycles_handler(&self) -> ListCyclesHandler {
        ListCyclesHandler::new(self.cycles.clone())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Command Handlers (POST endpoints)
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/pdca-cycles - Create an improvement cycle
pub async fn create_cycle(
    State(state): State<PdcaAppState>,
    user: AuthenticatedUser,
    Json(request): Json<CreateCycleRequest>,
) -> Result<impl IntoResponse, PdcaApiError> {
    let linked_initiative = match request.linked_initiative {
        Some(raw) => Some(raw.parse::<InitiativeId>().map_err(|_| {
            PdcaApiError::BadRequest("Invalid initiative ID format".to_string())
        })?),
        None => None,
    };

    let handler = state.create_cycle_handler();
    let cmd = CreateCycleCommand {
        title: request.title,
        description: request.description,
        category: request.category,
        owner: request.owner,
        start_date: request.start_date,
        linked_initiative,
    };
    let metadata = CommandMetadata::new(user.user_id);

    let result = handler.handle(cmd, metadata).await?;

    Ok((StatusCode::CREATED, Json(CycleResponse::from(&result.cycle))))
}

/// POST /api/pdca-cycles/:id/phases/:phase/complete - Complete the current
/// phase
pub async fn complete_phase(
    State(state): State<PdcaAppState>,
    Path((cycle_id, phase)): Path<(String, String)>,
    user: AuthenticatedUser,
    Json(request): Json<CompletePhaseRequest>,
) -> Result<impl IntoResponse, PdcaApiError> {
    let cycle_id: PdcaCycleId = cycle_id
        .parse()
        .map_err(|_| PdcaApiError::BadRequest("Invalid cycle ID format".to_string()))?;
    let phase: PdcaPhase = phase.parse().map_err(PdcaApiError::BadRequest)?;

    let handler = state.complete_phase_handler();
    let cmd = CompletePhaseCommand {
        cycle_id,
        phase,
        notes: request.notes,
        findings: request.findings,
    };
    let metadata = CommandMetadata::new(user.user_id);

    let result = handler.handle(cmd, metadata).await?;

    Ok((StatusCode::OK, Json(CycleResponse::from(&result.cycle))))
}

// ────────────────────────────────────────────────────────────────────────────
// Query Handlers (GET endpoints)
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/pdca-cycles - List all cycles
pub async fn list_cycles(
    State(state): State<PdcaAppState>,
) -> Result<impl IntoResponse, PdcaApiError> {
    let handler = state.list_cycles_handler();
    let cycles = handler.handle().await.map_err(PdcaApiError::from_domain)?;

    let response: Vec<CycleResponse> = cycles.iter().map(CycleResponse::from).collect();
    Ok((StatusCode::OK, Json(response)))
}

/// GET /api/pdca-cycles/:id - Fetch one cycle
pub async fn get_cycle(
    State(state): State<PdcaAppState>,
    Path(cycle_id): Path<String>,
) -> Result<impl IntoResponse, PdcaApiError> {
    let cycle_id: PdcaCycleId = cycle_id
        .parse()
        .map_err(|_| PdcaApiError::BadRequest("Invalid cycle ID format".to_string()))?;

    let handler = state.get_cycle_handler();
    let cycle = handler
        .handle(cycle_id)
        .await
        .map_err(PdcaApiError::from_domain)?
        .ok_or_else(|| PdcaApiError::NotFound(cycle_id.to_string()))?;

    Ok((StatusCode::OK, Json(CycleResponse::from(&cycle))))
}

// ────────────────────────────────────────────────────────────────────────────
// Error Handling
// ────────────────────────────────────────────────────────────────────────────

/// API error type that converts PDCA errors to HTTP responses.
#[derive(Debug)]
pub enum PdcaApiError {
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Internal(String),
}

impl PdcaApiError {
    fn from_domain(err: crate::domain::foundation::DomainError) -> Self {
        match err.code {
            ErrorCode::ConcurrentModification => PdcaApiError::Conflict(err.message),
            ErrorCode::InvalidPhaseTransition => PdcaApiError::Conflict(err.message),
            _ => PdcaApiError::Internal(err.message),
        }
    }
}

impl From<CreateCycleError> for PdcaApiError {
    fn from(err: CreateCycleError) -> Self {
        match err {
            CreateCycleError::Validation(e) => PdcaApiError::BadRequest(e.to_string()),
            CreateCycleError::Domain(e) => PdcaApiError::from_domain(e),
        }
    }
}

impl From<CompletePhaseError> for PdcaApiError {
    fn from(err: CompletePhaseError) -> Self {
        match err {
            CompletePhaseError::NotFound(id) => PdcaApiError::NotFound(id.to_string()),
            CompletePhaseError::InvalidTransition(e) => PdcaApiError::Conflict(e.message),
            CompletePhaseError::Domain(e) => PdcaApiError::from_domain(e),
        }
    }
}

impl IntoResponse for PdcaApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            PdcaApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ErrorResponse::bad_request(msg))
            }
            PdcaApiError::NotFound(id) => (
                StatusCode::NOT_FOUND,
                ErrorResponse::not_found("PDCA cycle", &id),
            ),
            PdcaApiError::Conflict(msg) => (StatusCode::CONFLICT, ErrorResponse::conflict(msg)),
            PdcaApiError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::internal(msg))
            }
        };

        (status, Json(error)).into_response()
    }
}
