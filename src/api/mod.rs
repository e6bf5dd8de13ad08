//! REST boundary
//!
//! A thin axum layer over the engine: request parsing, actor resolution, and
//! the error-kind to status-code mapping. Session issuance and verification
//! are outside this crate; the `x-user-id` header stands in for the opaque
//! credential an upstream auth proxy would resolve, and is looked up in the
//! user store to produce the acting identity.
//!
//! Routes:
//! - `POST /tickets` — file a ticket (Customer)
//! - `GET  /tickets` — role-scoped listing
//! - `GET  /tickets/:id` — ticket with resolved thread
//! - `PUT  /tickets/:id` — status/assignment update (Agent/Admin)
//! - `POST /tickets/:id/comments` — append to the thread
//! - `GET  /reports/tickets` — aggregated report (Admin)

use crate::config::AppConfig;
use crate::core::{Priority, Status, TicketId, User, UserId};
use crate::engine::{CommentService, ReportFilter, ReportService, TicketService, TicketUpdate};
use crate::error::{Result, SupportDeskError};
use crate::notify::NotificationDispatcher;
use crate::storage::FileStorage;
use axum::extract::{FromRequestParts, Path, Query, State};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    store: Arc<FileStorage>,
    tickets: Arc<TicketService<FileStorage>>,
    comments: Arc<CommentService<FileStorage>>,
    reports: Arc<ReportService<FileStorage>>,
}

impl AppState {
    /// Wire the services over a shared store and dispatcher
    #[must_use]
    pub fn new(store: Arc<FileStorage>, dispatcher: NotificationDispatcher) -> Self {
        Self {
            tickets: Arc::new(TicketService::new(store.clone(), dispatcher.clone())),
            comments: Arc::new(CommentService::new(store.clone(), dispatcher)),
            reports: Arc::new(ReportService::new(store.clone())),
            store,
        }
    }
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/tickets", post(create_ticket).get(list_tickets))
        .route("/tickets/:id", get(get_ticket).put(update_ticket))
        .route("/tickets/:id/comments", post(add_comment))
        .route("/reports/tickets", get(ticket_report))
        .layer(
            tower::ServiceBuilder::new().layer(TraceLayer::new_for_http()),
        )
        .with_state(state)
}

/// Run the server described by the given configuration
pub async fn serve(config: &AppConfig, state: AppState) -> Result<()> {
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(SupportDeskError::Io)?;
    tracing::info!("Listening on {addr}");
    axum::serve(listener, router(state))
        .await
        .map_err(SupportDeskError::Io)?;
    Ok(())
}

impl IntoResponse for SupportDeskError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Authentication { .. } => StatusCode::UNAUTHORIZED,
            Self::Authorization { .. } => StatusCode::FORBIDDEN,
            e if e.is_not_found() => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Internal error serving request: {self}");
        }
        let body = Json(serde_json::json!({ "message": self.to_string() }));
        (status, body).into_response()
    }
}

/// The authenticated actor performing a request
pub struct Actor(pub User);

#[axum::async_trait]
impl FromRequestParts<AppState> for Actor {
    type Rejection = SupportDeskError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> std::result::Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get("x-user-id")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| SupportDeskError::unauthorized("Not authorized, no credential"))?;

        let id = UserId::parse_str(header)
            .map_err(|_| SupportDeskError::unauthorized("Not authorized, credential failed"))?;
        let user = state
            .store
            .load_user(&id)
            .map_err(|_| SupportDeskError::unauthorized("Not authorized, credential failed"))?;
        Ok(Self(user))
    }
}

fn parse_ticket_id(raw: &str) -> Result<TicketId> {
    TicketId::parse_str(raw).map_err(|_| SupportDeskError::TicketNotFound {
        id: raw.to_string(),
    })
}

#[derive(Debug, Deserialize)]
struct CreateTicketRequest {
    title: String,
    description: String,
    /// Unknown values fall back to the schema default rather than erroring
    priority: Option<String>,
}

async fn create_ticket(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Json(body): Json<CreateTicketRequest>,
) -> Result<impl IntoResponse> {
    let priority = Priority::parse_or_default(body.priority.as_deref());
    let ticket =
        state
            .tickets
            .create_ticket(&actor, &body.title, &body.description, Some(priority))?;
    Ok((StatusCode::CREATED, Json(ticket)))
}

async fn list_tickets(
    State(state): State<AppState>,
    Actor(actor): Actor,
) -> Result<impl IntoResponse> {
    let tickets = state.tickets.list_tickets(&actor)?;
    Ok(Json(tickets))
}

async fn get_ticket(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let ticket_id = parse_ticket_id(&id)?;
    let detail = state.tickets.get_ticket(&actor, &ticket_id)?;
    Ok(Json(detail))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateTicketRequest {
    status: Option<String>,
    agent_id: Option<String>,
}

async fn update_ticket(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Path(id): Path<String>,
    Json(body): Json<UpdateTicketRequest>,
) -> Result<impl IntoResponse> {
    let ticket_id = parse_ticket_id(&id)?;

    let status = body
        .status
        .as_deref()
        .map(|s| {
            s.parse::<Status>()
                .map_err(SupportDeskError::validation)
        })
        .transpose()?;
    let agent_id = body
        .agent_id
        .as_deref()
        .map(|s| {
            UserId::parse_str(s)
                .map_err(|_| SupportDeskError::validation(format!("Invalid agent id: {s}")))
        })
        .transpose()?;

    let ticket = state
        .tickets
        .update_ticket(&actor, &ticket_id, TicketUpdate { status, agent_id })?;
    Ok(Json(ticket))
}

#[derive(Debug, Deserialize)]
struct AddCommentRequest {
    text: String,
}

async fn add_comment(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Path(id): Path<String>,
    Json(body): Json<AddCommentRequest>,
) -> Result<impl IntoResponse> {
    let ticket_id = parse_ticket_id(&id)?;
    let comment = state.comments.add_comment(&actor, &ticket_id, &body.text)?;
    Ok((StatusCode::CREATED, Json(comment)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReportQuery {
    status: Option<String>,
    priority: Option<String>,
    agent_id: Option<String>,
}

async fn ticket_report(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Query(query): Query<ReportQuery>,
) -> Result<impl IntoResponse> {
    let filter = ReportFilter {
        status: query
            .status
            .as_deref()
            .map(|s| s.parse::<Status>().map_err(SupportDeskError::validation))
            .transpose()?,
        priority: query
            .priority
            .as_deref()
            .map(|p| {
                p.parse::<Priority>()
                    .map_err(SupportDeskError::validation)
            })
            .transpose()?,
        agent_id: query
            .agent_id
            .as_deref()
            .map(|s| {
                UserId::parse_str(s)
                    .map_err(|_| SupportDeskError::validation(format!("Invalid agent id: {s}")))
            })
            .transpose()?,
    };

    let report = state.reports.aggregate(&actor, &filter)?;
    Ok(Json(report))
}
