//! Backend API routes.

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;

use crate::resources::{Resource, ResourceContent};
use crate::server::{parse_tool_args, request_cancellation};
use crate::service::McpService;
use crate::tools::Tool;
use crate::types::Result;

/// Query string of the resource-content route.
#[derive(Debug, Deserialize)]
pub struct ContentQuery {
    pub uri: Option<String>,
}

/// `/health` and `/health/ready`, shared by both deployment modes.
pub fn health_routes<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(healthy))
        .route("/health/ready", get(healthy))
}

async fn healthy() -> &'static str {
    "Healthy"
}

/// Router for the backend API.
pub fn api_router(service: McpService) -> Router {
    Router::new()
        .merge(health_routes())
        .route("/api/mcp/tools", get(list_tools))
        .route("/api/mcp/tools/{tool_name}/execute", post(execute_tool))
        .route("/api/mcp/resources", get(list_resources))
        .route("/api/mcp/resources/content", get(resource_content))
        .with_state(service)
}

async fn list_tools(State(service): State<McpService>) -> Json<Vec<Tool>> {
    Json(service.list_tools())
}

async fn execute_tool(
    State(service): State<McpService>,
    Path(tool_name): Path<String>,
    body: Bytes,
) -> Response {
    let args = match parse_tool_args(&body) {
        Ok(args) => args,
        Err(err) => return err.into_response(),
    };
    let (cancel, _guard) = request_cancellation();

    match service.execute_tool(&tool_name, args, &cancel).await {
        Ok(result) if result.success => (StatusCode::OK, Json(result)).into_response(),
        Ok(result) => (StatusCode::BAD_REQUEST, Json(result)).into_response(),
        Err(err) => err.into_response(),
    }
}

async fn list_resources(State(service): State<McpService>) -> Json<Vec<Resource>> {
    Json(service.list_resources())
}

async fn resource_content(
    State(service): State<McpService>,
    Query(query): Query<ContentQuery>,
) -> Result<Json<ResourceContent>> {
    let (cancel, _guard) = request_cancellation();
    let uri = query.uri.unwrap_or_default();
    let content = service.resource_content(&uri, &cancel).await?;
    Ok(Json(content))
}
