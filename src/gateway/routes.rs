//! Gateway routes: the `/api/mcp` surface relayed to the upstream API.

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;

use crate::gateway::assets::list_assets;
use crate::gateway::auth::{require_api_key, ApiKeyGate};
use crate::gateway::proxy::ProxyClient;
use crate::resources::{Resource, ResourceContent};
use crate::server::routes::ContentQuery;
use crate::server::{health_routes, parse_tool_args, request_cancellation};
use crate::tools::{Tool, ToolResult};
use crate::types::{Error, Result};
use crate::validation::validate_not_blank;

/// Router for gateway mode, with the API-key gate wrapped around every route.
pub fn gateway_router(proxy: ProxyClient, gate: ApiKeyGate) -> Router {
    Router::new()
        .merge(health_routes())
        .route("/api/assets", get(list_assets))
        .route("/api/mcp/tools", get(list_tools))
        .route("/api/mcp/tools/{tool_name}/execute", post(execute_tool))
        .route("/api/mcp/resources", get(list_resources))
        .route("/api/mcp/resources/content", get(resource_content))
        .with_state(proxy)
        .layer(middleware::from_fn_with_state(gate, require_api_key))
}

/// Map a proxy outcome: value → 200, none → 500 problem with `failure`.
fn relay<T: Serialize>(outcome: Result<Option<T>>, failure: &str) -> Response {
    match outcome {
        Ok(Some(value)) => Json(value).into_response(),
        Ok(None) => Error::upstream(failure).into_response(),
        Err(err) => err.into_response(),
    }
}

async fn list_tools(State(proxy): State<ProxyClient>) -> Response {
    let (cancel, _guard) = request_cancellation();
    let outcome = proxy
        .get_json::<Vec<Tool>>(&["api", "mcp", "tools"], &[], &cancel)
        .await;
    relay(outcome, "Failed to retrieve tools")
}

async fn execute_tool(
    State(proxy): State<ProxyClient>,
    Path(tool_name): Path<String>,
    body: Bytes,
) -> Response {
    if let Err(err) = validate_not_blank(&tool_name, "Tool name is required") {
        return err.into_response();
    }
    let args = match parse_tool_args(&body) {
        Ok(args) => args.unwrap_or_default(),
        Err(err) => return err.into_response(),
    };
    let (cancel, _guard) = request_cancellation();

    let path = ["api", "mcp", "tools", tool_name.as_str(), "execute"];
    let outcome = proxy
        .post_json::<ToolResult, _>(&path, &args, &cancel)
        .await;
    match outcome {
        Ok(Some(result)) if result.success => (StatusCode::OK, Json(result)).into_response(),
        Ok(Some(result)) => (StatusCode::BAD_REQUEST, Json(result)).into_response(),
        Ok(None) => Error::upstream("Failed to execute tool").into_response(),
        Err(err) => err.into_response(),
    }
}

async fn list_resources(State(proxy): State<ProxyClient>) -> Response {
    let (cancel, _guard) = request_cancellation();
    let outcome = proxy
        .get_json::<Vec<Resource>>(&["api", "mcp", "resources"], &[], &cancel)
        .await;
    relay(outcome, "Failed to retrieve resources")
}

async fn resource_content(
    State(proxy): State<ProxyClient>,
    Query(query): Query<ContentQuery>,
) -> Response {
    let uri = query.uri.unwrap_or_default();
    if let Err(err) = validate_not_blank(&uri, "URI is required") {
        return err.into_response();
    }
    let (cancel, _guard) = request_cancellation();

    let outcome = proxy
        .get_json::<ResourceContent>(
            &["api", "mcp", "resources", "content"],
            &[("uri", uri.as_str())],
            &cancel,
        )
        .await;
    relay(outcome, "Failed to retrieve resource content")
}
