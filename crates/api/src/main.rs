mod cache;
mod config;
mod fallback;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use cache::GraphCache;
use config::AppConfig;
use graph::{GraphNormalizer, OwnershipGraph, OwnershipService};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use wikidata::{CompanySummary, FetchError, WikidataClient, search_companies};

struct AppState {
    service: OwnershipService,
    client: WikidataClient,
    cache: Option<GraphCache>,
    config: AppConfig,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    endpoint: String,
    cached_graphs: usize,
}

#[derive(Deserialize)]
struct SearchParams {
    query: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env();
    let timeout = Duration::from_secs(config.request_timeout_secs);
    let client = WikidataClient::new(config.endpoint.clone(), timeout);
    let service = OwnershipService::new(
        client.clone(),
        GraphNormalizer::default(),
        config.query_options(),
    );
    let graph_cache = config
        .cache
        .enabled
        .then(|| GraphCache::new(config.cache.max_entries));

    let state = Arc::new(AppState {
        service,
        client,
        cache: graph_cache,
        config: config.clone(),
    });

    // Build router
    let app = Router::new()
        .route("/health", get(health))
        .route("/api/graph/:id", get(ownership_graph))
        .route("/api/search", get(search))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        endpoint: state.config.endpoint.clone(),
        cached_graphs: state.cache.as_ref().map(GraphCache::len).unwrap_or(0),
    })
}

async fn ownership_graph(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<OwnershipGraph>, ApiError> {
    let id = id.trim().to_string();
    if id.is_empty() {
        return Err(bad_request("company id is required"));
    }

    let key = GraphCache::key(&id, state.service.options());
    if let Some(cache) = &state.cache {
        if let Some(hit) = cache.get(&key) {
            tracing::debug!(root = %id, "serving cached graph");
            return Ok(Json(hit));
        }
    }

    match state.service.get_ownership_graph(&id).await {
        Ok(ownership) => {
            if let Some(cache) = &state.cache {
                cache.set(key, ownership.clone());
            }
            Ok(Json(ownership))
        }
        Err(err) => {
            if let Some(curated) = fallback::fallback_graph(&id) {
                tracing::warn!(root = %id, error = %err, "upstream fetch failed, serving curated fallback");
                return Ok(Json(curated));
            }
            Err(fetch_error_response(err))
        }
    }
}

async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<CompanySummary>>, ApiError> {
    let term = params.query.trim();
    if term.is_empty() {
        return Err(bad_request("query parameter is required"));
    }

    match search_companies(&state.client, term, state.service.options()).await {
        Ok(hits) => Ok(Json(hits)),
        Err(err) => match fallback::fallback_search(term) {
            Some(hits) => {
                tracing::warn!(term, error = %err, "upstream search failed, serving curated fallback");
                Ok(Json(hits))
            }
            None => Err(fetch_error_response(err)),
        },
    }
}

fn fetch_error_response(err: FetchError) -> ApiError {
    let status = match err {
        FetchError::Timeout => StatusCode::GATEWAY_TIMEOUT,
        FetchError::Upstream(_) | FetchError::Malformed(_) | FetchError::Transport(_) => {
            StatusCode::BAD_GATEWAY
        }
    };
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
}

fn bad_request(message: &str) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_maps_to_gateway_timeout() {
        let (status, _) = fetch_error_response(FetchError::Timeout);
        assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);

        let (status, _) = fetch_error_response(FetchError::Upstream(500));
        assert_eq!(status, StatusCode::BAD_GATEWAY);

        let (status, _) = fetch_error_response(FetchError::Malformed("nope".to_string()));
        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }
}
