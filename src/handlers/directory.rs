//! Agent directory with search.

use axum::{
    extract::{Query, State},
    response::Html,
};
use serde::Deserialize;

use crate::error::PageError;
use crate::render::{pages, render_page};
use crate::repositories::AgentRepository;
use crate::server::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct DirectoryQuery {
    pub q: Option<String>,
}

/// `GET /`
pub async fn directory(
    State(state): State<AppState>,
    Query(params): Query<DirectoryQuery>,
) -> Result<Html<String>, PageError> {
    let query = params.q.unwrap_or_default();

    let agents = AgentRepository::new(&state.db)
        .search(&query)
        .await
        .map_err(|e| PageError::internal("Error loading directory", e))?;

    tracing::debug!(query = %query, matches = agents.len(), "Directory search");

    let fields = pages::directory_fields(&query, &agents);
    Ok(Html(render_page(
        "directory",
        &state.templates.directory,
        &fields,
    )))
}
