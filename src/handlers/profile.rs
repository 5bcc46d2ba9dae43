//! Single-agent profile / SMS compliance page.

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, header},
    response::Html,
};
use serde::Deserialize;

use crate::error::PageError;
use crate::render::{pages, render_page};
use crate::repositories::AgentRepository;
use crate::resolver::{SlugSource, resolve_slug};
use crate::server::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ProfileQuery {
    pub agent: Option<String>,
}

/// `GET /meet/{slug}`
pub async fn meet(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<ProfileQuery>,
    headers: HeaderMap,
) -> Result<Html<String>, PageError> {
    let source = SlugSource {
        path: Some(&slug),
        query: params.agent.as_deref(),
        host: host_header(&headers),
    };
    let slug = resolve_slug(state.config.slug_strategy, source);
    render_profile(&state, &slug).await
}

/// `GET /sms-compliance`, the pre-`/meet` URL. Without `?agent=` the slug
/// can only come from the host.
pub async fn sms_compliance(
    State(state): State<AppState>,
    Query(params): Query<ProfileQuery>,
    headers: HeaderMap,
) -> Result<Html<String>, PageError> {
    let source = SlugSource {
        path: None,
        query: params.agent.as_deref(),
        host: host_header(&headers),
    };
    let slug = resolve_slug(state.config.slug_strategy, source);
    render_profile(&state, &slug).await
}

async fn render_profile(state: &AppState, slug: &str) -> Result<Html<String>, PageError> {
    tracing::info!(slug, "Looking up agent");

    let agent = AgentRepository::new(&state.db)
        .find_by_slug(slug)
        .await
        .map_err(|e| PageError::internal("Internal Server Error", e))?
        .ok_or_else(|| {
            tracing::info!(slug, "Agent not found");
            PageError::not_found("Agent not found")
        })?;

    tracing::info!(slug, agent = %agent.full_name(), "Agent found");

    let fields = pages::profile_fields(&agent, slug);
    Ok(Html(render_page(
        "compliance",
        &state.templates.compliance,
        &fields,
    )))
}

fn host_header(headers: &HeaderMap) -> Option<&str> {
    headers.get(header::HOST).and_then(|v| v.to_str().ok())
}
