//! Lead-capture form submission.

use axum::{
    Form,
    extract::{State, rejection::FormRejection},
    response::Redirect,
};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use crate::error::PageError;
use crate::intake::LeadSubmission;
use crate::repositories::LeadRepository;
use crate::server::AppState;

/// Bytes escaped in a single URL path segment, `/` and `%` included.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'?')
    .add(b'{')
    .add(b'}')
    .add(b'/')
    .add(b'%');

/// `POST /submit`
///
/// A body the form extractor cannot decode (wrong content type, repeated
/// checkbox) is answered like any other incomplete submission.
pub async fn submit(
    State(state): State<AppState>,
    form: Result<Form<LeadSubmission>, FormRejection>,
) -> Result<Redirect, PageError> {
    let Form(submission) = form.map_err(|rejection| {
        tracing::info!("Rejected lead submission body: {}", rejection);
        PageError::bad_request("Missing required fields.")
    })?;

    let lead = submission.into_new_lead().map_err(|e| {
        tracing::info!("Rejected lead submission: {}", e);
        PageError::bad_request(e.to_string())
    })?;

    let handle = lead.agent_handle.clone();
    let consent = lead.consent;

    let saved = LeadRepository::new(&state.db)
        .insert(lead)
        .await
        .map_err(|e| PageError::internal("Error processing request.", e))?;

    tracing::info!(
        lead_id = saved.id,
        agent_handle = %handle,
        consent,
        "Lead captured"
    );

    Ok(Redirect::to(&thank_you_path(&handle)))
}

/// `/thank-you/{handle}` with the handle percent-encoded as one path segment.
pub fn thank_you_path(handle: &str) -> String {
    format!("/thank-you/{}", utf8_percent_encode(handle, PATH_SEGMENT))
}
