//! Example program handler

use crate::api::rest::state::AppState;
use axum::{extract::State, Json};
use bproc_toolchain::Envelope;

/// Return a randomly chosen example program.
///
/// Directory problems are reported in the envelope; the daemon keeps running.
pub async fn random_example(State(state): State<AppState>) -> Json<Envelope> {
    match state.examples.random().await {
        Ok(program) => Json(Envelope::info(program)),
        Err(e) => {
            tracing::warn!("example lookup failed: {}", e);
            Json(Envelope::error(e.to_string()))
        }
    }
}
