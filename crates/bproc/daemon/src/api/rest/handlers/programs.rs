//! Verify and compile handlers

use crate::api::rest::extract::ApiJson;
use crate::api::rest::state::AppState;
use crate::error::ApiResult;
use axum::{extract::State, Json};
use bproc_toolchain::{Envelope, ProgramSubmission};

/// Syntax-check a program
pub async fn verify_program(
    State(state): State<AppState>,
    ApiJson(submission): ApiJson<ProgramSubmission>,
) -> ApiResult<Json<Envelope>> {
    let envelope = state.pipeline.verify(&submission).await?;
    Ok(Json(envelope))
}

/// Compile a program to the requested `type`
pub async fn compile_program(
    State(state): State<AppState>,
    ApiJson(submission): ApiJson<ProgramSubmission>,
) -> ApiResult<Json<Envelope>> {
    let envelope = state.pipeline.compile(&submission).await?;
    Ok(Json(envelope))
}
