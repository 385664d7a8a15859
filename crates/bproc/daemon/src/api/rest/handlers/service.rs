//! Service descriptor and toolchain info passthroughs

use crate::api::rest::state::AppState;
use axum::{extract::State, Json};
use bproc_toolchain::{Envelope, InfoAction, TargetFormat};

/// Static description of the service; never runs the toolchain
pub async fn service_descriptor(State(state): State<AppState>) -> Json<Envelope> {
    let base = state.config.server.api_base();
    let formats = TargetFormat::ALL
        .iter()
        .map(TargetFormat::as_str)
        .collect::<Vec<_>>()
        .join("|");

    Json(Envelope::info(format!(
        "velkommen to bproc-web {version} (up {uptime}). \
         GET {base}/help, {base}/is, {base}/version, {base}/example; \
         POST {base}/verify {{program}}, {base}/compile {{program, type: {formats}}}",
        version = state.version,
        uptime = state.uptime(),
    )))
}

/// Toolchain `--help`
pub async fn toolchain_help(State(state): State<AppState>) -> Json<Envelope> {
    Json(state.pipeline.info(InfoAction::Help).await)
}

/// Toolchain `--instruction-set`
pub async fn toolchain_instruction_set(State(state): State<AppState>) -> Json<Envelope> {
    Json(state.pipeline.info(InfoAction::InstructionSet).await)
}

/// Toolchain `--version`
pub async fn toolchain_version(State(state): State<AppState>) -> Json<Envelope> {
    Json(state.pipeline.info(InfoAction::Version).await)
}
