//! Request extractors

use crate::error::ApiError;
use axum::extract::FromRequest;

/// JSON body whose rejections become HTTP 400 envelopes.
///
/// Plain `axum::Json` answers a missing field with 422 and a text body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);
