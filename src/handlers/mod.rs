use axum::extract::FromRequest;

use crate::error::ApiError;

pub mod api;
pub mod redirect;

/// `axum::Json` whose rejections answer as `ApiError::Validation`, so a
/// malformed body gets the same 400 `{"message"}` as any other bad input.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);
