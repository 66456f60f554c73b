//! HTTP handlers.
//!
//! Handlers are thin adapters: they translate requests into calls on
//! [`SeedStore`](crate::core::store::SeedStore) and
//! [`ApplicationService`](crate::domain::services::ApplicationService), and map
//! the results to JSON.

pub mod applicants;
pub mod error;
pub mod seeds;

pub use error::ApiError;

use crate::utils::error::{Result, SeedError};
use serde::Serialize;
use std::future::Future;

/// `{success: true}` 形式的回應
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
            count: None,
        }
    }

    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::ok()
        }
    }

    pub fn with_count(count: usize) -> Self {
        Self {
            count: Some(count),
            ..Self::ok()
        }
    }
}

/// 在獨立 task 中執行寫入，用戶端中途斷線也不會中斷交易
pub(crate) async fn run_to_completion<F, T>(mutation: F) -> std::result::Result<T, ApiError>
where
    F: Future<Output = Result<T>> + Send + 'static,
    T: Send + 'static,
{
    match tokio::spawn(mutation).await {
        Ok(result) => result.map_err(ApiError::from),
        Err(join_error) => Err(ApiError::internal(
            "Failed to process request",
            SeedError::storage(format!("mutation task failed: {}", join_error)),
        )),
    }
}
