//! Engine-level errors and diagnostics.

use serde::Serialize;
use thiserror::Error;

/// Failures raised while learning or filling.
///
/// Most variants are per-element or per-item and never abort a fill pass;
/// they are collected as diagnostics instead.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FillError {
    #[error("No usable selector could be derived for the element")]
    SelectorUnavailable,

    #[error("No element matches selector: {0}")]
    NoElementForSelector(String),

    #[error("Invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },

    /// `index` is zero-based; the message shows the one-based item number.
    #[error("No container found for {} item #{}", .section, .index + 1)]
    NoContainerForItem { section: String, index: usize },

    #[error("Storage failure: {0}")]
    StorageFailure(String),

    #[error("Profile not found in storage")]
    ProfileNotFound,

    #[error("No element was captured for learning")]
    NoCapturedTarget,

    #[error("Operation ended before reporting: {0}")]
    Interrupted(String),
}

impl From<super::StoreError> for FillError {
    fn from(err: super::StoreError) -> Self {
        FillError::StorageFailure(err.to_string())
    }
}
