//! Page (host DOM) errors.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageError {
    #[error("Invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },

    #[error("Element is no longer attached: {0}")]
    Detached(usize),
}

impl From<PageError> for super::FillError {
    fn from(err: PageError) -> Self {
        match err {
            PageError::InvalidSelector { selector, message } => {
                super::FillError::InvalidSelector { selector, message }
            }
            PageError::Detached(id) => super::FillError::NoElementForSelector(format!("@{id}")),
        }
    }
}
