// src/algebras/error.rs
//! Error type for the content retrieval algebra.
//!
//! The converter only cares about four outcomes of a failed fetch: the
//! integration may not see the object, the object is gone, something
//! transient went wrong, or the service answered with something that
//! cannot be decoded. The variants below keep enough detail for logging
//! while the predicates answer those four questions.

use std::fmt;

/// Error that can occur during content retrieval operations.
///
/// This is the error type for [`NotionContent`](super::NotionContent) operations.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchError {
    /// The requested object was not found (404).
    NotFound { id: String },

    /// The integration is not allowed to read this object (401/403).
    AccessDenied { reason: String },

    /// The API rate limit was exceeded.
    RateLimited { retry_after_seconds: Option<u64> },

    /// Notion API returned an error not covered above.
    ApiError {
        code: String,
        message: String,
        status: u16,
    },

    /// Network or transport error.
    Transport { message: String },

    /// The response could not be parsed.
    MalformedResponse { reason: String },
}

impl FetchError {
    /// Returns `true` if this error is transient and worth retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimited { .. }
                | Self::Transport { .. }
                | Self::ApiError {
                    status: 408 | 429 | 500..=599,
                    ..
                }
        )
    }

    /// Returns `true` if this error means the resource doesn't exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` if the integration lacks access to the resource.
    pub fn is_access_denied(&self) -> bool {
        matches!(self, Self::AccessDenied { .. })
    }

    /// Returns `true` if the whole conversion must stop.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::MalformedResponse { .. })
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { id } => write!(f, "Object not found: {}", id),
            Self::AccessDenied { reason } => {
                write!(f, "Not accessible by the integration: {}", reason)
            }
            Self::RateLimited {
                retry_after_seconds,
            } => {
                write!(f, "Rate limited")?;
                if let Some(seconds) = retry_after_seconds {
                    write!(f, " (retry after {}s)", seconds)?;
                }
                Ok(())
            }
            Self::ApiError { code, message, .. } => {
                write!(f, "API error [{}]: {}", code, message)
            }
            Self::Transport { message } => write!(f, "Transport error: {}", message),
            Self::MalformedResponse { reason } => write!(f, "Malformed response: {}", reason),
        }
    }
}

impl std::error::Error for FetchError {}

// ==============================================================================
// Conversion from application errors
// ==============================================================================

impl From<crate::error::AppError> for FetchError {
    fn from(err: crate::error::AppError) -> Self {
        use crate::error::{AppError, NotionClientError, NotionErrorCode};

        match err {
            AppError::NotionService {
                ref code,
                ref message,
                status,
            } => match code {
                NotionErrorCode::ObjectNotFound => Self::NotFound {
                    id: message.clone(),
                },
                NotionErrorCode::Unauthorized | NotionErrorCode::RestrictedResource => {
                    Self::AccessDenied {
                        reason: message.clone(),
                    }
                }
                NotionErrorCode::RateLimited => Self::RateLimited {
                    retry_after_seconds: None,
                },
                _ => Self::ApiError {
                    code: code.to_string(),
                    message: message.clone(),
                    status: status.as_u16(),
                },
            },
            AppError::NotionClient(NotionClientError::NotionApi {
                code,
                message,
                status,
                ..
            }) => match NotionErrorCode::from_api_response(&code) {
                NotionErrorCode::ObjectNotFound => Self::NotFound { id: message },
                NotionErrorCode::Unauthorized | NotionErrorCode::RestrictedResource => {
                    Self::AccessDenied { reason: message }
                }
                NotionErrorCode::RateLimited => Self::RateLimited {
                    retry_after_seconds: None,
                },
                _ => Self::ApiError {
                    code,
                    message,
                    status: status as u16,
                },
            },
            AppError::NotionClient(NotionClientError::Deserialization { .. })
            | AppError::MalformedResponse(_) => Self::MalformedResponse {
                reason: err.to_string(),
            },
            AppError::NetworkFailure(_) => Self::Transport {
                message: err.to_string(),
            },
            other => Self::ApiError {
                code: "internal".to_string(),
                message: other.to_string(),
                status: 0,
            },
        }
    }
}
