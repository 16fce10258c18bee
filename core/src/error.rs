// aidla_cart/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

/// Failure reported by the managed backend for a single remote call.
///
/// The backend's message is opaque to this crate and is surfaced verbatim;
/// `source` carries the underlying transport error when one exists.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct BackendError {
    pub message: String,
    #[source]
    pub source: Option<AnyhowError>,
}

impl BackendError {
    /// A backend rejection with only a display message (business-rule errors).
    pub fn msg(message: impl Into<String>) -> Self {
        BackendError {
            message: message.into(),
            source: None,
        }
    }

    /// A backend failure caused by an underlying error (transport, decode).
    pub fn with_source(message: impl Into<String>, source: impl Into<AnyhowError>) -> Self {
        BackendError {
            message: message.into(),
            source: Some(source.into()),
        }
    }
}

/// Errors surfaced to the user by the cart & checkout subsystem.
///
/// Local invariant violations (malformed persisted data, out-of-range
/// quantities) are corrected in place by the store and never raised through
/// this type; only validation failures and remote-call failures reach here.
#[derive(Debug, Error)]
pub enum CartError {
    #[error("Cart is empty; there is nothing to submit")]
    EmptyCart,

    #[error("Required field '{field}' is missing or blank")]
    MissingField { field: &'static str },

    #[error("Remote request failed: {source}")]
    Remote {
        #[from]
        source: BackendError,
    },

    #[error("Purchase request for '{product_id}' failed after {submitted} line(s) were submitted: {source}")]
    SubmissionFailed {
        product_id: String,
        /// How many purchase requests were already created before the failure.
        /// Those lines are NOT rolled back; retrying the batch resubmits them.
        submitted: usize,
        #[source]
        source: BackendError,
    },
}

impl CartError {
    /// The backend-provided message for remote failures, or the local
    /// validation message otherwise. Views render this inline.
    pub fn display_message(&self) -> String {
        match self {
            CartError::Remote { source } | CartError::SubmissionFailed { source, .. } => source.message.clone(),
            other => other.to_string(),
        }
    }
}

/// Failures of the raw persistence entry. These never cross the store's
/// public API: a failed read degrades to an empty cart, a failed write is
/// logged and swallowed (the backend stays authoritative).
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Cart storage I/O failed: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("Cart payload could not be serialized: {source}")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },
}

pub type CartResult<T, E = CartError> = std::result::Result<T, E>;
