//! Error types for Payconiq API operations.

use thiserror::Error;

/// Result type for Payconiq operations.
pub type PayconiqResult<T> = Result<T, PayconiqError>;

/// Errors that can occur while talking to the Payconiq API.
///
/// Provider rejections (`CreatePaymentFailed`, `GetPaymentDetailsFailed`)
/// mean Payconiq answered but did not return the expected id field; transport
/// faults (`Transport`, `InvalidResponse`) mean no usable answer arrived.
#[derive(Debug, Error)]
pub enum PayconiqError {
    /// Creating a payment yielded no payment id.
    #[error("payment creation failed: {}", message.as_deref().unwrap_or("no message from provider"))]
    CreatePaymentFailed {
        /// Failure text supplied by the provider, when present.
        message: Option<String>,
    },

    /// Looking up a payment yielded no payment id.
    #[error("payment lookup failed: {}", message.as_deref().unwrap_or("no message from provider"))]
    GetPaymentDetailsFailed {
        /// Failure text supplied by the provider, when present.
        message: Option<String>,
    },

    /// Network/HTTP error reaching the provider.
    #[error("payconiq transport error (status {status}): {reason}")]
    Transport {
        /// HTTP status if one was observed, 503 otherwise.
        status: u16,
        /// Description of the fault.
        reason: String,
    },

    /// The provider answered with a body that is not valid JSON.
    #[error("invalid response from payconiq: {reason}")]
    InvalidResponse {
        /// Description of what could not be decoded.
        reason: String,
    },
}

impl PayconiqError {
    /// Returns the provider-supplied failure message, if this error carries one.
    pub fn provider_message(&self) -> Option<&str> {
        match self {
            Self::CreatePaymentFailed { message } | Self::GetPaymentDetailsFailed { message } => {
                message.as_deref()
            }
            _ => None,
        }
    }

    /// Returns true if this error is transient and the operation may succeed on retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}

impl From<reqwest::Error> for PayconiqError {
    fn from(e: reqwest::Error) -> Self {
        // 503 mirrors the provider contract for "service unavailable" when
        // no status code could be determined.
        Self::Transport {
            status: e.status().map(|s| s.as_u16()).unwrap_or(503),
            reason: e.to_string(),
        }
    }
}
