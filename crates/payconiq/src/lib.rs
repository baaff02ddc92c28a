//! Client for the Payconiq payment-initiation API.
//!
//! Payconiq issues a payment id for every initiated payment and reports the
//! final outcome asynchronously to a merchant-supplied callback URL. This
//! crate covers the merchant-backend side of that flow: creating payments
//! and fetching payment status by id, with the two historical API shapes
//! (legacy v2 "transactions", current v3 "payments") unified behind one
//! client selected by [`ApiVersion`].
//!
//! # Flow
//!
//! ```text
//! ┌──────────────┐  POST /payments        ┌──────────────┐
//! │  Merchant     │ ──────────────────────→│  Payconiq    │
//! │  backend      │ ←────────────────────  │  API         │
//! │  (this crate) │  { paymentId }         │              │
//! │               │                        │              │
//! │               │  GET /payments/{id}    │              │
//! │               │ ──────────────────────→│              │
//! │               │ ←────────────────────  │              │
//! └──────┬───────┘  payment resource      └──────┬───────┘
//!        │                                        │
//!        │          webhook: TIMED_OUT /          │
//!        │          CANCELED / FAILED /           │
//!        ←──────────SUCCEEDED ────────────────────┘
//!           (delivered to the callback URL;
//!            receiver is out of scope here)
//! ```
//!
//! # Components
//!
//! - **[`client`]**: [`PayconiqClient`] with the create/details operations
//! - **[`types`]**: configuration, API version tables, request/response types
//! - **[`error`]**: error types distinguishing provider rejections from
//!   transport faults
//!
//! # Usage
//!
//! ```rust,no_run
//! use payconiq::{PayconiqClient, DEFAULT_CURRENCY};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = PayconiqClient::with_access_token("access-token")?;
//!
//! let payment_id = client
//!     .create_payment(1000, DEFAULT_CURRENCY, Some("order-42"), "https://merchant.example/cb")
//!     .await?;
//!
//! let details = client.get_payment_details(&payment_id).await?;
//! println!("status: {:?}", details.get("status"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment switching
//!
//! The endpoint is a plain settable string; point it at the dev environment
//! or a mock server as needed:
//!
//! ```rust,no_run
//! use payconiq::{PayconiqClient, PayconiqConfig};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut client = PayconiqClient::new(PayconiqConfig::from_env())?;
//! client
//!     .set_endpoint("https://dev.payconiq.com/v3")
//!     .set_merchant_id("merchant-1");
//! # Ok(())
//! # }
//! ```
//!
//! # Failure classification
//!
//! Success is decided by the presence of a non-empty id field in the
//! decoded response (`paymentId` on v3, `transactionId`/`_id` on v2), not
//! by the HTTP status code. A response without one raises
//! [`PayconiqError::CreatePaymentFailed`] or
//! [`PayconiqError::GetPaymentDetailsFailed`] carrying the provider's
//! `message` text when present. Network faults and non-JSON bodies are
//! reported separately as [`PayconiqError::Transport`] and
//! [`PayconiqError::InvalidResponse`].

pub mod client;
pub mod error;
pub mod types;

// Re-export main types
pub use client::PayconiqClient;
pub use error::{PayconiqError, PayconiqResult};
pub use types::{
    ApiVersion, CreatePaymentRequest, PayconiqConfig, PaymentResponse, PaymentStatus,
    DEFAULT_CURRENCY, ENDPOINT_V2, ENDPOINT_V3, ENV_ACCESS_TOKEN, ENV_MERCHANT_ID,
};
