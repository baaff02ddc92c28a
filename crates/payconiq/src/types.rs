//! Payconiq API types.
//!
//! Models the two API shapes Payconiq has shipped for the same concept:
//! the legacy v2 "transactions" surface and the current v3 "payments"
//! surface. They differ only in base endpoint, route name and the field
//! that marks a successful response, so both are driven by [`ApiVersion`]
//! tables instead of separate client types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Default base endpoint for the legacy v2 API.
pub const ENDPOINT_V2: &str = "https://api.payconiq.com/v2";

/// Default base endpoint for the current v3 API.
pub const ENDPOINT_V3: &str = "https://api.payconiq.com/v3";

/// Currency used when the caller does not specify one.
pub const DEFAULT_CURRENCY: &str = "EUR";

/// Environment variable holding the merchant id.
pub const ENV_MERCHANT_ID: &str = "PAYCONIQ_MERCHANT_ID";

/// Environment variable holding the access token.
pub const ENV_ACCESS_TOKEN: &str = "PAYCONIQ_ACCESS_TOKEN";

// =============================================================================
// API version selector
// =============================================================================

/// Payconiq API generation the client should speak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiVersion {
    /// Legacy `/transactions` surface.
    V2,
    /// Current `/payments` surface.
    V3,
}

impl ApiVersion {
    /// Base endpoint used when the caller does not override it.
    pub fn default_endpoint(&self) -> &'static str {
        match self {
            Self::V2 => ENDPOINT_V2,
            Self::V3 => ENDPOINT_V3,
        }
    }

    /// Route for creating and fetching payment resources.
    pub fn route(&self) -> &'static str {
        match self {
            Self::V2 => "/transactions",
            Self::V3 => "/payments",
        }
    }

    /// Response fields accepted as the success marker, in probe order.
    ///
    /// v2 shipped `transactionId` with an older `_id` variant still seen in
    /// the wild; v3 uses `paymentId` only.
    pub fn id_fields(&self) -> &'static [&'static str] {
        match self {
            Self::V2 => &["transactionId", "_id"],
            Self::V3 => &["paymentId"],
        }
    }
}

// =============================================================================
// Configuration
// =============================================================================

/// Client configuration: credentials plus the endpoint to talk to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayconiqConfig {
    /// API generation to speak.
    pub api_version: ApiVersion,

    /// Merchant id registered with Payconiq. Held for API versions that
    /// require it; the current transport path never transmits it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_id: Option<String>,

    /// Bearer-style secret authorizing calls on behalf of the merchant.
    /// Sent literally in the `Authorization` header, no scheme prefix.
    pub access_token: String,

    /// Base URL all routes are appended to. Overridable for the dev
    /// environment or a mock server.
    pub endpoint: String,
}

impl Default for PayconiqConfig {
    fn default() -> Self {
        Self {
            api_version: ApiVersion::V3,
            merchant_id: None,
            access_token: String::new(),
            endpoint: ENDPOINT_V3.to_string(),
        }
    }
}

impl PayconiqConfig {
    /// Configuration for the legacy v2 API.
    pub fn v2(access_token: &str) -> Self {
        Self {
            api_version: ApiVersion::V2,
            merchant_id: None,
            access_token: access_token.to_string(),
            endpoint: ENDPOINT_V2.to_string(),
        }
    }

    /// Configuration for the current v3 API.
    pub fn v3(access_token: &str) -> Self {
        Self {
            api_version: ApiVersion::V3,
            merchant_id: None,
            access_token: access_token.to_string(),
            endpoint: ENDPOINT_V3.to_string(),
        }
    }

    /// Read credentials from `PAYCONIQ_MERCHANT_ID` / `PAYCONIQ_ACCESS_TOKEN`.
    ///
    /// Convenience for integration layers that keep credentials in the
    /// environment; explicit construction is the primary path.
    pub fn from_env() -> Self {
        Self {
            merchant_id: std::env::var(ENV_MERCHANT_ID).ok(),
            access_token: std::env::var(ENV_ACCESS_TOKEN).unwrap_or_default(),
            ..Self::default()
        }
    }
}

// =============================================================================
// Request body
// =============================================================================

/// Body of a create-payment request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentRequest {
    /// Amount in minor currency units (cents).
    pub amount: u64,

    /// ISO 4217 currency code.
    pub currency: String,

    /// External correlation id, v3 only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    /// URL the provider invokes when the payment status changes.
    pub callback_url: String,
}

// =============================================================================
// Response
// =============================================================================

/// Decoded provider response, returned verbatim.
///
/// Payconiq's response schema is not validated beyond probing for an id
/// field; callers get the full JSON object and pick out what they need.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentResponse(pub Map<String, Value>);

impl PaymentResponse {
    /// First non-empty string under any of the given id fields.
    pub fn id(&self, fields: &[&str]) -> Option<&str> {
        fields
            .iter()
            .filter_map(|f| self.0.get(*f).and_then(Value::as_str))
            .find(|id| !id.is_empty())
    }

    /// Provider-supplied failure text, when present.
    pub fn message(&self) -> Option<String> {
        self.0
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    /// Access a field of the raw response.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Consume the wrapper and return the raw JSON object.
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

// =============================================================================
// Webhook status
// =============================================================================

/// Final payment status delivered asynchronously to the callback URL.
///
/// The client never receives these itself; Payconiq POSTs them to the
/// `callback_url` given at creation. Documented here for integrators
/// building the webhook receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    /// No user action within the payment window (~2 minutes).
    TimedOut,
    /// User canceled after scanning.
    Canceled,
    /// Payment process failed (e.g. wrong PIN).
    Failed,
    /// Payment confirmed by the user.
    Succeeded,
}
