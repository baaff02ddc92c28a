//! Payconiq client.
//!
//! One client speaks one API generation, selected by the configured
//! [`ApiVersion`]. Every operation is a single request/response exchange
//! against `{endpoint}{route}`; success is decided by the presence of a
//! non-empty id field in the decoded body, not by the HTTP status code.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{PayconiqError, PayconiqResult};
use crate::types::{CreatePaymentRequest, PayconiqConfig, PaymentResponse};

/// Connect and total timeout for provider requests.
///
/// Payconiq is an external dependency and must never hang the caller;
/// 20 seconds each matches the contract the API has always been called with.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Success markers accepted by the deprecated create-transaction alias.
/// Legacy precedence first; `paymentId` keeps the alias working against
/// the v3 `/payments` surface.
const LEGACY_CREATE_FIELDS: &[&str] = &["transactionId", "_id", "paymentId"];

/// Success markers accepted by the deprecated retrieve-transaction alias.
const LEGACY_RETRIEVE_FIELDS: &[&str] = &["_id", "paymentId"];

/// Client for the Payconiq payment-initiation API.
#[derive(Clone)]
pub struct PayconiqClient {
    /// HTTP client
    client: Client,
    /// Credentials, endpoint and API generation
    config: PayconiqConfig,
}

impl PayconiqClient {
    /// Create a new client from a configuration.
    pub fn new(mut config: PayconiqConfig) -> PayconiqResult<Self> {
        let client = Client::builder()
            .connect_timeout(DEFAULT_TIMEOUT)
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| PayconiqError::Transport {
                status: 503,
                reason: format!("failed to create HTTP client: {}", e),
            })?;

        config.endpoint = config.endpoint.trim_end_matches('/').to_string();
        Ok(Self { client, config })
    }

    /// Create a v3 client from explicit credentials.
    pub fn with_access_token(access_token: &str) -> PayconiqResult<Self> {
        Self::new(PayconiqConfig::v3(access_token))
    }

    /// Override the base endpoint (environment switching, mock servers).
    pub fn set_endpoint(&mut self, endpoint: &str) -> &mut Self {
        self.config.endpoint = endpoint.trim_end_matches('/').to_string();
        self
    }

    /// Set the merchant id. Held but never transmitted by the current
    /// transport path; kept settable for API versions that require it.
    pub fn set_merchant_id(&mut self, merchant_id: &str) -> &mut Self {
        self.config.merchant_id = Some(merchant_id.to_string());
        self
    }

    /// Set the access token used on subsequent calls.
    pub fn set_access_token(&mut self, access_token: &str) -> &mut Self {
        self.config.access_token = access_token.to_string();
        self
    }

    /// Base endpoint requests are sent to.
    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    /// Configured merchant id, if any.
    pub fn merchant_id(&self) -> Option<&str> {
        self.config.merchant_id.as_deref()
    }

    /// Create a payment and return the provider-issued payment id.
    ///
    /// Sends one `POST {endpoint}{route}` with the amount in minor currency
    /// units, the ISO 4217 currency code, an optional external reference
    /// (v3 only) and the callback URL Payconiq reports the final status to.
    /// No retries.
    pub async fn create_payment(
        &self,
        amount: u64,
        currency: &str,
        reference: Option<&str>,
        callback_url: &str,
    ) -> PayconiqResult<String> {
        self.create_with_fields(
            amount,
            currency,
            reference,
            callback_url,
            self.config.api_version.id_fields(),
        )
        .await
    }

    /// Fetch the full payment resource for a payment id.
    ///
    /// Returns the provider's JSON object verbatim; callers pick out the
    /// status, amount and whatever else they need.
    pub async fn get_payment_details(&self, payment_id: &str) -> PayconiqResult<PaymentResponse> {
        self.details_with_fields(payment_id, self.config.api_version.id_fields())
            .await
    }

    /// Create a transaction (legacy name for a payment).
    #[deprecated(since = "0.3.0", note = "use `create_payment`")]
    pub async fn create_transaction(
        &self,
        amount: u64,
        currency: &str,
        callback_url: &str,
    ) -> PayconiqResult<String> {
        self.create_with_fields(amount, currency, None, callback_url, LEGACY_CREATE_FIELDS)
            .await
    }

    /// Retrieve a transaction (legacy name for payment details).
    #[deprecated(since = "0.3.0", note = "use `get_payment_details`")]
    pub async fn retrieve_transaction(
        &self,
        transaction_id: &str,
    ) -> PayconiqResult<PaymentResponse> {
        self.details_with_fields(transaction_id, LEGACY_RETRIEVE_FIELDS)
            .await
    }

    async fn create_with_fields(
        &self,
        amount: u64,
        currency: &str,
        reference: Option<&str>,
        callback_url: &str,
        id_fields: &[&str],
    ) -> PayconiqResult<String> {
        let url = format!("{}{}", self.config.endpoint, self.config.api_version.route());
        debug!(url = %url, amount, currency, "Creating payment");

        let request = CreatePaymentRequest {
            amount,
            currency: currency.to_string(),
            reference: reference.map(str::to_string),
            callback_url: callback_url.to_string(),
        };
        let body = serde_json::to_value(&request).map_err(|e| PayconiqError::InvalidResponse {
            reason: format!("failed to encode request body: {}", e),
        })?;

        let (status, response) = self.send(Method::POST, &url, Some(&body)).await?;

        match response.id(id_fields) {
            Some(id) => {
                debug!(payment_id = %id, "Payment created");
                Ok(id.to_string())
            }
            None => {
                let message = response.message();
                warn!(status = status.as_u16(), reason = ?message, "Payment creation rejected");
                Err(PayconiqError::CreatePaymentFailed { message })
            }
        }
    }

    async fn details_with_fields(
        &self,
        payment_id: &str,
        id_fields: &[&str],
    ) -> PayconiqResult<PaymentResponse> {
        let url = format!(
            "{}{}/{}",
            self.config.endpoint,
            self.config.api_version.route(),
            payment_id
        );
        debug!(url = %url, "Fetching payment details");

        let (status, response) = self.send(Method::GET, &url, None).await?;

        if response.id(id_fields).is_some() {
            Ok(response)
        } else {
            let message = response.message();
            warn!(status = status.as_u16(), reason = ?message, "Payment lookup rejected");
            Err(PayconiqError::GetPaymentDetailsFailed { message })
        }
    }

    /// Perform one HTTP exchange and decode the body as JSON.
    ///
    /// The status code is captured for error context and logging but does
    /// not drive classification; callers probe the decoded body instead.
    async fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
    ) -> PayconiqResult<(StatusCode, PaymentResponse)> {
        let mut request = self
            .client
            .request(method.clone(), url)
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, &self.config.access_token);

        match body {
            Some(body) => request = request.json(body),
            // No bodyless POST occurs in practice; an empty object keeps the
            // payload well-formed if one ever does.
            None if method != Method::GET => {
                request = request.json(&Value::Object(serde_json::Map::new()));
            }
            None => {}
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        debug!(status = status.as_u16(), "Provider responded");

        let decoded: PaymentResponse =
            serde_json::from_str(&text).map_err(|e| PayconiqError::InvalidResponse {
                reason: format!("body is not a JSON object (status {}): {}", status, e),
            })?;

        Ok((status, decoded))
    }
}

impl std::fmt::Debug for PayconiqClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Access token deliberately omitted.
        f.debug_struct("PayconiqClient")
            .field("api_version", &self.config.api_version)
            .field("endpoint", &self.config.endpoint)
            .field("merchant_id", &self.config.merchant_id)
            .finish()
    }
}
