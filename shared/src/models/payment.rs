//! Payment Gateway DTOs
//!
//! Payments are never stored client-side. A payment attempt only exists as
//! the link handed out by the backend and the query parameters the gateway
//! appends when it redirects the user back.

use serde::{Deserialize, Serialize};

/// Request a payment link for a booking
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentRequest {
    pub booking_id: String,
}

/// Payment link returned by the backend
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentLinkResponse {
    #[serde(default)]
    pub payment_url: Option<String>,
    #[serde(default)]
    pub order_code: Option<i64>,
}

/// Query forwarded to the backend after the gateway redirect
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentConfirmation {
    pub code: String,
    pub status: String,
    pub booking_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_code: Option<String>,
}
