//! Payment Initiation
//!
//! Turns a booking id into a gateway URL. Failure never undoes the booking:
//! it stays created with payment pending and can be paid later from the
//! booking history.

use shared::models::Booking;

use crate::error::ValidationError;
use crate::{ClientError, ClientResult};
use crate::http::HttpClient;
use crate::retry::RetryPolicy;

const NO_PAYMENT_URL: &str = "Không nhận được liên kết thanh toán, vui lòng thử lại sau";

/// What the caller should do after asking for a payment link
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentOutcome {
    /// Navigate the user (top level, not embedded) to the gateway
    Redirect {
        booking_id: String,
        payment_url: String,
    },
    /// No link; the booking remains payable later
    Deferred { booking_id: String, reason: String },
}

impl PaymentOutcome {
    pub fn booking_id(&self) -> &str {
        match self {
            Self::Redirect { booking_id, .. } | Self::Deferred { booking_id, .. } => booking_id,
        }
    }

    pub fn payment_url(&self) -> Option<&str> {
        match self {
            Self::Redirect { payment_url, .. } => Some(payment_url),
            Self::Deferred { .. } => None,
        }
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self, Self::Redirect { .. })
    }
}

#[derive(Debug, Clone)]
pub struct PaymentInitiation {
    http: HttpClient,
    retry: RetryPolicy,
}

impl PaymentInitiation {
    pub fn new(http: HttpClient, retry: RetryPolicy) -> Self {
        Self { http, retry }
    }

    /// Request a payment link for `booking_id`. Never fails: problems come
    /// back as [`PaymentOutcome::Deferred`].
    ///
    /// Only connect errors are retried. A timed-out request may already have
    /// created a gateway order.
    pub async fn start(&self, booking_id: &str) -> PaymentOutcome {
        let http = &self.http;
        let result = self
            .retry
            .run_if("payment.create", ClientError::is_connect_failure, move || {
                http.create_payment_link(booking_id)
            })
            .await;

        match result {
            Ok(link) => match link.payment_url.filter(|url| !url.trim().is_empty()) {
                Some(payment_url) => {
                    tracing::info!(booking_id, order_code = ?link.order_code, "Payment link created");
                    PaymentOutcome::Redirect {
                        booking_id: booking_id.to_string(),
                        payment_url,
                    }
                }
                None => {
                    tracing::warn!(booking_id, "Payment response had no URL");
                    PaymentOutcome::Deferred {
                        booking_id: booking_id.to_string(),
                        reason: NO_PAYMENT_URL.to_string(),
                    }
                }
            },
            Err(e) => {
                tracing::warn!(booking_id, "Payment initiation failed: {e}");
                PaymentOutcome::Deferred {
                    booking_id: booking_id.to_string(),
                    reason: e.user_message(),
                }
            }
        }
    }

    /// Pay for an existing booking from the history view
    pub async fn retry_for(&self, booking: &Booking) -> ClientResult<PaymentOutcome> {
        if !booking.awaits_payment() {
            return Err(ValidationError::NotPayable.into());
        }
        Ok(self.start(&booking.id).await)
    }
}
