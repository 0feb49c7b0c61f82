//! Payment Return Reconciliation
//!
//! The gateway sends the user back with the result encoded in the query
//! string. The displayed status is decided from those parameters alone; the
//! backend confirmation that follows is best effort and cannot change it.

use std::borrow::Cow;

use reqwest::Url;
use shared::models::PaymentConfirmation;

use crate::http::HttpClient;
use crate::retry::RetryPolicy;

/// Base used to parse a bare query string
const QUERY_BASE: &str = "http://return.local/";

/// Raw parameters from the gateway redirect
///
/// Each key keeps its first value exactly as sent, empty or padded. An empty
/// booking id, code or status counts as missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentReturnParams {
    pub booking_id: Option<String>,
    pub success: Option<String>,
    pub code: Option<String>,
    pub status: Option<String>,
    pub cancel: Option<String>,
    pub order_code: Option<String>,
    pub shop_id: Option<String>,
    pub id: Option<String>,
}

impl PaymentReturnParams {
    /// Parse a full return URL, a `?`-prefixed query or a bare query string
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        let query = match input.split_once('?') {
            Some((_, query)) => query,
            None if input.contains("://") => "",
            None => input,
        };
        let query = query.split_once('#').map_or(query, |(query, _)| query);

        match Url::parse(&format!("{QUERY_BASE}?{query}")) {
            Ok(url) => Self::from_pairs(url.query_pairs()),
            Err(e) => {
                tracing::warn!("Unparseable payment return query: {e}");
                Self::default()
            }
        }
    }

    fn from_pairs<'a>(pairs: impl Iterator<Item = (Cow<'a, str>, Cow<'a, str>)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "bookingId" => &mut params.booking_id,
                "success" => &mut params.success,
                "code" => &mut params.code,
                "status" => &mut params.status,
                "cancel" => &mut params.cancel,
                "orderCode" => &mut params.order_code,
                "shopId" => &mut params.shop_id,
                "id" => &mut params.id,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.to_string());
            }
        }
        params
    }

    /// Booking id, unless missing or empty
    pub fn booking_id(&self) -> Option<&str> {
        non_empty(&self.booking_id)
    }

    /// Classify the redirect. Rules are checked in order; first match wins.
    pub fn signal(&self) -> GatewaySignal {
        if self.booking_id().is_none() {
            return GatewaySignal::MissingBookingId;
        }

        let success = self.success.as_deref();
        let code = self.code.as_deref();
        let status = self.status.as_deref();
        let cancel = self.cancel.as_deref();

        match (success, code, status, cancel) {
            (Some("true"), _, _, _) => GatewaySignal::SuccessFlag,
            (_, Some("00"), Some("PAID"), Some("false")) => GatewaySignal::PaidConfirmed,
            (_, Some("00"), Some("PAID"), _) => GatewaySignal::Paid,
            (_, _, _, Some("true")) => GatewaySignal::Cancelled,
            _ => GatewaySignal::Unmatched,
        }
    }

    /// Backend confirmation payload; needs the booking id, code and status
    pub fn confirmation(&self) -> Option<PaymentConfirmation> {
        Some(PaymentConfirmation {
            booking_id: self.booking_id()?.to_string(),
            code: non_empty(&self.code)?.to_string(),
            status: non_empty(&self.status)?.to_string(),
            order_code: self.order_code.clone(),
        })
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Which rule matched the redirect parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GatewaySignal {
    MissingBookingId,
    /// `success=true`
    SuccessFlag,
    /// `code=00&status=PAID&cancel=false`
    PaidConfirmed,
    /// `code=00&status=PAID`
    Paid,
    /// `cancel=true`
    Cancelled,
    Unmatched,
}

/// Status shown on the return screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReturnStatus {
    #[default]
    Loading,
    Success,
    Failed,
    Cancelled,
    /// Renderable, but no redirect resolves to it
    Unknown,
}

impl ReturnStatus {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Loading => "Đang xử lý kết quả thanh toán...",
            Self::Success => "Thanh toán thành công! Đơn đặt lịch của bạn đã được ghi nhận.",
            Self::Failed => "Thanh toán thất bại. Vui lòng thử lại.",
            Self::Cancelled => "Bạn đã hủy thanh toán.",
            Self::Unknown => "Không xác định được trạng thái thanh toán.",
        }
    }
}

impl std::fmt::Display for ReturnStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Loading => "loading",
            Self::Success => "success",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
            Self::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

impl GatewaySignal {
    pub fn resolve(self) -> ReturnStatus {
        match self {
            Self::MissingBookingId => ReturnStatus::Failed,
            Self::SuccessFlag | Self::PaidConfirmed | Self::Paid => ReturnStatus::Success,
            Self::Cancelled => ReturnStatus::Cancelled,
            Self::Unmatched => ReturnStatus::Failed,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::MissingBookingId => "Thiếu thông tin mã đơn đặt lịch",
            other => other.resolve().message(),
        }
    }
}

/// Pure status decision for a set of redirect parameters
pub fn resolve(params: &PaymentReturnParams) -> ReturnStatus {
    params.signal().resolve()
}

/// Result of the backend confirmation call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationResult {
    /// Not enough parameters to confirm
    NotAttempted,
    /// Backend acknowledged, with its message if any
    Confirmed(Option<String>),
    /// Logged and otherwise ignored
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileOutcome {
    pub booking_id: Option<String>,
    pub signal: GatewaySignal,
    pub status: ReturnStatus,
    pub message: &'static str,
    pub confirmation: ConfirmationResult,
}

#[derive(Debug, Clone)]
pub struct PaymentReturnReconciler {
    http: HttpClient,
    retry: RetryPolicy,
}

impl PaymentReturnReconciler {
    pub fn new(http: HttpClient, retry: RetryPolicy) -> Self {
        Self { http, retry }
    }

    pub async fn reconcile_url(&self, input: &str) -> ReconcileOutcome {
        self.reconcile(&PaymentReturnParams::parse(input)).await
    }

    /// Resolve the status, then forward the parameters to the backend when
    /// they are complete enough.
    pub async fn reconcile(&self, params: &PaymentReturnParams) -> ReconcileOutcome {
        let signal = params.signal();
        let status = signal.resolve();
        tracing::info!(
            booking_id = params.booking_id(),
            ?signal,
            %status,
            "Payment return resolved"
        );

        let confirmation = match params.confirmation() {
            Some(confirmation) => self.confirm(&confirmation).await,
            None => ConfirmationResult::NotAttempted,
        };

        ReconcileOutcome {
            booking_id: params.booking_id().map(str::to_string),
            signal,
            status,
            message: signal.message(),
            confirmation,
        }
    }

    async fn confirm(&self, confirmation: &PaymentConfirmation) -> ConfirmationResult {
        let http = &self.http;
        let result = self
            .retry
            .run("payment.return", move || http.confirm_payment_return(confirmation))
            .await;

        match result {
            Ok(message) => {
                tracing::debug!(booking_id = %confirmation.booking_id, "Payment return confirmed");
                ConfirmationResult::Confirmed(message)
            }
            Err(e) => {
                tracing::warn!(
                    booking_id = %confirmation.booking_id,
                    code = %confirmation.code,
                    "Payment return confirmation failed: {e}"
                );
                ConfirmationResult::Failed
            }
        }
    }
}
