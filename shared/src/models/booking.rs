//! Booking Model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::service::ServiceType;

/// Booking lifecycle status
///
/// Unknown strings coming from the backend fall back to `Pending`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Completed,
    Canceled,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 4] = [
        Self::Pending,
        Self::Confirmed,
        Self::Completed,
        Self::Canceled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Completed => "completed",
            Self::Canceled => "canceled",
        }
    }
}

impl From<&str> for BookingStatus {
    fn from(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "confirmed" => Self::Confirmed,
            "completed" => Self::Completed,
            // the backend has used both spellings
            "canceled" | "cancelled" => Self::Canceled,
            _ => Self::Pending,
        }
    }
}

impl From<String> for BookingStatus {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Payment status of a booking, independent from [`BookingStatus`]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Failed,
}

impl PaymentStatus {
    pub const ALL: [PaymentStatus; 3] = [Self::Pending, Self::Paid, Self::Failed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Failed => "failed",
        }
    }
}

impl From<&str> for PaymentStatus {
    fn from(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "paid" => Self::Paid,
            "failed" => Self::Failed,
            _ => Self::Pending,
        }
    }
}

impl From<String> for PaymentStatus {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Booking entity as returned by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Server-assigned ID
    #[serde(alias = "_id")]
    pub id: String,
    pub service_id: String,
    #[serde(default)]
    pub shop_id: Option<String>,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: String,
    pub service_type: ServiceType,
    #[serde(default)]
    pub address: String,
    /// `YYYY-MM-DD`
    pub booking_date: String,
    /// `HH:MM`
    pub booking_time: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub status: BookingStatus,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    /// Amount in VND
    #[serde(with = "rust_decimal::serde::float", default)]
    pub total_amount: Decimal,
    #[serde(
        with = "rust_decimal::serde::float_option",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub deposit_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Booking {
    /// Only completed bookings can be reviewed
    pub fn is_reviewable(&self) -> bool {
        self.status == BookingStatus::Completed
    }

    /// Payment can be (re)started while the booking is still live and unpaid
    pub fn awaits_payment(&self) -> bool {
        self.payment_status != PaymentStatus::Paid && self.status != BookingStatus::Canceled
    }
}

/// Create booking payload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub service_id: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: String,
    pub service_type: ServiceType,
    pub address: String,
    pub booking_date: String,
    pub booking_time: String,
    pub notes: String,
}

/// Shop/admin status override payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateBookingStatus {
    pub status: BookingStatus,
}

/// Shop/admin payment status override payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePaymentStatus {
    pub payment_status: PaymentStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_fallback_to_pending() {
        let status: BookingStatus = serde_json::from_str("\"archived\"").unwrap();
        assert_eq!(status, BookingStatus::Pending);

        let status: PaymentStatus = serde_json::from_str("\"refunded\"").unwrap();
        assert_eq!(status, PaymentStatus::Pending);
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&BookingStatus::Canceled).unwrap(),
            "\"canceled\""
        );
        assert_eq!(serde_json::to_string(&PaymentStatus::Paid).unwrap(), "\"paid\"");
        let status: BookingStatus = serde_json::from_str("\"cancelled\"").unwrap();
        assert_eq!(status, BookingStatus::Canceled);
    }

    #[test]
    fn test_booking_from_backend_json() {
        let json = r#"{
            "_id": "665f1c",
            "serviceId": "svc-1",
            "shopId": "shop-1",
            "customerName": "Nguyễn Văn A",
            "customerPhone": "0901234567",
            "customerEmail": "a@example.com",
            "serviceType": "onsite",
            "address": "12 Lê Lợi",
            "bookingDate": "2026-10-20",
            "bookingTime": "09:30",
            "notes": "",
            "status": "confirmed",
            "paymentStatus": "pending",
            "totalAmount": 250000,
            "createdAt": "2026-10-15T08:00:00Z"
        }"#;

        let booking: Booking = serde_json::from_str(json).unwrap();
        assert_eq!(booking.id, "665f1c");
        assert_eq!(booking.status, BookingStatus::Confirmed);
        assert_eq!(booking.payment_status, PaymentStatus::Pending);
        assert_eq!(booking.total_amount, Decimal::from(250_000));
        assert!(booking.deposit_amount.is_none());
        // independent axes
        assert!(booking.awaits_payment());
        assert!(!booking.is_reviewable());
    }
}
