//! Client error types

use shared::models::{BookingStatus, ServiceType};
use thiserror::Error;

/// Generic fallback shown when the backend gives no usable message
pub const GENERIC_ERROR_MESSAGE: &str = "Đã có lỗi xảy ra, vui lòng thử lại";

/// Required booking form fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookingField {
    CustomerName,
    CustomerPhone,
    CustomerEmail,
    BookingDate,
    BookingTime,
    Address,
}

impl BookingField {
    /// Wire name of the field
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CustomerName => "customerName",
            Self::CustomerPhone => "customerPhone",
            Self::CustomerEmail => "customerEmail",
            Self::BookingDate => "bookingDate",
            Self::BookingTime => "bookingTime",
            Self::Address => "address",
        }
    }

    /// Label shown to the user
    pub fn label(&self) -> &'static str {
        match self {
            Self::CustomerName => "Họ tên",
            Self::CustomerPhone => "Số điện thoại",
            Self::CustomerEmail => "Email",
            Self::BookingDate => "Ngày đặt",
            Self::BookingTime => "Giờ đặt",
            Self::Address => "Địa chỉ",
        }
    }
}

fn field_labels(fields: &[BookingField]) -> String {
    fields
        .iter()
        .map(|f| f.label())
        .collect::<Vec<_>>()
        .join(", ")
}

fn service_type_message(service: &ServiceType) -> &'static str {
    match service {
        ServiceType::Onsite => "Dịch vụ này chỉ có thể thực hiện tại chỗ",
        ServiceType::Offsite => "Dịch vụ này chỉ có thể thực hiện tại địa chỉ của khách hàng",
        ServiceType::Both => "Loại dịch vụ không hợp lệ",
    }
}

/// Client-side validation failure
///
/// Raised before any request is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Vui lòng nhập đầy đủ thông tin: {}", field_labels(.0))]
    MissingFields(Vec<BookingField>),

    #[error("{}", service_type_message(.service))]
    ServiceTypeMismatch {
        service: ServiceType,
        requested: ServiceType,
    },

    #[error("Dịch vụ hiện không khả dụng")]
    ServiceUnavailable,

    #[error("Vui lòng chọn số sao đánh giá")]
    MissingRating,

    #[error("Số sao đánh giá phải từ 1 đến 5 (nhận được {0})")]
    RatingOutOfRange(u8),

    #[error("Vui lòng nhập nội dung đánh giá")]
    EmptyComment,

    #[error("Chỉ có thể đánh giá đơn đã hoàn thành (trạng thái hiện tại: {0})")]
    NotReviewable(BookingStatus),

    #[error("Đơn đặt lịch đã thanh toán hoặc đã bị hủy")]
    NotPayable,
}

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Rejected locally, no request was sent
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// HTTP request failed (includes timeouts)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Authentication required; the session has been cleared
    #[error("Authentication required")]
    Unauthorized,

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Backend rejected the request as invalid
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Any other backend failure
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Credential file I/O
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A submission from the same workflow is still in flight
    #[error("A submission is already in progress")]
    Busy,
}

impl ClientError {
    /// Transport-level failure worth retrying (connect error or timeout).
    ///
    /// HTTP error statuses are never transient.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }

    /// The request never reached the backend. Safe to resend a POST.
    pub fn is_connect_failure(&self) -> bool {
        matches!(self, Self::Http(e) if e.is_connect())
    }

    /// Message suitable for a transient notification.
    ///
    /// Prefers the backend's own message, falls back to generic text.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(e) => e.to_string(),
            Self::Unauthorized => "Phiên đăng nhập đã hết hạn, vui lòng đăng nhập lại".into(),
            Self::Http(e) if e.is_timeout() => "Yêu cầu quá thời gian, vui lòng thử lại".into(),
            Self::Busy => "Yêu cầu đang được xử lý, vui lòng chờ".into(),
            Self::Forbidden(message)
            | Self::NotFound(message)
            | Self::BadRequest(message)
            | Self::Api { message, .. }
                if !message.trim().is_empty() =>
            {
                message.clone()
            }
            _ => GENERIC_ERROR_MESSAGE.into(),
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
