//! Fixed label/colour tables used when rendering booking lists

use super::booking::{BookingStatus, PaymentStatus};

/// Display label and colour tag for a status value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusBadge {
    pub label: &'static str,
    pub color: &'static str,
}

impl BookingStatus {
    pub fn badge(&self) -> StatusBadge {
        match self {
            Self::Pending => StatusBadge {
                label: "Chờ xác nhận",
                color: "orange",
            },
            Self::Confirmed => StatusBadge {
                label: "Đã xác nhận",
                color: "blue",
            },
            Self::Completed => StatusBadge {
                label: "Hoàn thành",
                color: "green",
            },
            Self::Canceled => StatusBadge {
                label: "Đã hủy",
                color: "red",
            },
        }
    }
}

impl PaymentStatus {
    pub fn badge(&self) -> StatusBadge {
        match self {
            Self::Pending => StatusBadge {
                label: "Chờ thanh toán",
                color: "orange",
            },
            Self::Paid => StatusBadge {
                label: "Đã thanh toán",
                color: "green",
            },
            Self::Failed => StatusBadge {
                label: "Thanh toán thất bại",
                color: "red",
            },
        }
    }
}

/// Badge for a raw booking status string; unknown values render as pending
pub fn booking_status_badge(raw: &str) -> StatusBadge {
    BookingStatus::from(raw).badge()
}

/// Badge for a raw payment status string; unknown values render as pending
pub fn payment_status_badge(raw: &str) -> StatusBadge {
    PaymentStatus::from(raw).badge()
}
