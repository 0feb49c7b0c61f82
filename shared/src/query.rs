//! List query types
//!
//! Filters are applied server-side; these structs only describe what to ask for
//! and serialize straight into URL query parameters.

use serde::{Deserialize, Serialize};

use crate::models::{BookingStatus, PaymentStatus, ServiceType};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;

/// Booking list filter (customer or shop scoped)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<BookingStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<PaymentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// 1-based
    pub page: u32,
    pub limit: u32,
}

impl Default for BookingQuery {
    fn default() -> Self {
        Self {
            status: None,
            payment_status: None,
            search: None,
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl BookingQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(mut self, status: BookingStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn payment_status(mut self, payment_status: PaymentStatus) -> Self {
        self.payment_status = Some(payment_status);
        self
    }

    /// Blank search text is dropped
    pub fn search(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        let trimmed = text.trim();
        self.search = (!trimmed.is_empty()).then(|| trimmed.to_string());
        self
    }

    /// Add pagination; page 0 is clamped to the first page
    pub fn paginate(mut self, page: u32, limit: u32) -> Self {
        self.page = page.max(1);
        self.limit = limit.max(1);
        self
    }
}

/// Service catalogue filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_type: Option<ServiceType>,
    pub page: u32,
    pub limit: u32,
}

impl Default for ServiceQuery {
    fn default() -> Self {
        Self {
            search: None,
            category: None,
            service_type: None,
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl ServiceQuery {
    pub fn search(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        let trimmed = text.trim();
        self.search = (!trimmed.is_empty()).then(|| trimmed.to_string());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn service_type(mut self, service_type: ServiceType) -> Self {
        self.service_type = Some(service_type);
        self
    }

    pub fn paginate(mut self, page: u32, limit: u32) -> Self {
        self.page = page.max(1);
        self.limit = limit.max(1);
        self
    }
}
