//! Booking History
//!
//! Paginated, server-filtered booking list for a customer or a shop. Every
//! filter change fetches again straight away and goes back to page 1.

use shared::models::{Booking, BookingStatus, PaymentStatus};
use shared::{BookingQuery, Page, UserInfo, UserRole};

use crate::ClientResult;
use crate::flow::payment::{PaymentInitiation, PaymentOutcome};
use crate::http::HttpClient;

/// Whose bookings are listed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryScope {
    Customer { email: String },
    Shop { shop_id: String },
}

impl HistoryScope {
    /// Shop owners see their shop's bookings, everyone else their own
    pub fn for_user(user: &UserInfo) -> Self {
        match (&user.role, &user.shop_id) {
            (UserRole::Shop, Some(shop_id)) => Self::Shop {
                shop_id: shop_id.clone(),
            },
            _ => Self::Customer {
                email: user.email.clone(),
            },
        }
    }
}

#[derive(Debug)]
pub struct BookingHistory {
    http: HttpClient,
    payments: PaymentInitiation,
    scope: HistoryScope,
    query: BookingQuery,
    current: Option<Page<Booking>>,
}

impl BookingHistory {
    pub fn new(http: HttpClient, payments: PaymentInitiation, scope: HistoryScope) -> Self {
        Self {
            http,
            payments,
            scope,
            query: BookingQuery::new(),
            current: None,
        }
    }

    pub fn scope(&self) -> &HistoryScope {
        &self.scope
    }

    pub fn query(&self) -> &BookingQuery {
        &self.query
    }

    /// Last page fetched successfully
    pub fn current(&self) -> Option<&Page<Booking>> {
        self.current.as_ref()
    }

    /// Fetch the page described by the current query.
    ///
    /// On failure the previously fetched page is kept.
    pub async fn refresh(&mut self) -> ClientResult<&Page<Booking>> {
        let result = match &self.scope {
            HistoryScope::Customer { email } => {
                self.http.customer_bookings(email, &self.query).await
            }
            HistoryScope::Shop { shop_id } => self.http.shop_bookings(shop_id, &self.query).await,
        };

        let page = match result {
            Ok(page) => page,
            Err(e) => {
                tracing::error!(query = ?self.query, "Failed to load bookings: {e}");
                return Err(e);
            }
        };
        tracing::debug!(
            page = page.pagination.page,
            total = page.pagination.total,
            returned = page.data.len(),
            "Bookings loaded"
        );
        Ok(self.current.insert(page))
    }

    /// Replace the whole query and fetch
    pub async fn load(&mut self, query: BookingQuery) -> ClientResult<&Page<Booking>> {
        self.query = query;
        self.refresh().await
    }

    pub async fn set_status(&mut self, status: Option<BookingStatus>) -> ClientResult<&Page<Booking>> {
        self.query.status = status;
        self.query.page = 1;
        self.refresh().await
    }

    pub async fn set_payment_status(
        &mut self,
        payment_status: Option<PaymentStatus>,
    ) -> ClientResult<&Page<Booking>> {
        self.query.payment_status = payment_status;
        self.query.page = 1;
        self.refresh().await
    }

    /// Blank text clears the search
    pub async fn set_search(&mut self, text: &str) -> ClientResult<&Page<Booking>> {
        self.query = std::mem::take(&mut self.query).search(text);
        self.query.page = 1;
        self.refresh().await
    }

    pub async fn goto_page(&mut self, page: u32) -> ClientResult<&Page<Booking>> {
        self.query.page = page.max(1);
        self.refresh().await
    }

    /// Shop/admin override; the list is reloaded afterwards
    pub async fn update_status(
        &mut self,
        booking_id: &str,
        status: BookingStatus,
    ) -> ClientResult<Booking> {
        let booking = self.http.update_booking_status(booking_id, status).await?;
        tracing::info!(booking_id, %status, "Booking status updated");
        self.reload_after_change().await;
        Ok(booking)
    }

    /// Shop/admin override; the list is reloaded afterwards
    pub async fn update_payment_status(
        &mut self,
        booking_id: &str,
        payment_status: PaymentStatus,
    ) -> ClientResult<Booking> {
        let booking = self
            .http
            .update_payment_status(booking_id, payment_status)
            .await?;
        tracing::info!(booking_id, %payment_status, "Payment status updated");
        self.reload_after_change().await;
        Ok(booking)
    }

    pub async fn cancel(&mut self, booking_id: &str) -> ClientResult<Booking> {
        let booking = self.http.cancel_booking(booking_id).await?;
        tracing::info!(booking_id, "Booking cancelled");
        self.reload_after_change().await;
        Ok(booking)
    }

    /// Start payment again for an unpaid booking from the list
    pub async fn retry_payment(&self, booking: &Booking) -> ClientResult<PaymentOutcome> {
        self.payments.retry_for(booking).await
    }

    /// The change itself succeeded; a failed reload only leaves a stale list
    async fn reload_after_change(&mut self) {
        if let Err(e) = self.refresh().await {
            tracing::warn!("Booking list not refreshed after change: {e}");
        }
    }
}
