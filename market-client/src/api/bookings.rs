use serde::Serialize;
use shared::models::{
    Booking, BookingStatus, CreateBookingRequest, PaymentStatus, UpdateBookingStatus,
    UpdatePaymentStatus,
};
use shared::{BookingQuery, Page};

use crate::ClientResult;
use crate::http::HttpClient;

/// Customer list query: filters plus the customer's email
#[derive(Serialize)]
struct CustomerBookingQuery<'a> {
    email: &'a str,
    #[serde(flatten)]
    filter: &'a BookingQuery,
}

// ========== Booking API ==========

impl HttpClient {
    pub async fn create_booking(&self, request: &CreateBookingRequest) -> ClientResult<Booking> {
        self.post("bookings", request).await
    }

    pub async fn get_booking(&self, booking_id: &str) -> ClientResult<Booking> {
        self.get(&format!("bookings/{booking_id}")).await
    }

    /// Bookings made by a customer, filtered server-side
    pub async fn customer_bookings(
        &self,
        email: &str,
        filter: &BookingQuery,
    ) -> ClientResult<Page<Booking>> {
        let query = CustomerBookingQuery { email, filter };
        self.get_page("bookings/customer", &query).await
    }

    /// Bookings received by a shop, filtered server-side
    pub async fn shop_bookings(
        &self,
        shop_id: &str,
        filter: &BookingQuery,
    ) -> ClientResult<Page<Booking>> {
        self.get_page(&format!("bookings/shop/{shop_id}"), filter).await
    }

    /// Shop/admin status change
    pub async fn update_booking_status(
        &self,
        booking_id: &str,
        status: BookingStatus,
    ) -> ClientResult<Booking> {
        self.put(
            &format!("bookings/{booking_id}/status"),
            &UpdateBookingStatus { status },
        )
        .await
    }

    /// Shop/admin payment status override
    pub async fn update_payment_status(
        &self,
        booking_id: &str,
        payment_status: PaymentStatus,
    ) -> ClientResult<Booking> {
        self.put(
            &format!("bookings/{booking_id}/payment-status"),
            &UpdatePaymentStatus { payment_status },
        )
        .await
    }

    /// Customer-side cancellation
    pub async fn cancel_booking(&self, booking_id: &str) -> ClientResult<Booking> {
        self.put_empty(&format!("bookings/{booking_id}/cancel")).await
    }
}
