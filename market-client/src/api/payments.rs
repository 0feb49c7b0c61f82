use shared::models::{CreatePaymentRequest, PaymentConfirmation, PaymentLinkResponse};

use crate::ClientResult;
use crate::http::HttpClient;

// ========== Payment API ==========

impl HttpClient {
    /// Ask the backend for a gateway payment link
    pub async fn create_payment_link(&self, booking_id: &str) -> ClientResult<PaymentLinkResponse> {
        let request = CreatePaymentRequest {
            booking_id: booking_id.to_string(),
        };
        self.post("payments/create", &request).await
    }

    /// Forward gateway return parameters to the backend.
    ///
    /// The response body is not interpreted beyond its message.
    pub async fn confirm_payment_return(
        &self,
        confirmation: &PaymentConfirmation,
    ) -> ClientResult<Option<String>> {
        self.get_ack("payments/return", confirmation).await
    }
}
