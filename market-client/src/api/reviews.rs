use shared::models::{Review, ReviewPayload};

use crate::ClientResult;
use crate::http::HttpClient;

// ========== Review API ==========

impl HttpClient {
    pub async fn create_review(
        &self,
        booking_id: &str,
        payload: &ReviewPayload,
    ) -> ClientResult<Review> {
        self.post(&format!("reviews/{booking_id}"), payload).await
    }

    pub async fn update_review(
        &self,
        review_id: &str,
        payload: &ReviewPayload,
    ) -> ClientResult<Review> {
        self.put(&format!("reviews/{review_id}"), payload).await
    }

    pub async fn delete_review(&self, review_id: &str) -> ClientResult<()> {
        self.delete(&format!("reviews/{review_id}")).await
    }

    pub async fn service_reviews(&self, service_id: &str) -> ClientResult<Vec<Review>> {
        self.get(&format!("reviews/service/{service_id}")).await
    }
}
