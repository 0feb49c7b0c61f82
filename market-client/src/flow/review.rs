//! Review Submission

use shared::models::{Booking, MAX_RATING, MIN_RATING, Review, ReviewPayload};

use crate::ClientResult;
use crate::error::ValidationError;
use crate::guard::InFlight;
use crate::http::HttpClient;

/// Review being written for a booking
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewDraft {
    /// Star rating; `None` until the user picks one
    pub rating: Option<u8>,
    pub comment: String,
}

impl ReviewDraft {
    pub fn new(rating: Option<u8>, comment: impl Into<String>) -> Self {
        Self {
            rating,
            comment: comment.into(),
        }
    }

    /// Check the draft against the booking it is for
    pub fn validate(&self, booking: &Booking) -> Result<ReviewPayload, ValidationError> {
        if !booking.is_reviewable() {
            return Err(ValidationError::NotReviewable(booking.status));
        }
        let rating = self.rating.ok_or(ValidationError::MissingRating)?;
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(ValidationError::RatingOutOfRange(rating));
        }
        let comment = self.comment.trim();
        if comment.is_empty() {
            return Err(ValidationError::EmptyComment);
        }
        Ok(ReviewPayload {
            rating,
            comment: comment.to_string(),
        })
    }
}

#[derive(Debug)]
pub struct ReviewSubmission {
    http: HttpClient,
    in_flight: InFlight,
}

impl ReviewSubmission {
    pub fn new(http: HttpClient) -> Self {
        Self {
            http,
            in_flight: InFlight::new(),
        }
    }

    /// Submit once. The backend decides whether a booking may carry more
    /// than one review.
    pub async fn submit(&self, booking: &Booking, draft: &ReviewDraft) -> ClientResult<Review> {
        let payload = draft.validate(booking)?;
        let _token = self.in_flight.try_begin()?;

        let review = self.http.create_review(&booking.id, &payload).await?;
        tracing::info!(booking_id = %booking.id, rating = payload.rating, "Review submitted");
        Ok(review)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{BookingStatus, PaymentStatus, ServiceType};

    fn booking(status: BookingStatus) -> Booking {
        Booking {
            id: "b-1".into(),
            service_id: "svc-1".into(),
            shop_id: None,
            customer_name: "Lê C".into(),
            customer_phone: "0912345678".into(),
            customer_email: "c@example.com".into(),
            service_type: ServiceType::Onsite,
            address: "1 Nguyễn Huệ".into(),
            booking_date: "2026-10-01".into(),
            booking_time: "10:00".into(),
            notes: String::new(),
            status,
            payment_status: PaymentStatus::Paid,
            total_amount: Default::default(),
            deposit_amount: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_rating_boundaries() {
        let completed = booking(BookingStatus::Completed);

        assert_eq!(
            ReviewDraft::new(None, "Tốt").validate(&completed),
            Err(ValidationError::MissingRating)
        );
        assert_eq!(
            ReviewDraft::new(Some(0), "Tốt").validate(&completed),
            Err(ValidationError::RatingOutOfRange(0))
        );
        assert_eq!(
            ReviewDraft::new(Some(6), "Tốt").validate(&completed),
            Err(ValidationError::RatingOutOfRange(6))
        );
        for rating in 1..=5 {
            let payload = ReviewDraft::new(Some(rating), " Tốt ").validate(&completed).unwrap();
            assert_eq!(payload.rating, rating);
            assert_eq!(payload.comment, "Tốt");
        }
    }

    #[test]
    fn test_empty_comment() {
        let draft = ReviewDraft::new(Some(4), "   ");
        assert_eq!(
            draft.validate(&booking(BookingStatus::Completed)),
            Err(ValidationError::EmptyComment)
        );
    }

    #[test]
    fn test_only_completed_bookings() {
        let draft = ReviewDraft::new(Some(5), "Rất hài lòng");
        for status in [
            BookingStatus::Pending,
            BookingStatus::Confirmed,
            BookingStatus::Canceled,
        ] {
            assert_eq!(
                draft.validate(&booking(status)),
                Err(ValidationError::NotReviewable(status))
            );
        }
    }
}
