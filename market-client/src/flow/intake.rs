//! Booking Intake
//!
//! Validates the booking form locally, creates the booking, then hands the
//! id the backend assigned straight to [`PaymentInitiation`].

use serde::{Deserialize, Serialize};
use shared::UserInfo;
use shared::models::{Booking, CreateBookingRequest, Service, ServiceType};

use crate::ClientResult;
use crate::error::{BookingField, ValidationError};
use crate::flow::payment::{PaymentInitiation, PaymentOutcome};
use crate::guard::InFlight;
use crate::http::HttpClient;

/// Booking form as filled in by the customer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingForm {
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: String,
    pub service_type: ServiceType,
    pub address: String,
    pub booking_date: String,
    pub booking_time: String,
    pub notes: String,
}

impl BookingForm {
    /// Pre-fill contact details from the logged-in user and pick the
    /// service's own type (onsite when the service does both).
    pub fn for_user(user: &UserInfo, service: &Service) -> Self {
        Self {
            customer_name: user.name.clone(),
            customer_phone: user.phone.clone().unwrap_or_default(),
            customer_email: user.email.clone(),
            service_type: match service.service_type {
                ServiceType::Both => ServiceType::Onsite,
                fixed => fixed,
            },
            ..Self::default()
        }
    }

    /// Required fields that are empty or whitespace, in form order
    pub fn missing_fields(&self) -> Vec<BookingField> {
        [
            (BookingField::CustomerName, &self.customer_name),
            (BookingField::CustomerPhone, &self.customer_phone),
            (BookingField::CustomerEmail, &self.customer_email),
            (BookingField::BookingDate, &self.booking_date),
            (BookingField::BookingTime, &self.booking_time),
            (BookingField::Address, &self.address),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }

    /// Local checks against the target service. No request is made.
    pub fn validate(&self, service: &Service) -> Result<(), ValidationError> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing));
        }
        if !service.service_type.accepts(self.service_type) {
            return Err(ValidationError::ServiceTypeMismatch {
                service: service.service_type,
                requested: self.service_type,
            });
        }
        if !service.is_available() {
            return Err(ValidationError::ServiceUnavailable);
        }
        Ok(())
    }

    /// Creation payload with surrounding whitespace stripped
    pub fn to_request(&self, service_id: &str) -> CreateBookingRequest {
        CreateBookingRequest {
            service_id: service_id.to_string(),
            customer_name: self.customer_name.trim().to_string(),
            customer_phone: self.customer_phone.trim().to_string(),
            customer_email: self.customer_email.trim().to_string(),
            service_type: self.service_type,
            address: self.address.trim().to_string(),
            booking_date: self.booking_date.trim().to_string(),
            booking_time: self.booking_time.trim().to_string(),
            notes: self.notes.trim().to_string(),
        }
    }
}

/// Created booking plus what happened when payment was requested
#[derive(Debug, Clone)]
pub struct BookingReceipt {
    pub booking: Booking,
    pub payment: PaymentOutcome,
}

#[derive(Debug)]
pub struct BookingIntake {
    http: HttpClient,
    payments: PaymentInitiation,
    in_flight: InFlight,
}

impl BookingIntake {
    pub fn new(http: HttpClient, payments: PaymentInitiation) -> Self {
        Self {
            http,
            payments,
            in_flight: InFlight::new(),
        }
    }

    pub async fn load_service(&self, service_id: &str) -> ClientResult<Service> {
        self.http.get_service(service_id).await
    }

    /// True while a submission is running
    pub fn is_submitting(&self) -> bool {
        self.in_flight.is_busy()
    }

    /// Validate, create the booking and start payment for it.
    ///
    /// Creation is attempted once. On error the form is left as-is so the
    /// caller can resubmit it.
    pub async fn submit(&self, service: &Service, form: &BookingForm) -> ClientResult<BookingReceipt> {
        if let Err(e) = form.validate(service) {
            tracing::debug!(service_id = %service.id, "Booking form rejected: {e}");
            return Err(e.into());
        }

        let _token = self.in_flight.try_begin()?;

        let booking = match self.http.create_booking(&form.to_request(&service.id)).await {
            Ok(booking) => booking,
            Err(e) => {
                tracing::error!(service_id = %service.id, "Booking creation failed: {e}");
                return Err(e);
            }
        };
        tracing::info!(
            booking_id = %booking.id,
            service_id = %service.id,
            service_type = %booking.service_type,
            "Booking created"
        );

        let payment = self.payments.start(&booking.id).await;
        Ok(BookingReceipt { booking, payment })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::UserRole;
    use shared::models::Availability;

    fn service(service_type: ServiceType) -> Service {
        Service {
            id: "svc-1".into(),
            shop_id: Some("shop-1".into()),
            name: "Massage body".into(),
            description: String::new(),
            price: Decimal::from(300_000),
            duration: 60,
            service_type,
            availability: Availability::Available,
            categories: vec![],
            images: vec![],
            working_hours: vec![],
            requirements: vec![],
            includes: vec![],
            excludes: vec![],
        }
    }

    fn filled(service_type: ServiceType) -> BookingForm {
        BookingForm {
            customer_name: "Phạm D".into(),
            customer_phone: "0987654321".into(),
            customer_email: "d@example.com".into(),
            service_type,
            address: "45 Hai Bà Trưng".into(),
            booking_date: "2026-10-20".into(),
            booking_time: "14:00".into(),
            notes: String::new(),
        }
    }

    #[test]
    fn test_missing_fields_are_all_named() {
        let mut form = filled(ServiceType::Onsite);
        form.customer_name = "   ".into();
        form.booking_time.clear();
        form.address = "\t".into();
        // notes are optional
        form.notes.clear();

        assert_eq!(
            form.validate(&service(ServiceType::Onsite)),
            Err(ValidationError::MissingFields(vec![
                BookingField::CustomerName,
                BookingField::BookingTime,
                BookingField::Address,
            ]))
        );
    }

    #[test]
    fn test_empty_form_names_every_required_field() {
        let form = BookingForm::default();
        assert_eq!(form.missing_fields().len(), 6);
    }

    #[test]
    fn test_service_type_pairs() {
        use ServiceType::*;

        let cases = [
            (Onsite, Onsite, true),
            (Onsite, Offsite, false),
            (Onsite, Both, true),
            (Offsite, Offsite, true),
            (Offsite, Onsite, false),
            (Offsite, Both, true),
            (Both, Onsite, true),
            (Both, Offsite, true),
            (Both, Both, true),
        ];

        for (service_type, requested, accepted) in cases {
            let result = filled(requested).validate(&service(service_type));
            assert_eq!(result.is_ok(), accepted, "{service_type} <- {requested}");
            if !accepted {
                assert!(matches!(
                    result,
                    Err(ValidationError::ServiceTypeMismatch { .. })
                ));
            }
        }
    }

    #[test]
    fn test_offsite_request_on_onsite_service_message() {
        let err = filled(ServiceType::Offsite)
            .validate(&service(ServiceType::Onsite))
            .unwrap_err();
        assert!(err.to_string().contains("chỉ có thể thực hiện tại chỗ"));
    }

    #[test]
    fn test_unavailable_service_is_rejected() {
        let mut svc = service(ServiceType::Both);
        svc.availability = Availability::Unavailable;
        assert_eq!(
            filled(ServiceType::Onsite).validate(&svc),
            Err(ValidationError::ServiceUnavailable)
        );
    }

    #[test]
    fn test_for_user_prefill() {
        let user = UserInfo {
            id: "u-9".into(),
            name: "Võ E".into(),
            email: "e@example.com".into(),
            phone: None,
            role: UserRole::Customer,
            shop_id: None,
        };

        let form = BookingForm::for_user(&user, &service(ServiceType::Offsite));
        assert_eq!(form.customer_email, "e@example.com");
        assert_eq!(form.service_type, ServiceType::Offsite);
        assert_eq!(form.missing_fields().first(), Some(&BookingField::CustomerPhone));

        let form = BookingForm::for_user(&user, &service(ServiceType::Both));
        assert_eq!(form.service_type, ServiceType::Onsite);
    }

    #[test]
    fn test_request_is_trimmed() {
        let mut form = filled(ServiceType::Onsite);
        form.customer_email = "  d@example.com ".into();
        let request = form.to_request("svc-1");
        assert_eq!(request.customer_email, "d@example.com");
        assert_eq!(request.service_id, "svc-1");
    }
}
