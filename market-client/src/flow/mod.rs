//! End-user workflows built on top of [`HttpClient`](crate::HttpClient)
//!
//! Booking intake hands the created booking to payment initiation; the
//! gateway redirect comes back through reconciliation; history and reviews
//! work on bookings that already exist.

pub mod history;
pub mod intake;
pub mod payment;
pub mod reconcile;
pub mod review;

pub use history::{BookingHistory, HistoryScope};
pub use intake::{BookingForm, BookingIntake, BookingReceipt};
pub use payment::{PaymentInitiation, PaymentOutcome};
pub use reconcile::{
    ConfirmationResult, GatewaySignal, PaymentReturnParams, PaymentReturnReconciler,
    ReconcileOutcome, ReturnStatus, resolve,
};
pub use review::{ReviewDraft, ReviewSubmission};
