//! Market Client - booking and payment client for the service marketplace
//!
//! Talks to the marketplace REST API over HTTP and implements the customer
//! and shop workflows on top of it. Start from [`AppContext`].

mod api;
pub mod config;
pub mod context;
pub mod credential;
pub mod error;
pub mod flow;
pub mod guard;
pub mod http;
pub mod retry;
pub mod session;

pub use config::ClientConfig;
pub use context::AppContext;
pub use credential::{Credential, CredentialStorage};
pub use error::{BookingField, ClientError, ClientResult, ValidationError};
pub use http::HttpClient;
pub use retry::RetryPolicy;
pub use session::{Session, SessionEvent};

// Re-export shared types for convenience
pub use shared::{ApiResponse, BookingQuery, LoginResponse, Page, ServiceQuery, UserInfo};
