//! Shared types for the service marketplace
//!
//! Domain models, auth DTOs, the backend response envelope and list query
//! types used by market-client and its front ends.

pub mod client;
pub mod models;
pub mod query;
pub mod response;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use client::{LoginRequest, LoginResponse, UserInfo, UserRole};
pub use query::{BookingQuery, ServiceQuery};
pub use response::{ApiResponse, Page, Pagination};
