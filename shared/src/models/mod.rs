//! Data models
//!
//! Shared between market-client and the CLI front end (via API).
//! Wire format is camelCase JSON; IDs are opaque backend strings.

pub mod badge;
pub mod booking;
pub mod payment;
pub mod review;
pub mod service;

// Re-exports
pub use badge::*;
pub use booking::*;
pub use payment::*;
pub use review::*;
pub use service::*;
