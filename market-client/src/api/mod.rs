//! Typed REST endpoints
//!
//! Each submodule adds an `impl HttpClient` block for one backend resource.

mod auth;
mod bookings;
mod payments;
mod reviews;
mod services;
