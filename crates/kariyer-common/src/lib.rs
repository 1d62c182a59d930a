//! # kariyer-common
//!
//! Shared configuration, token authentication, error handling, and response
//! envelopes used by every Kariyer backend service. The outbound adapters
//! (mail, alerting, object storage) live in their own crates and only depend
//! on the configuration types defined here.

pub mod auth;
pub mod config;
pub mod error;
pub mod response;
pub mod telemetry;
