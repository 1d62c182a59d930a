//! # kariyer-alert
//!
//! Posts operational notifications to a Slack incoming webhook.
//!
//! Alerting is a side channel: [`AlertClient::notify`] returns immediately,
//! the post happens on a detached task, and failures only show up in the
//! logs. Nothing here can fail the caller's primary operation.

pub mod client;
pub mod error;
pub mod payload;

pub use client::AlertClient;
pub use error::AlertError;
pub use payload::Severity;
