//! # kariyer-mail
//!
//! Thin wrapper over the Mailjet Send API v3.1. Each call makes exactly one
//! HTTP request and hands back Mailjet's per-message status (`"success"`),
//! or the error it produced, without retrying.

pub mod client;
pub mod dto;
pub mod error;

pub use client::MailClient;
pub use dto::{PlainEmail, Recipient, TemplateEmail};
pub use error::MailError;
