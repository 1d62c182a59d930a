//! Typed claim values.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::TokenError;

/// Subject (user ID)
pub const CLAIM_USER_ID: &str = "user_id";
pub const CLAIM_EMAIL: &str = "email";
pub const CLAIM_ROLES: &str = "roles";
/// Expiration (Unix timestamp)
pub const CLAIM_EXPIRY: &str = "exp";

/// A single claim value as it appears in the payload.
///
/// Anything that is not a string, a list of strings, or an integer lands in
/// `Other` and only fails when someone asks for it as a specific type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClaimValue {
    Text(String),
    Integer(i64),
    List(Vec<String>),
    Other(serde_json::Value),
}

impl ClaimValue {
    pub fn as_str(&self, claim: &str) -> Result<&str, TokenError> {
        match self {
            Self::Text(s) => Ok(s),
            _ => Err(mismatch(claim, "a string")),
        }
    }

    pub fn as_list(&self, claim: &str) -> Result<&[String], TokenError> {
        match self {
            Self::List(items) => Ok(items),
            _ => Err(mismatch(claim, "a list of strings")),
        }
    }

    /// NumericDate may legally be fractional; the fraction is dropped.
    pub fn as_integer(&self, claim: &str) -> Result<i64, TokenError> {
        match self {
            Self::Integer(n) => Ok(*n),
            Self::Other(serde_json::Value::Number(n)) => n
                .as_f64()
                .filter(|f| f.is_finite())
                .map(|f| f.trunc() as i64)
                .ok_or_else(|| mismatch(claim, "an integer")),
            _ => Err(mismatch(claim, "an integer")),
        }
    }
}

fn mismatch(claim: &str, expected: &'static str) -> TokenError {
    TokenError::ClaimTypeMismatch {
        claim: claim.to_owned(),
        expected,
    }
}

impl From<&str> for ClaimValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for ClaimValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for ClaimValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<Vec<String>> for ClaimValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

/// The payload segment of a token: claim name to value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimSet(BTreeMap<String, ClaimValue>);

impl ClaimSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: impl Into<ClaimValue>) -> Self {
        self.0.insert(name.to_owned(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Result<&ClaimValue, TokenError> {
        self.0
            .get(name)
            .ok_or_else(|| TokenError::ClaimNotFound(name.to_owned()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn get_str(&self, name: &str) -> Result<&str, TokenError> {
        self.get(name)?.as_str(name)
    }

    pub fn get_list(&self, name: &str) -> Result<&[String], TokenError> {
        self.get(name)?.as_list(name)
    }

    pub fn get_integer(&self, name: &str) -> Result<i64, TokenError> {
        self.get(name)?.as_integer(name)
    }
}
