//! Where the signing secret comes from.

use crate::config;

/// Supplies the HMAC signing secret.
///
/// Queried on every issuance and verification; implementations must not
/// cache if they want rotation to take effect immediately. `None` (or an
/// empty string, which providers normalise to `None`) means no secret.
pub trait SecretProvider: Send + Sync {
    fn signing_secret(&self) -> Option<String>;
}

/// Reads the secret from a process environment variable on each call.
#[derive(Debug, Clone)]
pub struct EnvSecretProvider {
    var: String,
}

impl EnvSecretProvider {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl Default for EnvSecretProvider {
    fn default() -> Self {
        Self::new(config::JWT_SECRET)
    }
}

impl SecretProvider for EnvSecretProvider {
    fn signing_secret(&self) -> Option<String> {
        config::Settings::env(&self.var).filter(|s| !s.is_empty())
    }
}

/// A fixed secret, e.g. taken from a [`config::Settings`] snapshot.
#[derive(Clone)]
pub struct StaticSecretProvider(String);

impl StaticSecretProvider {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }
}

impl std::fmt::Debug for StaticSecretProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("StaticSecretProvider(<redacted>)")
    }
}

impl SecretProvider for StaticSecretProvider {
    fn signing_secret(&self) -> Option<String> {
        Some(self.0.clone()).filter(|s| !s.is_empty())
    }
}

impl<F> SecretProvider for F
where
    F: Fn() -> Option<String> + Send + Sync,
{
    fn signing_secret(&self) -> Option<String> {
        self().filter(|s| !s.is_empty())
    }
}
