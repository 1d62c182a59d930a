//! Bearer token authentication.
//!
//! Access, refresh, and password-reset tokens are compact HS256 JWTs signed
//! with a single shared secret. The secret is fetched from a
//! [`SecretProvider`] on every call, so rotating it takes effect without a
//! restart. There is no revocation: expiry is the only way a token dies.

mod claims;
mod clock;
mod secret;
mod service;

pub use claims::{
    ClaimSet, ClaimValue, CLAIM_EMAIL, CLAIM_EXPIRY, CLAIM_ROLES, CLAIM_USER_ID,
};
pub use clock::{Clock, ManualClock, SystemClock};
pub use secret::{EnvSecretProvider, SecretProvider, StaticSecretProvider};
pub use service::{
    TokenPair, TokenService, ACCESS_TOKEN_TTL_SECS, REFRESH_TOKEN_TTL_SECS,
    RESET_PASSWORD_TOKEN_TTL_SECS,
};
