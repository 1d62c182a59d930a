//! Token issuance and verification.

use std::sync::Arc;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::Duration;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::claims::{ClaimSet, CLAIM_EMAIL, CLAIM_EXPIRY, CLAIM_ROLES, CLAIM_USER_ID};
use super::clock::{Clock, SystemClock};
use super::secret::{EnvSecretProvider, SecretProvider};
use crate::error::{TokenError, TokenResult};

/// 24 hours.
pub const ACCESS_TOKEN_TTL_SECS: i64 = 24 * 60 * 60;
/// 30 days.
pub const REFRESH_TOKEN_TTL_SECS: i64 = 30 * 24 * 60 * 60;
/// 15 minutes.
pub const RESET_PASSWORD_TOKEN_TTL_SECS: i64 = 15 * 60;

const HMAC_FAMILY: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// Token pair returned on login.
#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds
    pub expires_in: u64,
    pub token_type: String,
}

/// Issues and verifies HS256 tokens.
///
/// Stateless apart from its two collaborators, so it is cheap to clone and
/// safe to share across threads.
#[derive(Clone)]
pub struct TokenService {
    secrets: Arc<dyn SecretProvider>,
    clock: Arc<dyn Clock>,
}

impl TokenService {
    pub fn new(secrets: impl SecretProvider + 'static) -> Self {
        Self {
            secrets: Arc::new(secrets),
            clock: Arc::new(SystemClock),
        }
    }

    /// Service reading `JWT_SECRET` from the environment on every call.
    pub fn from_env() -> Self {
        Self::new(EnvSecretProvider::default())
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    // ------------------------------------------------------------------
    // Issuance
    // ------------------------------------------------------------------

    /// Access token carrying subject, email and roles, valid for 24 hours.
    pub fn issue_access_token(
        &self,
        roles: &[String],
        user_id: &str,
        email: &str,
    ) -> TokenResult<String> {
        let claims = ClaimSet::new()
            .with(CLAIM_USER_ID, user_id)
            .with(CLAIM_EMAIL, email)
            .with(CLAIM_ROLES, roles.to_vec())
            .with(CLAIM_EXPIRY, self.expiry_after(ACCESS_TOKEN_TTL_SECS));

        let token = self.sign(&claims)?;
        debug!(user_id, "Issued access token");
        Ok(token)
    }

    /// Issue both tokens. Nothing is returned unless both succeed.
    pub fn issue_access_and_refresh_token(
        &self,
        roles: &[String],
        user_id: &str,
        email: &str,
    ) -> TokenResult<TokenPair> {
        Ok(TokenPair {
            access_token: self.issue_access_token(roles, user_id, email)?,
            refresh_token: self.issue_refresh_token(user_id)?,
            expires_in: ACCESS_TOKEN_TTL_SECS.unsigned_abs(),
            token_type: "Bearer".to_string(),
        })
    }

    /// Refresh token carrying only the subject, valid for 30 days.
    pub fn issue_refresh_token(&self, user_id: &str) -> TokenResult<String> {
        let claims = ClaimSet::new()
            .with(CLAIM_USER_ID, user_id)
            .with(CLAIM_EXPIRY, self.expiry_after(REFRESH_TOKEN_TTL_SECS));

        let token = self.sign(&claims)?;
        debug!(user_id, "Issued refresh token");
        Ok(token)
    }

    /// Password-reset token carrying subject and email, valid for 15 minutes.
    pub fn issue_password_reset_token(&self, user_id: &str, email: &str) -> TokenResult<String> {
        let claims = ClaimSet::new()
            .with(CLAIM_EMAIL, email)
            .with(CLAIM_USER_ID, user_id)
            .with(CLAIM_EXPIRY, self.expiry_after(RESET_PASSWORD_TOKEN_TTL_SECS));

        let token = self.sign(&claims)?;
        debug!(user_id, "Issued password reset token");
        Ok(token)
    }

    // ------------------------------------------------------------------
    // Verification
    // ------------------------------------------------------------------

    /// Check signature and expiry. A token is expired from its `exp` second on.
    pub fn validate(&self, token: &str) -> TokenResult<()> {
        let expiry = self
            .claims(token)
            .and_then(|claims| claims.get_integer(CLAIM_EXPIRY))
            .map_err(|err| match err {
                TokenError::InvalidSignature
                | TokenError::ClaimNotFound(_)
                | TokenError::ClaimTypeMismatch { .. } => {
                    TokenError::MalformedToken(err.to_string())
                }
                other => other,
            })?;

        if self.clock.now().timestamp() >= expiry {
            debug!(expiry, "Rejected expired token");
            return Err(TokenError::ExpiredToken);
        }

        Ok(())
    }

    /// Verify the signature and return the whole claim set. Expiry is not
    /// checked here; use [`validate`](Self::validate) for that.
    pub fn claims(&self, token: &str) -> TokenResult<ClaimSet> {
        let secret = self
            .secrets
            .signing_secret()
            .ok_or(TokenError::SecretUnavailable)?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = HMAC_FAMILY.to_vec();
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        decode::<ClaimSet>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|err| {
            let err = verification_error(&err);
            debug!(error = %err, "Token verification failed");
            err
        })
    }

    /// Verified string claim.
    pub fn get_claim(&self, token: &str, name: &str) -> TokenResult<String> {
        let claims = self.claims(token)?;
        Ok(claims.get_str(name)?.to_owned())
    }

    /// Verified list-of-strings claim, with the header pinned to HMAC.
    ///
    /// The algorithm is checked before any signature work so that a token
    /// declaring `none` or an asymmetric algorithm is always rejected as
    /// such.
    pub fn get_roles(&self, token: &str, name: &str) -> TokenResult<Vec<String>> {
        let alg = header_algorithm(token)?;
        if !matches!(alg.as_str(), "HS256" | "HS384" | "HS512") {
            warn!(alg = %alg, "Token declares a non-HMAC signing method");
            return Err(TokenError::UnexpectedSigningMethod(alg));
        }

        let claims = self.claims(token)?;
        Ok(claims.get_list(name)?.to_vec())
    }

    // ------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------

    fn expiry_after(&self, ttl_secs: i64) -> i64 {
        (self.clock.now() + Duration::seconds(ttl_secs)).timestamp()
    }

    fn sign(&self, claims: &ClaimSet) -> TokenResult<String> {
        let secret = self
            .secrets
            .signing_secret()
            .ok_or_else(|| TokenError::Signing("signing secret is not configured".to_string()))?;

        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .map_err(|e| TokenError::Signing(e.to_string()))
    }
}

fn verification_error(err: &jsonwebtoken::errors::Error) -> TokenError {
    match err.kind() {
        ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm | ErrorKind::InvalidKeyFormat => {
            TokenError::InvalidSignature
        }
        _ => TokenError::MalformedToken(err.to_string()),
    }
}

/// Read `alg` from the header segment without trusting anything else.
fn header_algorithm(token: &str) -> TokenResult<String> {
    #[derive(Deserialize)]
    struct RawHeader {
        alg: String,
    }

    let segment = token.split('.').next().unwrap_or_default();
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|e| TokenError::MalformedToken(format!("header is not base64url: {e}")))?;
    let header: RawHeader = serde_json::from_slice(&bytes)
        .map_err(|e| TokenError::MalformedToken(format!("header is not valid JSON: {e}")))?;
    Ok(header.alg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{ManualClock, StaticSecretProvider};
    use chrono::DateTime;
    use serde_json::{json, Value};
    use std::sync::RwLock;

    const SECRET: &str = "test-secret-with-enough-entropy";

    fn service() -> (TokenService, Arc<ManualClock>) {
        // 2026-01-01T00:00:00Z
        let clock = Arc::new(ManualClock::at(DateTime::from_timestamp(1_767_225_600, 0).unwrap()));
        let svc = TokenService::new(StaticSecretProvider::new(SECRET)).with_clock(clock.clone());
        (svc, clock)
    }

    fn roles() -> Vec<String> {
        vec!["admin".to_string(), "user".to_string()]
    }

    fn decode_segment(segment: &str) -> Value {
        serde_json::from_slice(&URL_SAFE_NO_PAD.decode(segment).unwrap()).unwrap()
    }

    fn with_header(token: &str, header: &Value) -> String {
        let mut parts: Vec<String> = token.split('.').map(str::to_owned).collect();
        parts[0] = URL_SAFE_NO_PAD.encode(header.to_string());
        parts.join(".")
    }

    #[test]
    fn access_token_wire_format() {
        let (svc, clock) = service();
        let token = svc.issue_access_token(&roles(), "u1", "a@b.com").unwrap();

        let parts: Vec<&str> = token.split('.').collect();
        assert_eq!(parts.len(), 3);

        let header = decode_segment(parts[0]);
        assert_eq!(header["alg"], "HS256");
        assert_eq!(header["typ"], "JWT");

        let payload = decode_segment(parts[1]);
        assert_eq!(
            payload,
            json!({
                "user_id": "u1",
                "email": "a@b.com",
                "roles": ["admin", "user"],
                "exp": clock.now().timestamp() + ACCESS_TOKEN_TTL_SECS,
            })
        );
    }

    #[test]
    fn email_round_trips() {
        let (svc, _) = service();
        let token = svc.issue_access_token(&roles(), "u1", "a@b.com").unwrap();
        assert_eq!(svc.get_claim(&token, CLAIM_EMAIL).unwrap(), "a@b.com");
        assert_eq!(svc.get_claim(&token, CLAIM_USER_ID).unwrap(), "u1");
    }

    #[test]
    fn roles_round_trip_in_order() {
        let (svc, _) = service();
        let token = svc.issue_access_token(&roles(), "u1", "a@b.com").unwrap();
        assert_eq!(svc.get_roles(&token, CLAIM_ROLES).unwrap(), roles());
    }

    #[test]
    fn verification_is_repeatable() {
        let (svc, _) = service();
        let token = svc.issue_access_token(&roles(), "u1", "a@b.com").unwrap();
        let first = svc.claims(&token).unwrap();
        let second = svc.claims(&token).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            svc.get_roles(&token, CLAIM_ROLES).unwrap(),
            svc.get_roles(&token, CLAIM_ROLES).unwrap()
        );
    }

    #[test]
    fn access_token_expires_at_its_exp_second() {
        let (svc, clock) = service();
        let token = svc.issue_access_token(&roles(), "u1", "a@b.com").unwrap();

        clock.advance(Duration::seconds(ACCESS_TOKEN_TTL_SECS - 1));
        assert_eq!(svc.validate(&token), Ok(()));

        clock.advance(Duration::seconds(1));
        assert_eq!(svc.validate(&token), Err(TokenError::ExpiredToken));

        clock.advance(Duration::days(1));
        assert_eq!(svc.validate(&token), Err(TokenError::ExpiredToken));

        clock.set(DateTime::from_timestamp(1_767_225_600, 0).unwrap());
        assert_eq!(svc.validate(&token), Ok(()));
    }

    #[test]
    fn password_reset_token_lasts_fifteen_minutes() {
        let (svc, clock) = service();
        let token = svc.issue_password_reset_token("u1", "a@b.com").unwrap();

        clock.advance(Duration::minutes(14));
        assert_eq!(svc.validate(&token), Ok(()));
        assert_eq!(svc.get_claim(&token, CLAIM_EMAIL).unwrap(), "a@b.com");

        clock.advance(Duration::minutes(2));
        assert_eq!(svc.validate(&token), Err(TokenError::ExpiredToken));
    }

    #[test]
    fn refresh_token_has_no_roles_or_email() {
        let (svc, clock) = service();
        let token = svc.issue_refresh_token("u1").unwrap();

        let claims = svc.claims(&token).unwrap();
        assert!(claims.contains(CLAIM_USER_ID));
        assert!(!claims.contains(CLAIM_ROLES));
        assert!(!claims.contains(CLAIM_EMAIL));
        assert_eq!(
            svc.get_claim(&token, CLAIM_ROLES),
            Err(TokenError::ClaimNotFound("roles".into()))
        );
        assert_eq!(
            svc.get_claim(&token, CLAIM_EMAIL),
            Err(TokenError::ClaimNotFound("email".into()))
        );
        assert_eq!(svc.get_claim(&token, CLAIM_USER_ID).unwrap(), "u1");

        clock.advance(Duration::days(29));
        assert_eq!(svc.validate(&token), Ok(()));
        clock.advance(Duration::days(1));
        assert_eq!(svc.validate(&token), Err(TokenError::ExpiredToken));
    }

    #[test]
    fn pair_contains_both_tokens() {
        let (svc, _) = service();
        let pair = svc
            .issue_access_and_refresh_token(&roles(), "u1", "a@b.com")
            .unwrap();
        assert_eq!(pair.token_type, "Bearer");
        assert_eq!(pair.expires_in, 86_400);
        assert_eq!(svc.get_roles(&pair.access_token, CLAIM_ROLES).unwrap(), roles());
        assert!(svc.get_claim(&pair.refresh_token, CLAIM_ROLES).is_err());
    }

    #[test]
    fn tampered_signature_never_verifies() {
        let (svc, _) = service();
        let token = svc.issue_access_token(&roles(), "u1", "a@b.com").unwrap();

        let (body, signature) = token.rsplit_once('.').unwrap();
        let mut chars: Vec<char> = signature.chars().collect();
        chars[0] = if chars[0] == 'A' { 'B' } else { 'A' };
        let tampered = format!("{body}.{}", chars.into_iter().collect::<String>());

        assert_eq!(
            svc.get_claim(&tampered, CLAIM_EMAIL),
            Err(TokenError::InvalidSignature)
        );
        assert!(matches!(
            svc.validate(&tampered),
            Err(TokenError::MalformedToken(_))
        ));
        assert_eq!(
            svc.get_roles(&tampered, CLAIM_ROLES),
            Err(TokenError::InvalidSignature)
        );
    }

    #[test]
    fn foreign_secret_is_rejected() {
        let (svc, _) = service();
        let other = TokenService::new(StaticSecretProvider::new("someone-else"));
        let token = other.issue_access_token(&roles(), "u1", "a@b.com").unwrap();
        assert_eq!(
            svc.get_claim(&token, CLAIM_EMAIL),
            Err(TokenError::InvalidSignature)
        );
    }

    #[test]
    fn non_hmac_headers_are_rejected_by_get_roles() {
        let (svc, _) = service();
        let token = svc.issue_access_token(&roles(), "u1", "a@b.com").unwrap();

        let rs256 = with_header(&token, &json!({"alg": "RS256", "typ": "JWT"}));
        assert_eq!(
            svc.get_roles(&rs256, CLAIM_ROLES),
            Err(TokenError::UnexpectedSigningMethod("RS256".into()))
        );

        let none = with_header(&token, &json!({"alg": "none", "typ": "JWT"}));
        let (unsigned, _) = none.rsplit_once('.').unwrap();
        assert_eq!(
            svc.get_roles(&format!("{unsigned}."), CLAIM_ROLES),
            Err(TokenError::UnexpectedSigningMethod("none".into()))
        );

        // The general claim path refuses it too, just less specifically.
        assert!(svc.get_claim(&rs256, CLAIM_EMAIL).is_err());
    }

    #[test]
    fn claim_types_are_enforced() {
        let (svc, _) = service();
        let token = svc.issue_access_token(&roles(), "u1", "a@b.com").unwrap();

        assert!(matches!(
            svc.get_claim(&token, CLAIM_EXPIRY),
            Err(TokenError::ClaimTypeMismatch { .. })
        ));
        assert!(matches!(
            svc.get_roles(&token, CLAIM_EMAIL),
            Err(TokenError::ClaimTypeMismatch { .. })
        ));
        assert_eq!(
            svc.get_roles(&token, "permissions"),
            Err(TokenError::ClaimNotFound("permissions".into()))
        );
    }

    #[test]
    fn missing_expiry_is_malformed() {
        let (svc, _) = service();
        let claims = ClaimSet::new().with(CLAIM_USER_ID, "u1");
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(matches!(svc.validate(&token), Err(TokenError::MalformedToken(_))));
    }

    #[test]
    fn garbage_is_malformed() {
        let (svc, _) = service();
        assert!(matches!(
            svc.get_claim("not-a-token", CLAIM_EMAIL),
            Err(TokenError::MalformedToken(_))
        ));
        assert!(matches!(
            svc.get_roles("!!!.???.###", CLAIM_ROLES),
            Err(TokenError::MalformedToken(_))
        ));
        assert!(matches!(svc.validate(""), Err(TokenError::MalformedToken(_))));
    }

    #[test]
    fn missing_secret_fails_issuance_and_verification() {
        let (svc, _) = service();
        let token = svc.issue_refresh_token("u1").unwrap();

        let unconfigured = TokenService::new(StaticSecretProvider::new(""));
        assert!(matches!(
            unconfigured.issue_access_token(&roles(), "u1", "a@b.com"),
            Err(TokenError::Signing(_))
        ));
        assert!(matches!(
            unconfigured.issue_password_reset_token("u1", "a@b.com"),
            Err(TokenError::Signing(_))
        ));
        assert_eq!(unconfigured.validate(&token), Err(TokenError::SecretUnavailable));
    }

    #[test]
    fn secret_rotation_applies_on_next_call() {
        let secret = Arc::new(RwLock::new("first".to_string()));
        let provider = {
            let secret = secret.clone();
            move || secret.read().ok().map(|s| s.clone())
        };
        let svc = TokenService::new(provider);

        let old = svc.issue_refresh_token("u1").unwrap();
        assert_eq!(svc.validate(&old), Ok(()));

        *secret.write().unwrap() = "second".to_string();
        assert!(matches!(svc.validate(&old), Err(TokenError::MalformedToken(_))));

        let new = svc.issue_refresh_token("u1").unwrap();
        assert_eq!(svc.validate(&new), Ok(()));
    }

    #[test]
    fn shared_across_threads() {
        let (svc, _) = service();
        let token = svc.issue_access_token(&roles(), "u1", "a@b.com").unwrap();

        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| {
                    assert_eq!(svc.get_roles(&token, CLAIM_ROLES).unwrap(), roles());
                });
            }
        });
    }
}
