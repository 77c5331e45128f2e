//! Bearer access tokens: HS256-signed JWTs carrying the username as subject.
//!
//! Tokens are stateless. There is no revocation list, so a token stays valid
//! until `exp` even after the owner logs out.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// JWT claims embedded in every access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the username.
    pub sub: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier (UUID v4) for audit.
    pub jti: String,
}

/// Configuration for token issuance and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Access token lifetime in minutes.
    pub access_token_expiry_mins: i64,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token rejected: {0}")]
    Invalid(#[from] jsonwebtoken::errors::Error),

    #[error("token expired")]
    Expired,
}

/// Issue a token for `username` valid for the configured window from now.
pub fn generate_access_token(
    username: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    generate_access_token_at(username, config, chrono::Utc::now().timestamp())
}

pub fn generate_access_token_at(
    username: &str,
    config: &JwtConfig,
    now: i64,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = Claims {
        sub: username.to_string(),
        exp: now + config.access_token_expiry_mins * 60,
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate signature and expiry against the current instant.
pub fn validate_token(token: &str, config: &JwtConfig) -> Result<Claims, TokenError> {
    validate_token_at(token, config, chrono::Utc::now().timestamp())
}

/// Validate signature, then expiry against `now` with zero leeway:
/// a token is accepted only while `now < exp`.
pub fn validate_token_at(token: &str, config: &JwtConfig, now: i64) -> Result<Claims, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    // Expiry is checked below so the boundary is exact and testable.
    validation.validate_exp = false;
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp", "sub"]);

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;

    if now >= token_data.claims.exp {
        return Err(TokenError::Expired);
    }
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 30,
        }
    }

    #[test]
    fn test_generate_and_validate_access_token() {
        let config = test_config();
        let token =
            generate_access_token("alice", &config).expect("token generation should succeed");

        let claims = validate_token(&token, &config).expect("token validation should succeed");
        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.exp - claims.iat, 30 * 60);
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn test_expiry_boundary_is_exclusive() {
        let config = test_config();
        let issued = 1_700_000_000;
        let token = generate_access_token_at("alice", &config, issued).unwrap();
        let exp = issued + 30 * 60;

        assert!(validate_token_at(&token, &config, exp - 1).is_ok());
        assert!(matches!(
            validate_token_at(&token, &config, exp),
            Err(TokenError::Expired)
        ));
        assert!(matches!(
            validate_token_at(&token, &config, exp + 1),
            Err(TokenError::Expired)
        ));
    }

    #[test]
    fn test_different_secrets_fail() {
        let config_a = JwtConfig {
            secret: "secret-alpha".to_string(),
            access_token_expiry_mins: 30,
        };
        let config_b = JwtConfig {
            secret: "secret-bravo".to_string(),
            access_token_expiry_mins: 30,
        };

        let token = generate_access_token("alice", &config_a).unwrap();
        assert!(matches!(
            validate_token(&token, &config_b),
            Err(TokenError::Invalid(_))
        ));
    }

    #[test]
    fn test_tampered_payload_fails() {
        let config = test_config();
        let alice = generate_access_token("alice", &config).unwrap();
        let mallory = generate_access_token("mallory", &config).unwrap();

        // Splice mallory's payload onto alice's signature.
        let a: Vec<&str> = alice.split('.').collect();
        let m: Vec<&str> = mallory.split('.').collect();
        let forged = format!("{}.{}.{}", a[0], m[1], a[2]);

        assert!(validate_token(&forged, &config).is_err());
    }

    #[test]
    fn test_tampered_signature_fails() {
        let config = test_config();
        let token = generate_access_token("alice", &config).unwrap();
        let (body, sig) = token.rsplit_once('.').unwrap();
        let flipped = if sig.starts_with('A') { "B" } else { "A" };
        let forged = format!("{body}.{flipped}{}", &sig[1..]);

        assert!(validate_token(&forged, &config).is_err());
    }

    #[test]
    fn test_garbage_token_fails() {
        assert!(validate_token("not-a-jwt", &test_config()).is_err());
    }
}
