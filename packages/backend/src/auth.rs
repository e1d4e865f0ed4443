use axum::http::{header, HeaderMap};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;

use crate::config::JwtConfig;

/// Header the web and terminal clients send the token in.
pub const AUTH_HEADER_NAME: &str = "x-auth-token";

type HmacSha256 = Hmac<Sha256>;

/// Caller identity resolved by the auth middleware.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing token")]
    MissingToken,
    #[error("invalid token")]
    InvalidToken,
    #[error("missing JWT_SECRET")]
    MissingSecret,
    #[error("invalid JWT_EXPIRES_IN")]
    InvalidExpiresIn,
    #[error("password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),
}

pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    if let Some(token) = headers
        .get(AUTH_HEADER_NAME)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
    {
        return Some(token.to_string());
    }

    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())?;

    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| value.to_string())
}

pub fn verify_token(jwt: &JwtConfig, token: &str) -> Result<AuthUser, AuthError> {
    let secret = jwt.secret.as_deref().ok_or(AuthError::MissingSecret)?;

    let mut parts = token.split('.');
    let header_b64 = parts.next().ok_or(AuthError::InvalidToken)?;
    let payload_b64 = parts.next().ok_or(AuthError::InvalidToken)?;
    let sig_b64 = parts.next().ok_or(AuthError::InvalidToken)?;
    if parts.next().is_some() {
        return Err(AuthError::InvalidToken);
    }

    let header_bytes = URL_SAFE_NO_PAD
        .decode(header_b64.as_bytes())
        .map_err(|_| AuthError::InvalidToken)?;
    let payload_bytes = URL_SAFE_NO_PAD
        .decode(payload_b64.as_bytes())
        .map_err(|_| AuthError::InvalidToken)?;
    let sig_bytes = URL_SAFE_NO_PAD
        .decode(sig_b64.as_bytes())
        .map_err(|_| AuthError::InvalidToken)?;

    let header_json: serde_json::Value =
        serde_json::from_slice(&header_bytes).map_err(|_| AuthError::InvalidToken)?;
    let alg = header_json
        .get("alg")
        .and_then(|value| value.as_str())
        .ok_or(AuthError::InvalidToken)?;
    if alg != "HS256" {
        return Err(AuthError::InvalidToken);
    }

    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).map_err(|_| AuthError::InvalidToken)?;
    mac.update(format!("{header_b64}.{payload_b64}").as_bytes());
    mac.verify_slice(&sig_bytes)
        .map_err(|_| AuthError::InvalidToken)?;

    let payload_json: serde_json::Value =
        serde_json::from_slice(&payload_bytes).map_err(|_| AuthError::InvalidToken)?;

    validate_registered_claims(&payload_json)?;

    let id = payload_json
        .get("id")
        .and_then(|value| value.as_str())
        .filter(|value| !value.is_empty())
        .ok_or(AuthError::InvalidToken)?
        .to_string();
    let email = payload_json
        .get("email")
        .and_then(|value| value.as_str())
        .unwrap_or_default()
        .to_string();

    Ok(AuthUser { id, email })
}

fn validate_registered_claims(payload: &serde_json::Value) -> Result<(), AuthError> {
    let now = Utc::now().timestamp();

    if let Some(exp) = payload.get("exp").and_then(|value| value.as_i64()) {
        if now >= exp {
            return Err(AuthError::InvalidToken);
        }
    }

    if let Some(nbf) = payload.get("nbf").and_then(|value| value.as_i64()) {
        if now < nbf {
            return Err(AuthError::InvalidToken);
        }
    }

    Ok(())
}

pub fn sign_token(jwt: &JwtConfig, user: &AuthUser) -> Result<(String, DateTime<Utc>), AuthError> {
    let secret = jwt.secret.as_deref().ok_or(AuthError::MissingSecret)?;
    let expires_in_ms = parse_expires_in_ms(&jwt.expires_in)?;

    let issued_at = Utc::now();
    let exp = issued_at
        .checked_add_signed(chrono::Duration::milliseconds(expires_in_ms))
        .ok_or(AuthError::InvalidExpiresIn)?;

    let payload_json = serde_json::json!({
        "id": user.id,
        "email": user.email,
        "iat": issued_at.timestamp(),
        "exp": exp.timestamp(),
    });

    let token = encode_hs256(secret, &payload_json)?;
    Ok((token, exp))
}

fn encode_hs256(secret: &str, payload: &serde_json::Value) -> Result<String, AuthError> {
    let header_json = serde_json::json!({
        "alg": "HS256",
        "typ": "JWT",
    });

    let header_b64 = URL_SAFE_NO_PAD
        .encode(serde_json::to_vec(&header_json).map_err(|_| AuthError::InvalidToken)?);
    let payload_b64 =
        URL_SAFE_NO_PAD.encode(serde_json::to_vec(payload).map_err(|_| AuthError::InvalidToken)?);
    let signing_input = format!("{header_b64}.{payload_b64}");

    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).map_err(|_| AuthError::InvalidToken)?;
    mac.update(signing_input.as_bytes());
    let sig_b64 = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

    Ok(format!("{signing_input}.{sig_b64}"))
}

pub fn parse_expires_in_ms(value: &str) -> Result<i64, AuthError> {
    let trimmed = value.trim();
    if trimmed.len() < 2 {
        return Err(AuthError::InvalidExpiresIn);
    }

    let (digits, unit) = trimmed.split_at(trimmed.len() - 1);

    let amount: i64 = digits.parse().map_err(|_| AuthError::InvalidExpiresIn)?;
    if amount <= 0 {
        return Err(AuthError::InvalidExpiresIn);
    }

    match unit {
        "s" => Ok(amount * 1000),
        "m" => Ok(amount * 60 * 1000),
        "h" => Ok(amount * 60 * 60 * 1000),
        "d" => Ok(amount * 24 * 60 * 60 * 1000),
        _ => Err(AuthError::InvalidExpiresIn),
    }
}

pub fn hash_password(password: &str, cost: u32) -> Result<String, AuthError> {
    Ok(bcrypt::hash(password, cost)?)
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn jwt() -> JwtConfig {
        JwtConfig {
            secret: Some("test-secret".to_string()),
            expires_in: "3h".to_string(),
        }
    }

    fn user() -> AuthUser {
        AuthUser {
            id: "user-1".to_string(),
            email: "a@example.com".to_string(),
        }
    }

    #[test]
    fn signed_token_verifies() {
        let (token, expires_at) = sign_token(&jwt(), &user()).unwrap();
        assert!(expires_at > Utc::now());
        assert_eq!(verify_token(&jwt(), &token).unwrap(), user());
    }

    #[test]
    fn token_from_other_secret_is_rejected() {
        let other = JwtConfig {
            secret: Some("other".to_string()),
            expires_in: "3h".to_string(),
        };
        let (token, _) = sign_token(&other, &user()).unwrap();
        assert!(matches!(
            verify_token(&jwt(), &token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn expired_token_is_rejected() {
        let payload = serde_json::json!({
            "id": "user-1",
            "email": "a@example.com",
            "exp": Utc::now().timestamp() - 10,
        });
        let token = encode_hs256("test-secret", &payload).unwrap();
        assert!(matches!(
            verify_token(&jwt(), &token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn malformed_token_is_rejected() {
        for token in ["", "abc", "a.b", "a.b.c.d", "!!.??.**"] {
            assert!(verify_token(&jwt(), token).is_err(), "{token}");
        }
    }

    #[test]
    fn missing_secret_is_reported() {
        let config = JwtConfig {
            secret: None,
            expires_in: "3h".to_string(),
        };
        assert!(matches!(
            sign_token(&config, &user()),
            Err(AuthError::MissingSecret)
        ));
    }

    #[test]
    fn expires_in_units() {
        assert_eq!(parse_expires_in_ms("30s").unwrap(), 30_000);
        assert_eq!(parse_expires_in_ms("3h").unwrap(), 10_800_000);
        assert_eq!(parse_expires_in_ms("1d").unwrap(), 86_400_000);
        assert!(parse_expires_in_ms("h").is_err());
        assert!(parse_expires_in_ms("0m").is_err());
        assert!(parse_expires_in_ms("5w").is_err());
    }

    #[test]
    fn token_read_from_custom_header_then_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer bearer-token"));
        assert_eq!(extract_token(&headers).as_deref(), Some("bearer-token"));

        headers.insert(AUTH_HEADER_NAME, HeaderValue::from_static("header-token"));
        assert_eq!(extract_token(&headers).as_deref(), Some("header-token"));

        assert_eq!(extract_token(&HeaderMap::new()), None);
    }

    #[test]
    fn password_hash_round_trip() {
        let hash = hash_password("hunter2", 4).unwrap();
        assert!(verify_password("hunter2", &hash));
        assert!(!verify_password("hunter3", &hash));
        assert!(!verify_password("hunter2", "not-a-hash"));
    }
}
