use crate::errors::SignError;
use crate::payload::Claims;
use crate::timespan;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde_json::Value;
use std::str::FromStr;
use tracing::debug;

pub const DEFAULT_ALGORITHM: &str = "HS256";
pub const DEFAULT_EXPIRES_IN: &str = "1h";

/// Options controlling the registered claims and the header of a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignOptions {
    /// Algorithm name as written by the user, e.g. `HS256` or `EdDSA`.
    pub algorithm: String,
    /// Timespan after which the token expires, relative to `iat`.
    pub expires_in: Option<String>,
    /// Timespan before which the token is not valid, relative to `iat`.
    pub not_before: Option<String>,
    pub audience: Option<String>,
    pub issuer: Option<String>,
    pub subject: Option<String>,
    pub jwt_id: Option<String>,
    /// `kid` header field.
    pub key_id: Option<String>,
    /// Leaves `iat` out of the token.
    pub no_timestamp: bool,
}

impl Default for SignOptions {
    fn default() -> Self {
        Self {
            algorithm: DEFAULT_ALGORITHM.to_string(),
            expires_in: Some(DEFAULT_EXPIRES_IN.to_string()),
            not_before: None,
            audience: None,
            issuer: None,
            subject: None,
            jwt_id: None,
            key_id: None,
            no_timestamp: false,
        }
    }
}

/// Signs the claims with the current time as the issue timestamp.
///
/// See [`sign_at`].
pub fn sign(claims: Claims, secret: &str, options: &SignOptions) -> Result<String, SignError> {
    sign_at(claims, secret, options, jsonwebtoken::get_current_timestamp())
}

/// Completes the registered claims then signs the token.
///
/// The issue timestamp is the payload's own `iat` when it is a non-zero
/// number, `now` otherwise. `exp` and `nbf` are resolved against it.
///
/// # Arguments
///
/// * `claims` - The merged payload and additional claims.
/// * `secret` - HMAC secret, or PEM encoded private key for asymmetric algorithms.
/// * `options` - Algorithm, registered claims and header options.
/// * `now` - Current UNIX time in seconds.
///
/// # Returns
///
/// * `Ok(String)` - The compact serialized token.
/// * `Err(SignError)` - The secret, algorithm, payload or options are unusable,
///   or the signing library rejected the key.
pub fn sign_at(
    mut claims: Claims,
    secret: &str,
    options: &SignOptions,
    now: u64,
) -> Result<String, SignError> {
    if secret.is_empty() {
        return Err(SignError::MissingSecret);
    }

    let algorithm = Algorithm::from_str(&options.algorithm)
        .map_err(|_| SignError::UnsupportedAlgorithm(options.algorithm.clone()))?;
    let key = encoding_key(algorithm, secret)?;

    apply_registered_claims(&mut claims, options, now)?;

    let mut header = Header::new(algorithm);
    header.kid = options.key_id.clone();

    debug!(?algorithm, claims = claims.len(), "Signing token");

    Ok(jsonwebtoken::encode(&header, &claims, &key)?)
}

fn encoding_key(algorithm: Algorithm, secret: &str) -> Result<EncodingKey, SignError> {
    let key = match algorithm {
        Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => {
            return Ok(EncodingKey::from_secret(secret.as_bytes()));
        }
        Algorithm::RS256
        | Algorithm::RS384
        | Algorithm::RS512
        | Algorithm::PS256
        | Algorithm::PS384
        | Algorithm::PS512 => EncodingKey::from_rsa_pem(secret.as_bytes()),
        Algorithm::ES256 | Algorithm::ES384 => EncodingKey::from_ec_pem(secret.as_bytes()),
        Algorithm::EdDSA => EncodingKey::from_ed_pem(secret.as_bytes()),
    };

    key.map_err(|source| SignError::InvalidKey {
        algorithm: format!("{algorithm:?}"),
        source,
    })
}

fn apply_registered_claims(
    claims: &mut Claims,
    options: &SignOptions,
    now: u64,
) -> Result<(), SignError> {
    for claim in ["iat", "exp", "nbf"] {
        if claims.get(claim).is_some_and(|value| !value.is_number()) {
            return Err(SignError::NonNumericClaim(claim));
        }
    }

    let conflicts = [
        ("expiresIn", "exp", options.expires_in.is_some()),
        ("notBefore", "nbf", options.not_before.is_some()),
        ("audience", "aud", options.audience.is_some()),
        ("issuer", "iss", options.issuer.is_some()),
        ("subject", "sub", options.subject.is_some()),
        ("jwtid", "jti", options.jwt_id.is_some()),
    ];
    for (option, claim, requested) in conflicts {
        if requested && claims.contains_key(claim) {
            return Err(SignError::ClaimConflict { option, claim });
        }
    }

    let payload_iat = claims
        .get("iat")
        .and_then(Value::as_f64)
        .filter(|iat| *iat != 0.0);
    let timestamp = payload_iat.unwrap_or(now as f64);

    if options.no_timestamp {
        claims.shift_remove("iat");
    } else if payload_iat.is_none() {
        claims.insert("iat".to_string(), Value::from(now));
    }

    if let Some(not_before) = &options.not_before {
        let nbf = resolve_timespan("notBefore", not_before, timestamp)?;
        claims.insert("nbf".to_string(), Value::from(nbf));
    }

    if let Some(expires_in) = &options.expires_in {
        let exp = resolve_timespan("expiresIn", expires_in, timestamp)?;
        claims.insert("exp".to_string(), Value::from(exp));
    }

    let string_claims = [
        ("aud", &options.audience),
        ("iss", &options.issuer),
        ("sub", &options.subject),
        ("jti", &options.jwt_id),
    ];
    for (claim, value) in string_claims {
        if let Some(value) = value {
            claims.insert(claim.to_string(), Value::from(value.as_str()));
        }
    }

    Ok(())
}

fn resolve_timespan(option: &'static str, value: &str, timestamp: f64) -> Result<i64, SignError> {
    timespan::resolve(value, timestamp).ok_or_else(|| SignError::InvalidTimespan {
        option,
        value: value.to_string(),
    })
}
