use crate::payload::{PayloadSource, build_claims};
use crate::signer::{SignOptions, sign};
use tracing::debug;

pub mod errors;
pub mod payload;
pub mod signer;
pub mod timespan;

/// Everything needed to produce one token.
pub struct TokenRequest {
    /// Base payload, inline or from a file.
    pub payload: PayloadSource,
    /// JSON object merged over the payload.
    pub claims: String,
    /// HMAC secret or PEM encoded private key.
    pub secret: String,
    pub options: SignOptions,
}

/// Builds the claims of the request and signs them.
///
/// # Errors
///
/// * Payload or claims errors, see [`payload::load_payload`] and [`payload::merge_claims`].
/// * `GenJwtError::Sign` - The token could not be signed, see [`signer::sign_at`].
pub fn generate_token(request: &TokenRequest) -> errors::Result<String> {
    let claims = build_claims(&request.payload, &request.claims)?;
    debug!(claims = claims.len(), "Claims assembled");
    Ok(sign(claims, &request.secret, &request.options)?)
}
