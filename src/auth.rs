//! Bearer token authentication.
//!
//! Tokens are JWTs signed with a shared secret. Only the HMAC family
//! (HS256, HS384, HS512) is accepted; a token declaring any other algorithm is
//! rejected before its signature is looked at. Tokens must carry an `exp`
//! claim.
//!
//! The middleware keeps no state between requests and passes accepted
//! requests through untouched.

use std::time::Duration;

use axum::{
    Json,
    extract::{Request, State},
    http::{HeaderValue, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, decode_header, encode,
    errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ErrorBody;

const HMAC_FAMILY: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("authorization header is required")]
    MissingHeader,

    #[error("authorization header must be `Bearer <token>`")]
    InvalidFormat,

    #[error("token algorithm {0:?} is not accepted")]
    UnsupportedAlgorithm(Algorithm),

    #[error("token signature is invalid")]
    InvalidSignature,

    #[error("token has expired")]
    Expired,

    #[error("token is malformed")]
    Malformed,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match &self {
            AuthError::InvalidSignature | AuthError::UnsupportedAlgorithm(_) => {
                warn!(reason = %self, "rejected bearer token");
            }
            _ => debug!(reason = %self, "rejected request"),
        }

        let mut resp =
            (StatusCode::UNAUTHORIZED, Json(ErrorBody::new("unauthorized", self.to_string())))
                .into_response();
        resp.headers_mut().insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        resp
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Issues and verifies HMAC-signed bearer tokens for one shared secret.
#[derive(Clone)]
pub struct TokenAuth {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenAuth {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        let secret = secret.as_ref();
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
        }
    }

    /// Mints an HS256 token for `subject` valid for `ttl`.
    pub fn issue(&self, subject: &str, ttl: Duration) -> Result<String, AuthError> {
        let now = jiff::Timestamp::now().as_second();
        let ttl = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);
        let claims = Claims { sub: subject.to_string(), iat: now, exp: now.saturating_add(ttl) };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|_| AuthError::Malformed)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let header = decode_header(token).map_err(|_| AuthError::Malformed)?;
        if !HMAC_FAMILY.contains(&header.alg) {
            return Err(AuthError::UnsupportedAlgorithm(header.alg));
        }

        let mut validation = Validation::new(header.alg);
        validation.algorithms = HMAC_FAMILY.to_vec();
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::Expired,
                ErrorKind::InvalidSignature => AuthError::InvalidSignature,
                ErrorKind::InvalidAlgorithm => AuthError::UnsupportedAlgorithm(header.alg),
                _ => AuthError::Malformed,
            }
        })?;

        Ok(data.claims)
    }
}

/// Extracts the token from an `Authorization` header value.
pub fn bearer_token(value: Option<&HeaderValue>) -> Result<&str, AuthError> {
    let value = value.ok_or(AuthError::MissingHeader)?;
    let value = value.to_str().map_err(|_| AuthError::InvalidFormat)?;
    let token = value.strip_prefix("Bearer ").ok_or(AuthError::InvalidFormat)?.trim();
    if token.is_empty() {
        return Err(AuthError::InvalidFormat);
    }
    Ok(token)
}

/// Middleware guarding routes behind a valid bearer token.
pub async fn require_bearer(
    State(auth): State<TokenAuth>,
    req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let token = bearer_token(req.headers().get(header::AUTHORIZATION))?;
    let claims = auth.verify(token)?;
    debug!(sub = %claims.sub, "bearer token accepted");
    Ok(next.run(req).await)
}
