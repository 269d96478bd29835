use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use tracing::{debug, error};

use crate::domain::{
    authentication::entities::JwtClaim, common::AuthConfig,
    common::entities::app_errors::CoreError,
};

/// HS256 access tokens carrying the user's email as `sub`.
#[derive(Clone)]
pub struct JwtCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl JwtCodec {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            ttl: Duration::minutes(config.access_token_expire_minutes),
        }
    }

    pub fn issue(&self, subject: &str) -> Result<String, CoreError> {
        let now = Utc::now();
        let claims = JwtClaim {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            error!("Failed to encode access token: {}", e);
            CoreError::InternalServerError
        })
    }

    pub fn verify(&self, token: &str) -> Result<JwtClaim, CoreError> {
        decode::<JwtClaim>(token, &self.decoding_key, &Validation::new(Algorithm::HS256))
            .map(|data| data.claims)
            .map_err(|e| {
                debug!("Rejected access token: {}", e);
                CoreError::InvalidToken
            })
    }
}
