use crate::models::auth_model::Claims;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

pub struct JwtUtils;

impl JwtUtils {
    /// Signs an access token for `user_id`. Returns the token and its expiry (unix seconds).
    pub fn generate_jwt(
        user_id: Uuid,
        secret: &str,
        expires_in_minutes: i64,
    ) -> Result<(String, usize), jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let expire = now + Duration::minutes(expires_in_minutes);
        let claims = Claims {
            sub: user_id,
            exp: expire.timestamp() as usize,
            iat: now.timestamp() as usize,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )?;
        Ok((token, claims.exp))
    }

    /// Validate a JWT token and return the token data
    pub fn validate_jwt(
        token: &str,
        secret: &str,
    ) -> Result<jsonwebtoken::TokenData<Claims>, jsonwebtoken::errors::Error> {
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());
        let mut validation = Validation::default();
        validation.validate_exp = true;

        decode::<Claims>(token, &decoding_key, &validation)
    }
}
