use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::ExposeSecret;
use uuid::Uuid;

use crate::config::settings::JwtSettings;
use crate::middleware::auth::Claims;
use crate::models::user::UserRole;

/// Issue an HS256 token for a user, valid for the configured number of hours
pub fn generate_token(
    jwt_settings: &JwtSettings,
    user_id: Uuid,
    email: &str,
    role: UserRole,
) -> Result<String, jsonwebtoken::errors::Error> {
    let expires_at = Utc::now() + Duration::hours(jwt_settings.expiration_hours);

    let claims = Claims {
        sub: user_id.to_string(),
        email: email.to_string(),
        role,
        exp: expires_at.timestamp() as usize,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(jwt_settings.secret.expose_secret().as_bytes()),
    )
}

pub fn decode_token(jwt_settings: &JwtSettings, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_settings.secret.expose_secret().as_bytes()),
        &Validation::new(Algorithm::HS256),
    )?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_round_trip_keeps_identity() {
        let settings = JwtSettings::new("test-secret".to_string(), 1);
        let user_id = Uuid::new_v4();
        let token = generate_token(&settings, user_id, "fan@example.com", UserRole::Admin).unwrap();

        let claims = decode_token(&settings, &token).unwrap();
        assert_eq!(claims.user_id(), Some(user_id));
        assert_eq!(claims.email, "fan@example.com");
        assert!(claims.is_admin());
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let issuer = JwtSettings::new("one".to_string(), 1);
        let verifier = JwtSettings::new("two".to_string(), 1);
        let token = generate_token(&issuer, Uuid::new_v4(), "fan@example.com", UserRole::User).unwrap();
        assert!(decode_token(&verifier, &token).is_err());
    }
}
