use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config;
use crate::database::models::User;
use crate::database::ModelError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub username: String,
    #[serde(rename = "isAdmin")]
    pub is_admin: bool,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(username: String, is_admin: bool) -> Self {
        let now = Utc::now();
        let expiry_hours = config::config().security.jwt_expiry_hours;
        let exp = (now + Duration::hours(expiry_hours as i64)).timestamp();

        Self {
            username,
            is_admin,
            exp,
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("JWT generation error: {0}")]
    TokenGeneration(String),
    #[error("Invalid JWT token: {0}")]
    InvalidToken(String),
    #[error("Invalid JWT secret")]
    InvalidSecret,
}

fn secret() -> Result<&'static [u8], JwtError> {
    let secret = &config::config().security.jwt_secret;
    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }
    Ok(secret.as_bytes())
}

/// Signed token carrying the user's name and admin flag.
pub fn create_token(user: &User) -> Result<String, JwtError> {
    let claims = Claims::new(user.username.clone(), user.is_admin);
    encode(&Header::default(), &claims, &EncodingKey::from_secret(secret()?))
        .map_err(|e| JwtError::TokenGeneration(e.to_string()))
}

pub fn decode_token(token: &str) -> Result<Claims, JwtError> {
    let data = decode::<Claims>(token, &DecodingKey::from_secret(secret()?), &Validation::default())
        .map_err(|e| JwtError::InvalidToken(e.to_string()))?;
    Ok(data.claims)
}

/// Hashing runs on the blocking thread pool.
pub async fn hash_password(password: String) -> Result<String, ModelError> {
    let cost = config::config().security.bcrypt_work_factor;
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| ModelError::Internal(e.to_string()))?
        .map_err(|e| ModelError::Internal(e.to_string()))
}

pub async fn verify_password(password: String, hash: String) -> Result<bool, ModelError> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| ModelError::Internal(e.to_string()))?
        .map_err(|e| ModelError::Internal(e.to_string()))
}
