// src/auth.rs
use crate::database::{DatabaseConfig, EmployerRepository};
use crate::types::Employer;
use anyhow::Result;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use rocket::http::Status;
use rocket::request::{FromRequest, Outcome};
use rocket::{Request, State};
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{error, info, warn};

#[derive(Debug, Deserialize)]
pub struct Claims {
    pub aud: String, // identity project id
    pub iss: String, // token issuer
    pub sub: String, // account id
    pub email: String,
    pub exp: usize,
    pub iat: usize,
}

pub struct AuthConfig {
    pub project_id: String,
    pub public_keys: HashMap<String, String>, // kid -> PEM public key
}

impl AuthConfig {
    pub fn new(project_id: String) -> Self {
        Self {
            project_id,
            public_keys: HashMap::new(),
        }
    }

    /// Fetch the provider's current public keys for ID token verification
    pub async fn update_public_keys(&mut self) -> Result<()> {
        let url = "https://www.googleapis.com/robot/v1/metadata/x509/securetoken@system.gserviceaccount.com";

        let response = reqwest::get(url).await?;
        let keys: HashMap<String, String> = response.json().await?;

        self.public_keys = keys;
        info!("Updated identity provider public keys");

        Ok(())
    }
}

/// The employer behind an authenticated request: the verified token claims
/// resolved to the registered Employer row.
pub struct AuthenticatedEmployer {
    pub account_id: String,
    pub email: String,
    pub employer: Employer,
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for AuthenticatedEmployer {
    type Error = AuthError;

    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let auth_config = match req.guard::<&State<AuthConfig>>().await {
            Outcome::Success(config) => config,
            Outcome::Error((status, _)) => {
                return Outcome::Error((status, AuthError::StoreError))
            }
            Outcome::Forward(f) => return Outcome::Forward(f),
        };

        let db_config = match req.guard::<&State<DatabaseConfig>>().await {
            Outcome::Success(config) => config,
            Outcome::Error((status, _)) => {
                return Outcome::Error((status, AuthError::StoreError))
            }
            Outcome::Forward(f) => return Outcome::Forward(f),
        };

        // Extract Authorization header
        let token = match req.headers().get_one("Authorization") {
            Some(header) if header.starts_with("Bearer ") => &header[7..],
            Some(_) => {
                warn!("Invalid Authorization header format");
                return Outcome::Error((Status::Unauthorized, AuthError::InvalidToken));
            }
            None => {
                warn!("Missing Authorization header");
                return Outcome::Error((Status::Unauthorized, AuthError::MissingToken));
            }
        };

        let claims = match verify_id_token(token, auth_config) {
            Ok(claims) => claims,
            Err(e) => {
                error!("Token verification failed: {}", e);
                return Outcome::Error((Status::Unauthorized, AuthError::TokenVerificationFailed));
            }
        };

        let pool = match db_config.pool() {
            Ok(pool) => pool,
            Err(e) => {
                error!("Database connection failed: {}", e);
                return Outcome::Error((Status::InternalServerError, AuthError::StoreError));
            }
        };

        let employer = match EmployerRepository::new(pool).find_by_id(&claims.sub).await {
            Ok(Some(employer)) => employer,
            Ok(None) => {
                warn!("No employer registered for account: {}", claims.sub);
                return Outcome::Error((Status::Unauthorized, AuthError::NotRegistered));
            }
            Err(e) => {
                error!("Failed to load employer {}: {}", claims.sub, e);
                return Outcome::Error((Status::InternalServerError, AuthError::StoreError));
            }
        };

        info!(
            "Employer {} authenticated ({})",
            employer.company_name, claims.email
        );

        Outcome::Success(AuthenticatedEmployer {
            account_id: claims.sub,
            email: claims.email,
            employer,
        })
    }
}

#[derive(Debug)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
    TokenVerificationFailed,
    NotRegistered,
    StoreError,
}

impl AuthError {
    pub fn message(&self) -> &'static str {
        match self {
            AuthError::MissingToken => "Authorization token required",
            AuthError::InvalidToken => "Invalid authorization token format",
            AuthError::TokenVerificationFailed => "Token verification failed",
            AuthError::NotRegistered => "No employer account registered for this login",
            AuthError::StoreError => "Store error occurred",
        }
    }
}

fn verify_id_token(token: &str, auth_config: &AuthConfig) -> Result<Claims> {
    // Decode header to get the key ID
    let header = jsonwebtoken::decode_header(token)?;
    let kid = header
        .kid
        .ok_or_else(|| anyhow::anyhow!("Missing kid in token header"))?;

    let public_key = auth_config
        .public_keys
        .get(&kid)
        .ok_or_else(|| anyhow::anyhow!("Unknown key ID: {}", kid))?;

    let mut validation = Validation::new(Algorithm::RS256);
    validation.set_audience(&[&auth_config.project_id]);
    validation.set_issuer(&[format!(
        "https://securetoken.google.com/{}",
        auth_config.project_id
    )]);

    let decoding_key = DecodingKey::from_rsa_pem(public_key.as_bytes())?;
    let token_data = decode::<Claims>(token, &decoding_key, &validation)?;

    Ok(token_data.claims)
}

// Optional auth guard that doesn't fail if no auth is provided
pub struct OptionalAuth {
    pub employer: Option<AuthenticatedEmployer>,
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for OptionalAuth {
    type Error = ();

    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        match AuthenticatedEmployer::from_request(req).await {
            Outcome::Success(auth) => Outcome::Success(OptionalAuth {
                employer: Some(auth),
            }),
            _ => Outcome::Success(OptionalAuth { employer: None }),
        }
    }
}
