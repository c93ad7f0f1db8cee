// src/identity.rs
//! HTTP client for the external email+password identity provider

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

const SIGN_UP_ENDPOINT: &str = "/accounts:signUp";
const SIGN_IN_ENDPOINT: &str = "/accounts:signInWithPassword";

const DEFAULT_TIMEOUT_SECS: u64 = 20;

/// The one failure message shown for any rejected sign-in. Wrong password
/// and unknown account are deliberately indistinguishable to the user.
pub const SIGN_IN_REJECTED_MESSAGE: &str = "Email or Password is incorrect";

/// A provider-issued session: the opaque account id plus the ID token the
/// client presents on authenticated requests.
#[derive(Debug, Clone)]
pub struct AccountSession {
    pub account_id: String,
    pub id_token: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenResponse {
    local_id: String,
    id_token: String,
}

pub struct IdentityClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl IdentityClient {
    /// Create a new client. Requests carry a timeout so a slow provider
    /// call fails instead of leaving the caller waiting indefinitely.
    pub fn new(base_url: String, api_key: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    /// Create a new email+password account and return its session.
    /// The caller persists the Employer record keyed by the account id.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<AccountSession> {
        let session = self.token_request(SIGN_UP_ENDPOINT, email, password).await?;
        info!("Account created for {}", email);
        Ok(session)
    }

    /// Exchange email+password for a session. Callers surface any failure
    /// with [`SIGN_IN_REJECTED_MESSAGE`] regardless of the underlying cause.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AccountSession> {
        self.token_request(SIGN_IN_ENDPOINT, email, password).await
    }

    async fn token_request(
        &self,
        endpoint: &str,
        email: &str,
        password: &str,
    ) -> Result<AccountSession> {
        let url = format!("{}{}", self.base_url, endpoint);

        let payload = serde_json::json!({
            "email": email,
            "password": password,
            "returnSecureToken": true,
        });

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&payload)
            .send()
            .await
            .context("Identity provider request failed")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            anyhow::bail!(
                "Identity provider returned status {}: {}",
                status,
                error_text
            );
        }

        let token: TokenResponse = response
            .json()
            .await
            .context("Failed to parse identity provider response")?;

        Ok(AccountSession {
            account_id: token.local_id,
            id_token: token.id_token,
        })
    }
}
