// OAuth2 client-credentials token cache

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::{ClientConfig, Credentials, Environment};
use crate::error::{status_message, AuthenticationError};
use crate::transport::Transport;
use crate::vendor::{OAuthErrorBody, TokenResponse};

#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    value: String,
    expires_at: DateTime<Utc>,
}

impl AccessToken {
    pub fn new(value: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            value: value.into(),
            expires_at,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("value", &"***")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenState {
    NoToken,
    Valid,
    Expired,
}

pub struct TokenManager<T: Transport> {
    credentials: Credentials,
    environment: Environment,
    token_url: String,
    transport: Arc<T>,
    token: RwLock<Option<AccessToken>>,
}

impl<T: Transport> TokenManager<T> {
    pub fn new(config: &ClientConfig, transport: Arc<T>) -> Self {
        Self {
            credentials: config.credentials.clone(),
            environment: config.environment,
            token_url: config.token_url(),
            transport,
            token: RwLock::new(None),
        }
    }

    pub fn current_state(&self) -> TokenState {
        self.state_at(Utc::now())
    }

    pub fn state_at(&self, now: DateTime<Utc>) -> TokenState {
        match self.token.read().as_ref() {
            None => TokenState::NoToken,
            Some(token) if token.is_valid_at(now) => TokenState::Valid,
            Some(_) => TokenState::Expired,
        }
    }

    pub fn cached_token(&self) -> Option<AccessToken> {
        self.token.read().clone()
    }

    /// Returns a bearer token that is valid right now, exchanging the
    /// credentials for a new one when none is cached or the cached one expired.
    pub async fn ensure_valid_token(&self) -> Result<String, AuthenticationError> {
        let now = Utc::now();
        // Read guard is released before any await
        let cached = self
            .token
            .read()
            .as_ref()
            .filter(|token| token.is_valid_at(now))
            .map(|token| token.value.clone());

        match cached {
            Some(value) => {
                debug!("Reusing cached access token");
                Ok(value)
            }
            None => self.refresh().await,
        }
    }

    /// Unconditionally exchange the credentials for a new token.
    pub async fn refresh(&self) -> Result<String, AuthenticationError> {
        info!(
            environment = %self.environment,
            url = %self.token_url,
            client_id = %self.credentials.masked_client_id(),
            "Requesting access token"
        );

        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", self.credentials.client_id()),
            ("client_secret", self.credentials.client_secret()),
        ];

        let response = self
            .transport
            .post_form(&self.token_url, &form)
            .await
            .map_err(|e| {
                warn!(error = %e, "Authentication request failed");
                AuthenticationError::Network(e.0)
            })?;

        if !response.is_success() {
            let message = serde_json::from_str::<OAuthErrorBody>(&response.body)
                .ok()
                .and_then(|body| body.error_description)
                .unwrap_or_else(|| status_message(response.status));
            warn!(status = response.status, body = %response.body, "Authentication failed");
            return Err(AuthenticationError::Rejected {
                status_code: response.status,
                message,
            });
        }

        let parsed: TokenResponse = serde_json::from_str(&response.body)
            .map_err(|e| AuthenticationError::MalformedResponse(e.to_string()))?;

        let lifetime = Duration::try_seconds(parsed.expires_in.max(0)).ok_or_else(|| {
            AuthenticationError::MalformedResponse(format!(
                "expires_in out of range: {}",
                parsed.expires_in
            ))
        })?;

        let expires_at = Utc::now().checked_add_signed(lifetime).ok_or_else(|| {
            AuthenticationError::MalformedResponse(format!(
                "expires_in out of range: {}",
                parsed.expires_in
            ))
        })?;

        let token = AccessToken::new(parsed.access_token, expires_at);
        let value = token.value.clone();
        info!(expires_at = %token.expires_at, "Access token received");

        // Replaced wholesale; a concurrent refresh may overwrite this one
        *self.token.write() = Some(token);
        Ok(value)
    }
}
