// Client configuration: credentials and target environment

use crate::error::ClientError;
use std::fmt;

pub const PRODUCTION_BASE_URL: &str = "https://api.amadeus.com";
pub const TEST_BASE_URL: &str = "https://test.api.amadeus.com";

const MASKED_PREFIX_LEN: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    Test,
    #[default]
    Production,
}

impl Environment {
    pub fn from_test_flag(is_test: bool) -> Self {
        if is_test {
            Environment::Test
        } else {
            Environment::Production
        }
    }

    pub fn base_url(&self) -> &'static str {
        match self {
            Environment::Test => TEST_BASE_URL,
            Environment::Production => PRODUCTION_BASE_URL,
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Test => write!(f, "TEST"),
            Environment::Production => write!(f, "PRODUCTION"),
        }
    }
}

/// API key pair issued by the vendor. Immutable once built.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    client_id: String,
    client_secret: String,
}

impl Credentials {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Result<Self, ClientError> {
        let client_id = client_id.into();
        let client_secret = client_secret.into();

        if client_id.trim().is_empty() {
            return Err(ClientError::ConfigError("client id is empty".to_string()));
        }
        if client_secret.trim().is_empty() {
            return Err(ClientError::ConfigError(
                "client secret is empty".to_string(),
            ));
        }

        Ok(Self {
            client_id,
            client_secret,
        })
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    /// First few characters of the client id, safe to log.
    pub fn masked_client_id(&self) -> String {
        let prefix: String = self.client_id.chars().take(MASKED_PREFIX_LEN).collect();
        format!("{}...", prefix)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.masked_client_id())
            .field("client_secret", &"***")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub credentials: Credentials,
    pub environment: Environment,
    pub base_url: String,
    pub timeout_ms: u64,
}

impl ClientConfig {
    pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

    pub fn new(credentials: Credentials, environment: Environment) -> Self {
        Self {
            credentials,
            environment,
            base_url: environment.base_url().to_string(),
            timeout_ms: Self::DEFAULT_TIMEOUT_MS,
        }
    }

    // Point the client at a different host (proxies, local stubs)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn token_url(&self) -> String {
        format!("{}/v1/security/oauth2/token", self.base_url)
    }

    pub fn flight_offers_url(&self) -> String {
        format!("{}/v2/shopping/flight-offers", self.base_url)
    }
}
