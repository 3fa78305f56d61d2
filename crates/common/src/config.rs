use std::fmt;
use std::net::SocketAddr;

/// Default root of the Quidax REST API.
pub const DEFAULT_QUIDAX_BASE_URL: &str = "https://app.quidax.io/api/v1";

/// Default inbound listener address.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Global application configuration loaded once at startup.
#[derive(Clone)]
pub struct AppConfig {
    /// Bearer credential for server-to-server calls to Quidax
    pub quidax_secret_key: String,

    /// Quidax API root, without a trailing slash
    pub quidax_base_url: String,

    /// Address the API server listens on
    pub bind_addr: SocketAddr,
}

impl AppConfig {
    /// Load configuration from environment variables (and `.env`, if present).
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let quidax_secret_key = lookup("QUIDAX_SECRET_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                anyhow::anyhow!("QUIDAX_SECRET_KEY environment variable is required")
            })?;

        let quidax_base_url = lookup("QUIDAX_BASE_URL")
            .unwrap_or_else(|| DEFAULT_QUIDAX_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let bind_addr = lookup("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .map_err(|_| anyhow::anyhow!("BIND_ADDR must be a valid socket address"))?;

        Ok(Self {
            quidax_secret_key,
            quidax_base_url,
            bind_addr,
        })
    }
}

// Hand-written so the secret never reaches logs.
impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("quidax_secret_key", &"<redacted>")
            .field("quidax_base_url", &self.quidax_base_url)
            .field("bind_addr", &self.bind_addr)
            .finish()
    }
}
