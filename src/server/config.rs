//! HTTP server configuration object and helpers.

use std::env;
use std::net::SocketAddr;

use url::Url;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_ASSET_BASE_URL: &str = "https://assets.example.com/avatars";

/// Which store adapter backs the avatar port.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreBackend {
    /// Process-local map. The default; state is lost on restart.
    Memory,
    /// Delegate to an upstream avatar service over HTTP.
    Remote { base_url: Url },
}

/// Builder-style configuration for creating the HTTP server.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) backend: StoreBackend,
    pub(crate) asset_base_url: String,
}

impl ServerConfig {
    /// Construct a configuration binding the given address with the
    /// in-memory backend and default asset base.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            backend: StoreBackend::Memory,
            asset_base_url: DEFAULT_ASSET_BASE_URL.to_owned(),
        }
    }

    /// Select the store backend.
    #[must_use]
    pub fn with_backend(mut self, backend: StoreBackend) -> Self {
        self.backend = backend;
        self
    }

    /// Override the base URL used to derive preset asset URLs.
    #[must_use]
    pub fn with_asset_base_url(mut self, asset_base_url: impl Into<String>) -> Self {
        self.asset_base_url = asset_base_url.into();
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// Build the configuration from the process environment.
    ///
    /// Reads `PORT` (default 5000, bound on all interfaces),
    /// `AVATAR_STORE_BACKEND` (`memory` or `remote`), `AVATAR_API_BASE_URL`
    /// (required for the remote backend), and `AVATAR_ASSET_BASE_URL`.
    ///
    /// # Errors
    /// Returns [`std::io::Error`] when a variable is present but malformed,
    /// or when the remote backend is selected without a base URL.
    pub fn from_env() -> std::io::Result<Self> {
        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|e| std::io::Error::other(format!("invalid PORT {raw:?}: {e}")))?,
            Err(_) => DEFAULT_PORT,
        };
        let backend = parse_backend(
            env::var("AVATAR_STORE_BACKEND").ok().as_deref(),
            env::var("AVATAR_API_BASE_URL").ok().as_deref(),
        )
        .map_err(std::io::Error::other)?;
        let asset_base_url =
            env::var("AVATAR_ASSET_BASE_URL").unwrap_or_else(|_| DEFAULT_ASSET_BASE_URL.to_owned());

        Ok(Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], port)),
            backend,
            asset_base_url,
        })
    }
}

/// Resolve the backend selection from its two environment inputs.
fn parse_backend(
    backend: Option<&str>,
    api_base_url: Option<&str>,
) -> Result<StoreBackend, String> {
    match backend {
        None | Some("memory") => Ok(StoreBackend::Memory),
        Some("remote") => {
            let raw = api_base_url
                .ok_or_else(|| "AVATAR_API_BASE_URL is required for the remote backend".to_owned())?;
            let base_url = Url::parse(raw)
                .map_err(|e| format!("invalid AVATAR_API_BASE_URL {raw:?}: {e}"))?;
            Ok(StoreBackend::Remote { base_url })
        }
        Some(other) => Err(format!(
            "unknown AVATAR_STORE_BACKEND {other:?}; expected \"memory\" or \"remote\""
        )),
    }
}
