use crate::cli::Args;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid server URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("server URL '{0}' cannot be used as a base for endpoints")]
    NotABase(String),
}

/// Fully resolved endpoint URLs for one backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub intro: Url,
    pub chat: Url,
    pub reset: Url,
    pub history: Url,
    pub health: Url,
}

impl Endpoints {
    /// Resolves the API routes under `api_prefix` and the health route at the server root.
    pub fn resolve(server_url: &str, api_prefix: &str) -> Result<Self, ConfigError> {
        let mut server = Url::parse(server_url)?;
        if server.cannot_be_a_base() {
            return Err(ConfigError::NotABase(server_url.to_string()));
        }
        if !server.path().ends_with('/') {
            let path = format!("{}/", server.path());
            server.set_path(&path);
        }

        let prefix = api_prefix.trim_matches('/');
        let api_route = |name: &str| {
            if prefix.is_empty() {
                server.join(name)
            } else {
                server.join(&format!("{}/{}", prefix, name))
            }
        };

        Ok(Self {
            intro: api_route("intro")?,
            chat: api_route("chat")?,
            reset: api_route("reset")?,
            history: api_route("history")?,
            health: server.join("health")?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct WidgetConfig {
    pub endpoints: Endpoints,
    pub time_format: String,
    pub check_health: bool,
}

impl WidgetConfig {
    pub fn from_args(args: &Args) -> Result<Self, ConfigError> {
        Ok(Self {
            endpoints: Endpoints::resolve(&args.server_url, &args.api_prefix)?,
            time_format: args.time_format.clone(),
            check_health: args.check_health,
        })
    }
}
