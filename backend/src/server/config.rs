//! Server configuration sourced from the environment.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

const MONGODB_URI_VAR: &str = "MONGODB_URI";
const PORT_VAR: &str = "PORT";

/// Configuration failures reported before the server starts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// One or more required environment variables are absent.
    #[error("missing required environment variables: {}", names.join(", "))]
    MissingVariables {
        /// The absent variable names.
        names: Vec<String>,
    },
    /// `PORT` is present but not a TCP port number.
    #[error("invalid PORT value: {value}")]
    InvalidPort {
        /// The rejected value.
        value: String,
    },
}

/// Validated runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// MongoDB connection string.
    pub mongodb_uri: String,
    /// Address the HTTP server binds to.
    pub bind_addr: SocketAddr,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Read configuration through a lookup function.
    ///
    /// Every missing variable is reported at once, so a misconfigured
    /// deployment fails with one complete message rather than one variable
    /// per restart.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mongodb_uri = lookup(MONGODB_URI_VAR).filter(|value| !value.trim().is_empty());
        let port_value = lookup(PORT_VAR).filter(|value| !value.trim().is_empty());

        match (mongodb_uri, port_value) {
            (Some(mongodb_uri), Some(port_value)) => {
                let port: u16 = port_value
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidPort { value: port_value })?;
                Ok(Self {
                    mongodb_uri,
                    bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), port),
                })
            }
            (mongodb_uri, port_value) => {
                let mut names = Vec::new();
                if mongodb_uri.is_none() {
                    names.push(MONGODB_URI_VAR.to_owned());
                }
                if port_value.is_none() {
                    names.push(PORT_VAR.to_owned());
                }
                Err(ConfigError::MissingVariables { names })
            }
        }
    }
}
