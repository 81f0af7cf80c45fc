//! Startup configuration.
//!
//! Everything here is read once, before the listener is bound. Per-request
//! behaviour is controlled by query parameters, not by this module.

use crate::error::StartupError;
use clap::Parser;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Environment variable holding the listen port.
pub const PORT_ENV: &str = "PORT";
/// Port used when neither `--port` nor `PORT` is set.
pub const DEFAULT_PORT: u16 = 8080;
/// Requests handled at once unless `--max-clients` says otherwise.
pub const DEFAULT_MAX_CLIENTS: u32 = 1;

/// Command line of the `delay-server` binary.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "delay-server",
    version,
    about = "HTTP endpoint that injects random latency and failures"
)]
pub struct Cli {
    /// Port to listen on; takes precedence over the PORT environment variable
    #[arg(long)]
    pub port: Option<u16>,

    /// Address to bind
    #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub bind: IpAddr,

    /// Maximum number of requests handled at the same time
    #[arg(long, default_value_t = DEFAULT_MAX_CLIENTS, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_clients: u32,

    /// Seed for reproducible delay and failure draws
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Cli {
    /// Combines the flags with the `PORT` environment variable.
    pub fn settings(&self) -> Result<ServerSettings, StartupError> {
        let env_port = std::env::var(PORT_ENV).ok();
        self.settings_with_env(env_port.as_deref())
    }

    /// Like [`Cli::settings`], with the `PORT` value passed in.
    pub fn settings_with_env(&self, env_port: Option<&str>) -> Result<ServerSettings, StartupError> {
        let port = resolve_port(self.port, env_port)?;
        Ok(ServerSettings {
            addr: SocketAddr::new(self.bind, port),
            max_clients: self.max_clients as usize,
            seed: self.seed,
        })
    }
}

/// Picks the listen port: the flag, then `PORT`, then [`DEFAULT_PORT`].
///
/// An empty `PORT` counts as unset. Anything else that is not a valid port
/// number is a startup error.
pub fn resolve_port(flag: Option<u16>, env_port: Option<&str>) -> Result<u16, StartupError> {
    if let Some(port) = flag {
        return Ok(port);
    }
    match env_port {
        None | Some("") => Ok(DEFAULT_PORT),
        Some(raw) => raw.parse().map_err(|source| StartupError::InvalidPort {
            value: raw.to_string(),
            source,
        }),
    }
}

/// Resolved startup settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    /// Address the listener binds to.
    pub addr: SocketAddr,
    /// Size of the admission gate.
    pub max_clients: usize,
    /// Seed for the shared random source, if reproducible draws are wanted.
    pub seed: Option<u64>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), DEFAULT_PORT),
            max_clients: DEFAULT_MAX_CLIENTS as usize,
            seed: None,
        }
    }
}
