//! Dev server settings.

use std::net::{IpAddr, SocketAddr, TcpListener};
use std::path::PathBuf;

use crate::error::{CliError, Result};
use crate::ui;

/// Port the bundler's dev server uses by default.
pub const DEFAULT_PORT: u16 = 5173;

/// How many ports after the requested one are tried.
const PORT_ATTEMPTS: u16 = 10;

#[derive(Debug, Clone)]
pub struct DevConfig {
    /// Directory served and searched for the hot file
    pub project_root: PathBuf,

    pub addr: SocketAddr,

    /// Explicit public origin (`server.origin`)
    pub origin: Option<String>,
}

impl DevConfig {
    /// Settings for a server on `host`, using `port` or the next free one.
    pub fn new(
        project_root: impl Into<PathBuf>,
        host: IpAddr,
        port: u16,
        origin: Option<String>,
    ) -> Result<Self> {
        Ok(Self {
            project_root: project_root.into(),
            addr: find_available_port(host, port)?,
            origin,
        })
    }
}

/// Find a bindable address, trying `requested_port` and then the next few ports.
///
/// Port `0` asks the OS for any free port.
pub fn find_available_port(host: IpAddr, requested_port: u16) -> Result<SocketAddr> {
    let addr = SocketAddr::new(host, requested_port);
    if requested_port == 0 || TcpListener::bind(addr).is_ok() {
        return Ok(addr);
    }

    for offset in 1..=PORT_ATTEMPTS {
        let port = requested_port.saturating_add(offset);
        let addr = SocketAddr::new(host, port);
        if TcpListener::bind(addr).is_ok() {
            ui::warning(&format!(
                "Port {requested_port} is busy, using port {port} instead"
            ));
            return Ok(addr);
        }
    }

    Err(CliError::Server(format!(
        "Ports {}-{} are all in use",
        requested_port,
        requested_port.saturating_add(PORT_ATTEMPTS)
    )))
}
