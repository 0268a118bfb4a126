//! Hot file lifecycle of a running dev server.
//!
//! The hot file is written once the server is listening and removed when the
//! process exits, whether normally or through a termination signal. Exit handlers
//! are bound at most once per lifecycle. A second signal while shutdown is still
//! in progress exits the process immediately.

use std::fmt;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use cubex_vite_schema::{HotFile, HotUrl};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::error::Result;
use crate::ui::{self, Banner};

/// Delay before the banner is printed, so the server's own startup lines come first.
pub const BANNER_DELAY: Duration = Duration::from_millis(100);

/// Termination signal that ended the dev server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitSignal {
    Interrupt,
    Terminate,
    Hangup,
    Quit,
}

impl ExitSignal {
    /// Shell-style exit status for a process ended by this signal.
    pub fn exit_code(self) -> i32 {
        128 + match self {
            ExitSignal::Hangup => 1,
            ExitSignal::Interrupt => 2,
            ExitSignal::Quit => 3,
            ExitSignal::Terminate => 15,
        }
    }
}

impl fmt::Display for ExitSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExitSignal::Interrupt => "SIGINT",
            ExitSignal::Terminate => "SIGTERM",
            ExitSignal::Hangup => "SIGHUP",
            ExitSignal::Quit => "SIGQUIT",
        })
    }
}

/// URL other processes should use to reach the dev server.
///
/// ```
/// use cubex_vite_cli::dev::dev_server_url;
///
/// let addr = "127.0.0.1:5173".parse().unwrap();
/// assert_eq!(dev_server_url(None, addr), "http://localhost:5173");
/// assert_eq!(dev_server_url(Some("https://assets.test"), addr), "https://assets.test");
/// ```
pub fn dev_server_url(origin: Option<&str>, addr: SocketAddr) -> String {
    match origin {
        Some(origin) => origin.to_string(),
        None => format!("http://localhost:{}", addr.port()),
    }
}

/// Owns the hot file for one dev server run.
#[derive(Debug)]
pub struct HotFileLifecycle {
    hot_file: HotFile,
    handlers_bound: bool,
    written: bool,
}

impl HotFileLifecycle {
    pub fn new(hot_file: HotFile) -> Self {
        Self {
            hot_file,
            handlers_bound: false,
            written: false,
        }
    }

    pub fn hot_file(&self) -> &HotFile {
        &self.hot_file
    }

    pub fn handlers_bound(&self) -> bool {
        self.handlers_bound
    }

    /// Install handlers for SIGINT, SIGTERM, SIGHUP and SIGQUIT (Ctrl+C off unix).
    ///
    /// The first signal removes the hot file and resolves the returned receiver.
    /// A second one exits the process with [`ExitSignal::exit_code`]. Returns `None` if handlers were already bound for this lifecycle. Must be
    /// called inside a tokio runtime.
    pub fn bind_exit_handlers(&mut self) -> Result<Option<oneshot::Receiver<ExitSignal>>> {
        if self.handlers_bound {
            return Ok(None);
        }

        let mut signals = ExitSignals::install()?;
        self.handlers_bound = true;

        let (tx, rx) = oneshot::channel();
        let hot_file = self.hot_file.clone();

        tokio::spawn(async move {
            let signal = signals.recv().await;
            tracing::debug!(%signal, "received exit signal");
            remove_hot_file(&hot_file);
            let _ = tx.send(signal);

            let again = signals.recv().await;
            tracing::warn!(signal = %again, "received second exit signal, forcing exit");
            std::process::exit(again.exit_code());
        });

        Ok(Some(rx))
    }

    /// Record that the server is listening on `addr`: write the hot file.
    ///
    /// The content is the dev server URL followed by the bundler `base`, trailing
    /// slash removed.
    pub fn on_listening(
        &mut self,
        origin: Option<&str>,
        addr: SocketAddr,
        base: &str,
    ) -> Result<HotUrl> {
        let url = self.hot_file.write(&dev_server_url(origin, addr), base)?;
        self.written = true;
        tracing::info!(path = %self.hot_file.path().display(), %url, "dev server is live");
        Ok(url)
    }

    /// Remove the hot file. Safe to call any number of times.
    ///
    /// Returns whether a file was removed.
    pub fn cleanup(&mut self) -> bool {
        self.written = false;
        remove_hot_file(&self.hot_file)
    }
}

impl Drop for HotFileLifecycle {
    fn drop(&mut self) {
        if self.written {
            self.cleanup();
        }
    }
}

fn remove_hot_file(hot_file: &HotFile) -> bool {
    match hot_file.remove() {
        Ok(removed) => removed,
        Err(e) => {
            tracing::warn!(error = %e, "failed to remove hot file");
            false
        }
    }
}

/// Print the banner after [`BANNER_DELAY`].
pub fn schedule_banner(banner: Banner) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(BANNER_DELAY).await;
        eprintln!("{}", banner.render(ui::colors_enabled()));
    })
}

#[cfg(unix)]
struct ExitSignals {
    interrupt: tokio::signal::unix::Signal,
    terminate: tokio::signal::unix::Signal,
    hangup: tokio::signal::unix::Signal,
    quit: tokio::signal::unix::Signal,
}

#[cfg(unix)]
impl ExitSignals {
    fn install() -> io::Result<Self> {
        use tokio::signal::unix::{signal, SignalKind};

        Ok(Self {
            interrupt: signal(SignalKind::interrupt())?,
            terminate: signal(SignalKind::terminate())?,
            hangup: signal(SignalKind::hangup())?,
            quit: signal(SignalKind::quit())?,
        })
    }

    async fn recv(&mut self) -> ExitSignal {
        tokio::select! {
            _ = self.interrupt.recv() => ExitSignal::Interrupt,
            _ = self.terminate.recv() => ExitSignal::Terminate,
            _ = self.hangup.recv() => ExitSignal::Hangup,
            _ = self.quit.recv() => ExitSignal::Quit,
        }
    }
}

#[cfg(not(unix))]
struct ExitSignals;

#[cfg(not(unix))]
impl ExitSignals {
    fn install() -> io::Result<Self> {
        Ok(Self)
    }

    async fn recv(&mut self) -> ExitSignal {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
        ExitSignal::Interrupt
    }
}
