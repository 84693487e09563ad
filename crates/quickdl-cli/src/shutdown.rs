//! Exit signals: SIGINT everywhere, SIGTERM and SIGHUP on unix.

use std::io;

#[cfg(unix)]
use tokio::signal::unix::{signal, Signal, SignalKind};

/// Signal that ended the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitSignal {
    Interrupt,
    Terminate,
    Hangup,
}

impl ExitSignal {
    pub fn name(self) -> &'static str {
        match self {
            ExitSignal::Interrupt => "SIGINT",
            ExitSignal::Terminate => "SIGTERM",
            ExitSignal::Hangup => "SIGHUP",
        }
    }

    /// Shell convention: 128 + signal number.
    pub fn exit_code(self) -> i32 {
        match self {
            ExitSignal::Interrupt => 130,
            ExitSignal::Terminate => 143,
            ExitSignal::Hangup => 129,
        }
    }
}

/// Handlers installed up front, so a signal arriving before the first poll is not lost.
pub struct ExitSignals {
    #[cfg(unix)]
    interrupt: Signal,
    #[cfg(unix)]
    terminate: Signal,
    #[cfg(unix)]
    hangup: Signal,
}

impl ExitSignals {
    /// Must be called inside the tokio runtime.
    #[cfg(unix)]
    pub fn install() -> io::Result<Self> {
        Ok(Self {
            interrupt: signal(SignalKind::interrupt())?,
            terminate: signal(SignalKind::terminate())?,
            hangup: signal(SignalKind::hangup())?,
        })
    }

    #[cfg(not(unix))]
    pub fn install() -> io::Result<Self> {
        Ok(Self {})
    }

    /// Waits for the next exit signal.
    #[cfg(unix)]
    pub async fn recv(&mut self) -> ExitSignal {
        tokio::select! {
            _ = self.interrupt.recv() => ExitSignal::Interrupt,
            _ = self.terminate.recv() => ExitSignal::Terminate,
            _ = self.hangup.recv() => ExitSignal::Hangup,
        }
    }

    #[cfg(not(unix))]
    pub async fn recv(&mut self) -> ExitSignal {
        match tokio::signal::ctrl_c().await {
            Ok(()) => ExitSignal::Interrupt,
            Err(e) => {
                tracing::warn!("ctrl-c handler unavailable: {}", e);
                std::future::pending().await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn names_and_exit_codes() {
        assert_eq!(ExitSignal::Interrupt.name(), "SIGINT");
        assert_eq!(ExitSignal::Terminate.name(), "SIGTERM");
        assert_eq!(ExitSignal::Hangup.name(), "SIGHUP");
        assert_eq!(ExitSignal::Interrupt.exit_code(), 130);
        assert_eq!(ExitSignal::Terminate.exit_code(), 143);
        assert_eq!(ExitSignal::Hangup.exit_code(), 129);
    }

    #[tokio::test]
    async fn handlers_wait_until_a_signal_arrives() {
        let mut signals = ExitSignals::install().unwrap();
        let idle = tokio::time::timeout(Duration::from_millis(50), signals.recv()).await;
        assert!(idle.is_err());

        #[cfg(unix)]
        {
            let pid = std::process::id().to_string();
            let Ok(status) = std::process::Command::new("kill").args(["-HUP", &pid]).status()
            else {
                // No `kill` binary on this host.
                return;
            };
            assert!(status.success());
            let got = tokio::time::timeout(Duration::from_secs(5), signals.recv())
                .await
                .unwrap();
            assert_eq!(got, ExitSignal::Hangup);
        }
    }
}
