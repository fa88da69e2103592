//! Process-wide application instance
//!
//! Owns the one-time security initialization and the `time_as_utc`
//! marshalling flag. The transport layer is handed an
//! `&ApplicationInstance` (or uses [`ApplicationInstance::global`]).
//!
//! # Guard semantics
//!
//! The guard is marked as attempted when the first call *starts*. A
//! concurrent caller blocks until that attempt finishes. The outcome is
//! final: after a failure the provider is never called again, later calls
//! return `Ok(())`, and only [`ApplicationInstance::state`] still reports
//! the failure. A provider that panics counts as a failed attempt with
//! `E_FAIL`.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;

use tracing::{debug, error, info, warn};

use crate::error::{hresult, OpcError, Result};
use super::level::{AuthenticationLevel, ImpersonationLevel};
use super::provider::{SecurityBlanket, SecurityProvider};

/// Configuration for an application instance
#[derive(Clone, Debug)]
pub struct ApplicationConfig {
    /// Keep timestamps in UTC instead of converting to local time
    pub time_as_utc: bool,
    /// Impersonation level passed along with the authentication level
    pub impersonation: ImpersonationLevel,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            time_as_utc: false,
            impersonation: ImpersonationLevel::Identify,
        }
    }
}

impl ApplicationConfig {
    pub fn with_time_as_utc(mut self, time_as_utc: bool) -> Self {
        self.time_as_utc = time_as_utc;
        self
    }

    pub fn with_impersonation(mut self, impersonation: ImpersonationLevel) -> Self {
        self.impersonation = impersonation;
        self
    }
}

/// Observable state of the one-time security guard
#[derive(Debug, Clone)]
pub enum InitializationState {
    /// No initialization has been attempted
    Unset,
    /// The single attempt failed; it will not be retried
    Failed {
        level: AuthenticationLevel,
        error: OpcError,
    },
    /// Security is configured with this level for the rest of the process
    Committed(AuthenticationLevel),
}

impl InitializationState {
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Committed(_))
    }

    pub fn is_attempted(&self) -> bool {
        !matches!(self, Self::Unset)
    }
}

/// Read-only view of the time representation, taken by marshallers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeConfig {
    pub as_utc: bool,
}

impl TimeConfig {
    pub fn utc() -> Self {
        Self { as_utc: true }
    }

    pub fn local() -> Self {
        Self { as_utc: false }
    }
}

#[derive(Debug)]
struct Attempt {
    level: AuthenticationLevel,
    outcome: Result<()>,
}

/// Process configuration object
pub struct ApplicationInstance {
    provider: Box<dyn SecurityProvider>,
    impersonation: ImpersonationLevel,
    attempt: OnceLock<Attempt>,
    time_as_utc: AtomicBool,
}

static GLOBAL: OnceLock<ApplicationInstance> = OnceLock::new();

fn panicked(provider: &str, payload: Box<dyn Any + Send>) -> OpcError {
    let reason = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string());
    OpcError::Security {
        hresult: hresult::E_FAIL,
        message: format!("{} provider panicked: {}", provider, reason),
    }
}

impl ApplicationInstance {
    /// Create an instance with the default configuration
    pub fn new(provider: impl SecurityProvider + 'static) -> Self {
        Self::with_config(ApplicationConfig::default(), provider)
    }

    /// Create an instance with a custom configuration
    pub fn with_config(config: ApplicationConfig, provider: impl SecurityProvider + 'static) -> Self {
        Self {
            provider: Box::new(provider),
            impersonation: config.impersonation,
            attempt: OnceLock::new(),
            time_as_utc: AtomicBool::new(config.time_as_utc),
        }
    }

    /// The process-wide instance
    ///
    /// Uses COM security on Windows and the in-process provider elsewhere.
    pub fn global() -> &'static ApplicationInstance {
        GLOBAL.get_or_init(|| {
            #[cfg(windows)]
            let instance = Self::new(super::com::ComSecurityProvider::new());
            #[cfg(not(windows))]
            let instance = Self::new(super::provider::InProcessSecurityProvider::new());
            instance
        })
    }

    /// Initialize process security
    ///
    /// Only the first call reaches the provider; every later call is a
    /// no-op returning `Ok(())`, whatever `level` it passes.
    pub fn initialize_security(&self, level: AuthenticationLevel) -> Result<()> {
        let mut first = false;
        let attempt = self.attempt.get_or_init(|| {
            first = true;
            let blanket = SecurityBlanket::new(level, self.impersonation);
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.provider.initialize(&blanket)))
                .unwrap_or_else(|payload| Err(panicked(self.provider.name(), payload)));
            match &outcome {
                Ok(()) => info!(
                    provider = self.provider.name(),
                    authentication = %level,
                    impersonation = %self.impersonation,
                    "process security initialized"
                ),
                Err(e) => error!(
                    provider = self.provider.name(),
                    authentication = %level,
                    "process security initialization failed: {}", e
                ),
            }
            Attempt { level, outcome }
        });

        if first {
            return attempt.outcome.clone();
        }

        match &attempt.outcome {
            Ok(()) if attempt.level == level => {
                debug!(authentication = %level, "security already initialized");
            }
            Ok(()) => warn!(
                requested = %level,
                active = %attempt.level,
                "security already initialized, requested level ignored"
            ),
            Err(e) => warn!(
                requested = %level,
                "security initialization previously failed, not retrying: {}", e
            ),
        }
        Ok(())
    }

    pub fn state(&self) -> InitializationState {
        match self.attempt.get() {
            None => InitializationState::Unset,
            Some(Attempt { level, outcome: Ok(()) }) => InitializationState::Committed(*level),
            Some(Attempt { level, outcome: Err(e) }) => InitializationState::Failed {
                level: *level,
                error: e.clone(),
            },
        }
    }

    /// True once security has been committed
    pub fn is_initialized(&self) -> bool {
        self.state().is_committed()
    }

    /// The committed authentication level, if any
    pub fn authentication_level(&self) -> Option<AuthenticationLevel> {
        match self.attempt.get() {
            Some(Attempt { level, outcome: Ok(()) }) => Some(*level),
            _ => None,
        }
    }

    pub fn impersonation(&self) -> ImpersonationLevel {
        self.impersonation
    }

    /// Whether marshalling keeps timestamps in UTC
    pub fn time_as_utc(&self) -> bool {
        self.time_as_utc.load(Ordering::Relaxed)
    }

    pub fn set_time_as_utc(&self, value: bool) {
        let previous = self.time_as_utc.swap(value, Ordering::Relaxed);
        if previous != value {
            debug!(time_as_utc = value, "time representation changed");
        }
    }

    /// Snapshot of the time representation for one marshalling pass
    pub fn time_config(&self) -> TimeConfig {
        TimeConfig {
            as_utc: self.time_as_utc(),
        }
    }
}

impl std::fmt::Debug for ApplicationInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApplicationInstance")
            .field("provider", &self.provider.name())
            .field("impersonation", &self.impersonation)
            .field("state", &self.state())
            .field("time_as_utc", &self.time_as_utc())
            .finish()
    }
}

/// Initialize security for the process-wide instance
pub fn initialize_security(level: AuthenticationLevel) -> Result<()> {
    ApplicationInstance::global().initialize_security(level)
}

/// `time_as_utc` of the process-wide instance
pub fn time_as_utc() -> bool {
    ApplicationInstance::global().time_as_utc()
}

/// Set `time_as_utc` on the process-wide instance
pub fn set_time_as_utc(value: bool) {
    ApplicationInstance::global().set_time_as_utc(value)
}
