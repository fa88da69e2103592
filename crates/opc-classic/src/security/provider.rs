//! Process security primitives
//!
//! A [`SecurityProvider`] performs the actual, once-per-process
//! configuration of the transport's authentication posture. The
//! [`ApplicationInstance`](super::ApplicationInstance) guarantees it is
//! called at most once.

use std::sync::OnceLock;

use crate::error::Result;
use super::level::{AuthenticationLevel, ImpersonationLevel};

/// Security blanket applied to every remote call made by the process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SecurityBlanket {
    /// Default authentication level
    pub authentication: AuthenticationLevel,
    /// Default impersonation level
    pub impersonation: ImpersonationLevel,
}

impl SecurityBlanket {
    pub fn new(authentication: AuthenticationLevel, impersonation: ImpersonationLevel) -> Self {
        Self {
            authentication,
            impersonation,
        }
    }
}

/// Low-level process security configuration
///
/// Implementations may fail; a failure is fatal for the process and is
/// never retried by the caller.
pub trait SecurityProvider: Send + Sync {
    /// Short name used in log output
    fn name(&self) -> &'static str;

    /// Configure process security with `blanket`
    fn initialize(&self, blanket: &SecurityBlanket) -> Result<()>;
}

/// Provider for the in-process RPC stack
///
/// Nothing is negotiated with the operating system; the blanket is
/// recorded so a pure-Rust transport can read it back when it binds.
#[derive(Debug, Default)]
pub struct InProcessSecurityProvider {
    blanket: OnceLock<SecurityBlanket>,
}

impl InProcessSecurityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Blanket recorded by the first successful `initialize`
    pub fn blanket(&self) -> Option<SecurityBlanket> {
        self.blanket.get().copied()
    }
}

impl SecurityProvider for InProcessSecurityProvider {
    fn name(&self) -> &'static str {
        "in-process"
    }

    fn initialize(&self, blanket: &SecurityBlanket) -> Result<()> {
        // the first blanket sticks, like CoInitializeSecurity
        let _ = self.blanket.set(*blanket);
        Ok(())
    }
}
