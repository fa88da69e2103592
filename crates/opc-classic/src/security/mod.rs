//! DCOM process security
//!
//! - [`AuthenticationLevel`] / [`ImpersonationLevel`]: the security blanket values
//! - [`SecurityProvider`]: the once-per-process configuration primitive
//! - [`ApplicationInstance`]: the guard that calls it exactly once, plus the
//!   `time_as_utc` flag read by timestamp marshalling

mod level;
mod provider;
mod instance;
#[cfg(windows)]
mod com;

pub use level::{AuthenticationLevel, ImpersonationLevel};
pub use provider::{InProcessSecurityProvider, SecurityBlanket, SecurityProvider};
pub use instance::{
    ApplicationConfig, ApplicationInstance, InitializationState, TimeConfig,
    initialize_security, set_time_as_utc, time_as_utc,
};
#[cfg(windows)]
pub use com::ComSecurityProvider;
