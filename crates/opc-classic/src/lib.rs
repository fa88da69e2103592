//! OPC Classic client foundation layer
//!
//! Shared by the Data Access, Alarms & Events and Historical Data Access
//! clients, all of which run over DCOM.
//!
//! # Modules
//!
//! - [`security`]: one-time process security and the `time_as_utc` flag
//! - [`da`]: browse filters and node classification
//! - [`hda`]: time-stamped attribute values
//! - [`value`]: attribute payloads and their copy semantics
//! - [`com`]: COM data representations (`FILETIME`)
//!
//! # Example
//!
//! ```no_run
//! use opc_classic::{AttributeValue, AuthenticationLevel, ApplicationInstance, Value};
//!
//! // once, before any remote call
//! opc_classic::initialize_security(AuthenticationLevel::Integrity).unwrap();
//!
//! let mut reading = AttributeValue::new();
//! reading.set_value(vec![Value::from(1i32), Value::from(2i32)]);
//! let copy = reading.deep_clone().unwrap();
//!
//! let time = ApplicationInstance::global().time_config();
//! let filetime = copy.marshal_timestamp(&time).unwrap();
//! assert!(filetime.is_zero());
//! ```

pub mod error;
pub mod security;
pub mod da;
pub mod hda;
pub mod value;
pub mod com;

pub use error::{OpcError, Result};
pub use security::{
    ApplicationConfig, ApplicationInstance, AuthenticationLevel, ImpersonationLevel,
    InitializationState, InProcessSecurityProvider, SecurityBlanket, SecurityProvider,
    TimeConfig, initialize_security, set_time_as_utc, time_as_utc,
};
#[cfg(windows)]
pub use security::ComSecurityProvider;
pub use da::{BrowseFilter, Classify, NodeKind};
pub use hda::AttributeValue;
pub use value::{DeepClone, Value};
pub use com::FileTime;
