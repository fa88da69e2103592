//! OPC client error types

use thiserror::Error;

/// Result type for OPC foundation operations
pub type Result<T> = std::result::Result<T, OpcError>;

/// Errors raised by the OPC foundation layer
///
/// `Clone` so that the outcome of the one-time security attempt can be
/// kept in the guard and handed back to its caller.
#[derive(Debug, Clone, Error)]
pub enum OpcError {
    /// The process security primitive rejected the requested blanket
    #[error("security initialization failed: HRESULT 0x{hresult:08x}: {message}")]
    Security { hresult: u32, message: String },

    /// A payload's own clone capability failed
    #[error("clone failed: {0}")]
    Clone(String),

    /// A value could not be represented at the marshalling boundary
    #[error("marshaling error: {0}")]
    Marshal(String),

    /// Numeric value outside a closed enumeration
    #[error("invalid {kind} value: {value}")]
    InvalidEnumValue { kind: &'static str, value: u32 },

    /// Name outside a closed enumeration
    #[error("unknown {kind}: {name:?}")]
    UnknownVariant { kind: &'static str, name: String },
}

/// HRESULT codes surfaced by the COM security primitives
pub mod hresult {
    /// Operation successful
    pub const S_OK: u32 = 0x00000000;
    /// Operation successful, returning false
    pub const S_FALSE: u32 = 0x00000001;
    /// Unspecified error
    pub const E_FAIL: u32 = 0x80004005;
    /// Invalid argument
    pub const E_INVALIDARG: u32 = 0x80070057;
    /// Access denied
    pub const E_ACCESSDENIED: u32 = 0x80070005;
    /// Out of memory
    pub const E_OUTOFMEMORY: u32 = 0x8007000E;
    /// Security must be initialized before any interfaces are marshalled
    pub const RPC_E_TOO_LATE: u32 = 0x80010119;
    /// COM already initialized on this thread with a different concurrency model
    pub const RPC_E_CHANGED_MODE: u32 = 0x80010106;
}
